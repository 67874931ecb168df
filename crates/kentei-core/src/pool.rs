//! JSON question pool files.
//!
//! Loads and saves question pools as local JSON snapshots, so assembly and
//! practice runs can work offline from a previously fetched pool.

use std::path::Path;

use anyhow::{Context, Result};

use crate::model::Question;

/// Load a question pool from a JSON file.
pub fn load_pool(path: &Path) -> Result<Vec<Question>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read pool file: {}", path.display()))?;

    parse_pool_str(&content, path)
}

/// Parse a JSON string into a question pool (useful for testing).
pub fn parse_pool_str(content: &str, source_path: &Path) -> Result<Vec<Question>> {
    let questions: Vec<Question> = serde_json::from_str(content)
        .with_context(|| format!("failed to parse pool JSON: {}", source_path.display()))?;

    Ok(questions)
}

/// Write a question pool to a JSON file, overwriting any existing snapshot.
pub fn save_pool(path: &Path, questions: &[Question]) -> Result<()> {
    let json = serde_json::to_string_pretty(questions)
        .context("failed to encode pool JSON")?;

    std::fs::write(path, json)
        .with_context(|| format!("failed to write pool file: {}", path.display()))?;

    Ok(())
}
