//! The `kentei validate` command.

use std::path::PathBuf;

use anyhow::Result;

use kentei_core::blueprint::Blueprint;
use kentei_core::sampler;

pub fn execute(pool_path: PathBuf) -> Result<()> {
    let pool = kentei_core::pool::load_pool(&pool_path)?;
    println!("Pool: {} ({} questions)", pool_path.display(), pool.len());

    let warnings = sampler::inspect_pool(&pool, &Blueprint::standard());
    for w in &warnings {
        let prefix = w
            .question_id
            .map(|id| format!("  [{id}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("Pool is ready for assembly.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
