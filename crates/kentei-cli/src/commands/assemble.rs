//! The `kentei assemble` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use kentei_core::blueprint::Blueprint;
use kentei_core::model::ExamPaper;

pub fn execute(
    pool_path: PathBuf,
    seed: Option<u64>,
    lenient: bool,
    output: Option<PathBuf>,
) -> Result<()> {
    let pool = kentei_core::pool::load_pool(&pool_path)?;
    anyhow::ensure!(!pool.is_empty(), "the question pool is empty");

    let paper = super::build_paper(&pool, &Blueprint::standard(), seed, lenient)?;

    println!(
        "Assembled {} questions from a pool of {}.",
        paper.len(),
        pool.len()
    );
    print_composition(&paper);

    if let Some(path) = &output {
        let json = serde_json::to_string_pretty(&paper).context("failed to encode the paper")?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write paper file: {}", path.display()))?;
        println!("Paper saved to {}.", path.display());
    }

    Ok(())
}

fn print_composition(paper: &ExamPaper) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["Category", "Questions"]);
    for (category, count) in paper.composition() {
        table.add_row(vec![Cell::new(category), Cell::new(count)]);
    }
    println!("{table}");
}
