//! The `kentei ranking` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use kentei_core::record::{RankingEntry, RANKING_LIMIT};
use kentei_store::config::load_config_from;

pub async fn execute(store_name: Option<String>, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let store = super::connect_store(&config, store_name.as_deref())?;

    let entries = store
        .fetch_ranking(RANKING_LIMIT)
        .await
        .context("failed to fetch the ranking")?;

    if entries.is_empty() {
        println!("No results posted yet.");
        return Ok(());
    }

    print_ranking(&entries);
    Ok(())
}

fn print_ranking(entries: &[RankingEntry]) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["Rank", "Name", "Score", "Submitted"]);
    for (position, entry) in entries.iter().enumerate() {
        table.add_row(vec![
            Cell::new(position + 1),
            Cell::new(&entry.name),
            Cell::new(entry.score),
            Cell::new(
                entry
                    .created_at
                    .with_timezone(&chrono::Local)
                    .format("%Y-%m-%d %H:%M"),
            ),
        ]);
    }
    println!("{table}");
}
