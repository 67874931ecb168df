//! The `kentei fetch` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use kentei_core::blueprint::Blueprint;
use kentei_core::model::Question;
use kentei_store::config::load_config_from;

pub async fn execute(
    store_name: Option<String>,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let store = super::connect_store(&config, store_name.as_deref())?;

    let pool = store
        .fetch_pool()
        .await
        .context("failed to fetch the question pool")?;
    anyhow::ensure!(!pool.is_empty(), "the question pool is empty");

    println!(
        "Fetched {} questions from the {} store.",
        pool.len(),
        store.name()
    );

    let blueprint = Blueprint::standard();
    print_counts(&pool, &blueprint);

    let feasible = blueprint.categories().all(|category| {
        let available = pool.iter().filter(|q| q.category == category).count();
        available >= blueprint.quota(category)
    });
    if feasible {
        println!(
            "The pool can fill the standard {}-question exam.",
            blueprint.total()
        );
    } else {
        println!("The pool cannot fill the standard exam; see the counts above.");
    }

    if let Some(path) = &output {
        kentei_core::pool::save_pool(path, &pool)?;
        println!("Pool saved to {}.", path.display());
    }

    Ok(())
}

fn print_counts(pool: &[Question], blueprint: &Blueprint) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["Category", "Available", "Quota"]);
    for category in blueprint.categories() {
        let available = pool.iter().filter(|q| q.category == category).count();
        table.add_row(vec![
            Cell::new(category),
            Cell::new(available),
            Cell::new(blueprint.quota(category)),
        ]);
    }
    println!("{table}");
}
