//! The `kentei submit` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use kentei_core::handoff::HandoffSlot;
use kentei_core::record::ExamRecord;
use kentei_store::config::load_config_from;

pub async fn execute(
    name: String,
    store_name: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let slot = HandoffSlot::new(&config.handoff_file);

    let snapshot = super::read_slot(&slot)?;
    let card = snapshot.grade();
    let record = ExamRecord::from_card(&name, &card)?;

    let store = super::connect_store(&config, store_name.as_deref())?;
    store
        .store_record(&record)
        .await
        .context("submission failed; the session is kept, retry once the store is reachable")?;

    // Clear the slot only after the store accepted the record.
    slot.discard()?;
    println!(
        "Submitted: {} scored {} / {}.",
        record.name, record.score, card.total
    );
    println!("Session cleared.");

    Ok(())
}
