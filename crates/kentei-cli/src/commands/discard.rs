//! The `kentei discard` command.

use std::path::PathBuf;

use anyhow::Result;

use kentei_core::error::HandoffError;
use kentei_core::handoff::HandoffSlot;
use kentei_store::config::load_config_from;

pub fn execute(config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let slot = HandoffSlot::new(&config.handoff_file);

    match slot.discard() {
        Ok(()) => {
            println!("Pending result discarded.");
            Ok(())
        }
        Err(HandoffError::Missing { .. }) => anyhow::bail!("no finished exam to discard"),
        Err(e) => Err(e.into()),
    }
}
