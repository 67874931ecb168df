//! The `kentei grade` command.

use std::path::PathBuf;

use anyhow::Result;

use kentei_core::handoff::HandoffSlot;
use kentei_store::config::load_config_from;

pub fn execute(review: bool, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let slot = HandoffSlot::new(&config.handoff_file);

    // Peek, never take: grading is repeatable until the result is
    // submitted or discarded.
    let snapshot = super::read_slot(&slot)?;
    let card = snapshot.grade();

    println!(
        "Exam {} ({})",
        snapshot.id,
        super::reason_label(snapshot.finish_reason)
    );
    println!();
    print!(
        "{}",
        kentei_report::render_summary(&card, snapshot.time_used_secs)
    );

    if review {
        println!();
        print!("{}", kentei_report::render_review(&snapshot.paper, &card));
    }

    Ok(())
}
