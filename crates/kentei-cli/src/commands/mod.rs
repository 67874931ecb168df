//! Subcommand implementations.

pub mod assemble;
pub mod discard;
pub mod exam;
pub mod fetch;
pub mod grade;
pub mod init;
pub mod ranking;
pub mod submit;
pub mod validate;

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;

use kentei_core::blueprint::Blueprint;
use kentei_core::error::HandoffError;
use kentei_core::handoff::HandoffSlot;
use kentei_core::model::{ExamPaper, Question};
use kentei_core::sampler;
use kentei_core::session::{FinishReason, SessionSnapshot};
use kentei_store::{KenteiConfig, QuestionStore};

/// Connect to a named store from the config, defaulting to `default_store`.
fn connect_store(config: &KenteiConfig, name: Option<&str>) -> Result<Box<dyn QuestionStore>> {
    let name = name.unwrap_or(&config.default_store);
    match config.stores.get(name) {
        Some(store_config) => kentei_store::connect(name, store_config),
        None => anyhow::bail!(
            "store '{}' not found in config. Available: {:?}",
            name,
            config.stores.keys().collect::<Vec<_>>()
        ),
    }
}

/// Assemble a paper, seeded when requested, printing any shortfalls.
fn build_paper(
    pool: &[Question],
    blueprint: &Blueprint,
    seed: Option<u64>,
    lenient: bool,
) -> Result<ExamPaper> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    if lenient {
        let report = sampler::assemble_lenient(pool, blueprint, &mut rng);
        for shortfall in &report.shortfalls {
            eprintln!(
                "Warning: category {} has {} questions, {} required; the exam will be shorter.",
                shortfall.category, shortfall.available, shortfall.required
            );
        }
        Ok(report.paper)
    } else {
        sampler::assemble(pool, blueprint, &mut rng).context("failed to assemble the exam")
    }
}

/// Read the pending result, mapping an empty slot to a pointer back at
/// `kentei exam`.
fn read_slot(slot: &HandoffSlot) -> Result<SessionSnapshot> {
    match slot.peek() {
        Ok(snapshot) => Ok(snapshot),
        Err(HandoffError::Missing { .. }) => {
            anyhow::bail!("no finished exam to work with; run `kentei exam` first")
        }
        Err(e) => Err(e.into()),
    }
}

fn reason_label(reason: FinishReason) -> &'static str {
    match reason {
        FinishReason::Submitted => "handed in",
        FinishReason::TimeExpired => "time expired",
        FinishReason::Aborted => "aborted",
    }
}
