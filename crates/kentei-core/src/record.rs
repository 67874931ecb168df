//! Stored exam results and the ranking board.
//!
//! A submitted attempt becomes an [`ExamRecord`]: display name, score, and
//! a replayable answer log. The backend keeps these and serves the top
//! scores back as [`RankingEntry`] rows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::RecordError;
use crate::score::{QuestionVerdict, ScoreCard};

/// Longest accepted display name, counted in characters.
pub const MAX_NAME_CHARS: usize = 20;

/// How many rows the ranking board shows.
pub const RANKING_LIMIT: usize = 10;

/// The per-question answer log stored alongside the score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultDetails {
    pub answers: Vec<QuestionVerdict>,
}

/// One submitted result, as sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamRecord {
    pub name: String,
    pub score: u32,
    pub details: ResultDetails,
}

impl ExamRecord {
    /// Build a record from a graded attempt.
    pub fn from_card(name: &str, card: &ScoreCard) -> Result<Self, RecordError> {
        let name = validate_name(name)?;
        Ok(ExamRecord {
            name,
            score: card.score,
            details: ResultDetails {
                answers: card.verdicts.clone(),
            },
        })
    }
}

/// One row of the ranking board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingEntry {
    pub name: String,
    pub score: u32,
    pub created_at: DateTime<Utc>,
}

/// Validate and normalize a display name.
///
/// The name is trimmed; the length cap counts characters, not bytes, so a
/// 20-character Japanese name passes.
pub fn validate_name(name: &str) -> Result<String, RecordError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(RecordError::EmptyName);
    }
    let len = trimmed.chars().count();
    if len > MAX_NAME_CHARS {
        return Err(RecordError::NameTooLong {
            len,
            max: MAX_NAME_CHARS,
        });
    }
    Ok(trimmed.to_string())
}
