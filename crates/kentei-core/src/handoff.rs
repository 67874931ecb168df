//! The pending-result slot between the exam and results phases.
//!
//! A finished session is serialized into a small JSON file so grading and
//! submission can run as separate commands. The slot is consume-once:
//! `peek` reads without clearing, `take` reads and clears, `discard` is the
//! explicit opt-out. A failed submission leaves the slot intact so the
//! attempt can be retried.

use std::path::{Path, PathBuf};

use crate::error::HandoffError;
use crate::session::SessionSnapshot;

/// Default slot path, relative to the working directory.
pub const DEFAULT_HANDOFF_FILE: &str = "kentei-session.json";

/// A consume-once slot holding one finished session.
#[derive(Debug, Clone)]
pub struct HandoffSlot {
    path: PathBuf,
}

impl HandoffSlot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True when a pending result is waiting.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Write the snapshot, replacing any earlier pending result.
    pub fn store(&self, snapshot: &SessionSnapshot) -> Result<(), HandoffError> {
        let json = serde_json::to_string_pretty(snapshot)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }

    /// Read the pending result without consuming it.
    pub fn peek(&self) -> Result<SessionSnapshot, HandoffError> {
        if !self.path.exists() {
            return Err(HandoffError::Missing {
                path: self.path.display().to_string(),
            });
        }
        let json = std::fs::read_to_string(&self.path)?;
        let snapshot = serde_json::from_str(&json)?;
        Ok(snapshot)
    }

    /// Read and clear the pending result.
    pub fn take(&self) -> Result<SessionSnapshot, HandoffError> {
        let snapshot = self.peek()?;
        std::fs::remove_file(&self.path)?;
        Ok(snapshot)
    }

    /// Clear the pending result without reading it.
    pub fn discard(&self) -> Result<(), HandoffError> {
        if !self.path.exists() {
            return Err(HandoffError::Missing {
                path: self.path.display().to_string(),
            });
        }
        std::fs::remove_file(&self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, Choice, ExamPaper, Options, Question};
    use crate::session::{ExamSession, FinishReason};

    fn make_snapshot() -> SessionSnapshot {
        let paper = ExamPaper {
            questions: vec![Question {
                id: 0,
                category: Category::Knowledge,
                text: "What shape is a typhoon eye on satellite imagery?".into(),
                options: Options {
                    a: "Ring".into(),
                    b: "Spiral".into(),
                    c: "Wedge".into(),
                    d: "Band".into(),
                },
                answer: Choice::A,
                explanation: None,
                theme: None,
                grade: None,
                note: None,
            }],
        };
        let mut session = ExamSession::with_time_limit(paper, 60);
        session.start().unwrap();
        session.select(Choice::A).unwrap();
        session.finish(FinishReason::Submitted).unwrap();
        session.into_snapshot().unwrap()
    }

    fn slot_in(dir: &tempfile::TempDir) -> HandoffSlot {
        HandoffSlot::new(dir.path().join("session.json"))
    }

    #[test]
    fn peek_does_not_consume() {
        let dir = tempfile::tempdir().unwrap();
        let slot = slot_in(&dir);

        let snapshot = make_snapshot();
        slot.store(&snapshot).unwrap();

        let first = slot.peek().unwrap();
        let second = slot.peek().unwrap();
        assert_eq!(first, snapshot);
        assert_eq!(second, snapshot);
        assert!(slot.exists());
    }

    #[test]
    fn take_consumes() {
        let dir = tempfile::tempdir().unwrap();
        let slot = slot_in(&dir);

        slot.store(&make_snapshot()).unwrap();
        slot.take().unwrap();
        assert!(!slot.exists());

        let err = slot.take().unwrap_err();
        assert!(matches!(err, HandoffError::Missing { .. }));
    }

    #[test]
    fn missing_slot_reports_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let slot = slot_in(&dir);

        let err = slot.peek().unwrap_err();
        assert!(matches!(err, HandoffError::Missing { .. }));
        assert!(err.to_string().contains("session.json"));
    }

    #[test]
    fn corrupt_slot_is_an_encoding_error() {
        let dir = tempfile::tempdir().unwrap();
        let slot = slot_in(&dir);
        std::fs::write(slot.path(), "{ truncated").unwrap();

        let err = slot.peek().unwrap_err();
        assert!(matches!(err, HandoffError::Encoding(_)));
    }

    #[test]
    fn discard_clears_without_reading() {
        let dir = tempfile::tempdir().unwrap();
        let slot = slot_in(&dir);

        slot.store(&make_snapshot()).unwrap();
        slot.discard().unwrap();
        assert!(!slot.exists());

        let err = slot.discard().unwrap_err();
        assert!(matches!(err, HandoffError::Missing { .. }));
    }

    #[test]
    fn store_overwrites_an_earlier_result() {
        let dir = tempfile::tempdir().unwrap();
        let slot = slot_in(&dir);

        let first = make_snapshot();
        let second = make_snapshot();
        slot.store(&first).unwrap();
        slot.store(&second).unwrap();

        let loaded = slot.peek().unwrap();
        assert_eq!(loaded.id, second.id);
        assert_ne!(loaded.id, first.id);
    }
}
