//! Typed errors for the exam engine.

use thiserror::Error;

use crate::model::Category;

/// Errors from blueprint construction and position lookup.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BlueprintError {
    /// A position beyond the end of the exam was looked up.
    #[error("index {index} is out of range for a {total}-question exam")]
    IndexOutOfRange { index: usize, total: usize },

    /// A category appears twice in a custom quota table.
    #[error("category {0} appears more than once in the quota table")]
    DuplicateCategory(Category),

    /// A custom quota table contains a zero quota.
    #[error("category {0} has a zero quota")]
    ZeroQuota(Category),
}

/// Errors from strict exam assembly.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AssemblyError {
    /// A category pool cannot fill its quota.
    #[error("category {category} has {available} questions, {required} required")]
    InsufficientPool {
        category: Category,
        available: usize,
        required: usize,
    },
}

/// Errors from session operations performed in the wrong state.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// The session has not been started yet.
    #[error("the session has not been started")]
    NotStarted,

    /// `start` was called a second time.
    #[error("the session was already started")]
    AlreadyStarted,

    /// The session is finished; the answer sheet is frozen.
    #[error("the session is finished; answers can no longer change")]
    AlreadyFinished,

    /// A snapshot was requested before the session finished.
    #[error("the session has not finished yet")]
    NotFinished,

    /// A navigation or answer target beyond the paper.
    #[error("question index {index} is out of range for a {total}-question paper")]
    IndexOutOfRange { index: usize, total: usize },
}

/// Errors from the hand-off slot between the exam and results phases.
#[derive(Debug, Error)]
pub enum HandoffError {
    /// No snapshot is parked in the slot. Callers map this to
    /// "go back to the start" behavior.
    #[error("no finished exam found at {path}")]
    Missing { path: String },

    #[error("failed to access the hand-off slot: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid hand-off snapshot: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// Errors validating a result before submission.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("display name must not be empty")]
    EmptyName,

    #[error("display name must be at most {max} characters, got {len}")]
    NameTooLong { len: usize, max: usize },
}
