//! The exam session state machine.
//!
//! One attempt moves `NotStarted -> InProgress -> Finished`. While in
//! progress the session owns the answer sheet and the countdown; every
//! mutator checks the state first, and once finished the sheet is frozen.
//! The countdown advances through [`ExamSession::tick`], one second per
//! call, and reaching zero finishes the session exactly once.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::SessionError;
use crate::model::{AnswerSheet, Choice, ExamPaper, Question};
use crate::score::{self, ScoreCard};

/// Default session length: 60 minutes.
pub const DEFAULT_TIME_LIMIT_SECS: u64 = 60 * 60;

/// Lifecycle of one exam attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    NotStarted,
    InProgress,
    Finished,
}

/// How a session reached `Finished`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    /// The taker confirmed submission on the final question.
    Submitted,
    /// The countdown reached zero.
    TimeExpired,
    /// The taker quit early; the attempt is still graded.
    Aborted,
}

/// Result of one countdown step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Still in progress; seconds left after this step.
    Running { remaining_secs: u64 },
    /// This step hit zero and finished the session. Reported exactly once;
    /// the driver should stop its interval on seeing it.
    Expired,
    /// The session is not in progress; nothing happened.
    Halted,
}

/// A single exam attempt: paper, answers, cursor, and countdown.
#[derive(Debug, Clone)]
pub struct ExamSession {
    id: Uuid,
    paper: ExamPaper,
    answers: AnswerSheet,
    cursor: usize,
    time_limit_secs: u64,
    remaining_secs: u64,
    state: SessionState,
    finish_reason: Option<FinishReason>,
}

impl ExamSession {
    /// A session over `paper` with the default 60-minute limit.
    pub fn new(paper: ExamPaper) -> Self {
        Self::with_time_limit(paper, DEFAULT_TIME_LIMIT_SECS)
    }

    pub fn with_time_limit(paper: ExamPaper, time_limit_secs: u64) -> Self {
        ExamSession {
            id: Uuid::new_v4(),
            paper,
            answers: AnswerSheet::new(),
            cursor: 0,
            time_limit_secs,
            remaining_secs: time_limit_secs,
            state: SessionState::NotStarted,
            finish_reason: None,
        }
    }

    /// Identifier for this attempt, carried through to the snapshot.
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn paper(&self) -> &ExamPaper {
        &self.paper
    }

    pub fn answers(&self) -> &AnswerSheet {
        &self.answers
    }

    /// Zero-based position of the question currently shown.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.paper.question(self.cursor)
    }

    pub fn is_last_question(&self) -> bool {
        self.cursor + 1 == self.paper.len()
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    /// Seconds consumed so far.
    pub fn time_used_secs(&self) -> u64 {
        self.time_limit_secs - self.remaining_secs
    }

    pub fn finish_reason(&self) -> Option<FinishReason> {
        self.finish_reason
    }

    /// Questions without a recorded answer. Callers use this to confirm
    /// before an explicit finish; the session never blocks one.
    pub fn unanswered(&self) -> usize {
        self.paper
            .questions
            .iter()
            .filter(|q| self.answers.selected(q.id).is_none())
            .count()
    }

    fn ensure_in_progress(&self) -> Result<(), SessionError> {
        match self.state {
            SessionState::NotStarted => Err(SessionError::NotStarted),
            SessionState::Finished => Err(SessionError::AlreadyFinished),
            SessionState::InProgress => Ok(()),
        }
    }

    /// Begin the attempt and arm the countdown.
    pub fn start(&mut self) -> Result<(), SessionError> {
        match self.state {
            SessionState::NotStarted => {
                self.state = SessionState::InProgress;
                Ok(())
            }
            _ => Err(SessionError::AlreadyStarted),
        }
    }

    /// Record an answer for the current question.
    pub fn select(&mut self, choice: Choice) -> Result<(), SessionError> {
        self.select_at(self.cursor, choice)
    }

    /// Record an answer for the question at `index`.
    pub fn select_at(&mut self, index: usize, choice: Choice) -> Result<(), SessionError> {
        self.ensure_in_progress()?;
        let question = self
            .paper
            .question(index)
            .ok_or(SessionError::IndexOutOfRange {
                index,
                total: self.paper.len(),
            })?;
        self.answers.record(question.id, choice);
        Ok(())
    }

    /// Move to the next question. `Ok(false)` when already on the last one.
    pub fn advance(&mut self) -> Result<bool, SessionError> {
        self.ensure_in_progress()?;
        if self.cursor + 1 < self.paper.len() {
            self.cursor += 1;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Move to the previous question. `Ok(false)` when already on the first.
    pub fn retreat(&mut self) -> Result<bool, SessionError> {
        self.ensure_in_progress()?;
        if self.cursor > 0 {
            self.cursor -= 1;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Jump straight to a question.
    pub fn jump(&mut self, index: usize) -> Result<(), SessionError> {
        self.ensure_in_progress()?;
        if index < self.paper.len() {
            self.cursor = index;
            Ok(())
        } else {
            Err(SessionError::IndexOutOfRange {
                index,
                total: self.paper.len(),
            })
        }
    }

    /// One countdown second.
    ///
    /// Hitting zero finishes the session with [`FinishReason::TimeExpired`]
    /// and reports [`TickOutcome::Expired`] exactly once; every later call
    /// is a no-op `Halted`.
    pub fn tick(&mut self) -> TickOutcome {
        if self.state != SessionState::InProgress {
            return TickOutcome::Halted;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.state = SessionState::Finished;
            self.finish_reason = Some(FinishReason::TimeExpired);
            TickOutcome::Expired
        } else {
            TickOutcome::Running {
                remaining_secs: self.remaining_secs,
            }
        }
    }

    /// End the attempt. Freezes the answer sheet.
    pub fn finish(&mut self, reason: FinishReason) -> Result<(), SessionError> {
        self.ensure_in_progress()?;
        self.state = SessionState::Finished;
        self.finish_reason = Some(reason);
        Ok(())
    }

    /// Consume a finished session into its hand-off snapshot.
    pub fn into_snapshot(self) -> Result<SessionSnapshot, SessionError> {
        let finish_reason = self.finish_reason.ok_or(SessionError::NotFinished)?;
        Ok(SessionSnapshot {
            id: self.id,
            paper: self.paper,
            answers: self.answers,
            time_used_secs: self.time_limit_secs - self.remaining_secs,
            finish_reason,
        })
    }
}

/// The hand-off payload between the exam phase and the results phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub id: Uuid,
    pub paper: ExamPaper,
    pub answers: AnswerSheet,
    pub time_used_secs: u64,
    pub finish_reason: FinishReason,
}

impl SessionSnapshot {
    /// Grade the snapshot. Safe to call repeatedly.
    pub fn grade(&self) -> ScoreCard {
        score::grade(&self.paper, &self.answers)
    }
}
