//! Core data model types for the exam engine.
//!
//! These are the fundamental types the whole system works with: questions,
//! the assembled exam paper, and the answer sheet a session fills in.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// One of the four topic groups every question is tagged with.
///
/// `ALL` lists them in exam block order; the assembled paper always keeps
/// that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Knowledge,
    Disaster,
    Life,
    Culture,
}

impl Category {
    /// All categories in exam block order.
    pub const ALL: [Category; 4] = [
        Category::Knowledge,
        Category::Disaster,
        Category::Life,
        Category::Culture,
    ];
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Knowledge => write!(f, "knowledge"),
            Category::Disaster => write!(f, "disaster"),
            Category::Life => write!(f, "life"),
            Category::Culture => write!(f, "culture"),
        }
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "knowledge" => Ok(Category::Knowledge),
            "disaster" => Ok(Category::Disaster),
            "life" => Ok(Category::Life),
            "culture" => Ok(Category::Culture),
            other => Err(format!("unknown category: {other}")),
        }
    }
}

/// One of the four answer option tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Choice {
    A,
    B,
    C,
    D,
}

impl Choice {
    /// All tags in display order.
    pub const ALL: [Choice; 4] = [Choice::A, Choice::B, Choice::C, Choice::D];
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Choice::A => write!(f, "A"),
            Choice::B => write!(f, "B"),
            Choice::C => write!(f, "C"),
            Choice::D => write!(f, "D"),
        }
    }
}

impl FromStr for Choice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "A" => Ok(Choice::A),
            "B" => Ok(Choice::B),
            "C" => Ok(Choice::C),
            "D" => Ok(Choice::D),
            other => Err(format!("unknown option tag: {other}")),
        }
    }
}

/// The four option texts of a question, indexed by [`Choice`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Options {
    pub a: String,
    pub b: String,
    pub c: String,
    pub d: String,
}

impl Options {
    /// The option text behind a tag.
    pub fn text(&self, choice: Choice) -> &str {
        match choice {
            Choice::A => &self.a,
            Choice::B => &self.b,
            Choice::C => &self.c,
            Choice::D => &self.d,
        }
    }

    /// True when every option has non-blank text.
    pub fn is_complete(&self) -> bool {
        Choice::ALL.iter().all(|c| !self.text(*c).trim().is_empty())
    }
}

/// A single question from the pool. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Numeric identifier assigned by the pool store.
    pub id: u32,
    /// Topic group the question belongs to.
    pub category: Category,
    /// The question text.
    pub text: String,
    /// The four option texts.
    pub options: Options,
    /// The correct option tag.
    pub answer: Choice,
    /// Explanation shown in the post-exam review.
    #[serde(default)]
    pub explanation: Option<String>,
    /// Editorial theme the question was written under.
    #[serde(default)]
    pub theme: Option<String>,
    /// Certification grade the question targets.
    #[serde(default)]
    pub grade: Option<String>,
    /// Free-form author note.
    #[serde(default)]
    pub note: Option<String>,
}

/// An assembled, ordered exam.
///
/// Ordering is significant: the position of a question decides which
/// category block it sits in, and navigation and the countdown both key
/// off position downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamPaper {
    pub questions: Vec<Question>,
}

impl ExamPaper {
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// The question at a zero-based position.
    pub fn question(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    /// Question counts per category, in block order.
    pub fn composition(&self) -> Vec<(Category, usize)> {
        Category::ALL
            .iter()
            .map(|category| {
                let count = self
                    .questions
                    .iter()
                    .filter(|q| q.category == *category)
                    .count();
                (*category, count)
            })
            .collect()
    }
}

/// Answers collected during a session, keyed by question id.
///
/// An absent entry means "unanswered". The sheet itself is a plain map;
/// state gating lives in [`crate::session::ExamSession`], which owns the
/// sheet for the duration of an attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSheet {
    answers: HashMap<u32, Choice>,
}

impl AnswerSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record (or overwrite) the answer for a question.
    pub fn record(&mut self, question_id: u32, choice: Choice) {
        self.answers.insert(question_id, choice);
    }

    /// The recorded answer, or `None` when unanswered.
    pub fn selected(&self, question_id: u32) -> Option<Choice> {
        self.answers.get(&question_id).copied()
    }

    /// Number of answered questions.
    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}
