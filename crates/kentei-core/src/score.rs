//! Scoring and pass determination.

use serde::{Deserialize, Serialize};

use crate::model::{AnswerSheet, Category, Choice, ExamPaper};

/// Minimum score for a passing result.
///
/// Fixed by the certification, independent of the paper length.
pub const PASS_MARK: u32 = 70;

/// Verdict for a single question, in paper order.
///
/// Serialized in camelCase: these entries form the per-question detail
/// blob stored with a submitted result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionVerdict {
    pub question_id: u32,
    pub user_answer: Option<Choice>,
    pub is_correct: bool,
}

/// Correct/total tally for one category block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category: Category,
    pub correct: u32,
    pub total: u32,
}

/// The graded outcome of a finished exam.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreCard {
    /// Count of correct answers.
    pub score: u32,
    /// Paper length.
    pub total: u32,
    /// Whether `score` reached [`PASS_MARK`].
    pub passed: bool,
    /// Per-question verdicts in paper order.
    pub verdicts: Vec<QuestionVerdict>,
    /// Per-category tallies in paper block order.
    pub by_category: Vec<CategoryScore>,
}

impl ScoreCard {
    /// Questions with no recorded answer.
    pub fn unanswered(&self) -> usize {
        self.verdicts
            .iter()
            .filter(|v| v.user_answer.is_none())
            .count()
    }
}

/// Grade an answer sheet against the paper it was written for.
///
/// An unanswered question never matches. Pure and deterministic: grading
/// the same frozen sheet twice yields identical cards.
pub fn grade(paper: &ExamPaper, answers: &AnswerSheet) -> ScoreCard {
    let mut verdicts = Vec::with_capacity(paper.len());
    let mut by_category: Vec<CategoryScore> = Vec::new();

    for question in &paper.questions {
        let user_answer = answers.selected(question.id);
        let is_correct = user_answer == Some(question.answer);
        verdicts.push(QuestionVerdict {
            question_id: question.id,
            user_answer,
            is_correct,
        });

        match by_category
            .iter_mut()
            .find(|entry| entry.category == question.category)
        {
            Some(entry) => {
                entry.total += 1;
                entry.correct += u32::from(is_correct);
            }
            None => by_category.push(CategoryScore {
                category: question.category,
                correct: u32::from(is_correct),
                total: 1,
            }),
        }
    }

    let score = verdicts.iter().filter(|v| v.is_correct).count() as u32;

    ScoreCard {
        score,
        total: paper.len() as u32,
        passed: score >= PASS_MARK,
        verdicts,
        by_category,
    }
}
