//! Stratified exam assembly.
//!
//! The pool is partitioned by category (stable, keeping relative order),
//! each partition is shuffled independently with Fisher-Yates, a quota
//! prefix is taken per category, and the prefixes are concatenated in the
//! blueprint's block order. Randomness comes from the caller, so seeded
//! runs reproduce the same paper.

use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;
use tracing::warn;

use crate::blueprint::Blueprint;
use crate::error::AssemblyError;
use crate::model::{Category, ExamPaper, Question};

/// A category whose pool cannot fill its quota.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shortfall {
    pub category: Category,
    pub available: usize,
    pub required: usize,
}

/// Outcome of the lenient assembly path.
///
/// With no shortfalls the paper has exactly `blueprint.total()` questions;
/// otherwise it is shorter and `shortfalls` says where and by how much.
#[derive(Debug, Clone)]
pub struct AssemblyReport {
    pub paper: ExamPaper,
    pub shortfalls: Vec<Shortfall>,
}

/// A non-fatal finding from a pool inspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolWarning {
    /// The offending question, when the finding is about a single row.
    pub question_id: Option<u32>,
    pub message: String,
}

/// Assemble an exam, failing if any category cannot fill its quota.
///
/// The first under-filled category in block order is reported. The input
/// pool is never mutated.
pub fn assemble<R: Rng + ?Sized>(
    pool: &[Question],
    blueprint: &Blueprint,
    rng: &mut R,
) -> Result<ExamPaper, AssemblyError> {
    let partitions = partition(pool, blueprint);
    for (category, members) in &partitions {
        let required = blueprint.quota(*category);
        if members.len() < required {
            return Err(AssemblyError::InsufficientPool {
                category: *category,
                available: members.len(),
                required,
            });
        }
    }
    Ok(ExamPaper {
        questions: draw(partitions, blueprint, rng),
    })
}

/// Assemble an exam, shortening under-filled category blocks instead of
/// failing.
///
/// Every shortfall is returned alongside the paper and logged, never
/// silently swallowed.
pub fn assemble_lenient<R: Rng + ?Sized>(
    pool: &[Question],
    blueprint: &Blueprint,
    rng: &mut R,
) -> AssemblyReport {
    let partitions = partition(pool, blueprint);

    let shortfalls: Vec<Shortfall> = partitions
        .iter()
        .filter_map(|(category, members)| {
            let required = blueprint.quota(*category);
            (members.len() < required).then(|| Shortfall {
                category: *category,
                available: members.len(),
                required,
            })
        })
        .collect();

    for shortfall in &shortfalls {
        warn!(
            category = %shortfall.category,
            available = shortfall.available,
            required = shortfall.required,
            "category pool cannot fill its quota; exam will be shorter"
        );
    }

    AssemblyReport {
        paper: ExamPaper {
            questions: draw(partitions, blueprint, rng),
        },
        shortfalls,
    }
}

/// Inspect a pool against a blueprint without assembling anything.
///
/// Reports quota shortfalls, duplicate question ids, and blank texts.
pub fn inspect_pool(pool: &[Question], blueprint: &Blueprint) -> Vec<PoolWarning> {
    let mut warnings = Vec::new();

    let mut seen = HashSet::new();
    for question in pool {
        if !seen.insert(question.id) {
            warnings.push(PoolWarning {
                question_id: Some(question.id),
                message: format!("duplicate question id {}", question.id),
            });
        }
        if question.text.trim().is_empty() {
            warnings.push(PoolWarning {
                question_id: Some(question.id),
                message: "question text is blank".to_string(),
            });
        }
        if !question.options.is_complete() {
            warnings.push(PoolWarning {
                question_id: Some(question.id),
                message: "one or more option texts are blank".to_string(),
            });
        }
    }

    for category in blueprint.categories() {
        let available = pool.iter().filter(|q| q.category == category).count();
        let required = blueprint.quota(category);
        if available < required {
            warnings.push(PoolWarning {
                question_id: None,
                message: format!(
                    "category {category} has {available} questions, {required} required"
                ),
            });
        }
    }

    warnings
}

/// Stable partition of the pool into per-category copies, in block order.
fn partition(pool: &[Question], blueprint: &Blueprint) -> Vec<(Category, Vec<Question>)> {
    blueprint
        .categories()
        .map(|category| {
            let members: Vec<Question> = pool
                .iter()
                .filter(|q| q.category == category)
                .cloned()
                .collect();
            (category, members)
        })
        .collect()
}

fn draw<R: Rng + ?Sized>(
    partitions: Vec<(Category, Vec<Question>)>,
    blueprint: &Blueprint,
    rng: &mut R,
) -> Vec<Question> {
    let mut questions = Vec::with_capacity(blueprint.total());
    for (category, mut members) in partitions {
        members.shuffle(rng);
        members.truncate(blueprint.quota(category));
        questions.extend(members);
    }
    questions
}
