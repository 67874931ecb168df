//! kentei-report — plain-text rendering of graded exam results.
//!
//! Turns a scorecard and its paper into the two result views: the summary
//! block (pass/fail, score, category breakdown, time used) and the
//! per-question review with explanations.

pub mod review;
pub mod summary;

pub use review::render_review;
pub use summary::{format_duration, render_summary};
