//! The scorecard summary block.

use kentei_core::score::{ScoreCard, PASS_MARK};

/// Render the result summary: verdict, score, answer counts, time used,
/// and the per-category breakdown.
pub fn render_summary(card: &ScoreCard, time_used_secs: u64) -> String {
    let mut out = String::new();

    let verdict = if card.passed { "PASS" } else { "FAIL" };
    out.push_str(&format!("Result: {verdict}\n"));
    out.push_str(&format!(
        "Score:  {} / {}  (pass mark {})\n",
        card.score, card.total, PASS_MARK
    ));

    let incorrect = card.total - card.score;
    out.push_str(&format!(
        "Correct: {}  Incorrect: {}  Unanswered: {}\n",
        card.score,
        incorrect,
        card.unanswered()
    ));
    out.push_str(&format!("Time used: {}\n", format_duration(time_used_secs)));

    if !card.by_category.is_empty() {
        out.push('\n');
        for entry in &card.by_category {
            out.push_str(&format!(
                "  {:<9} {:>3} / {}\n",
                entry.category.to_string(),
                entry.correct,
                entry.total
            ));
        }
    }

    out
}

/// Format a duration in seconds as `MM:SS`.
pub fn format_duration(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
