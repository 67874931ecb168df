//! The per-question review list.

use kentei_core::model::ExamPaper;
use kentei_core::score::ScoreCard;

/// Render the answer review.
///
/// Every question gets a verdict line; wrong or unanswered questions also
/// show the selected answer, the correct answer, and the explanation when
/// the pool carries one. The card must come from grading this paper, so the
/// verdicts line up with the questions.
pub fn render_review(paper: &ExamPaper, card: &ScoreCard) -> String {
    let mut out = String::new();

    for (index, (question, verdict)) in paper.questions.iter().zip(&card.verdicts).enumerate() {
        let mark = if verdict.is_correct { "o" } else { "x" };
        out.push_str(&format!("Q{:<3} [{}] {}\n", index + 1, mark, question.text));

        if !verdict.is_correct {
            match verdict.user_answer {
                Some(choice) => out.push_str(&format!(
                    "      your answer: {} ({})\n",
                    choice,
                    question.options.text(choice)
                )),
                None => out.push_str("      your answer: (none)\n"),
            }
            out.push_str(&format!(
                "      correct:     {} ({})\n",
                question.answer,
                question.options.text(question.answer)
            ));
            if let Some(explanation) = &question.explanation {
                out.push_str(&format!("      explanation: {explanation}\n"));
            }
        }
    }

    out
}
