//! The `kentei exam` command.
//!
//! Runs an exam attempt as a line-oriented prompt loop: one task
//! multiplexes stdin lines and a one-second countdown tick with
//! `tokio::select!`. Closing stdin hands the paper in, so the command also
//! works non-interactively with piped answers. The finished attempt is
//! parked in the hand-off slot for `grade`, `submit`, and `discard`.

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{self, Duration, MissedTickBehavior};

use kentei_core::blueprint::Blueprint;
use kentei_core::handoff::HandoffSlot;
use kentei_core::model::Choice;
use kentei_core::session::{ExamSession, FinishReason, TickOutcome};
use kentei_report::format_duration;
use kentei_store::config::load_config_from;

pub async fn execute(
    pool_path: Option<PathBuf>,
    store_name: Option<String>,
    seed: Option<u64>,
    lenient: bool,
    time_limit: Option<u64>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    let pool = match &pool_path {
        Some(path) => kentei_core::pool::load_pool(path)?,
        None => {
            let store = super::connect_store(&config, store_name.as_deref())?;
            store
                .fetch_pool()
                .await
                .context("failed to fetch the question pool")?
        }
    };
    anyhow::ensure!(!pool.is_empty(), "the question pool is empty");

    let paper = super::build_paper(&pool, &Blueprint::standard(), seed, lenient)?;

    let time_limit_secs = time_limit.unwrap_or(config.time_limit_secs);
    anyhow::ensure!(time_limit_secs >= 1, "time limit must be at least 1 second");

    let mut session = ExamSession::with_time_limit(paper, time_limit_secs);
    session.start()?;
    tracing::debug!(
        session = %session.id(),
        questions = session.paper().len(),
        time_limit_secs,
        "exam session started"
    );

    println!(
        "Exam started: {} questions, {} on the clock.",
        session.paper().len(),
        format_duration(time_limit_secs)
    );
    println!("Answer with a/b/c/d. 'n' next, 'p' previous, 'g <num>' jump, 'finish' to hand in, 'quit' to abort.");
    print_question(&session);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut clock = time::interval(Duration::from_secs(1));
    clock.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately; consume it before the loop.
    clock.tick().await;

    let mut confirm_finish = false;
    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line.context("failed to read input")? {
                    Some(input) => {
                        if apply_command(&mut session, input.trim(), &mut confirm_finish)? {
                            break;
                        }
                    }
                    // End of input counts as handing the paper in.
                    None => {
                        session.finish(FinishReason::Submitted)?;
                        break;
                    }
                }
            }
            _ = clock.tick() => {
                match session.tick() {
                    TickOutcome::Running { remaining_secs } => {
                        if remaining_secs == 300 || remaining_secs == 60 {
                            println!("{} remaining", format_duration(remaining_secs));
                        }
                    }
                    TickOutcome::Expired => {
                        println!("\nTime is up.");
                        break;
                    }
                    TickOutcome::Halted => break,
                }
            }
        }
    }

    let snapshot = session.into_snapshot()?;
    let finish_reason = snapshot.finish_reason;
    let card = snapshot.grade();

    let slot = HandoffSlot::new(&config.handoff_file);
    slot.store(&snapshot)
        .with_context(|| format!("failed to save the session to {}", slot.path().display()))?;

    println!();
    print!(
        "{}",
        kentei_report::render_summary(&card, snapshot.time_used_secs)
    );
    println!();
    println!("Session saved to {}.", slot.path().display());
    println!("Next steps:");
    println!("  kentei grade --review        full per-question review");
    println!("  kentei submit --name <name>  post the score to the ranking");
    println!("  kentei discard               drop the result instead");

    if finish_reason == FinishReason::TimeExpired {
        // Expiry breaks the loop with a stdin read still in flight; exiting
        // here skips the runtime's wait for that read to complete.
        std::process::exit(0);
    }

    Ok(())
}

/// Apply one input line to the session. Returns `true` once the session
/// is finished.
fn apply_command(
    session: &mut ExamSession,
    input: &str,
    confirm_finish: &mut bool,
) -> Result<bool> {
    if input.eq_ignore_ascii_case("finish") {
        let unanswered = session.unanswered();
        if unanswered > 0 && !*confirm_finish {
            *confirm_finish = true;
            println!("{unanswered} question(s) unanswered. Type 'finish' again to hand in anyway.");
            return Ok(false);
        }
        session.finish(FinishReason::Submitted)?;
        return Ok(true);
    }
    *confirm_finish = false;

    match input {
        "" => print_question(session),
        "n" | "next" => {
            if session.advance()? {
                print_question(session);
            } else {
                println!("End of paper. 'finish' to hand in, 'p' to go back.");
            }
        }
        "p" | "prev" => {
            if session.retreat()? {
                print_question(session);
            } else {
                println!("Already on the first question.");
            }
        }
        "quit" => {
            session.finish(FinishReason::Aborted)?;
            return Ok(true);
        }
        other => {
            if let Some(number) = other.strip_prefix("g ") {
                jump_to(session, number)?;
            } else if let Ok(choice) = Choice::from_str(other) {
                session.select(choice)?;
                if session.advance()? {
                    print_question(session);
                } else {
                    println!("Answered {choice}. End of paper; 'finish' to hand in.");
                }
            } else {
                println!("Unrecognized input '{other}'. Use a/b/c/d, n, p, g <num>, finish, quit.");
            }
        }
    }
    Ok(false)
}

fn jump_to(session: &mut ExamSession, number: &str) -> Result<()> {
    let total = session.paper().len();
    let position: usize = match number.trim().parse() {
        Ok(n) => n,
        Err(_) => {
            println!("'g' takes a question number, e.g. 'g 42'.");
            return Ok(());
        }
    };
    if position == 0 || position > total {
        println!("No question {position} (1..={total}).");
        return Ok(());
    }
    session.jump(position - 1)?;
    print_question(session);
    Ok(())
}

fn print_question(session: &ExamSession) {
    let Some(question) = session.current_question() else {
        return;
    };
    let position = session.cursor() + 1;
    let total = session.paper().len();
    let marker = match session.answers().selected(question.id) {
        Some(choice) => format!(" [answered {choice}]"),
        None => String::new(),
    };

    println!();
    println!(
        "Q{position}/{total} [{}]{marker}  ({} left)",
        question.category,
        format_duration(session.remaining_secs())
    );
    println!("  {}", question.text);
    for choice in Choice::ALL {
        println!("  {choice}) {}", question.options.text(choice));
    }
}
