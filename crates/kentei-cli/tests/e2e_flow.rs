//! End-to-end flow tests: the real binary against a mock PostgREST
//! backend, plus the countdown path that cannot be driven by piped input.
//!
//! The store tests run on a multi-thread runtime because the command
//! under test blocks the calling thread while the mock server answers.

use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use kentei_core::model::{Category, Choice, Options, Question};

fn kentei() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("kentei").unwrap()
}

fn make_pool(knowledge: usize, disaster: usize, life: usize, culture: usize) -> Vec<Question> {
    let mut pool = Vec::new();
    let mut id = 0;
    for (category, count) in [
        (Category::Knowledge, knowledge),
        (Category::Disaster, disaster),
        (Category::Life, life),
        (Category::Culture, culture),
    ] {
        for _ in 0..count {
            pool.push(Question {
                id,
                category,
                text: format!("question {id}"),
                options: Options {
                    a: "first".into(),
                    b: "second".into(),
                    c: "third".into(),
                    d: "fourth".into(),
                },
                answer: Choice::A,
                explanation: None,
                theme: None,
                grade: None,
                note: None,
            });
            id += 1;
        }
    }
    pool
}

fn write_pool(dir: &TempDir, pool: &[Question]) -> PathBuf {
    let path = dir.path().join("pool.json");
    std::fs::write(&path, serde_json::to_string_pretty(pool).unwrap()).unwrap();
    path
}

fn run_exam(dir: &TempDir, answers: &str) {
    let pool_path = write_pool(dir, &make_pool(3, 1, 1, 1));

    kentei()
        .current_dir(dir.path())
        .env("HOME", dir.path())
        .arg("exam")
        .arg("--pool")
        .arg(&pool_path)
        .arg("--lenient")
        .arg("--seed")
        .arg("7")
        .write_stdin(answers)
        .assert()
        .success();
}

/// Question rows the way the backend serves them.
fn make_remote_pool(
    knowledge: usize,
    disaster: usize,
    life: usize,
    culture: usize,
) -> serde_json::Value {
    let mut rows = Vec::new();
    let mut id = 0;
    for (label, count) in [
        ("知識", knowledge),
        ("防災", disaster),
        ("生活", life),
        ("文化", culture),
    ] {
        for _ in 0..count {
            rows.push(json!({
                "id": id,
                "カテゴリ": label,
                "問題": format!("question {id}"),
                "選択肢A": "first",
                "選択肢B": "second",
                "選択肢C": "third",
                "選択肢D": "fourth",
                "正解": "A",
            }));
            id += 1;
        }
    }
    serde_json::Value::Array(rows)
}

#[tokio::test(flavor = "multi_thread")]
async fn e2e_fetch_then_assemble_offline() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/questions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(make_remote_pool(60, 30, 20, 15)))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let pool_path = dir.path().join("fetched.json");

    kentei()
        .current_dir(dir.path())
        .env("HOME", dir.path())
        .env("KENTEI_STORE_URL", server.uri())
        .env("KENTEI_STORE_KEY", "test-key")
        .arg("fetch")
        .arg("--output")
        .arg(&pool_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Fetched 125 questions"))
        .stdout(predicate::str::contains(
            "can fill the standard 100-question exam",
        ));

    kentei()
        .arg("assemble")
        .arg("--pool")
        .arg(&pool_path)
        .arg("--seed")
        .arg("3")
        .assert()
        .success()
        .stdout(predicate::str::contains("Assembled 100 questions"));
}

#[tokio::test(flavor = "multi_thread")]
async fn e2e_fetch_reports_an_infeasible_pool() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/questions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(make_remote_pool(60, 5, 20, 15)))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();

    kentei()
        .current_dir(dir.path())
        .env("HOME", dir.path())
        .env("KENTEI_STORE_URL", server.uri())
        .env("KENTEI_STORE_KEY", "test-key")
        .arg("fetch")
        .assert()
        .success()
        .stdout(predicate::str::contains("cannot fill the standard exam"));
}

#[tokio::test(flavor = "multi_thread")]
async fn e2e_submit_posts_and_clears_the_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/exam_results"))
        .and(body_partial_json(json!({"user_name": "Kumo", "score": 1})))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    run_exam(&dir, "a\n");

    kentei()
        .current_dir(dir.path())
        .env("HOME", dir.path())
        .env("KENTEI_STORE_URL", server.uri())
        .env("KENTEI_STORE_KEY", "test-key")
        .arg("submit")
        .arg("--name")
        .arg("Kumo")
        .assert()
        .success()
        .stdout(predicate::str::contains("Submitted: Kumo scored 1 / 6"))
        .stdout(predicate::str::contains("Session cleared"));

    assert!(!dir.path().join("kentei-session.json").exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn e2e_failed_submission_keeps_the_session_for_retry() {
    let broken = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/exam_results"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database unavailable"))
        .mount(&broken)
        .await;

    let dir = TempDir::new().unwrap();
    run_exam(&dir, "a\na\n");

    kentei()
        .current_dir(dir.path())
        .env("HOME", dir.path())
        .env("KENTEI_STORE_URL", broken.uri())
        .env("KENTEI_STORE_KEY", "test-key")
        .arg("submit")
        .arg("--name")
        .arg("Arashi")
        .assert()
        .failure()
        .stderr(predicate::str::contains("submission failed"));

    // The slot survives a failed submission.
    assert!(dir.path().join("kentei-session.json").exists());

    // A later attempt against a healthy store consumes it.
    let healthy = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/exam_results"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&healthy)
        .await;

    kentei()
        .current_dir(dir.path())
        .env("HOME", dir.path())
        .env("KENTEI_STORE_URL", healthy.uri())
        .env("KENTEI_STORE_KEY", "test-key")
        .arg("submit")
        .arg("--name")
        .arg("Arashi")
        .assert()
        .success();

    assert!(!dir.path().join("kentei-session.json").exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn e2e_ranking_renders_the_board() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/exam_results"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"user_name": "Sora", "score": 98, "created_at": "2024-06-01T09:30:00+00:00"},
            {"user_name": "Kaze", "score": 91, "created_at": "2024-06-02T12:00:00+00:00"},
            {"user_name": "Ame", "score": 77, "created_at": "2024-05-20T08:15:00+00:00"},
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();

    kentei()
        .current_dir(dir.path())
        .env("HOME", dir.path())
        .env("KENTEI_STORE_URL", server.uri())
        .env("KENTEI_STORE_KEY", "test-key")
        .arg("ranking")
        .assert()
        .success()
        .stdout(predicate::str::contains("Rank"))
        .stdout(predicate::str::contains("Sora"))
        .stdout(predicate::str::contains("98"))
        .stdout(predicate::str::contains("Ame"));
}

#[tokio::test(flavor = "multi_thread")]
async fn e2e_empty_remote_pool_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/questions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();

    kentei()
        .current_dir(dir.path())
        .env("HOME", dir.path())
        .env("KENTEI_STORE_URL", server.uri())
        .env("KENTEI_STORE_KEY", "test-key")
        .arg("fetch")
        .assert()
        .failure()
        .stderr(predicate::str::contains("the question pool is empty"));
}

#[test]
fn exam_expires_when_the_clock_runs_out() {
    let dir = TempDir::new().unwrap();
    let pool_path = write_pool(&dir, &make_pool(3, 1, 1, 1));

    let mut child = std::process::Command::new(env!("CARGO_BIN_EXE_kentei"))
        .current_dir(dir.path())
        .env("HOME", dir.path())
        .arg("exam")
        .arg("--pool")
        .arg(&pool_path)
        .arg("--lenient")
        .arg("--time-limit")
        .arg("2")
        .stdin(std::process::Stdio::piped())
        .stdout(std::process::Stdio::piped())
        .stderr(std::process::Stdio::null())
        .spawn()
        .unwrap();

    // Hold stdin open so only the countdown can finish the session.
    let stdin = child.stdin.take().unwrap();
    let output = child.wait_with_output().unwrap();
    drop(stdin);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Time is up"));
    assert!(dir.path().join("kentei-session.json").exists());

    kentei()
        .current_dir(dir.path())
        .env("HOME", dir.path())
        .arg("grade")
        .assert()
        .success()
        .stdout(predicate::str::contains("time expired"));
}
