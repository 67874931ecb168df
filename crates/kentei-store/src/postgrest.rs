//! PostgREST (Supabase) store implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use kentei_core::model::{Category, Choice, Options, Question};
use kentei_core::record::{ExamRecord, RankingEntry, ResultDetails};

use crate::error::StoreError;
use crate::traits::QuestionStore;

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const QUESTIONS_TABLE: &str = "questions";
const RESULTS_TABLE: &str = "exam_results";

/// PostgREST-backed store.
///
/// Talks to the `/rest/v1` surface of a Supabase project. The question
/// table keeps its Japanese column names; rows are converted to the
/// engine's [`Question`] type on the way in.
pub struct PostgrestStore {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl PostgrestStore {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .expect("failed to build HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            client,
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn map_send_error(&self, e: reqwest::Error) -> StoreError {
        if e.is_timeout() {
            StoreError::Timeout(DEFAULT_TIMEOUT_SECS)
        } else if e.is_connect() {
            StoreError::NetworkError(format!("store not reachable at {}", self.base_url))
        } else {
            StoreError::NetworkError(e.to_string())
        }
    }
}

/// A raw `questions` row as PostgREST returns it.
#[derive(Deserialize)]
struct QuestionRow {
    id: u32,
    #[serde(rename = "カテゴリ")]
    category: RawCategory,
    #[serde(rename = "問題")]
    text: String,
    #[serde(rename = "選択肢A")]
    option_a: String,
    #[serde(rename = "選択肢B")]
    option_b: String,
    #[serde(rename = "選択肢C")]
    option_c: String,
    #[serde(rename = "選択肢D")]
    option_d: String,
    #[serde(rename = "正解")]
    answer: Choice,
    #[serde(rename = "解説", default)]
    explanation: Option<String>,
    #[serde(rename = "作成テーマ", default)]
    theme: Option<String>,
    #[serde(rename = "対象級", default)]
    grade: Option<String>,
    #[serde(rename = "義雄さんメモ", default)]
    note: Option<String>,
}

/// Category labels as stored in the database.
#[derive(Clone, Copy, Deserialize)]
enum RawCategory {
    #[serde(rename = "知識")]
    Knowledge,
    #[serde(rename = "防災")]
    Disaster,
    #[serde(rename = "生活")]
    Life,
    #[serde(rename = "文化")]
    Culture,
}

impl From<RawCategory> for Category {
    fn from(raw: RawCategory) -> Self {
        match raw {
            RawCategory::Knowledge => Category::Knowledge,
            RawCategory::Disaster => Category::Disaster,
            RawCategory::Life => Category::Life,
            RawCategory::Culture => Category::Culture,
        }
    }
}

impl From<QuestionRow> for Question {
    fn from(row: QuestionRow) -> Self {
        Question {
            id: row.id,
            category: row.category.into(),
            text: row.text,
            options: Options {
                a: row.option_a,
                b: row.option_b,
                c: row.option_c,
                d: row.option_d,
            },
            answer: row.answer,
            explanation: row.explanation,
            theme: row.theme,
            grade: row.grade,
            note: row.note,
        }
    }
}

#[derive(Serialize)]
struct RecordInsert<'a> {
    user_name: &'a str,
    score: u32,
    details: &'a ResultDetails,
}

#[derive(Deserialize)]
struct RankingRow {
    user_name: String,
    score: u32,
    created_at: DateTime<Utc>,
}

impl From<RankingRow> for RankingEntry {
    fn from(row: RankingRow) -> Self {
        RankingEntry {
            name: row.user_name,
            score: row.score,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl QuestionStore for PostgrestStore {
    fn name(&self) -> &str {
        "postgrest"
    }

    #[instrument(skip(self))]
    async fn fetch_pool(&self) -> anyhow::Result<Vec<Question>> {
        let response = self
            .client
            .get(self.table_url(QUESTIONS_TABLE))
            .query(&[("select", "*")])
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status().as_u16();
        if status == 401 || status == 403 {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::AuthenticationFailed(body).into());
        }
        if status >= 400 {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::ApiError {
                status,
                message: body,
            }
            .into());
        }

        let rows: Vec<QuestionRow> =
            response.json().await.map_err(|e| StoreError::ApiError {
                status: 0,
                message: format!("failed to parse response: {e}"),
            })?;

        Ok(rows.into_iter().map(Question::from).collect())
    }

    #[instrument(skip(self, record), fields(name = %record.name, score = record.score))]
    async fn store_record(&self, record: &ExamRecord) -> anyhow::Result<()> {
        let body = RecordInsert {
            user_name: &record.name,
            score: record.score,
            details: &record.details,
        };

        let response = self
            .client
            .post(self.table_url(RESULTS_TABLE))
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Prefer", "return=minimal")
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status().as_u16();
        if status == 401 || status == 403 {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::AuthenticationFailed(body).into());
        }
        if status >= 400 {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::ApiError {
                status,
                message: body,
            }
            .into());
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn fetch_ranking(&self, limit: usize) -> anyhow::Result<Vec<RankingEntry>> {
        let response = self
            .client
            .get(self.table_url(RESULTS_TABLE))
            .query(&[
                ("select", "user_name,score,created_at"),
                ("order", "score.desc,created_at.desc"),
                ("limit", &limit.to_string()),
            ])
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status().as_u16();
        if status == 401 || status == 403 {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::AuthenticationFailed(body).into());
        }
        if status >= 400 {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::ApiError {
                status,
                message: body,
            }
            .into());
        }

        let rows: Vec<RankingRow> =
            response.json().await.map_err(|e| StoreError::ApiError {
                status: 0,
                message: format!("failed to parse response: {e}"),
            })?;

        Ok(rows.into_iter().map(RankingEntry::from).collect())
    }
}
