//! The store trait every backend implements.

use async_trait::async_trait;

use kentei_core::model::Question;
use kentei_core::record::{ExamRecord, RankingEntry};

/// Trait for backends that hold the question pool and the ranking board.
#[async_trait]
pub trait QuestionStore: Send + Sync {
    /// Human-readable backend name (e.g. "postgrest").
    fn name(&self) -> &str;

    /// Fetch the complete question pool.
    async fn fetch_pool(&self) -> anyhow::Result<Vec<Question>>;

    /// Store a submitted exam result.
    async fn store_record(&self, record: &ExamRecord) -> anyhow::Result<()>;

    /// Fetch the top scores, best first.
    async fn fetch_ranking(&self, limit: usize) -> anyhow::Result<Vec<RankingEntry>>;
}
