//! In-memory store for testing and offline runs.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use kentei_core::model::Question;
use kentei_core::record::{ExamRecord, RankingEntry};

use crate::traits::QuestionStore;

/// A store that serves a fixed pool and keeps submitted records in memory.
///
/// Useful for exercising the exam engine without a backend, and as the
/// store behind practice runs from a local pool file.
pub struct MemoryStore {
    pool: Vec<Question>,
    records: Mutex<Vec<(ExamRecord, DateTime<Utc>)>>,
    fetch_count: AtomicU32,
}

impl MemoryStore {
    /// Create a store serving the given pool.
    pub fn new(pool: Vec<Question>) -> Self {
        Self {
            pool,
            records: Mutex::new(Vec::new()),
            fetch_count: AtomicU32::new(0),
        }
    }

    /// Pre-seed a record with an explicit timestamp.
    pub fn push_record(&self, record: ExamRecord, created_at: DateTime<Utc>) {
        self.records.lock().unwrap().push((record, created_at));
    }

    /// Number of pool fetches made against this store.
    pub fn fetch_count(&self) -> u32 {
        self.fetch_count.load(Ordering::Relaxed)
    }

    /// Number of records currently held.
    pub fn record_count(&self) -> usize {
        self.records.lock().unwrap().len()
    }
}

#[async_trait]
impl QuestionStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn fetch_pool(&self) -> anyhow::Result<Vec<Question>> {
        self.fetch_count.fetch_add(1, Ordering::Relaxed);
        Ok(self.pool.clone())
    }

    async fn store_record(&self, record: &ExamRecord) -> anyhow::Result<()> {
        self.records
            .lock()
            .unwrap()
            .push((record.clone(), Utc::now()));
        Ok(())
    }

    async fn fetch_ranking(&self, limit: usize) -> anyhow::Result<Vec<RankingEntry>> {
        let mut entries = self.records.lock().unwrap().clone();
        // Best score first; ties go to the newer record.
        entries.sort_by(|a, b| b.0.score.cmp(&a.0.score).then(b.1.cmp(&a.1)));
        entries.truncate(limit);

        Ok(entries
            .into_iter()
            .map(|(record, created_at)| RankingEntry {
                name: record.name,
                score: record.score,
                created_at,
            })
            .collect())
    }
}
