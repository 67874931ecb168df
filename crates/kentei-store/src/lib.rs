//! kentei-store — question pool and leaderboard backends.
//!
//! Implements the `QuestionStore` trait for a PostgREST backend and an
//! in-memory store, so the exam engine can fetch question pools and keep
//! the ranking board from either.

pub mod config;
pub mod error;
pub mod memory;
pub mod postgrest;
pub mod traits;

pub use config::{connect, load_config, KenteiConfig, StoreConfig};
pub use error::StoreError;
pub use traits::QuestionStore;
