//! kentei-core — exam assembly, scoring, and session logic for the
//! weather-certification practice exam.
//!
//! A question pool flows through the sampler into an ordered exam paper,
//! an `ExamSession` collects answers under a countdown, and the score
//! module grades the frozen sheet. Everything here is pure logic; remote
//! pools and the leaderboard live in `kentei-store`.

pub mod blueprint;
pub mod error;
pub mod handoff;
pub mod model;
pub mod pool;
pub mod record;
pub mod sampler;
pub mod score;
pub mod session;
