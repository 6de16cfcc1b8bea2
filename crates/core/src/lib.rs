#![warn(clippy::all, missing_docs)]

//! Core domain logic for the flag quiz.
//!
//! This crate hosts the round engine, the leaderboard and its
//! persistence, the country provider client, and configuration
//! used by the terminal UI and any future frontends.

pub mod config;
pub mod engine;
pub mod leaderboard;
pub mod models;
pub mod provider;
pub mod session;
pub mod storage;
pub mod timer;

pub use config::AppConfig;
pub use engine::{GuessOutcome, HintOutcome, RoundEngine, TickOutcome};
pub use leaderboard::Leaderboard;
pub use models::{Country, LeaderboardEntry};
pub use session::{GameSession, SaveOutcome};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use timer::{RoundTick, RoundTimer};
