//! Bitword library - daily Bitcoin terminology word game
//!
//! One word per difficulty tier per day, deterministic for every player.
//! Guess letters with a budget of three misses, spend the single hint if
//! you must, and keep the streak alive.
//!
//! # Architecture
//!
//! - **Game**: pure session rules (daily selection, guessing, scoring, stats folding)
//! - **Db**: diesel/SQLite repository for terms, daily games, and cumulative stats
//! - **Service**: session orchestration binding the engine to the repository
//! - **Server**: axum JSON API over the repository
//!
//! # Example
//!
//! ```no_run
//! use bitword::{Difficulty, EngineConfig, GameRepository, GameService, PlayerKey};
//!
//! # fn example() -> anyhow::Result<()> {
//! let repository = GameRepository::new("bitword.db".to_string())?;
//! repository.apply_migrations()?;
//! repository.ensure_seeded()?;
//!
//! let mut service = GameService::new(repository, EngineConfig::default());
//! service.select_difficulty(Difficulty::Beginner, PlayerKey::Anonymous)?;
//! let outcome = service.submit_guess('B')?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod db;
mod game;
mod server;
mod service;

// Crate-level exports - Persistence
pub use db::{
    DbError, GameRecord, GameRepository, GameUpdate, NewGameRecord, NewStatRow, NewTerm, StatRow,
    Term, builtin_catalog,
};

// Crate-level exports - Game rules
pub use game::{
    CompletedGame, Difficulty, EngineConfig, GameError, GameStatus, GuessOutcome, HintOutcome,
    PlayerKey, SessionEngine, SessionOrigin, SessionState, StatsSnapshot, apply_result,
    calculate_score, format_game_time, next_daily_reset, select_todays_term, share_text,
    time_until_next_daily,
};

// Crate-level exports - Service layer
pub use service::GameService;

// Crate-level exports - HTTP server
pub use server::{AppState, router};
