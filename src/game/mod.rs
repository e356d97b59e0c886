//! Core daily game logic: word selection, session state machine, stats fold.

mod daily;
mod engine;
mod error;
mod score;
mod stats;
mod types;

pub use daily::select_todays_term;
pub use engine::{SessionEngine, SessionOrigin};
pub use error::GameError;
pub use score::{calculate_score, format_game_time, next_daily_reset, share_text, time_until_next_daily};
pub use stats::{StatsSnapshot, apply_result};
pub use types::{
    CompletedGame, Difficulty, EngineConfig, GameStatus, GuessOutcome, HintOutcome, PlayerKey,
    SessionState,
};
