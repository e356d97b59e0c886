//! Core domain types for the daily word game.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use strum::EnumIter;

use crate::db::{DbError, Term};

/// Difficulty tier, used both for word selection and stats partitioning.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Difficulty {
    /// Basic Bitcoin terms like wallet, blockchain, and satoshi.
    Beginner,
    /// Austrian economics concepts and Bitcoin business models.
    Intermediate,
    /// Technical Bitcoin concepts, mining, and cryptography.
    Advanced,
}

impl Difficulty {
    /// Converts the tier to the string stored in the database.
    pub fn to_db_string(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }

    /// Parses the tier from the string stored in the database.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the string is not a valid difficulty value.
    pub fn from_db_string(s: &str) -> Result<Self, DbError> {
        match s {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            _ => Err(DbError::new(format!("Invalid difficulty: '{}'", s))),
        }
    }

    /// Score multiplier for this tier.
    pub fn multiplier(&self) -> f64 {
        match self {
            Self::Beginner => 1.0,
            Self::Intermediate => 1.5,
            Self::Advanced => 2.0,
        }
    }

    /// Short description shown on the tier selector.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Beginner => "Basic Bitcoin terms like wallet, blockchain, and satoshi",
            Self::Intermediate => "Austrian economics concepts and Bitcoin business models",
            Self::Advanced => "Technical Bitcoin concepts, mining, and cryptography",
        }
    }
}

/// Player scoping key for daily games and stats.
///
/// Replaces ad-hoc nullable user-id branching: every lookup takes the same
/// sum type and converts to the nullable column form at the db boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlayerKey {
    /// Shared anonymous/default player.
    #[default]
    Anonymous,
    /// A registered numeric user identifier.
    User(i32),
}

impl PlayerKey {
    /// Builds the key from an optional user identifier.
    pub fn from_user_id(user_id: Option<i32>) -> Self {
        match user_id {
            Some(id) => Self::User(id),
            None => Self::Anonymous,
        }
    }

    /// Nullable column form for storage queries.
    pub fn user_id(&self) -> Option<i32> {
        match self {
            Self::Anonymous => None,
            Self::User(id) => Some(*id),
        }
    }
}

/// Current status of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    /// Guesses are being accepted.
    Playing,
    /// All letters revealed within the attempt budget.
    Won,
    /// Attempt budget exhausted. Terminal.
    Lost,
}

/// Session engine configuration.
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    /// Incorrect guesses allowed before the game is lost.
    pub max_attempts: i32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { max_attempts: 3 }
    }
}

/// Transient in-memory view of the game currently being played.
///
/// Reconstructable from a persisted [`crate::db::GameRecord`] plus the day's
/// [`Term`]; never persisted directly.
#[derive(Debug, Clone)]
pub struct SessionState {
    /// Selected difficulty, `None` until the player picks a tier.
    pub difficulty: Option<Difficulty>,
    /// Today's term, `None` until fetched.
    pub term: Option<Term>,
    /// Letters guessed so far, in insertion order.
    pub guessed_letters: Vec<char>,
    /// Subset of guessed letters that were incorrect.
    pub wrong_letters: Vec<char>,
    /// Current status.
    pub status: GameStatus,
    /// Count of incorrect guesses.
    pub attempts: i32,
    /// Incorrect guesses allowed.
    pub max_attempts: i32,
    /// Hints consumed (0 or 1).
    pub hints_used: i32,
    /// Session start, `None` until a word is loaded.
    pub started_at: Option<NaiveDateTime>,
    /// Completion marker, `None` while playing.
    pub ended_at: Option<NaiveDateTime>,
}

impl SessionState {
    /// The empty pre-difficulty state.
    pub fn empty(max_attempts: i32) -> Self {
        Self {
            difficulty: None,
            term: None,
            guessed_letters: Vec::new(),
            wrong_letters: Vec::new(),
            status: GameStatus::Playing,
            attempts: 0,
            max_attempts,
            hints_used: 0,
            started_at: None,
            ended_at: None,
        }
    }

    /// Whether every letter of the word has been guessed.
    pub fn all_letters_guessed(&self) -> bool {
        match &self.term {
            Some(term) => term
                .word()
                .chars()
                .all(|c| self.guessed_letters.contains(&c)),
            None => false,
        }
    }
}

/// Result of submitting a letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GuessOutcome {
    /// Whether the letter appears in the word.
    pub correct: bool,
    /// Whether the game is now in a terminal state.
    pub complete: bool,
    /// Whether the terminal state is a win.
    pub won: bool,
}

/// Result of requesting a hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HintOutcome {
    /// The hint text; the single hint allowance is now spent.
    Granted(String),
    /// The hint was already used. Not an error; nothing changed.
    LimitReached,
}

/// The data persisted when a session reaches a terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedGame {
    /// Whether the game was won.
    pub won: bool,
    /// Elapsed time in whole seconds.
    pub time_seconds: i32,
    /// Incorrect guesses made.
    pub attempts: i32,
    /// Hints consumed.
    pub hints_used: i32,
}
