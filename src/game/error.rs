//! Game-level error taxonomy.

use derive_more::{Display, Error, From};

use crate::db::DbError;

/// Errors surfaced by the game core.
///
/// "Already guessed" and "hint already used" are deliberately absent: those
/// are expected, ignorable outcomes signalled through [`crate::game::GuessOutcome`]
/// and [`crate::game::HintOutcome`], not errors.
#[derive(Debug, Clone, Display, Error, From)]
pub enum GameError {
    /// Referenced game record does not exist.
    #[display("Game not found")]
    NotFound,
    /// No active term for the difficulty; no word available today.
    #[display("No word available for this difficulty")]
    EmptyCatalog,
    /// Completion was already recorded; stats must not be double-counted.
    #[display("Game is already completed")]
    AlreadyCompleted,
    /// Malformed input, rejected before touching any state.
    #[display("Validation error: {}", _0)]
    #[from(ignore)]
    Validation(#[error(not(source))] String),
    /// Underlying storage failure, surfaced unchanged.
    #[display("{}", _0)]
    Db(DbError),
}

// Lets `?` lift raw diesel errors inside repository transactions.
impl From<diesel::result::Error> for GameError {
    #[track_caller]
    fn from(err: diesel::result::Error) -> Self {
        Self::Db(DbError::from(err))
    }
}
