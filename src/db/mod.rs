//! Database persistence layer for terms, daily games, and cumulative stats.

mod error;
mod models;
mod repository;
mod schema; // Diesel generated schema - internal use only
mod seed;

pub use error::DbError;
pub(crate) use models::encode_letters;
pub use models::{GameRecord, GameUpdate, NewGameRecord, NewStatRow, NewTerm, StatRow, Term};
pub use repository::GameRepository;
pub use seed::builtin_catalog;
