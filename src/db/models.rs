//! Database models and row/domain conversions.

use chrono::NaiveDateTime;
use derive_getters::Getters;
use derive_new::new;
use diesel::prelude::*;
use tracing::instrument;

use crate::db::{DbError, schema};
use crate::game::{Difficulty, StatsSnapshot};

/// Encodes a letter sequence as the JSON string array stored in the db.
///
/// Insertion order is preserved so a resumed session replays letters in the
/// order the player guessed them.
pub(crate) fn encode_letters(letters: &[char]) -> Result<String, DbError> {
    let strings: Vec<String> = letters.iter().map(|c| c.to_string()).collect();
    Ok(serde_json::to_string(&strings)?)
}

/// Decodes the stored JSON string array back into letters.
pub(crate) fn decode_letters(raw: &str) -> Result<Vec<char>, DbError> {
    let strings: Vec<String> = serde_json::from_str(raw)?;
    strings
        .iter()
        .map(|s| {
            s.chars()
                .next()
                .ok_or_else(|| DbError::new("Empty letter in stored array"))
        })
        .collect()
}

/// Catalog term database model.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, Queryable, Identifiable, Selectable, Getters, new)]
#[diesel(table_name = schema::terms)]
pub struct Term {
    id: i32,
    word: String,
    difficulty: String,
    category: String,
    definition: String,
    hint: String,
    fun_fact: Option<String>,
    is_active: bool,
}

impl Term {
    /// Parses the stored difficulty string into a [`Difficulty`].
    #[instrument(skip(self), fields(difficulty = %self.difficulty))]
    pub fn parse_difficulty(&self) -> Result<Difficulty, DbError> {
        Difficulty::from_db_string(&self.difficulty)
    }
}

/// Insertable term model for seeding the catalog.
#[derive(Debug, Clone, Insertable, new)]
#[diesel(table_name = schema::terms)]
pub struct NewTerm {
    word: String,
    difficulty: String,
    category: String,
    definition: String,
    hint: String,
    fun_fact: Option<String>,
    is_active: bool,
}

/// One day's attempt at a difficulty for one player-or-anonymous key.
#[derive(Debug, Clone, serde::Serialize, Queryable, Identifiable, Selectable, Getters)]
#[diesel(table_name = schema::games)]
pub struct GameRecord {
    id: i32,
    user_id: Option<i32>,
    difficulty: String,
    word: String,
    is_completed: bool,
    is_won: bool,
    attempts: i32,
    hints_used: i32,
    time_seconds: Option<i32>,
    guessed_letters: String,
    wrong_letters: String,
    created_at: NaiveDateTime,
}

impl GameRecord {
    /// Parses the stored difficulty string into a [`Difficulty`].
    #[instrument(skip(self), fields(difficulty = %self.difficulty))]
    pub fn parse_difficulty(&self) -> Result<Difficulty, DbError> {
        Difficulty::from_db_string(&self.difficulty)
    }

    /// Decodes the guessed letters in insertion order.
    pub fn parse_guessed(&self) -> Result<Vec<char>, DbError> {
        decode_letters(&self.guessed_letters)
    }

    /// Decodes the wrong letters in insertion order.
    pub fn parse_wrong(&self) -> Result<Vec<char>, DbError> {
        decode_letters(&self.wrong_letters)
    }
}

/// Insertable game model for starting today's attempt.
#[derive(Debug, Clone, Insertable, new)]
#[diesel(table_name = schema::games)]
pub struct NewGameRecord {
    user_id: Option<i32>,
    difficulty: String,
    word: String,
    is_completed: bool,
    is_won: bool,
    attempts: i32,
    hints_used: i32,
    guessed_letters: String,
    wrong_letters: String,
    // Set explicitly in local wall-clock time; the day bucket for "today's
    // game" runs local midnight to midnight, not UTC.
    created_at: NaiveDateTime,
}

impl NewGameRecord {
    /// A fresh, untouched attempt at the given word, created now.
    #[instrument]
    pub fn fresh(difficulty: Difficulty, word: String, user_id: Option<i32>) -> Self {
        Self::new(
            user_id,
            difficulty.to_db_string().to_string(),
            word,
            false,
            false,
            0,
            0,
            "[]".to_string(),
            "[]".to_string(),
            chrono::Local::now().naive_local(),
        )
    }
}

/// Partial update applied to an in-progress game.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = schema::games)]
pub struct GameUpdate {
    /// Completed flag.
    pub is_completed: Option<bool>,
    /// Won flag.
    pub is_won: Option<bool>,
    /// Incorrect-guess counter.
    pub attempts: Option<i32>,
    /// Hints consumed (0 or 1).
    pub hints_used: Option<i32>,
    /// Elapsed seconds, set only at completion.
    pub time_seconds: Option<i32>,
    /// JSON-encoded guessed letters.
    pub guessed_letters: Option<String>,
    /// JSON-encoded wrong letters.
    pub wrong_letters: Option<String>,
}

impl GameUpdate {
    /// Letter-progress update after a guess.
    pub fn progress(
        guessed: &[char],
        wrong: &[char],
        attempts: i32,
    ) -> Result<Self, DbError> {
        Ok(Self {
            attempts: Some(attempts),
            guessed_letters: Some(encode_letters(guessed)?),
            wrong_letters: Some(encode_letters(wrong)?),
            ..Self::default()
        })
    }

    /// Records the single hint consumption.
    pub fn hint_used() -> Self {
        Self {
            hints_used: Some(1),
            ..Self::default()
        }
    }
}

/// Cumulative per-difficulty statistics row.
#[derive(Debug, Clone, serde::Serialize, Queryable, Identifiable, Selectable, Getters)]
#[diesel(table_name = schema::game_stats)]
pub struct StatRow {
    id: i32,
    user_id: Option<i32>,
    difficulty: String,
    total_games: i32,
    total_wins: i32,
    current_streak: i32,
    best_streak: i32,
    average_time: i32,
    total_hints: i32,
}

impl StatRow {
    /// Converts the row into the pure aggregate used by the stats fold.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            total_games: self.total_games,
            total_wins: self.total_wins,
            current_streak: self.current_streak,
            best_streak: self.best_streak,
            average_time: self.average_time,
            total_hints: self.total_hints,
        }
    }
}

/// Insertable stats model for the lazily-created first entry.
#[derive(Debug, Clone, Insertable, new)]
#[diesel(table_name = schema::game_stats)]
pub struct NewStatRow {
    user_id: Option<i32>,
    difficulty: String,
    total_games: i32,
    total_wins: i32,
    current_streak: i32,
    best_streak: i32,
    average_time: i32,
    total_hints: i32,
}

impl NewStatRow {
    /// Builds an insertable row from a folded aggregate.
    pub fn from_snapshot(
        difficulty: Difficulty,
        user_id: Option<i32>,
        snapshot: &StatsSnapshot,
    ) -> Self {
        Self::new(
            user_id,
            difficulty.to_db_string().to_string(),
            snapshot.total_games,
            snapshot.total_wins,
            snapshot.current_streak,
            snapshot.best_streak,
            snapshot.average_time,
            snapshot.total_hints,
        )
    }
}
