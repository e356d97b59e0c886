//! Database repository for the term catalog, daily games, and stats.

use chrono::{Duration, Local, NaiveDateTime};
use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info, instrument, warn};

use crate::db::{
    DbError, GameRecord, GameUpdate, NewGameRecord, NewStatRow, StatRow, Term, schema, seed,
};
use crate::game::{CompletedGame, Difficulty, GameError, PlayerKey, apply_result};

/// Embedded schema migrations, applied at startup and in test fixtures.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Local-time bounds of today's day bucket, midnight to midnight.
fn today_bounds() -> (NaiveDateTime, NaiveDateTime) {
    let start = Local::now()
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .expect("midnight is a valid time");
    (start, start + Duration::days(1))
}

/// Database repository for game and stats operations.
#[derive(Debug, Clone)]
pub struct GameRepository {
    db_path: String,
}

impl GameRepository {
    /// Creates a new repository connected to the database at the given path.
    ///
    /// Use `":memory:"` for an in-memory database (useful for tests).
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the path is invalid.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn new(db_path: String) -> Result<Self, DbError> {
        info!(path = %db_path, "Creating GameRepository");
        Ok(Self { db_path })
    }

    /// Establishes a database connection.
    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, DbError> {
        debug!(path = %self.db_path, "Establishing connection");
        SqliteConnection::establish(&self.db_path)
            .map_err(|e| DbError::new(format!("Failed to connect to '{}': {}", self.db_path, e)))
    }

    /// Applies any pending schema migrations.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a migration fails.
    #[instrument(skip(self))]
    pub fn apply_migrations(&self) -> Result<(), DbError> {
        let mut conn = self.connection()?;
        conn.run_pending_migrations(MIGRATIONS)
            .map_err(|e| DbError::new(format!("Migration error: {}", e)))?;
        info!("Migrations applied");
        Ok(())
    }

    /// Seeds the built-in term catalog when the terms table is empty.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn ensure_seeded(&self) -> Result<(), DbError> {
        let mut conn = self.connection()?;

        let existing: i64 = schema::terms::table.count().get_result(&mut conn)?;
        if existing > 0 {
            debug!(existing, "Term catalog already populated");
            return Ok(());
        }

        let catalog = seed::builtin_catalog();
        let inserted = diesel::insert_into(schema::terms::table)
            .values(&catalog)
            .execute(&mut conn)?;

        info!(inserted, "Term catalog seeded");
        Ok(())
    }

    /// Loads the active terms for a difficulty in stable id order.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn get_active_terms(&self, difficulty: Difficulty) -> Result<Vec<Term>, DbError> {
        let mut conn = self.connection()?;

        let terms = schema::terms::table
            .filter(schema::terms::difficulty.eq(difficulty.to_db_string()))
            .filter(schema::terms::is_active.eq(true))
            .order(schema::terms::id.asc())
            .load::<Term>(&mut conn)?;

        debug!(count = terms.len(), "Active terms loaded");
        Ok(terms)
    }

    /// Loads every term for a difficulty, active or not.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn get_terms(&self, difficulty: Difficulty) -> Result<Vec<Term>, DbError> {
        let mut conn = self.connection()?;

        let terms = schema::terms::table
            .filter(schema::terms::difficulty.eq(difficulty.to_db_string()))
            .order(schema::terms::id.asc())
            .load::<Term>(&mut conn)?;

        debug!(count = terms.len(), "Terms loaded");
        Ok(terms)
    }

    /// Gets today's game for a (difficulty, player) key, if one exists.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn get_todays_game(
        &self,
        difficulty: Difficulty,
        player: PlayerKey,
    ) -> Result<Option<GameRecord>, DbError> {
        let mut conn = self.connection()?;
        let game = Self::find_todays_game(&mut conn, difficulty, player)?;

        if let Some(ref g) = game {
            debug!(game_id = g.id(), completed = g.is_completed(), "Today's game found");
        } else {
            debug!("No game today for this key");
        }

        Ok(game)
    }

    fn find_todays_game(
        conn: &mut SqliteConnection,
        difficulty: Difficulty,
        player: PlayerKey,
    ) -> Result<Option<GameRecord>, DbError> {
        let (start, end) = today_bounds();

        let mut query = schema::games::table
            .filter(schema::games::difficulty.eq(difficulty.to_db_string()))
            .filter(schema::games::created_at.ge(start))
            .filter(schema::games::created_at.lt(end))
            .into_boxed();

        query = match player.user_id() {
            Some(id) => query.filter(schema::games::user_id.eq(id)),
            None => query.filter(schema::games::user_id.is_null()),
        };

        Ok(query.first::<GameRecord>(conn).optional()?)
    }

    /// Atomic find-or-create of today's game for a (difficulty, player) key.
    ///
    /// Runs as a single immediate transaction so two near-simultaneous
    /// initialization requests (duplicate tab loads) resolve to one record.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Db`] if a database error occurs.
    #[instrument(skip(self, word))]
    pub fn get_or_create_todays_game(
        &self,
        difficulty: Difficulty,
        word: String,
        player: PlayerKey,
    ) -> Result<GameRecord, GameError> {
        let mut conn = self.connection().map_err(GameError::Db)?;

        let game = conn.immediate_transaction::<_, GameError, _>(|conn| {
            if let Some(existing) = Self::find_todays_game(conn, difficulty, player)? {
                debug!(game_id = existing.id(), "Reusing today's existing game");
                return Ok(existing);
            }

            let new_game = NewGameRecord::fresh(difficulty, word, player.user_id());
            let created = diesel::insert_into(schema::games::table)
                .values(&new_game)
                .returning(GameRecord::as_returning())
                .get_result(conn)?;

            info!(game_id = created.id(), "Created today's game");
            Ok(created)
        })?;

        Ok(game)
    }

    /// Applies a partial progress update to a game.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::NotFound`] for an unknown id, [`GameError::Db`]
    /// on database errors.
    #[instrument(skip(self, update))]
    pub fn update_game(&self, id: i32, update: GameUpdate) -> Result<GameRecord, GameError> {
        let mut conn = self.connection().map_err(GameError::Db)?;

        let game = diesel::update(schema::games::table.find(id))
            .set(&update)
            .returning(GameRecord::as_returning())
            .get_result(&mut conn)
            .optional()
            .map_err(|e| GameError::Db(DbError::from(e)))?;

        match game {
            Some(g) => {
                debug!(game_id = g.id(), "Game updated");
                Ok(g)
            }
            None => {
                warn!(game_id = id, "Update targeted unknown game");
                Err(GameError::NotFound)
            }
        }
    }

    /// Completes a game and folds the result into the difficulty's stats,
    /// all-or-nothing.
    ///
    /// The whole operation is one transaction: either the game is marked
    /// completed and the stats entry updated, or neither changes, so a
    /// client-initiated retry is always safe to repeat in full.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::NotFound`] for an unknown id,
    /// [`GameError::AlreadyCompleted`] when completion was already recorded
    /// (the result is not double-counted), and [`GameError::Db`] on database
    /// errors.
    #[instrument(skip(self))]
    pub fn complete_game(
        &self,
        id: i32,
        result: &CompletedGame,
        player: PlayerKey,
    ) -> Result<(GameRecord, StatRow), GameError> {
        let mut conn = self.connection().map_err(GameError::Db)?;

        conn.immediate_transaction::<_, GameError, _>(|conn| {
            let game = schema::games::table
                .find(id)
                .first::<GameRecord>(conn)
                .optional()?
                .ok_or(GameError::NotFound)?;

            if *game.is_completed() {
                warn!(game_id = id, "Completion already recorded");
                return Err(GameError::AlreadyCompleted);
            }

            let difficulty = game.parse_difficulty().map_err(GameError::Db)?;

            let update = GameUpdate {
                is_completed: Some(true),
                is_won: Some(result.won),
                attempts: Some(result.attempts),
                hints_used: Some(result.hints_used),
                time_seconds: Some(result.time_seconds),
                ..GameUpdate::default()
            };
            let completed = diesel::update(schema::games::table.find(id))
                .set(&update)
                .returning(GameRecord::as_returning())
                .get_result(conn)?;

            let stats = Self::fold_stats(conn, difficulty, result, player)?;

            info!(
                game_id = id,
                won = result.won,
                streak = stats.current_streak(),
                "Game completed and stats folded"
            );
            Ok((completed, stats))
        })
    }

    /// Folds one result into the stats row for (difficulty, player),
    /// creating the row lazily on first completion.
    fn fold_stats(
        conn: &mut SqliteConnection,
        difficulty: Difficulty,
        result: &CompletedGame,
        player: PlayerKey,
    ) -> Result<StatRow, GameError> {
        let existing = Self::find_stats(conn, difficulty, player)?;
        let snapshot = apply_result(existing.as_ref().map(StatRow::snapshot).as_ref(), result);

        let row = match existing {
            Some(row) => diesel::update(schema::game_stats::table.find(*row.id()))
                .set((
                    schema::game_stats::total_games.eq(snapshot.total_games),
                    schema::game_stats::total_wins.eq(snapshot.total_wins),
                    schema::game_stats::current_streak.eq(snapshot.current_streak),
                    schema::game_stats::best_streak.eq(snapshot.best_streak),
                    schema::game_stats::average_time.eq(snapshot.average_time),
                    schema::game_stats::total_hints.eq(snapshot.total_hints),
                ))
                .returning(StatRow::as_returning())
                .get_result(conn)?,
            None => diesel::insert_into(schema::game_stats::table)
                .values(NewStatRow::from_snapshot(
                    difficulty,
                    player.user_id(),
                    &snapshot,
                ))
                .returning(StatRow::as_returning())
                .get_result(conn)?,
        };

        Ok(row)
    }

    fn find_stats(
        conn: &mut SqliteConnection,
        difficulty: Difficulty,
        player: PlayerKey,
    ) -> Result<Option<StatRow>, DbError> {
        let mut query = schema::game_stats::table
            .filter(schema::game_stats::difficulty.eq(difficulty.to_db_string()))
            .into_boxed();

        query = match player.user_id() {
            Some(id) => query.filter(schema::game_stats::user_id.eq(id)),
            None => query.filter(schema::game_stats::user_id.is_null()),
        };

        Ok(query.first::<StatRow>(conn).optional()?)
    }

    /// Gets the stats entry for a (difficulty, player) key, if one exists.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn get_stats(
        &self,
        difficulty: Difficulty,
        player: PlayerKey,
    ) -> Result<Option<StatRow>, DbError> {
        let mut conn = self.connection()?;
        Self::find_stats(&mut conn, difficulty, player)
    }

    /// Gets every stats entry for a player across difficulties.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn get_all_stats(&self, player: PlayerKey) -> Result<Vec<StatRow>, DbError> {
        let mut conn = self.connection()?;

        let mut query = schema::game_stats::table.into_boxed();
        query = match player.user_id() {
            Some(id) => query.filter(schema::game_stats::user_id.eq(id)),
            None => query.filter(schema::game_stats::user_id.is_null()),
        };

        let stats = query
            .order(schema::game_stats::difficulty.asc())
            .load::<StatRow>(&mut conn)?;

        debug!(count = stats.len(), "Stats entries loaded");
        Ok(stats)
    }

    /// Persists letter progress for an in-progress game.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::NotFound`] for an unknown id, [`GameError::Db`]
    /// on database or encoding errors.
    #[instrument(skip(self, guessed, wrong))]
    pub fn save_progress(
        &self,
        id: i32,
        guessed: &[char],
        wrong: &[char],
        attempts: i32,
    ) -> Result<GameRecord, GameError> {
        let update = GameUpdate::progress(guessed, wrong, attempts).map_err(GameError::Db)?;
        self.update_game(id, update)
    }
}
