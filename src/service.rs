//! Session orchestration layer.
//!
//! [`GameService`] wraps the repository and the in-memory session engine:
//! it resolves today's word, derives or resumes the persisted game, pushes
//! guess and hint effects back into storage, and runs the at-most-once
//! completion when a session reaches a terminal state.

use chrono::Local;
use tracing::{debug, info, instrument, warn};

use crate::db::{GameRepository, GameUpdate, StatRow, Term};
use crate::game::{
    Difficulty, EngineConfig, GameError, GameStatus, GuessOutcome, HintOutcome, PlayerKey,
    SessionEngine, SessionOrigin, SessionState, select_todays_term,
};

/// Service layer driving one player's daily session.
#[derive(Debug, Clone)]
pub struct GameService {
    repository: GameRepository,
    engine: SessionEngine,
    player: PlayerKey,
    game_id: Option<i32>,
}

impl GameService {
    /// Creates a new service backed by the given repository.
    #[instrument(skip(repository))]
    pub fn new(repository: GameRepository, config: EngineConfig) -> Self {
        info!("Creating GameService");
        Self {
            repository,
            engine: SessionEngine::new(config),
            player: PlayerKey::Anonymous,
            game_id: None,
        }
    }

    /// Returns the underlying repository.
    pub fn repository(&self) -> &GameRepository {
        &self.repository
    }

    /// Read-only snapshot of the current session for rendering.
    pub fn state(&self) -> &SessionState {
        self.engine.state()
    }

    /// Resolves today's term for a tier without touching session state.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::EmptyCatalog`] when the tier has no active
    /// terms, [`GameError::Db`] on storage failures.
    #[instrument(skip(self))]
    pub fn todays_term(&self, difficulty: Difficulty) -> Result<Term, GameError> {
        let terms = self
            .repository
            .get_active_terms(difficulty)
            .map_err(GameError::Db)?;
        let term = select_todays_term(&terms, difficulty, Local::now().date_naive())?;
        Ok(term.clone())
    }

    /// Initializes (or resumes) today's session for a difficulty tier.
    ///
    /// Fetches today's word, derives session state from any persisted
    /// record, and persists a fresh record when none exists. The
    /// find-or-create is atomic in the repository, so duplicate
    /// initializations resolve to the same record.
    ///
    /// # Errors
    ///
    /// Surfaces repository failures unchanged; the session is left in the
    /// pre-initialization state so a manual retry is safe.
    #[instrument(skip(self))]
    pub fn select_difficulty(
        &mut self,
        difficulty: Difficulty,
        player: PlayerKey,
    ) -> Result<SessionOrigin, GameError> {
        self.engine.select_difficulty(difficulty);
        self.player = player;
        self.game_id = None;

        let term = self.todays_term(difficulty)?;
        let existing = self
            .repository
            .get_todays_game(difficulty, player)
            .map_err(GameError::Db)?;

        let origin = self.engine.begin(term.clone(), existing.as_ref())?;

        let record = match existing {
            Some(record) => record,
            None => self.repository.get_or_create_todays_game(
                difficulty,
                term.word().clone(),
                player,
            )?,
        };
        self.game_id = Some(*record.id());

        info!(game_id = record.id(), ?origin, "Session initialized");
        Ok(origin)
    }

    /// Submits a letter guess and persists its effects.
    ///
    /// Letters are normalized to uppercase; anything that is not a single
    /// A-Z letter is rejected before touching state. Repeated letters and
    /// guesses after completion are silent no-ops reflected only by the
    /// unchanged session state. On the transition into a terminal state the
    /// completed result is folded into stats exactly once.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Validation`] for malformed input and surfaces
    /// repository failures unchanged.
    #[instrument(skip(self))]
    pub fn submit_guess(&mut self, letter: char) -> Result<GuessOutcome, GameError> {
        let letter = letter.to_ascii_uppercase();
        if !letter.is_ascii_uppercase() {
            return Err(GameError::Validation(format!(
                "Guess must be a single letter A-Z, got '{}'",
                letter
            )));
        }

        let applies = self.engine.state().status == GameStatus::Playing
            && !self.engine.state().guessed_letters.contains(&letter);

        let outcome = self.engine.guess(letter);
        if !applies {
            return Ok(outcome);
        }

        let Some(game_id) = self.game_id else {
            warn!("Guess applied with no persisted game");
            return Ok(outcome);
        };

        let state = self.engine.state();
        self.repository.save_progress(
            game_id,
            &state.guessed_letters,
            &state.wrong_letters,
            state.attempts,
        )?;

        if outcome.complete
            && let Some(result) = self.engine.completion()
        {
            self.repository
                .complete_game(game_id, &result, self.player)?;
            info!(game_id, won = result.won, "Completion persisted");
        }

        Ok(outcome)
    }

    /// Requests the single hint for this session.
    ///
    /// The first request returns the hint text and persists the usage; any
    /// further request is a limit-reached signal and changes nothing.
    ///
    /// # Errors
    ///
    /// Surfaces repository failures unchanged.
    #[instrument(skip(self))]
    pub fn request_hint(&mut self) -> Result<HintOutcome, GameError> {
        let outcome = self.engine.use_hint();

        if let HintOutcome::Granted(_) = outcome
            && let Some(game_id) = self.game_id
        {
            self.repository.update_game(game_id, GameUpdate::hint_used())?;
            debug!(game_id, "Hint usage persisted");
        }

        Ok(outcome)
    }

    /// Returns to the empty pre-difficulty state.
    #[instrument(skip(self))]
    pub fn reset_session(&mut self) {
        self.engine.reset();
        self.game_id = None;
    }

    /// Gets the stats entry for one (difficulty, player) key.
    ///
    /// # Errors
    ///
    /// Surfaces repository failures unchanged.
    #[instrument(skip(self))]
    pub fn stats(
        &self,
        difficulty: Difficulty,
        player: PlayerKey,
    ) -> Result<Option<StatRow>, GameError> {
        self.repository
            .get_stats(difficulty, player)
            .map_err(GameError::Db)
    }

    /// Gets every stats entry for a player.
    ///
    /// # Errors
    ///
    /// Surfaces repository failures unchanged.
    #[instrument(skip(self))]
    pub fn all_stats(&self, player: PlayerKey) -> Result<Vec<StatRow>, GameError> {
        self.repository
            .get_all_stats(player)
            .map_err(GameError::Db)
    }
}
