//! Session engine: guess evaluation and session resume logic.
//!
//! The engine is a state machine over `Playing -> Won | Lost` driven by
//! discrete events (begin, guess, hint, reset). It owns no storage; the
//! caller persists the effects it reports.

use chrono::Local;
use tracing::{debug, info, instrument, warn};

use crate::db::{GameRecord, Term};
use crate::game::{
    CompletedGame, Difficulty, EngineConfig, GameError, GameStatus, GuessOutcome, HintOutcome,
    SessionState,
};

/// How a session came into being when `begin` derived it from storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOrigin {
    /// No record existed; the caller must persist a new one.
    Fresh,
    /// An in-progress record was resumed verbatim.
    Resumed,
    /// The record was already completed; terminal view only, never
    /// re-persisted.
    Replay,
}

/// In-memory engine for one player's daily session.
#[derive(Debug, Clone)]
pub struct SessionEngine {
    config: EngineConfig,
    state: SessionState,
    origin: Option<SessionOrigin>,
}

impl SessionEngine {
    /// Creates an engine in the empty pre-difficulty state.
    #[instrument]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            state: SessionState::empty(config.max_attempts),
            origin: None,
        }
    }

    /// Read-only snapshot for rendering.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// How the current session was derived, if one is active.
    pub fn origin(&self) -> Option<SessionOrigin> {
        self.origin
    }

    /// Clears everything and records the chosen tier.
    #[instrument(skip(self))]
    pub fn select_difficulty(&mut self, difficulty: Difficulty) {
        self.state = SessionState::empty(self.config.max_attempts);
        self.state.difficulty = Some(difficulty);
        self.origin = None;
    }

    /// Returns to the empty pre-difficulty state.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.state = SessionState::empty(self.config.max_attempts);
        self.origin = None;
    }

    /// Derives session state from today's term and any persisted record.
    ///
    /// - No record: fresh start; the caller persists a new [`GameRecord`].
    /// - Record not completed: resume with letters, attempts, and hints
    ///   copied verbatim; start time is the record's creation time.
    /// - Record completed: terminal replay view. Guessed letters back-fill
    ///   to the word's distinct letters when the record stored none; the
    ///   end time set here is only a completion marker, the authoritative
    ///   elapsed time stays the record's stored seconds.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Db`] if the record's letter arrays or difficulty
    /// fail to decode.
    #[instrument(skip(self, term, record), fields(word = %term.word()))]
    pub fn begin(
        &mut self,
        term: Term,
        record: Option<&GameRecord>,
    ) -> Result<SessionOrigin, GameError> {
        let difficulty = term.parse_difficulty().map_err(GameError::Db)?;
        let now = Local::now().naive_local();

        let origin = match record {
            None => {
                self.state = SessionState::empty(self.config.max_attempts);
                self.state.difficulty = Some(difficulty);
                self.state.term = Some(term);
                self.state.started_at = Some(now);
                SessionOrigin::Fresh
            }
            Some(rec) if !rec.is_completed() => {
                self.state = SessionState::empty(self.config.max_attempts);
                self.state.difficulty = Some(difficulty);
                self.state.guessed_letters = rec.parse_guessed().map_err(GameError::Db)?;
                self.state.wrong_letters = rec.parse_wrong().map_err(GameError::Db)?;
                self.state.attempts = *rec.attempts();
                self.state.hints_used = *rec.hints_used();
                self.state.started_at = Some(*rec.created_at());
                self.state.term = Some(term);
                SessionOrigin::Resumed
            }
            Some(rec) => {
                let mut guessed = rec.parse_guessed().map_err(GameError::Db)?;
                if guessed.is_empty() {
                    // Legacy records may predate letter persistence.
                    guessed = distinct_letters(term.word());
                }
                self.state = SessionState::empty(self.config.max_attempts);
                self.state.difficulty = Some(difficulty);
                self.state.status = if *rec.is_won() {
                    GameStatus::Won
                } else {
                    GameStatus::Lost
                };
                self.state.guessed_letters = guessed;
                self.state.wrong_letters = rec.parse_wrong().map_err(GameError::Db)?;
                self.state.attempts = *rec.attempts();
                self.state.hints_used = *rec.hints_used();
                self.state.started_at = Some(*rec.created_at());
                self.state.ended_at = Some(now);
                self.state.term = Some(term);
                SessionOrigin::Replay
            }
        };

        info!(?origin, status = ?self.state.status, "Session derived");
        self.origin = Some(origin);
        Ok(origin)
    }

    /// Applies a letter guess.
    ///
    /// Expects a single uppercase A-Z letter already validated by the caller.
    /// Guessing while not in `Playing`, or repeating a letter, is a no-op
    /// that reports the current derived status.
    #[instrument(skip(self))]
    pub fn guess(&mut self, letter: char) -> GuessOutcome {
        let Some(word) = self.state.term.as_ref().map(|t| t.word().clone()) else {
            debug!("Guess ignored, no word loaded");
            return GuessOutcome {
                correct: false,
                complete: false,
                won: false,
            };
        };

        if self.state.status != GameStatus::Playing
            || self.state.guessed_letters.contains(&letter)
        {
            debug!(letter = %letter, status = ?self.state.status, "Guess is a no-op");
            return GuessOutcome {
                correct: false,
                complete: self.state.status != GameStatus::Playing,
                won: self.state.status == GameStatus::Won,
            };
        }

        self.state.guessed_letters.push(letter);
        let correct = word.contains(letter);
        if !correct {
            self.state.wrong_letters.push(letter);
            self.state.attempts += 1;
        }

        let all_guessed = self.state.all_letters_guessed();
        let complete = all_guessed || self.state.attempts >= self.config.max_attempts;
        // Win check takes priority: a correct final letter wins even on
        // the guess that would otherwise end the budget.
        let won = all_guessed && self.state.attempts < self.config.max_attempts;

        if complete {
            self.state.status = if won { GameStatus::Won } else { GameStatus::Lost };
            self.state.ended_at = Some(Local::now().naive_local());
            info!(won, attempts = self.state.attempts, "Session reached terminal state");
        }

        GuessOutcome {
            correct,
            complete,
            won,
        }
    }

    /// Consumes the single hint allowance.
    ///
    /// A second request is rejected as a limit-reached signal without
    /// touching `hints_used`.
    #[instrument(skip(self))]
    pub fn use_hint(&mut self) -> HintOutcome {
        let Some(term) = &self.state.term else {
            warn!("Hint requested with no word loaded");
            return HintOutcome::LimitReached;
        };

        if self.state.hints_used >= 1 {
            debug!("Hint already used");
            return HintOutcome::LimitReached;
        }

        self.state.hints_used = 1;
        HintOutcome::Granted(term.hint().clone())
    }

    /// The completion payload, once the session reaches a terminal state.
    ///
    /// `None` while playing, and `None` for replayed sessions: a replay was
    /// completed in an earlier process and must never be persisted again.
    pub fn completion(&self) -> Option<CompletedGame> {
        if self.origin == Some(SessionOrigin::Replay) {
            return None;
        }
        if self.state.status == GameStatus::Playing {
            return None;
        }
        let started = self.state.started_at?;
        let ended = self.state.ended_at?;
        let elapsed = (ended - started).num_seconds().max(0) as i32;
        Some(CompletedGame {
            won: self.state.status == GameStatus::Won,
            time_seconds: elapsed,
            attempts: self.state.attempts,
            hints_used: self.state.hints_used,
        })
    }

    /// Whole seconds elapsed since the session started.
    pub fn elapsed_seconds(&self) -> i64 {
        let Some(started) = self.state.started_at else {
            return 0;
        };
        let end = self
            .state
            .ended_at
            .unwrap_or_else(|| Local::now().naive_local());
        (end - started).num_seconds().max(0)
    }
}

/// Distinct letters of a word, in first-occurrence order.
fn distinct_letters(word: &str) -> Vec<char> {
    let mut letters = Vec::new();
    for c in word.chars() {
        if !letters.contains(&c) {
            letters.push(c);
        }
    }
    letters
}
