//! HTTP API over the repository.
//!
//! Thin JSON layer: handlers validate input, call the repository (or the
//! daily selector), and map [`GameError`] onto status codes. All game rules
//! live in [`crate::game`]; nothing here inspects letters or streaks.

use axum::Router;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, patch, post};
use chrono::Local;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info, instrument, warn};

use crate::db::{GameRecord, GameRepository, GameUpdate, StatRow, Term};
use crate::game::{CompletedGame, Difficulty, GameError, PlayerKey, select_todays_term};

/// Shared state for all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    repository: GameRepository,
}

impl AppState {
    /// Wraps a repository for handler use.
    pub fn new(repository: GameRepository) -> Self {
        Self { repository }
    }
}

/// Builds the API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/terms/{difficulty}", get(todays_term))
        .route("/api/terms/{difficulty}/all", get(all_terms))
        .route("/api/games", post(start_game))
        .route("/api/games/today/{difficulty}", get(todays_game))
        .route("/api/games/{id}", patch(update_game))
        .route("/api/games/{id}/complete", post(complete_game))
        .route("/api/stats", get(stats))
        .with_state(state)
}

/// JSON error envelope with the status mapping for [`GameError`].
struct ApiError(GameError);

impl From<GameError> for ApiError {
    fn from(err: GameError) -> Self {
        Self(err)
    }
}

impl From<crate::db::DbError> for ApiError {
    fn from(err: crate::db::DbError) -> Self {
        Self(GameError::Db(err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            GameError::Validation(_) => StatusCode::BAD_REQUEST,
            GameError::NotFound | GameError::EmptyCatalog => StatusCode::NOT_FOUND,
            GameError::AlreadyCompleted => StatusCode::CONFLICT,
            GameError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            warn!(error = %self.0, "Request failed");
        } else {
            debug!(error = %self.0, status = %status, "Request rejected");
        }

        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

#[derive(Debug, Deserialize)]
struct PlayerQuery {
    user_id: Option<i32>,
}

/// `GET /api/terms/{difficulty}`: today's term for a tier.
#[instrument(skip(state))]
async fn todays_term(
    State(state): State<AppState>,
    Path(difficulty): Path<Difficulty>,
) -> Result<Json<Term>, ApiError> {
    let terms = state.repository.get_active_terms(difficulty)?;
    let term = select_todays_term(&terms, difficulty, Local::now().date_naive())?;
    Ok(Json(term.clone()))
}

/// `GET /api/terms/{difficulty}/all`: the full catalog for a tier.
#[instrument(skip(state))]
async fn all_terms(
    State(state): State<AppState>,
    Path(difficulty): Path<Difficulty>,
) -> Result<Json<Vec<Term>>, ApiError> {
    let terms = state.repository.get_terms(difficulty)?;
    Ok(Json(terms))
}

#[derive(Debug, Deserialize)]
struct StartGameRequest {
    difficulty: Difficulty,
    user_id: Option<i32>,
}

/// `POST /api/games`: find-or-create today's game for a tier and player.
#[instrument(skip(state, req), fields(difficulty = ?req.difficulty))]
async fn start_game(
    State(state): State<AppState>,
    Json(req): Json<StartGameRequest>,
) -> Result<Json<GameRecord>, ApiError> {
    let terms = state.repository.get_active_terms(req.difficulty)?;
    let term = select_todays_term(&terms, req.difficulty, Local::now().date_naive())?;

    let game = state.repository.get_or_create_todays_game(
        req.difficulty,
        term.word().clone(),
        PlayerKey::from_user_id(req.user_id),
    )?;

    info!(game_id = game.id(), "Game ready");
    Ok(Json(game))
}

/// `GET /api/games/today/{difficulty}?user_id=`: today's game, 404 when none.
#[instrument(skip(state))]
async fn todays_game(
    State(state): State<AppState>,
    Path(difficulty): Path<Difficulty>,
    Query(player): Query<PlayerQuery>,
) -> Result<Json<GameRecord>, ApiError> {
    let game = state
        .repository
        .get_todays_game(difficulty, PlayerKey::from_user_id(player.user_id))?
        .ok_or(GameError::NotFound)?;
    Ok(Json(game))
}

#[derive(Debug, Deserialize)]
struct UpdateGameRequest {
    guessed_letters: Option<Vec<char>>,
    wrong_letters: Option<Vec<char>>,
    attempts: Option<i32>,
    hints_used: Option<i32>,
    time_seconds: Option<i32>,
}

/// `PATCH /api/games/{id}`: partial in-progress update.
#[instrument(skip(state, req))]
async fn update_game(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(req): Json<UpdateGameRequest>,
) -> Result<Json<GameRecord>, ApiError> {
    let mut update = GameUpdate::default();
    if let Some(ref guessed) = req.guessed_letters {
        update.guessed_letters = Some(crate::db::encode_letters(guessed)?);
    }
    if let Some(ref wrong) = req.wrong_letters {
        update.wrong_letters = Some(crate::db::encode_letters(wrong)?);
    }
    update.attempts = req.attempts;
    update.hints_used = req.hints_used;
    update.time_seconds = req.time_seconds;

    let game = state.repository.update_game(id, update)?;
    Ok(Json(game))
}

#[derive(Debug, Deserialize)]
struct CompleteGameRequest {
    won: bool,
    time_seconds: i32,
    attempts: i32,
    hints_used: i32,
    user_id: Option<i32>,
}

/// `POST /api/games/{id}/complete`: records the result and folds stats.
///
/// Idempotence is enforced by the repository: a second completion returns
/// 409 and leaves stats untouched.
#[instrument(skip(state, req), fields(won = req.won))]
async fn complete_game(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(req): Json<CompleteGameRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if req.time_seconds < 0 || req.attempts < 0 || req.hints_used < 0 {
        return Err(GameError::Validation(
            "time_seconds, attempts, and hints_used must be non-negative".to_string(),
        )
        .into());
    }

    let result = CompletedGame {
        won: req.won,
        time_seconds: req.time_seconds,
        attempts: req.attempts,
        hints_used: req.hints_used,
    };
    let (game, stats) =
        state
            .repository
            .complete_game(id, &result, PlayerKey::from_user_id(req.user_id))?;

    Ok(Json(json!({ "game": game, "stats": stats })))
}

#[derive(Debug, Deserialize)]
struct StatsQuery {
    difficulty: Option<Difficulty>,
    user_id: Option<i32>,
}

/// `GET /api/stats?difficulty=&user_id=`: one entry or all entries.
///
/// With a difficulty, a player with no completions yet gets 404 rather than
/// a fabricated zero row.
#[instrument(skip(state))]
async fn stats(
    State(state): State<AppState>,
    Query(query): Query<StatsQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let player = PlayerKey::from_user_id(query.user_id);

    match query.difficulty {
        Some(difficulty) => {
            let row = state
                .repository
                .get_stats(difficulty, player)?
                .ok_or(GameError::NotFound)?;
            Ok(Json(serde_json::to_value(row).map_err(crate::db::DbError::from)?))
        }
        None => {
            let rows: Vec<StatRow> = state.repository.get_all_stats(player)?;
            Ok(Json(serde_json::to_value(rows).map_err(crate::db::DbError::from)?))
        }
    }
}
