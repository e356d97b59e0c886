//! Derived display values: score, timers, and the shareable result card.
//!
//! Everything here is recomputable from persisted fields; nothing is
//! authoritative state.

use chrono::{Duration, Local, NaiveDateTime};
use tracing::instrument;

use crate::game::{Difficulty, SessionState};

const BASE_SCORE: f64 = 1000.0;
const TIME_BONUS_CEILING: i32 = 300;
const ATTEMPT_PENALTY: i32 = 50;
const HINT_PENALTY: i32 = 100;

/// Computes the display score for a finished session.
///
/// Base 1000, plus a bonus for finishing under five minutes, minus penalties
/// for wrong attempts and the hint, scaled by the tier multiplier, floored
/// at zero.
#[instrument]
pub fn calculate_score(
    difficulty: Difficulty,
    attempts: i32,
    hints_used: i32,
    time_seconds: i32,
) -> i32 {
    let time_bonus = (TIME_BONUS_CEILING - time_seconds).max(0);
    let attempt_penalty = attempts * ATTEMPT_PENALTY;
    let hint_penalty = hints_used * HINT_PENALTY;

    let raw = (BASE_SCORE + f64::from(time_bonus)
        - f64::from(attempt_penalty)
        - f64::from(hint_penalty))
        * difficulty.multiplier();

    (raw.round() as i32).max(0)
}

/// Formats elapsed session time as `m:ss`.
pub fn format_game_time(started_at: Option<NaiveDateTime>, ended_at: Option<NaiveDateTime>) -> String {
    let Some(start) = started_at else {
        return "0:00".to_string();
    };
    let end = ended_at.unwrap_or_else(|| Local::now().naive_local());
    let elapsed = (end - start).num_seconds().max(0);
    format!("{}:{:02}", elapsed / 60, elapsed % 60)
}

/// Local midnight when the next daily word becomes available.
pub fn next_daily_reset() -> NaiveDateTime {
    let tomorrow = Local::now().date_naive() + Duration::days(1);
    tomorrow.and_hms_opt(0, 0, 0).expect("midnight is a valid time")
}

/// Countdown to the next daily word, as `"Hh Mm"`.
pub fn time_until_next_daily() -> String {
    let remaining = next_daily_reset() - Local::now().naive_local();
    let hours = remaining.num_hours();
    let minutes = remaining.num_minutes() % 60;
    format!("{}h {}m", hours, minutes)
}

/// Builds the shareable result card for a finished session.
#[instrument(skip(state))]
pub fn share_text(state: &SessionState, word: &str, time: &str, won: bool) -> String {
    let date = Local::now().format("%Y-%m-%d");
    let (emoji, result) = if won { ("\u{2705}", "Solved") } else { ("\u{274C}", "Failed") };
    let difficulty = state
        .difficulty
        .map(|d| d.to_db_string().to_uppercase())
        .unwrap_or_default();

    format!(
        "\u{1FA99} BitWord {date} \u{1FA99}\n\
         Difficulty: {difficulty}\n\
         Result: {emoji} {result}\n\
         Time: {time}\n\
         Attempts: {}/{}\n\
         Word: {word}",
        state.attempts, state.max_attempts,
    )
}
