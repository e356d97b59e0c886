//! Pure fold of one completed game into a difficulty's running statistics.

use serde::Serialize;
use tracing::instrument;

use crate::game::CompletedGame;

/// Cumulative counters for one (difficulty, player) key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    /// Completed games, wins and losses alike.
    pub total_games: i32,
    /// Completed games that were won.
    pub total_wins: i32,
    /// Consecutive wins; reset to 0 on any loss.
    pub current_streak: i32,
    /// Highest current_streak ever observed. Monotone.
    pub best_streak: i32,
    /// Running mean of elapsed seconds across all completed games,
    /// losses included.
    pub average_time: i32,
    /// Cumulative hint usage.
    pub total_hints: i32,
}

/// Folds a completed game into the running statistics.
///
/// With no existing entry the result seeds a new one. Otherwise the average
/// is recomputed as an incremental mean from the previous mean and count,
/// matching how every prior entry was produced, rather than from a stored
/// raw sum.
#[instrument]
pub fn apply_result(existing: Option<&StatsSnapshot>, result: &CompletedGame) -> StatsSnapshot {
    let Some(stats) = existing else {
        let streak = if result.won { 1 } else { 0 };
        return StatsSnapshot {
            total_games: 1,
            total_wins: streak,
            current_streak: streak,
            best_streak: streak,
            average_time: result.time_seconds,
            total_hints: result.hints_used,
        };
    };

    let total_games = stats.total_games + 1;
    let total_wins = stats.total_wins + if result.won { 1 } else { 0 };
    let current_streak = if result.won {
        stats.current_streak + 1
    } else {
        0
    };
    let best_streak = stats.best_streak.max(current_streak);
    let total_hints = stats.total_hints + result.hints_used;

    let average_time = (f64::from(stats.average_time) * f64::from(total_games - 1)
        + f64::from(result.time_seconds))
        / f64::from(total_games);

    StatsSnapshot {
        total_games,
        total_wins,
        current_streak,
        best_streak,
        average_time: average_time.round() as i32,
        total_hints,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(won: bool, time_seconds: i32, hints_used: i32) -> CompletedGame {
        CompletedGame {
            won,
            time_seconds,
            attempts: 0,
            hints_used,
        }
    }

    #[test]
    fn test_first_win_seeds_entry() {
        let stats = apply_result(None, &result(true, 120, 0));
        assert_eq!(stats.total_games, 1);
        assert_eq!(stats.total_wins, 1);
        assert_eq!(stats.current_streak, 1);
        assert_eq!(stats.best_streak, 1);
        assert_eq!(stats.average_time, 120);
        assert_eq!(stats.total_hints, 0);
    }

    #[test]
    fn test_loss_resets_streak_and_counts_toward_average() {
        let first = apply_result(None, &result(true, 120, 0));
        let second = apply_result(Some(&first), &result(false, 60, 1));
        assert_eq!(second.total_games, 2);
        assert_eq!(second.total_wins, 1);
        assert_eq!(second.current_streak, 0);
        assert_eq!(second.best_streak, 1);
        assert_eq!(second.average_time, 90);
        assert_eq!(second.total_hints, 1);
    }

    #[test]
    fn test_consecutive_wins_build_streak() {
        let mut stats = apply_result(None, &result(true, 30, 0));
        for _ in 0..4 {
            stats = apply_result(Some(&stats), &result(true, 30, 0));
        }
        assert_eq!(stats.current_streak, 5);
        assert_eq!(stats.best_streak, 5);
        assert_eq!(stats.total_wins, 5);
    }

    #[test]
    fn test_best_streak_survives_loss() {
        let mut stats = apply_result(None, &result(true, 30, 0));
        stats = apply_result(Some(&stats), &result(true, 30, 0));
        stats = apply_result(Some(&stats), &result(false, 30, 0));
        stats = apply_result(Some(&stats), &result(true, 30, 0));
        assert_eq!(stats.current_streak, 1);
        assert_eq!(stats.best_streak, 2);
    }

    #[test]
    fn test_two_results_average_is_arithmetic_mean() {
        let first = apply_result(None, &result(true, 45, 0));
        let second = apply_result(Some(&first), &result(true, 75, 0));
        assert_eq!(second.average_time, 60);
    }
}
