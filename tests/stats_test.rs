//! Tests for multi-game statistics sequences.

use bitword::{CompletedGame, StatsSnapshot, apply_result};

fn game(won: bool, time_seconds: i32, hints_used: i32) -> CompletedGame {
    CompletedGame {
        won,
        time_seconds,
        attempts: if won { 1 } else { 3 },
        hints_used,
    }
}

fn fold_all(results: &[CompletedGame]) -> StatsSnapshot {
    let mut stats: Option<StatsSnapshot> = None;
    for result in results {
        stats = Some(apply_result(stats.as_ref(), result));
    }
    stats.expect("At least one result")
}

#[test]
fn test_week_of_play() {
    // Win, win, loss, win, win, win, loss.
    let results = [
        game(true, 60, 0),
        game(true, 90, 1),
        game(false, 200, 0),
        game(true, 45, 0),
        game(true, 30, 0),
        game(true, 120, 1),
        game(false, 180, 0),
    ];
    let stats = fold_all(&results);

    assert_eq!(stats.total_games, 7);
    assert_eq!(stats.total_wins, 5);
    assert_eq!(stats.current_streak, 0);
    assert_eq!(stats.best_streak, 3);
    assert_eq!(stats.total_hints, 2);
}

#[test]
fn test_streak_recovers_after_loss() {
    let results = [
        game(true, 60, 0),
        game(false, 60, 0),
        game(true, 60, 0),
        game(true, 60, 0),
        game(true, 60, 0),
    ];
    let stats = fold_all(&results);

    assert_eq!(stats.current_streak, 3);
    assert_eq!(stats.best_streak, 3);
}

#[test]
fn test_average_of_uniform_times_is_exact() {
    // The incremental mean has no drift when every game takes equal time.
    let results = vec![game(true, 85, 0); 20];
    let stats = fold_all(&results);

    assert_eq!(stats.total_games, 20);
    assert_eq!(stats.average_time, 85);
}

#[test]
fn test_average_tracks_arithmetic_mean_closely() {
    // Each step rounds to a whole second, so the running mean can drift
    // from the true mean by at most a few seconds over a short history.
    let times = [30, 60, 90, 120, 150, 45, 75];
    let results: Vec<CompletedGame> = times.iter().map(|&t| game(true, t, 0)).collect();
    let stats = fold_all(&results);

    let true_mean = times.iter().sum::<i32>() as f64 / times.len() as f64;
    assert!((f64::from(stats.average_time) - true_mean).abs() <= 2.0);
}

#[test]
fn test_losses_count_toward_totals_but_not_wins() {
    let results = vec![game(false, 100, 1); 4];
    let stats = fold_all(&results);

    assert_eq!(stats.total_games, 4);
    assert_eq!(stats.total_wins, 0);
    assert_eq!(stats.current_streak, 0);
    assert_eq!(stats.best_streak, 0);
    assert_eq!(stats.average_time, 100);
    assert_eq!(stats.total_hints, 4);
}
