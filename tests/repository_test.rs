//! Tests for repository operations and the service flow on a real database.

use tempfile::NamedTempFile;

use bitword::{
    CompletedGame, Difficulty, EngineConfig, GameError, GameRepository, GameService, GameStatus,
    PlayerKey, SessionEngine, SessionOrigin, apply_result,
};

/// Creates a temporary database file with schema applied, returns the file
/// handle (must stay in scope to keep the file alive) and a ready repository.
fn setup_test_db() -> (NamedTempFile, GameRepository) {
    let db_file = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = db_file.path().to_str().expect("Invalid path").to_string();

    let repo = GameRepository::new(db_path).expect("Failed to create repository");
    repo.apply_migrations().expect("Migrations failed");
    (db_file, repo)
}

fn won_in(time_seconds: i32) -> CompletedGame {
    CompletedGame {
        won: true,
        time_seconds,
        attempts: 1,
        hints_used: 0,
    }
}

#[test]
fn test_ensure_seeded_populates_every_tier() {
    let (_db, repo) = setup_test_db();
    repo.ensure_seeded().expect("Seed failed");

    for difficulty in [
        Difficulty::Beginner,
        Difficulty::Intermediate,
        Difficulty::Advanced,
    ] {
        let terms = repo.get_active_terms(difficulty).expect("Query failed");
        assert_eq!(terms.len(), 10, "{difficulty} should have 10 terms");
    }
}

#[test]
fn test_ensure_seeded_is_idempotent() {
    let (_db, repo) = setup_test_db();
    repo.ensure_seeded().expect("First seed failed");
    repo.ensure_seeded().expect("Second seed failed");

    let terms = repo
        .get_active_terms(Difficulty::Beginner)
        .expect("Query failed");
    assert_eq!(terms.len(), 10);
}

#[test]
fn test_get_todays_game_empty() {
    let (_db, repo) = setup_test_db();
    let game = repo
        .get_todays_game(Difficulty::Beginner, PlayerKey::Anonymous)
        .expect("Query failed");
    assert!(game.is_none());
}

#[test]
fn test_get_or_create_returns_same_row() {
    let (_db, repo) = setup_test_db();

    let first = repo
        .get_or_create_todays_game(
            Difficulty::Beginner,
            "BITCOIN".to_string(),
            PlayerKey::Anonymous,
        )
        .expect("Create failed");
    let second = repo
        .get_or_create_todays_game(
            Difficulty::Beginner,
            "BITCOIN".to_string(),
            PlayerKey::Anonymous,
        )
        .expect("Find failed");

    assert_eq!(first.id(), second.id());
    assert_eq!(second.word(), "BITCOIN");
    assert!(!second.is_completed());
}

#[test]
fn test_games_are_scoped_by_player() {
    let (_db, repo) = setup_test_db();

    let anon = repo
        .get_or_create_todays_game(
            Difficulty::Beginner,
            "BITCOIN".to_string(),
            PlayerKey::Anonymous,
        )
        .expect("Create failed");
    let user = repo
        .get_or_create_todays_game(
            Difficulty::Beginner,
            "BITCOIN".to_string(),
            PlayerKey::User(7),
        )
        .expect("Create failed");

    assert_ne!(anon.id(), user.id());

    let found = repo
        .get_todays_game(Difficulty::Beginner, PlayerKey::User(7))
        .expect("Query failed")
        .expect("User game should exist");
    assert_eq!(found.id(), user.id());
}

#[test]
fn test_games_are_scoped_by_difficulty() {
    let (_db, repo) = setup_test_db();

    repo.get_or_create_todays_game(
        Difficulty::Beginner,
        "BITCOIN".to_string(),
        PlayerKey::Anonymous,
    )
    .expect("Create failed");

    let other = repo
        .get_todays_game(Difficulty::Advanced, PlayerKey::Anonymous)
        .expect("Query failed");
    assert!(other.is_none());
}

#[test]
fn test_save_progress_round_trips_letters() {
    let (_db, repo) = setup_test_db();
    let game = repo
        .get_or_create_todays_game(
            Difficulty::Beginner,
            "WALLET".to_string(),
            PlayerKey::Anonymous,
        )
        .expect("Create failed");

    repo.save_progress(*game.id(), &['W', 'X', 'A'], &['X'], 1)
        .expect("Save failed");

    let reloaded = repo
        .get_todays_game(Difficulty::Beginner, PlayerKey::Anonymous)
        .expect("Query failed")
        .expect("Game should exist");
    assert_eq!(reloaded.parse_guessed().expect("Decode failed"), vec!['W', 'X', 'A']);
    assert_eq!(reloaded.parse_wrong().expect("Decode failed"), vec!['X']);
    assert_eq!(*reloaded.attempts(), 1);
}

#[test]
fn test_update_unknown_game_is_not_found() {
    let (_db, repo) = setup_test_db();
    let result = repo.save_progress(999, &['A'], &[], 0);
    assert!(matches!(result, Err(GameError::NotFound)));
}

#[test]
fn test_complete_game_marks_record_and_seeds_stats() {
    let (_db, repo) = setup_test_db();
    let game = repo
        .get_or_create_todays_game(
            Difficulty::Beginner,
            "BITCOIN".to_string(),
            PlayerKey::Anonymous,
        )
        .expect("Create failed");

    let result = won_in(95);
    let (completed, stats) = repo
        .complete_game(*game.id(), &result, PlayerKey::Anonymous)
        .expect("Complete failed");

    assert!(*completed.is_completed());
    assert!(*completed.is_won());
    assert_eq!(*completed.time_seconds(), Some(95));

    // The stored row matches the pure fold of a single result.
    let expected = apply_result(None, &result);
    assert_eq!(stats.snapshot(), expected);
    assert_eq!(*stats.current_streak(), 1);
}

#[test]
fn test_second_completion_conflicts_without_double_count() {
    let (_db, repo) = setup_test_db();
    let game = repo
        .get_or_create_todays_game(
            Difficulty::Beginner,
            "BITCOIN".to_string(),
            PlayerKey::Anonymous,
        )
        .expect("Create failed");

    repo.complete_game(*game.id(), &won_in(60), PlayerKey::Anonymous)
        .expect("First completion failed");
    let second = repo.complete_game(*game.id(), &won_in(60), PlayerKey::Anonymous);
    assert!(matches!(second, Err(GameError::AlreadyCompleted)));

    let stats = repo
        .get_stats(Difficulty::Beginner, PlayerKey::Anonymous)
        .expect("Query failed")
        .expect("Stats should exist");
    assert_eq!(*stats.total_games(), 1);
}

#[test]
fn test_complete_unknown_game_is_not_found() {
    let (_db, repo) = setup_test_db();
    let result = repo.complete_game(42, &won_in(10), PlayerKey::Anonymous);
    assert!(matches!(result, Err(GameError::NotFound)));
}

#[test]
fn test_all_stats_span_difficulties_for_one_player() {
    let (_db, repo) = setup_test_db();

    for difficulty in [Difficulty::Beginner, Difficulty::Advanced] {
        let game = repo
            .get_or_create_todays_game(difficulty, "BITCOIN".to_string(), PlayerKey::User(3))
            .expect("Create failed");
        repo.complete_game(*game.id(), &won_in(30), PlayerKey::User(3))
            .expect("Complete failed");
    }

    let all = repo.get_all_stats(PlayerKey::User(3)).expect("Query failed");
    assert_eq!(all.len(), 2);

    // Another player's view stays empty.
    let other = repo.get_all_stats(PlayerKey::Anonymous).expect("Query failed");
    assert!(other.is_empty());
}

#[test]
fn test_stats_are_scoped_by_player() {
    let (_db, repo) = setup_test_db();
    let game = repo
        .get_or_create_todays_game(
            Difficulty::Beginner,
            "BITCOIN".to_string(),
            PlayerKey::User(1),
        )
        .expect("Create failed");
    repo.complete_game(*game.id(), &won_in(30), PlayerKey::User(1))
        .expect("Complete failed");

    let anon = repo
        .get_stats(Difficulty::Beginner, PlayerKey::Anonymous)
        .expect("Query failed");
    assert!(anon.is_none());
}

#[test]
fn test_resumed_record_restores_session() {
    let (_db, repo) = setup_test_db();
    repo.ensure_seeded().expect("Seed failed");

    let mut service = GameService::new(repo.clone(), EngineConfig::default());
    service
        .select_difficulty(Difficulty::Beginner, PlayerKey::Anonymous)
        .expect("Select failed");
    let word = service
        .state()
        .term
        .as_ref()
        .expect("Word loaded")
        .word()
        .clone();

    let first = word.chars().next().expect("Non-empty word");
    service.submit_guess(first).expect("Guess failed");
    service.submit_guess('0').expect_err("Digit should be rejected");

    // A second service sees the persisted progress.
    let mut resumed = GameService::new(repo, EngineConfig::default());
    let origin = resumed
        .select_difficulty(Difficulty::Beginner, PlayerKey::Anonymous)
        .expect("Select failed");
    assert_eq!(origin, SessionOrigin::Resumed);
    assert!(resumed.state().guessed_letters.contains(&first));
}

#[test]
fn test_won_session_persists_completion_and_replays() {
    let (_db, repo) = setup_test_db();
    repo.ensure_seeded().expect("Seed failed");

    let mut service = GameService::new(repo.clone(), EngineConfig::default());
    service
        .select_difficulty(Difficulty::Advanced, PlayerKey::Anonymous)
        .expect("Select failed");
    let word = service
        .state()
        .term
        .as_ref()
        .expect("Word loaded")
        .word()
        .clone();

    // Lowercase input is normalized before evaluation.
    for letter in word.to_lowercase().chars() {
        service.submit_guess(letter).expect("Guess failed");
    }
    assert_eq!(service.state().status, GameStatus::Won);

    let stats = repo
        .get_stats(Difficulty::Advanced, PlayerKey::Anonymous)
        .expect("Query failed")
        .expect("Completion should fold stats");
    assert_eq!(*stats.total_games(), 1);
    assert_eq!(*stats.total_wins(), 1);

    // Re-selecting the same day replays the finished game read-only.
    let mut replay = GameService::new(repo.clone(), EngineConfig::default());
    let origin = replay
        .select_difficulty(Difficulty::Advanced, PlayerKey::Anonymous)
        .expect("Select failed");
    assert_eq!(origin, SessionOrigin::Replay);
    assert_eq!(replay.state().status, GameStatus::Won);

    // Replay guesses change nothing and fold nothing.
    replay.submit_guess('Q').expect("Guess failed");
    let stats = repo
        .get_stats(Difficulty::Advanced, PlayerKey::Anonymous)
        .expect("Query failed")
        .expect("Stats should exist");
    assert_eq!(*stats.total_games(), 1);
}

#[test]
fn test_replayed_completed_record_backfills_letters() {
    let (_db, repo) = setup_test_db();
    // A record completed before letter persistence existed.
    let game = repo
        .get_or_create_todays_game(
            Difficulty::Beginner,
            "SEED".to_string(),
            PlayerKey::Anonymous,
        )
        .expect("Create failed");
    repo.complete_game(*game.id(), &won_in(40), PlayerKey::Anonymous)
        .expect("Complete failed");

    let record = repo
        .get_todays_game(Difficulty::Beginner, PlayerKey::Anonymous)
        .expect("Query failed")
        .expect("Record should exist");

    let mut engine = SessionEngine::new(EngineConfig::default());
    let origin = engine
        .begin(
            bitword::Term::new(
                1,
                "SEED".to_string(),
                Difficulty::Beginner.to_db_string().to_string(),
                "Security".to_string(),
                "def".to_string(),
                "hint".to_string(),
                None,
                true,
            ),
            Some(&record),
        )
        .expect("Begin failed");

    assert_eq!(origin, SessionOrigin::Replay);
    assert_eq!(engine.state().status, GameStatus::Won);
    assert_eq!(engine.state().guessed_letters, vec!['S', 'E', 'D']);
    assert!(engine.completion().is_none());
}

#[test]
fn test_hint_is_granted_once_per_session() {
    let (_db, repo) = setup_test_db();
    repo.ensure_seeded().expect("Seed failed");

    let mut service = GameService::new(repo.clone(), EngineConfig::default());
    service
        .select_difficulty(Difficulty::Intermediate, PlayerKey::Anonymous)
        .expect("Select failed");

    let first = service.request_hint().expect("Hint failed");
    assert!(matches!(first, bitword::HintOutcome::Granted(_)));
    let second = service.request_hint().expect("Hint failed");
    assert_eq!(second, bitword::HintOutcome::LimitReached);

    let record = repo
        .get_todays_game(Difficulty::Intermediate, PlayerKey::Anonymous)
        .expect("Query failed")
        .expect("Record should exist");
    assert_eq!(*record.hints_used(), 1);
}
