//! XO game flow: sliding window, win/draw transitions, and store commits.

use playroom::{
    xo, Bootstrap, BotRoster, Difficulty, EngineConfig, GameKind, GameStatus, GameStore,
    MemoryStore, MoveError, StoreError, XoBoard, XoCoordinator,
};

fn coordinator() -> XoCoordinator {
    XoCoordinator::new(EngineConfig::default())
}

#[test]
fn test_win_detection_vector() {
    use playroom::Mark::{O, X};
    let board = XoBoard::try_from(vec![
        Some(X),
        Some(X),
        Some(X),
        Some(O),
        Some(O),
        None,
        None,
        None,
        None,
    ])
    .unwrap();
    assert_eq!(xo::winner(&board), Some(X));
    assert_eq!(xo::winner(&XoBoard::new()), None);
}

#[tokio::test]
async fn test_sliding_window_after_seven_moves() {
    let store = MemoryStore::new();
    let mut rng = rand::rng();
    let bootstrap = Bootstrap::new(EngineConfig::default());
    let game = bootstrap
        .new_xo_game(
            &store,
            "alice".into(),
            "bob".into(),
            GameKind::User,
            Difficulty::Easy,
            &mut rng,
        )
        .await
        .unwrap();

    // Seven alternating moves with no line completed along the way.
    let coordinator = coordinator();
    let moves = [0, 3, 1, 4, 6, 8, 2];
    let mut doc = game;
    for idx in moves {
        let player = doc.current_turn.clone();
        let pending = coordinator.stage_move(&doc, &player, idx).unwrap();
        doc = pending.commit(&store).await.unwrap();
    }

    assert_eq!(doc.status, GameStatus::Playing);
    assert_eq!(doc.move_count, 7);

    // Exactly six marks live; the first move's square is empty again.
    let live = (0..9).filter(|&idx| !doc.board.is_empty(idx)).count();
    assert_eq!(live, 6);
    assert!(doc.board.is_empty(0));
    assert!(doc.track.len() <= 6);
}

#[tokio::test]
async fn test_completed_game_is_immutable() {
    let store = MemoryStore::new();
    let mut rng = rand::rng();
    let bootstrap = Bootstrap::new(EngineConfig::default());
    let game = bootstrap
        .new_xo_game(
            &store,
            "alice".into(),
            "bob".into(),
            GameKind::User,
            Difficulty::Easy,
            &mut rng,
        )
        .await
        .unwrap();

    // X takes the top row.
    let coordinator = coordinator();
    let x = game.player_x.clone();
    let o = game.player_o.clone();
    let mut doc = game;
    for (player, idx) in [(&x, 0), (&o, 3), (&x, 1), (&o, 4), (&x, 2)] {
        let pending = coordinator.stage_move(&doc, player, idx).unwrap();
        doc = pending.commit(&store).await.unwrap();
    }
    assert_eq!(doc.status, GameStatus::Completed);
    assert_eq!(doc.won_by.as_ref(), Some(&x));

    // No further move is accepted, and the stored document does not change.
    let before = store.read_xo(&doc.id).await.unwrap();
    let err = coordinator.stage_move(&doc, &o, 8).unwrap_err();
    assert_eq!(err, MoveError::GameOver);
    let after = store.read_xo(&doc.id).await.unwrap();
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_stale_commit_loses_the_turn_race() {
    let store = MemoryStore::new();
    let mut rng = rand::rng();
    let bootstrap = Bootstrap::new(EngineConfig::default());
    let game = bootstrap
        .new_xo_game(
            &store,
            "alice".into(),
            "bob".into(),
            GameKind::User,
            Difficulty::Easy,
            &mut rng,
        )
        .await
        .unwrap();

    // Two moves staged against the same turn; only the first commit lands.
    let coordinator = coordinator();
    let mover = game.current_turn.clone();
    let first = coordinator.stage_move(&game, &mover, 4).unwrap();
    let second = coordinator.stage_move(&game, &mover, 0).unwrap();

    first.commit(&store).await.unwrap();
    let err = second.commit(&store).await.unwrap_err();
    assert!(matches!(err, StoreError::TurnConflict { .. }));

    let stored = store.read_xo(&game.id).await.unwrap();
    assert_eq!(stored.move_count, 1);
    assert!(!stored.board.is_empty(4));
    assert!(stored.board.is_empty(0));
}

#[tokio::test]
async fn test_bot_game_alternates_through_the_same_path() {
    let store = MemoryStore::new();
    let mut rng = rand::rng();
    let bootstrap = Bootstrap::new(EngineConfig::default());
    let roster = BotRoster::builtin();
    let game = bootstrap
        .new_xo_bot_game(&store, &roster, "alice".into(), Difficulty::Medium, &mut rng)
        .await
        .unwrap();

    let coordinator = coordinator();
    let bot = game
        .opponent_of("alice")
        .expect("alice is seated")
        .clone();

    // Play until the game resolves, alternating human picks and bot turns.
    let mut doc = game;
    let mut guard = 0;
    while doc.status == GameStatus::Playing {
        guard += 1;
        assert!(guard < 40, "game should resolve well before the move cap x2");
        let player = doc.current_turn.clone();
        if player == bot {
            doc = coordinator
                .drive_bot_turn(&store, &doc.id, &bot, &mut rng)
                .await
                .unwrap()
                .expect("board cannot fill under the sliding window");
        } else {
            let idx = doc
                .board
                .empty_indices()
                .first()
                .copied()
                .expect("sliding window always leaves empty squares");
            doc = coordinator
                .stage_move(&doc, &player, idx)
                .unwrap()
                .commit(&store)
                .await
                .unwrap();
        }
    }

    assert_eq!(doc.status, GameStatus::Completed);
    // Either somebody won or the move cap drew the game.
    if doc.won_by.is_none() {
        assert_eq!(doc.move_count, EngineConfig::default().xo_move_cap);
    }
}
