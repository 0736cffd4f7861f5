//! The bot timer must never land a stale move on an advanced turn.

use playroom::{
    Bootstrap, BotRoster, BotScheduler, Difficulty, EngineConfig, GameStore, MemoryStore,
    XoCoordinator,
};
use rand::SeedableRng;
use std::time::Duration;

#[tokio::test]
async fn test_stale_bot_timer_is_cancelled_by_turn_change() {
    let store = MemoryStore::new();
    let mut rng = rand::rng();
    let config = EngineConfig::default();
    let bootstrap = Bootstrap::new(config.clone());
    let coordinator = XoCoordinator::new(config);
    let roster = BotRoster::builtin();

    let game = bootstrap
        .new_xo_bot_game(&store, &roster, "alice".into(), Difficulty::Easy, &mut rng)
        .await
        .unwrap();
    let bot = game.opponent_of("alice").expect("alice is seated").clone();

    // Suppose the bot holds X: its move gets scheduled the moment the game
    // opens. Simulate the human's screen racing it — the same instant, the
    // turn advances (here: the bot is not to move after all, the scheduler
    // must drop the task).
    let mut scheduler = BotScheduler::new();
    let turn_version = u64::from(game.move_count);
    {
        let store = store.clone();
        let coordinator = coordinator.clone();
        let game_id = game.id.clone();
        let bot = bot.clone();
        scheduler.schedule(turn_version, Duration::from_millis(30), async move {
            let mut rng = rand::rngs::StdRng::from_os_rng();
            // A stale invocation would still be rejected by staging or the
            // commit guard, but the scheduler must prevent it from running
            // at all.
            let _ = coordinator
                .drive_bot_turn(&store, &game_id, &bot, &mut rng)
                .await;
        });
    }
    assert!(scheduler.is_scheduled());

    // The turn this task was scheduled against is over; invalidate it.
    scheduler.invalidate(turn_version);
    tokio::time::sleep(Duration::from_millis(80)).await;

    let stored = store.read_xo(&game.id).await.unwrap();
    assert_eq!(stored.move_count, 0, "cancelled bot task must not move");

    // Rescheduling against the current turn works normally once it is
    // genuinely the bot's turn.
    if stored.current_turn == bot {
        let store_clone = store.clone();
        let coordinator_clone = coordinator.clone();
        let game_id = stored.id.clone();
        let bot_id = bot.clone();
        scheduler.schedule(
            u64::from(stored.move_count) + 1,
            Duration::from_millis(10),
            async move {
                let mut rng = rand::rngs::StdRng::from_os_rng();
                let _ = coordinator_clone
                    .drive_bot_turn(&store_clone, &game_id, &bot_id, &mut rng)
                    .await;
            },
        );
        tokio::time::sleep(Duration::from_millis(60)).await;
        let after = store.read_xo(&stored.id).await.unwrap();
        assert_eq!(after.move_count, 1);
        assert_eq!(after.current_turn, "alice");
    }
}

#[tokio::test]
async fn test_rescheduling_keeps_only_one_pending_bot_move() {
    let store = MemoryStore::new();
    let mut rng = rand::rng();
    let config = EngineConfig::default();
    let bootstrap = Bootstrap::new(config.clone());
    let coordinator = XoCoordinator::new(config);

    let game = bootstrap
        .new_xo_bot_game(
            &store,
            &BotRoster::builtin(),
            "alice".into(),
            Difficulty::Easy,
            &mut rng,
        )
        .await
        .unwrap();
    let bot = game.opponent_of("alice").expect("alice is seated").clone();

    // Re-render storms schedule the same bot turn repeatedly; only the last
    // task may survive, or the bot double-moves.
    let mut scheduler = BotScheduler::new();
    for _ in 0..5 {
        let store = store.clone();
        let coordinator = coordinator.clone();
        let game_id = game.id.clone();
        let bot = bot.clone();
        scheduler.schedule(0, Duration::from_millis(20), async move {
            let mut rng = rand::rngs::StdRng::from_os_rng();
            let _ = coordinator
                .drive_bot_turn(&store, &game_id, &bot, &mut rng)
                .await;
        });
    }
    tokio::time::sleep(Duration::from_millis(80)).await;

    let stored = store.read_xo(&game.id).await.unwrap();
    // At most one bot move landed, and only if the bot actually held X.
    assert!(stored.move_count <= 1);
    if stored.current_turn == bot {
        assert_eq!(stored.move_count, 0);
    }
}
