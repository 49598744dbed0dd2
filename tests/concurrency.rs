//! Tests for the lock discipline shared by commands, interactions and
//! watchdogs: the game-manager guard is never held while waiting on a
//! per-user lock, and wordle session installs tolerate racing creators.

use chiphouse_bot::commands::wordle::words::WordClient;
use chiphouse_bot::database::init;
use chiphouse_bot::AppState;
use serenity::model::id::{ChannelId, MessageId, UserId};
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Arc;
use std::time::Duration;

async fn test_app() -> Arc<AppState> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory pool");
    init::run_migrations(&pool).await.expect("migrations");
    Arc::new(AppState::new(
        pool,
        WordClient::new(String::new()),
        ".".to_string(),
    ))
}

/// The interaction path mutates the manager, releases it, and only then
/// settles under the user lock; the command path holds the user lock across
/// its active-game check. Run concurrently against the same user, both must
/// complete: holding the manager guard while waiting on the user lock would
/// wedge them against each other.
#[tokio::test]
async fn settlement_and_dispatch_lock_orders_compose() {
    let app = test_app().await;
    let user = UserId::new(7001);

    let interaction_path = {
        let app = app.clone();
        tokio::spawn(async move {
            let mut manager = app.game_manager.write().await;
            tokio::time::sleep(Duration::from_millis(100)).await;
            manager.remove_game(&MessageId::new(1));
            drop(manager);
            let lock = app.user_lock(user).await;
            let _guard = lock.lock().await;
        })
    };
    let command_path = {
        let app = app.clone();
        tokio::spawn(async move {
            let lock = app.user_lock(user).await;
            let _guard = lock.lock().await;
            tokio::time::sleep(Duration::from_millis(100)).await;
            let _ = app.game_manager.read().await.has_active_game(user);
        })
    };

    tokio::time::timeout(Duration::from_secs(2), async {
        interaction_path.await.expect("interaction path");
        command_path.await.expect("command path");
    })
    .await
    .expect("both lock paths must run to completion");
}

#[tokio::test]
async fn racing_session_installs_keep_the_first_secret() {
    let app = test_app().await;
    let channel = ChannelId::new(42);

    // Two guesses fetched different words before either took the map lock;
    // whichever installs first wins and both proceed against its secret.
    let first = app.install_wordle_session(channel, "CRANE".to_string()).await;
    let second = app.install_wordle_session(channel, "SLOTH".to_string()).await;
    assert_eq!(first, "CRANE");
    assert_eq!(second, "CRANE");
}
