//! Shared application state, stored in Serenity's global context as an
//! `Arc<AppState>` via a `TypeMapKey`.

use crate::commands::games::engine::GameManager;
use crate::commands::wordle::state::WordleSession;
use crate::commands::wordle::words::WordClient;
use crate::database::init::DbPool;
use serenity::model::id::{ChannelId, MessageId, UserId};
use serenity::prelude::TypeMapKey;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{Mutex, RwLock};

/// The central, shared state of the application.
pub struct AppState {
    /// The SQLite connection pool backing the chips ledger.
    pub db: DbPool,
    /// All in-flight interactive games (blackjack, rps, coinflip).
    pub game_manager: Arc<RwLock<GameManager>>,
    /// Wordle sessions keyed per channel, each advanced under the map's
    /// single write lock.
    pub wordle_sessions: Arc<RwLock<HashMap<ChannelId, WordleSession>>>,
    /// Help pagination messages and their last interaction time, for the
    /// idle-timeout watchdog.
    pub help_sessions: Arc<RwLock<HashMap<MessageId, Instant>>>,
    /// Per-user mutexes serializing validate-then-settle windows so two
    /// commands for the same user cannot interleave balance updates.
    user_locks: Mutex<HashMap<u64, Arc<Mutex<()>>>>,
    /// Client for the external word source and dictionary lookups.
    pub words: WordClient,
    /// The command prefix, fixed at startup.
    pub prefix: String,
}

impl AppState {
    pub fn new(db: DbPool, words: WordClient, prefix: String) -> Self {
        Self {
            db,
            game_manager: Arc::new(RwLock::new(GameManager::new())),
            wordle_sessions: Arc::new(RwLock::new(HashMap::new())),
            help_sessions: Arc::new(RwLock::new(HashMap::new())),
            user_locks: Mutex::new(HashMap::new()),
            words,
            prefix,
        }
    }

    pub async fn from_ctx(ctx: &serenity::prelude::Context) -> Option<Arc<Self>> {
        ctx.data.read().await.get::<AppState>().cloned()
    }

    /// Installs a wordle session for the channel unless one already exists,
    /// and returns the secret of whichever session ends up in place. Word
    /// fetches happen outside the map lock, so two guesses can race to
    /// install; the earlier session wins and the later secret is discarded.
    pub async fn install_wordle_session(&self, channel_id: ChannelId, secret: String) -> String {
        let mut sessions = self.wordle_sessions.write().await;
        sessions
            .entry(channel_id)
            .or_insert_with(|| WordleSession::new(secret))
            .secret()
            .to_string()
    }

    /// Returns the per-user session lock, creating it lazily. Locks are
    /// never dropped from the map; the population is small.
    pub async fn user_lock(&self, user_id: UserId) -> Arc<Mutex<()>> {
        let mut locks = self.user_locks.lock().await;
        locks
            .entry(user_id.get())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

impl TypeMapKey for AppState {
    type Value = Arc<AppState>;
}
