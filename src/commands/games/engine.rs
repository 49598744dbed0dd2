//! The generic game engine: the `Game` trait every interactive betting game
//! implements, and the `GameManager` that routes component interactions to
//! active games and settles their wagers on completion.

use crate::constants::CHOICE_TIMEOUT_SECS;
use crate::economy::wager::{Wager, WagerOutcome};
use crate::error::GameError;
use crate::model::AppState;
use serenity::async_trait;
use serenity::builder::{
    CreateActionRow, CreateEmbed, CreateInteractionResponse, CreateInteractionResponseMessage,
    EditMessage,
};
use serenity::model::application::ComponentInteraction;
use serenity::model::channel::Message;
use serenity::model::id::{MessageId, UserId};
use serenity::prelude::Context;
use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

pub enum GameUpdate {
    ReRender,
    /// The round reached a terminal state. The settlement, if any, is applied
    /// by the manager exactly once; `None` means no balance change (e.g. an
    /// aborted round).
    GameOver {
        settlement: Option<(Wager, WagerOutcome)>,
    },
    NoOp,
}

#[async_trait]
pub trait Game: Send + Sync {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    /// The user whose wager rides on this game. Only they may interact.
    fn player_id(&self) -> UserId;
    async fn handle_interaction(
        &mut self,
        ctx: &Context,
        interaction: &mut ComponentInteraction,
    ) -> GameUpdate;
    fn render(&self) -> (CreateEmbed, Vec<CreateActionRow>);
}

/// Tracks all in-flight games, keyed by the message that hosts them.
pub struct GameManager {
    active_games: HashMap<MessageId, Box<dyn Game>>,
}

impl Default for GameManager {
    fn default() -> Self {
        Self::new()
    }
}

impl GameManager {
    pub fn new() -> Self {
        Self {
            active_games: HashMap::new(),
        }
    }

    pub fn start_game(&mut self, message_id: MessageId, game: Box<dyn Game>) {
        self.active_games.insert(message_id, game);
    }

    pub fn get_game_mut(&mut self, message_id: &MessageId) -> Option<&mut Box<dyn Game>> {
        self.active_games.get_mut(message_id)
    }

    pub fn remove_game(&mut self, message_id: &MessageId) -> Option<Box<dyn Game>> {
        self.active_games.remove(message_id)
    }

    /// One interactive betting round per user at a time.
    pub fn has_active_game(&self, user_id: UserId) -> bool {
        self.active_games.values().any(|g| g.player_id() == user_id)
    }
}

/// Work left over once the manager guard has been released.
enum Followup {
    Edit {
        embed: CreateEmbed,
        components: Vec<CreateActionRow>,
    },
    Finish {
        embed: CreateEmbed,
        settlement: Option<(Wager, WagerOutcome)>,
    },
}

/// Routes a component interaction to the game hosted on its message.
///
/// The manager guard is released before the per-user lock is taken, so this
/// path never holds both at once; command entry points hold the user lock
/// while reading the manager, and the two orders must not form a cycle.
pub async fn dispatch_component(
    ctx: &Context,
    app: &AppState,
    interaction: &mut ComponentInteraction,
) {
    let followup = {
        let mut manager = app.game_manager.write().await;
        let Some(game) = manager.get_game_mut(&interaction.message.id) else {
            return;
        };

        if interaction.user.id != game.player_id() {
            drop(manager);
            let builder = CreateInteractionResponseMessage::new()
                .content("This is not your game.")
                .ephemeral(true);
            let response = CreateInteractionResponse::Message(builder);
            interaction.create_response(&ctx.http, response).await.ok();
            return;
        }

        match game.handle_interaction(ctx, interaction).await {
            GameUpdate::ReRender => {
                let (embed, components) = game.render();
                Followup::Edit { embed, components }
            }
            GameUpdate::GameOver { settlement } => {
                // Final render with the buttons removed.
                let (embed, _) = game.render();
                manager.remove_game(&interaction.message.id);
                Followup::Finish { embed, settlement }
            }
            GameUpdate::NoOp => return,
        }
    };

    match followup {
        Followup::Edit { embed, components } => {
            let builder = EditMessage::new().embed(embed).components(components);
            if let Err(e) = interaction.message.edit(&ctx.http, builder).await {
                tracing::warn!(target: "game_manager", error = ?e, "failed to edit game message");
            }
        }
        Followup::Finish { embed, settlement } => {
            if let Some((wager, outcome)) = settlement {
                let user_lock = app.user_lock(wager.user_id()).await;
                let _guard = user_lock.lock().await;
                if let Err(e) = wager.settle(&app.db, outcome).await {
                    tracing::error!(target: "game_manager", error = ?e, "failed to settle wager");
                }
            }
            let builder = EditMessage::new().embed(embed).components(vec![]);
            if let Err(e) = interaction.message.edit(&ctx.http, builder).await {
                tracing::warn!(target: "game_manager", error = ?e, "failed to edit final game message");
            }
        }
    }
}

/// Aborts a single-choice game (rps, coinflip) that gets no pick within the
/// decision window. The wager is dropped unsettled, so no chips move.
pub fn spawn_choice_watchdog(ctx: Context, app: Arc<AppState>, game_msg: Message) {
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(CHOICE_TIMEOUT_SECS)).await;

        let mut manager = app.game_manager.write().await;
        // Resolved games are removed on GameOver, so presence means no pick.
        if manager.remove_game(&game_msg.id).is_none() {
            return;
        }
        drop(manager);

        let builder = EditMessage::new()
            .embed(
                CreateEmbed::new()
                    .title("Timed out")
                    .color(0xFF0000)
                    .description(GameError::DecisionTimeout.user_message()),
            )
            .components(vec![]);
        if let Err(e) = game_msg
            .channel_id
            .edit_message(&ctx.http, game_msg.id, builder)
            .await
        {
            tracing::warn!(target: "game_manager", error = ?e, "failed to edit timed-out game message");
        }
    });
}
