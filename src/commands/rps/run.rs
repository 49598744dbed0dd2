//! Entry point for the rps command.

use super::game::RpsGame;
use crate::commands::games::engine::spawn_choice_watchdog;
use crate::commands::games::Game;
use crate::economy::wager;
use crate::model::AppState;
use serenity::builder::CreateMessage;
use serenity::model::channel::Message;
use serenity::prelude::*;
use std::sync::Arc;

pub async fn run_prefix(ctx: &Context, msg: &Message, args: Vec<&str>, app: Arc<AppState>) {
    let Some(raw_bet) = args.first() else {
        msg.reply(&ctx.http, "Usage: `.rps [bet amount]`").await.ok();
        return;
    };

    let user_lock = app.user_lock(msg.author.id).await;
    let wager = {
        let _guard = user_lock.lock().await;
        if app.game_manager.read().await.has_active_game(msg.author.id) {
            msg.reply(&ctx.http, "Finish your current game first.")
                .await
                .ok();
            return;
        }
        match wager::open_wager(&app.db, msg.author.id, raw_bet).await {
            Ok(w) => w,
            Err(e) => {
                msg.reply(&ctx.http, e.user_message()).await.ok();
                return;
            }
        }
    };

    let game = RpsGame::new(Arc::new(msg.author.clone()), wager);
    let (embed, components) = game.render();
    let builder = CreateMessage::new()
        .embed(embed)
        .components(components)
        .reference_message(msg);
    let game_msg = match msg.channel_id.send_message(&ctx.http, builder).await {
        Ok(m) => m,
        Err(e) => {
            tracing::warn!(target: "rps", error = ?e, "failed to send game message");
            return;
        }
    };

    app.game_manager
        .write()
        .await
        .start_game(game_msg.id, Box::new(game));

    spawn_choice_watchdog(ctx.clone(), app, game_msg);
}
