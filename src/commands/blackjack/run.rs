//! Entry point for the blackjack command: wager validation, the immediate
//! natural-21 payout, game registration and the turn-timeout watchdog.

use super::state::{BlackjackRound, RoundResult};
use crate::commands::games::Game;
use crate::constants::BLACKJACK_TURN_TIMEOUT_SECS;
use crate::economy::wager::{self, WagerOutcome};
use crate::model::AppState;
use serenity::builder::{CreateMessage, EditMessage};
use serenity::model::channel::Message;
use serenity::prelude::*;
use std::sync::Arc;
use std::time::Duration;

pub async fn run_prefix(ctx: &Context, msg: &Message, args: Vec<&str>, app: Arc<AppState>) {
    let Some(raw_bet) = args.first() else {
        msg.reply(&ctx.http, "Usage: `.bj [bet amount]`").await.ok();
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

    let mut round = BlackjackRound::deal(Arc::new(msg.author.clone()), wager);

    // A two-card 21 resolves on the spot, before any buttons go out.
    if round.player_hand.is_blackjack() {
        round.resolve(RoundResult::NaturalWin);
        let payout = round.natural_payout();
        if let Some(w) = round.wager.take() {
            let _guard = user_lock.lock().await;
            if let Err(e) = w.settle(&app.db, WagerOutcome::Win(payout)).await {
                tracing::error!(target: "blackjack", error = ?e, "failed to settle natural win");
            }
        }
        let (embed, _) = round.render();
        let builder = CreateMessage::new().embed(embed).reference_message(msg);
        msg.channel_id.send_message(&ctx.http, builder).await.ok();
        return;
    }

    let (embed, components) = round.render();
    let builder = CreateMessage::new()
        .embed(embed)
        .components(components)
        .reference_message(msg);
    let game_msg = match msg.channel_id.send_message(&ctx.http, builder).await {
        Ok(m) => m,
        Err(e) => {
            tracing::warn!(target: "blackjack", error = ?e, "failed to send game message");
            return;
        }
    };

    app.game_manager
        .write()
        .await
        .start_game(game_msg.id, Box::new(round));

    spawn_turn_watchdog(ctx.clone(), app, game_msg);
}

/// Forces an automatic loss if the player stops responding mid-round. The
/// deadline slides forward with every hit.
fn spawn_turn_watchdog(ctx: Context, app: Arc<AppState>, game_msg: Message) {
    tokio::spawn(async move {
        let timeout = Duration::from_secs(BLACKJACK_TURN_TIMEOUT_SECS);
        let mut sleep_for = timeout;
        loop {
            tokio::time::sleep(sleep_for).await;

            let mut manager = app.game_manager.write().await;
            let Some(game) = manager.get_game_mut(&game_msg.id) else {
                // Resolved through normal play.
                break;
            };
            let Some(round) = game.as_any_mut().downcast_mut::<BlackjackRound>() else {
                break;
            };

            let elapsed = round.last_action.elapsed();
            if elapsed < timeout {
                sleep_for = timeout - elapsed;
                continue;
            }

            round.resolve(RoundResult::TimedOut);
            let wager = round.wager.take();
            let (embed, _) = game.render();
            manager.remove_game(&game_msg.id);
            drop(manager);

            if let Some(w) = wager {
                let user_lock = app.user_lock(w.user_id()).await;
                let _guard = user_lock.lock().await;
                if let Err(e) = w.settle(&app.db, WagerOutcome::Loss).await {
                    tracing::error!(target: "blackjack", error = ?e, "failed to settle timeout loss");
                }
            }

            let builder = EditMessage::new().embed(embed).components(vec![]);
            game_msg
                .channel_id
                .edit_message(&ctx.http, game_msg.id, builder)
                .await
                .ok();
            break;
        }
    });
}
