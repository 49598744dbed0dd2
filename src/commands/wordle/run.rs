//! Entry point for the wordle command: drives the channel's session through
//! one guess and renders the board.

use super::state::{self, TurnOutcome};
use crate::model::AppState;
use serenity::builder::{CreateEmbed, CreateMessage};
use serenity::model::channel::Message;
use serenity::prelude::*;
use std::sync::Arc;

/// Embed color gradient keyed by tries left before this guess.
fn tries_color(tries_left: u8) -> u32 {
    match tries_left {
        5 => 0x97D112,
        4 => 0xCBD112,
        3 => 0xD1A012,
        2 => 0xD16312,
        1 => 0xD11212,
        _ => 0x3DD112,
    }
}

pub async fn run_prefix(ctx: &Context, msg: &Message, args: Vec<&str>, app: Arc<AppState>) {
    let Some(&raw_guess) = args.first() else {
        msg.reply(&ctx.http, "Usage: `.wordle [guess]`").await.ok();
        return;
    };

    // All network work runs before the session map is locked: a slow word
    // lookup in one channel must not stall guesses in any other.
    let secret = {
        let sessions = app.wordle_sessions.read().await;
        sessions.get(&msg.channel_id).map(|s| s.secret().to_string())
    };
    let secret = match secret {
        Some(secret) => secret,
        None => match app.words.random_word().await {
            Ok(fresh) => {
                tracing::debug!(target: "wordle", channel = %msg.channel_id, "started new session");
                app.install_wordle_session(msg.channel_id, fresh).await
            }
            Err(e) => {
                msg.reply(&ctx.http, e.user_message()).await.ok();
                return;
            }
        },
    };

    let guess = raw_guess.to_uppercase();

    // An exact match wins outright; anything else must be a real word.
    if guess != secret {
        if let Err(e) = state::validate_shape(raw_guess) {
            msg.reply(&ctx.http, e.user_message()).await.ok();
            return;
        }
        if !app.words.is_valid_word(raw_guess).await {
            msg.reply(&ctx.http, "Please enter a valid 5-letter English word")
                .await
                .ok();
            return;
        }
    }

    let mut sessions = app.wordle_sessions.write().await;
    // A racing terminal guess may have cleared the session while this one
    // was validating; the guess applies to whatever session is current.
    let Some(session) = sessions.get_mut(&msg.channel_id) else {
        return;
    };

    let color = tries_color(session.tries_left());
    let outcome = session.apply_guess(guess);
    let mut embed = CreateEmbed::new()
        .title(format!("Wordle - Tries Left: {}", session.tries_left()))
        .color(color);

    match outcome {
        TurnOutcome::Won => {
            embed = embed.color(0x3DD112).field(
                "Congratulations!",
                format!("You've guessed the word: {}!", session.secret()),
                false,
            );
        }
        TurnOutcome::Lost => {
            embed = embed.field(
                "Game Over",
                format!(
                    "Sorry, you've run out of tries. The word was: {}",
                    session.secret()
                ),
                false,
            );
        }
        TurnOutcome::InProgress => {}
    }

    let guesses = session
        .history()
        .iter()
        .map(|record| format!("`{}`", record.guess))
        .collect::<Vec<_>>()
        .join("\n");
    let results = session
        .history()
        .iter()
        .map(|record| {
            record
                .scores
                .iter()
                .map(|s| s.emoji())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n");
    embed = embed
        .field("Previous Guesses", guesses, true)
        .field("Result", results, true);

    // Terminal guesses clear the entry; the next invocation starts fresh.
    if outcome != TurnOutcome::InProgress {
        sessions.remove(&msg.channel_id);
    }
    drop(sessions);

    let builder = CreateMessage::new().embed(embed).reference_message(msg);
    msg.channel_id.send_message(&ctx.http, builder).await.ok();
}
