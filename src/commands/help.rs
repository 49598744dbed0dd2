//! Paginated command help with prev/next buttons and an idle timeout that
//! strips the buttons once nobody is flipping pages.

use crate::constants::HELP_IDLE_TIMEOUT_SECS;
use crate::model::AppState;
use serenity::builder::{
    CreateActionRow, CreateButton, CreateEmbed, CreateInteractionResponse,
    CreateInteractionResponseMessage, CreateMessage, EditMessage,
};
use serenity::model::application::{ButtonStyle, ComponentInteraction};
use serenity::model::channel::Message;
use serenity::model::id::{ChannelId, MessageId};
use serenity::prelude::*;
use std::sync::Arc;
use std::time::{Duration, Instant};

const PAGE_COUNT: i64 = 2;

fn page_embed(page: i64) -> CreateEmbed {
    let (title, fields): (&str, &[(&str, &str)]) = match page {
        0 => (
            "Command Help - General",
            &[
                (".daily", "Claim your daily chips."),
                (".hourly", "Claim your hourly chips."),
                (".balance", "Check your chip balance."),
                (".leaderboard", "See who holds the most chips."),
                (".help", "Show this help message."),
            ],
        ),
        _ => (
            "Command Help - Games",
            &[
                (".wordle [guess]", "Guess the 5-letter word in 6 tries."),
                (".blackjack [bet]", "Play a hand of blackjack against the dealer."),
                (
                    ".dice [over/under] [number] [bet]",
                    "Roll over or under your number; longer odds pay more.",
                ),
                (".rps [bet]", "Rock, paper, scissors against the bot."),
                (".coinflip [bet]", "Call heads or tails."),
            ],
        ),
    };

    let mut embed = CreateEmbed::new()
        .title(title)
        .color(0x89CFF0)
        .footer(serenity::builder::CreateEmbedFooter::new(format!(
            "Page {}/{}",
            page + 1,
            PAGE_COUNT
        )));
    for (name, value) in fields {
        embed = embed.field(*name, *value, false);
    }
    embed
}

fn page_buttons(page: i64) -> Vec<CreateActionRow> {
    vec![CreateActionRow::Buttons(vec![
        CreateButton::new(format!("help_prev_{}", page))
            .label("Prev")
            .style(ButtonStyle::Secondary),
        CreateButton::new(format!("help_next_{}", page))
            .label("Next")
            .style(ButtonStyle::Secondary),
    ])]
}

pub async fn run_prefix(ctx: &Context, msg: &Message, app: Arc<AppState>) {
    let builder = CreateMessage::new()
        .embed(page_embed(0))
        .components(page_buttons(0))
        .reference_message(msg);
    let sent = match msg.channel_id.send_message(&ctx.http, builder).await {
        Ok(sent) => sent,
        Err(e) => {
            tracing::warn!(target: "help", error = %e, "failed to send help message");
            return;
        }
    };

    app.help_sessions
        .write()
        .await
        .insert(sent.id, Instant::now());
    spawn_idle_watchdog(ctx.clone(), app, sent.channel_id, sent.id);
}

/// Flips the page for a prev/next press. The pressed button's custom id
/// carries the page it was rendered on.
pub async fn handle_component(ctx: &Context, interaction: &ComponentInteraction, app: &AppState) {
    let id = interaction.data.custom_id.as_str();
    let Some((direction, raw_page)) = id
        .strip_prefix("help_")
        .and_then(|rest| rest.split_once('_'))
    else {
        return;
    };
    let Ok(page) = raw_page.parse::<i64>() else {
        return;
    };
    let next_page = match direction {
        "prev" => (page - 1).rem_euclid(PAGE_COUNT),
        "next" => (page + 1).rem_euclid(PAGE_COUNT),
        _ => return,
    };

    if let Some(last_touch) = app.help_sessions.write().await.get_mut(&interaction.message.id) {
        *last_touch = Instant::now();
    }

    let response = CreateInteractionResponse::UpdateMessage(
        CreateInteractionResponseMessage::new()
            .embed(page_embed(next_page))
            .components(page_buttons(next_page)),
    );
    if let Err(e) = interaction.create_response(&ctx.http, response).await {
        tracing::warn!(target: "help", error = %e, "failed to flip help page");
    }
}

/// Removes the buttons once the message has sat idle long enough. The last
/// rendered page stays visible.
fn spawn_idle_watchdog(ctx: Context, app: Arc<AppState>, channel_id: ChannelId, message_id: MessageId) {
    tokio::spawn(async move {
        let timeout = Duration::from_secs(HELP_IDLE_TIMEOUT_SECS);
        loop {
            tokio::time::sleep(timeout).await;
            let idle_for = {
                let sessions = app.help_sessions.read().await;
                match sessions.get(&message_id) {
                    Some(last_touch) => last_touch.elapsed(),
                    None => return,
                }
            };
            if idle_for < timeout {
                continue;
            }

            app.help_sessions.write().await.remove(&message_id);
            let strip = EditMessage::new().components(Vec::new());
            if let Err(e) = channel_id.edit_message(&ctx.http, message_id, strip).await {
                tracing::warn!(target: "help", error = %e, "failed to strip help buttons");
            }
            return;
        }
    });
}
