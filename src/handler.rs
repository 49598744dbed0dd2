//! The Serenity event handler: prefix-command dispatch and component routing.

use crate::commands;
use crate::economy::cooldown::ClaimKind;
use crate::model::AppState;
use serenity::async_trait;
use serenity::model::application::Interaction;
use serenity::model::channel::Message;
use serenity::model::gateway::Ready;
use serenity::prelude::*;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Daily,
    Hourly,
    Balance,
    Leaderboard,
    Wordle,
    Blackjack,
    Dice,
    Rps,
    Coinflip,
    Help,
    Unknown,
}

impl FromStr for Command {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "daily" => Command::Daily,
            "hourly" => Command::Hourly,
            "balance" | "bal" => Command::Balance,
            "leaderboard" | "lb" => Command::Leaderboard,
            "wordle" => Command::Wordle,
            "blackjack" | "bj" => Command::Blackjack,
            "dice" => Command::Dice,
            "rps" => Command::Rps,
            "coinflip" | "cf" => Command::Coinflip,
            "help" => Command::Help,
            _ => Command::Unknown,
        })
    }
}

pub struct Handler;

#[async_trait]
impl EventHandler for Handler {
    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.bot {
            return;
        }
        let Some(app) = AppState::from_ctx(&ctx).await else {
            return;
        };
        let Some(body) = msg.content.strip_prefix(&app.prefix) else {
            return;
        };

        let mut parts = body.split_whitespace();
        let Some(name) = parts.next() else {
            return;
        };
        let args: Vec<&str> = parts.collect();

        let command = name.parse::<Command>().unwrap_or(Command::Unknown);
        tracing::debug!(target: "handler", user = %msg.author.id, command = ?command, "dispatching");

        match command {
            Command::Daily => commands::claim::run_prefix(&ctx, &msg, app, ClaimKind::Daily).await,
            Command::Hourly => {
                commands::claim::run_prefix(&ctx, &msg, app, ClaimKind::Hourly).await
            }
            Command::Balance => commands::balance::run_prefix(&ctx, &msg, app).await,
            Command::Leaderboard => commands::leaderboard::run_prefix(&ctx, &msg, app).await,
            Command::Wordle => commands::wordle::run::run_prefix(&ctx, &msg, args, app).await,
            Command::Blackjack => commands::blackjack::run::run_prefix(&ctx, &msg, args, app).await,
            Command::Dice => commands::dice::run_prefix(&ctx, &msg, args, app).await,
            Command::Rps => commands::rps::run::run_prefix(&ctx, &msg, args, app).await,
            Command::Coinflip => commands::coinflip::run::run_prefix(&ctx, &msg, args, app).await,
            Command::Help => commands::help::run_prefix(&ctx, &msg, app).await,
            Command::Unknown => {
                msg.reply(&ctx.http, "Command not found").await.ok();
            }
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        let Interaction::Component(mut component) = interaction else {
            return;
        };
        let Some(app) = AppState::from_ctx(&ctx).await else {
            return;
        };

        // Custom ids are namespaced by their family before the first '_'.
        let family = component
            .data
            .custom_id
            .split('_')
            .next()
            .unwrap_or_default()
            .to_string();
        match family.as_str() {
            "bj" | "rps" | "cf" => {
                commands::games::engine::dispatch_component(&ctx, &app, &mut component).await;
            }
            "help" => commands::help::handle_component(&ctx, &component, &app).await,
            _ => {}
        }
    }

    async fn ready(&self, _ctx: Context, ready: Ready) {
        tracing::info!(target: "handler", "{} is connected!", ready.user.name);
    }
}
