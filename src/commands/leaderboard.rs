//! The wealth leaderboard: every known account ranked by balance.

use crate::database::economy;
use crate::model::AppState;
use serenity::builder::{CreateEmbed, CreateMessage};
use serenity::model::channel::Message;
use serenity::model::id::UserId;
use serenity::prelude::*;
use std::sync::Arc;

pub async fn run_prefix(ctx: &Context, msg: &Message, app: Arc<AppState>) {
    let entries = match economy::wealth_leaderboard(&app.db).await {
        Ok(entries) => entries,
        Err(e) => {
            tracing::error!(target: "economy", error = ?e, "leaderboard scan failed");
            msg.reply(&ctx.http, "Something went wrong. Please try again later.")
                .await
                .ok();
            return;
        }
    };

    if entries.is_empty() {
        msg.reply(&ctx.http, "No users found.").await.ok();
        return;
    }

    let mut lines = Vec::with_capacity(entries.len());
    for (rank, entry) in entries.iter().enumerate() {
        // Resolved through the HTTP cache-miss path; a deleted account still
        // gets a stable line.
        let name = match ctx.http.get_user(UserId::new(entry.user_id as u64)).await {
            Ok(user) => user.name,
            Err(_) => format!("User ID {}", entry.user_id),
        };
        lines.push(format!("{}. **{}** - {} chips", rank + 1, name, entry.balance));
    }

    let embed = CreateEmbed::new()
        .title("Leaderboard")
        .color(0xFF9900)
        .description(lines.join("\n"));
    let builder = CreateMessage::new().embed(embed).reference_message(msg);
    msg.channel_id.send_message(&ctx.http, builder).await.ok();
}
