//! The daily/hourly claim commands. Both share one entry point; only the
//! `ClaimKind` differs.

use crate::database::economy;
use crate::economy::cooldown::{self, Claimability, ClaimKind};
use crate::model::AppState;
use crate::util::format_wait;
use chrono::Utc;
use serenity::model::channel::Message;
use serenity::prelude::*;
use std::sync::Arc;

pub async fn run_prefix(ctx: &Context, msg: &Message, app: Arc<AppState>, kind: ClaimKind) {
    // Serialized per user so the check-then-stamp window cannot race a
    // concurrent claim of the same kind.
    let user_lock = app.user_lock(msg.author.id).await;
    let _guard = user_lock.lock().await;

    let now = Utc::now();
    let result = async {
        economy::ensure_account(&app.db, msg.author.id, now).await?;
        let last_claimed = economy::get_cooldown(&app.db, msg.author.id, kind).await?;
        match cooldown::evaluate(kind, last_claimed, now) {
            Claimability::Ready => {
                let reward = kind.roll_reward();
                economy::apply_claim(&app.db, msg.author.id, kind, reward, now).await?;
                Ok::<_, sqlx::Error>(format!(
                    "You claimed your {} and received {} chips.",
                    kind.label(),
                    reward
                ))
            }
            Claimability::Wait(remaining) => Ok(format!(
                "You already claimed your {}. You can claim your next {} in {}",
                kind.label(),
                kind.label(),
                format_wait(remaining)
            )),
        }
    }
    .await;

    match result {
        Ok(reply) => {
            msg.reply(&ctx.http, reply).await.ok();
        }
        Err(e) => {
            tracing::error!(target: "economy", error = ?e, "claim failed");
            msg.reply(&ctx.http, "Something went wrong. Please try again later.")
                .await
                .ok();
        }
    }
}
