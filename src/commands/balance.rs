use crate::database::economy;
use crate::model::AppState;
use chrono::Utc;
use serenity::model::channel::Message;
use serenity::prelude::*;
use std::sync::Arc;

pub async fn run_prefix(ctx: &Context, msg: &Message, app: Arc<AppState>) {
    let result = async {
        economy::ensure_account(&app.db, msg.author.id, Utc::now()).await?;
        economy::get_balance(&app.db, msg.author.id).await
    }
    .await;

    match result {
        Ok(balance) => {
            msg.reply(&ctx.http, format!("Balance: {} chips", balance))
                .await
                .ok();
        }
        Err(e) => {
            tracing::error!(target: "economy", error = ?e, "balance lookup failed");
            msg.reply(&ctx.http, "Something went wrong. Please try again later.")
                .await
                .ok();
        }
    }
}
