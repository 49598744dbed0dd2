//! The dice command: a single over/under roll against a player-chosen
//! threshold, with the payout multiplier derived from the win probability.

use crate::economy::wager::{self, WagerOutcome};
use crate::error::GameError;
use crate::model::AppState;
use crate::util::chips_noun;
use rand::Rng;
use serenity::builder::{CreateEmbed, CreateMessage};
use serenity::model::channel::Message;
use serenity::prelude::*;
use std::str::FromStr;
use std::sync::Arc;

const USAGE: &str = "Usage: `.dice [over/under] [number] [bet amount]`";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiceSide {
    Over,
    Under,
}

impl FromStr for DiceSide {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "over" => Ok(DiceSide::Over),
            "under" => Ok(DiceSide::Under),
            _ => Err(()),
        }
    }
}

impl DiceSide {
    pub fn label(self) -> &'static str {
        match self {
            DiceSide::Over => "Over",
            DiceSide::Under => "Under",
        }
    }
}

/// The payout multiplier for a threshold, `100/(100-t)` for over rolls and
/// `100/t` for under rolls. Thresholds outside the bands that keep the
/// multiplier sane are rejected.
pub fn payout_multiplier(side: DiceSide, threshold: f64) -> Result<f64, GameError> {
    match side {
        DiceSide::Over => {
            if (5.99..=99.98).contains(&threshold) {
                Ok(100.0 / (100.0 - threshold))
            } else {
                Err(GameError::InvalidRange("5.99 - 99.98 for over rolls"))
            }
        }
        DiceSide::Under => {
            if (0.01..=94.0).contains(&threshold) {
                Ok(100.0 / threshold)
            } else {
                Err(GameError::InvalidRange("0.01 - 94 for under rolls"))
            }
        }
    }
}

pub fn is_winning_roll(side: DiceSide, threshold: f64, roll: f64) -> bool {
    match side {
        DiceSide::Over => roll > threshold,
        DiceSide::Under => roll < threshold,
    }
}

/// Uniform roll in [0.01, 99.99], two decimal places.
pub fn roll_number() -> f64 {
    let raw: f64 = rand::rng().random_range(0.01..=99.99);
    (raw * 100.0).round() / 100.0
}

/// Net winnings for a winning wager: `round(bet * multiplier) - bet`.
pub fn net_winnings(bet: i64, multiplier: f64) -> i64 {
    (bet as f64 * multiplier).round() as i64 - bet
}

fn roll_position_bar(roll: f64) -> String {
    let bar_length = 20usize;
    let position = ((roll / 100.0) * bar_length as f64) as usize;
    format!(
        "[{}>{}]",
        "=".repeat(position),
        "-".repeat(bar_length.saturating_sub(position + 1))
    )
}

pub async fn run_prefix(ctx: &Context, msg: &Message, args: Vec<&str>, app: Arc<AppState>) {
    let (Some(raw_side), Some(raw_number), Some(raw_bet)) =
        (args.first(), args.get(1), args.get(2))
    else {
        msg.reply(&ctx.http, USAGE).await.ok();
        return;
    };

    let Ok(side) = raw_side.parse::<DiceSide>() else {
        msg.reply(&ctx.http, format!("Invalid choice. Use 'over' or 'under'.\n{}", USAGE))
            .await
            .ok();
        return;
    };
    let threshold = match raw_number.parse::<f64>() {
        Ok(n) if n > 0.0 && n < 100.0 => n,
        _ => {
            msg.reply(&ctx.http, format!("Incorrect usage.\n{}", USAGE))
                .await
                .ok();
            return;
        }
    };
    let multiplier = match payout_multiplier(side, threshold) {
        Ok(m) => m,
        Err(e) => {
            msg.reply(&ctx.http, e.user_message()).await.ok();
            return;
        }
    };

    // Held across validate-roll-settle so no other command for this user can
    // slip a balance change in between.
    let user_lock = app.user_lock(msg.author.id).await;
    let _guard = user_lock.lock().await;

    let wager = match wager::open_wager(&app.db, msg.author.id, raw_bet).await {
        Ok(w) => w,
        Err(e) => {
            msg.reply(&ctx.http, e.user_message()).await.ok();
            return;
        }
    };
    let bet = wager.amount();

    let roll = roll_number();
    let won = is_winning_roll(side, threshold, roll);
    let (outcome, result_message, color) = if won {
        let winnings = net_winnings(bet, multiplier);
        (
            WagerOutcome::Win(winnings),
            format!("You win {} {}!", winnings, chips_noun(winnings)),
            0x00FF00,
        )
    } else {
        (
            WagerOutcome::Loss,
            format!("You lose {} {}", bet, chips_noun(bet)),
            0xFF0000,
        )
    };

    if let Err(e) = wager.settle(&app.db, outcome).await {
        tracing::error!(target: "dice", error = ?e, "failed to settle dice wager");
        msg.reply(&ctx.http, "Something went wrong. Please try again later.")
            .await
            .ok();
        return;
    }

    let embed = CreateEmbed::new()
        .title("Dice Roll Result")
        .color(color)
        .field("Your Choice", side.label(), true)
        .field("Your Number", threshold.to_string(), true)
        .field("Your Bet", bet.to_string(), true)
        .field(
            format!("Rolled Number - {}", roll),
            roll_position_bar(roll),
            true,
        )
        .field("Multiplier", format!("{:.2}", multiplier), true)
        .field("Winnings/Loss", result_message, false);

    let builder = CreateMessage::new().embed(embed).reference_message(msg);
    msg.channel_id.send_message(&ctx.http, builder).await.ok();
}
