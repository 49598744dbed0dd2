//! The coinflip `Game` implementation: heads or tails against a fair flip.

use crate::commands::games::engine::{Game, GameUpdate};
use crate::economy::wager::{Wager, WagerOutcome};
use rand::seq::IndexedRandom;
use serenity::async_trait;
use serenity::builder::{CreateActionRow, CreateButton, CreateEmbed, CreateEmbedFooter};
use serenity::model::application::{ButtonStyle, ComponentInteraction};
use serenity::model::id::UserId;
use serenity::model::user::User;
use serenity::prelude::Context;
use std::any::Any;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    Heads,
    Tails,
}

impl Face {
    pub const ALL: [Face; 2] = [Face::Heads, Face::Tails];

    /// Full-moon heads, new-moon tails.
    pub fn emoji(self) -> &'static str {
        match self {
            Face::Heads => "🌝",
            Face::Tails => "🌚",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Face::Heads => "Heads",
            Face::Tails => "Tails",
        }
    }

    pub fn random() -> Face {
        *Face::ALL.choose(&mut rand::rng()).unwrap_or(&Face::Heads)
    }
}

pub struct CoinflipGame {
    pub player: Arc<User>,
    pub wager: Option<Wager>,
    pub bet_amount: i64,
    pub outcome: Option<(Face, Face)>,
}

impl CoinflipGame {
    pub fn new(player: Arc<User>, wager: Wager) -> Self {
        let bet_amount = wager.amount();
        Self {
            player,
            wager: Some(wager),
            bet_amount,
            outcome: None,
        }
    }
}

#[async_trait]
impl Game for CoinflipGame {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn player_id(&self) -> UserId {
        self.player.id
    }

    async fn handle_interaction(
        &mut self,
        ctx: &Context,
        interaction: &mut ComponentInteraction,
    ) -> GameUpdate {
        if self.outcome.is_some() {
            return GameUpdate::NoOp;
        }
        let pick = match interaction.data.custom_id.as_str() {
            "cf_heads" => Face::Heads,
            "cf_tails" => Face::Tails,
            _ => return GameUpdate::NoOp,
        };
        interaction.defer(&ctx.http).await.ok();

        let flip = Face::random();
        self.outcome = Some((pick, flip));

        let wager_outcome = if pick == flip {
            WagerOutcome::Win(self.bet_amount)
        } else {
            WagerOutcome::Loss
        };
        GameUpdate::GameOver {
            settlement: self.wager.take().map(|w| (w, wager_outcome)),
        }
    }

    fn render(&self) -> (CreateEmbed, Vec<CreateActionRow>) {
        match self.outcome {
            None => {
                let embed = CreateEmbed::new()
                    .title("Heads or Tails")
                    .description("Pick a side:")
                    .color(0xFF9900)
                    .field("🌝", "Heads", true)
                    .field("🌚", "Tails", true)
                    .footer(CreateEmbedFooter::new(format!(
                        "Bet Amount: {} chips",
                        self.bet_amount
                    )));
                let buttons = vec![
                    CreateButton::new("cf_heads")
                        .label("Heads")
                        .emoji('🌝')
                        .style(ButtonStyle::Secondary),
                    CreateButton::new("cf_tails")
                        .label("Tails")
                        .emoji('🌚')
                        .style(ButtonStyle::Secondary),
                ];
                (embed, vec![CreateActionRow::Buttons(buttons)])
            }
            Some((pick, flip)) => {
                let won = pick == flip;
                let verdict = if won {
                    format!("You win!\n+{} chips.", self.bet_amount)
                } else {
                    format!("You lose.\n-{} chips.", self.bet_amount)
                };
                let embed = CreateEmbed::new()
                    .title("Heads or Tails")
                    .color(if won { 0x00FF00 } else { 0xFF0000 })
                    .description(format!("Coin landed on {}.\n{}", flip.emoji(), verdict));
                (embed, vec![])
            }
        }
    }
}
