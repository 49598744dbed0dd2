//! The rock-paper-scissors `Game` implementation: one button press against a
//! random house move resolves the wager.

use super::state::{duel, DuelResult, Move};
use crate::commands::games::engine::{Game, GameUpdate};
use crate::economy::wager::{Wager, WagerOutcome};
use serenity::async_trait;
use serenity::builder::{CreateActionRow, CreateButton, CreateEmbed, CreateEmbedFooter};
use serenity::model::application::{ButtonStyle, ComponentInteraction};
use serenity::model::id::UserId;
use serenity::model::user::User;
use serenity::prelude::Context;
use std::any::Any;
use std::sync::Arc;

pub struct RpsGame {
    pub player: Arc<User>,
    pub wager: Option<Wager>,
    pub bet_amount: i64,
    pub outcome: Option<(Move, Move, DuelResult)>,
}

impl RpsGame {
    pub fn new(player: Arc<User>, wager: Wager) -> Self {
        let bet_amount = wager.amount();
        Self {
            player,
            wager: Some(wager),
            bet_amount,
            outcome: None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.outcome.is_some()
    }
}

#[async_trait]
impl Game for RpsGame {
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
        if self.is_resolved() {
            return GameUpdate::NoOp;
        }
        let player_move = match interaction.data.custom_id.as_str() {
            "rps_rock" => Move::Rock,
            "rps_paper" => Move::Paper,
            "rps_scissors" => Move::Scissors,
            _ => return GameUpdate::NoOp,
        };
        interaction.defer(&ctx.http).await.ok();

        let house_move = Move::random();
        let result = duel(player_move, house_move);
        self.outcome = Some((player_move, house_move, result));

        let wager_outcome = match result {
            DuelResult::Win => WagerOutcome::Win(self.bet_amount),
            DuelResult::Loss => WagerOutcome::Loss,
            DuelResult::Tie => WagerOutcome::Push,
        };
        GameUpdate::GameOver {
            settlement: self.wager.take().map(|w| (w, wager_outcome)),
        }
    }

    fn render(&self) -> (CreateEmbed, Vec<CreateActionRow>) {
        match self.outcome {
            None => {
                let embed = CreateEmbed::new()
                    .title("Rock, Paper, Scissors")
                    .description("Pick your move:")
                    .color(0xFF9900)
                    .field("🪨", "Rock", true)
                    .field("📄", "Paper", true)
                    .field("✂️", "Scissors", true)
                    .footer(CreateEmbedFooter::new(format!(
                        "Bet Amount: {} chips",
                        self.bet_amount
                    )));
                let buttons = vec![
                    CreateButton::new("rps_rock")
                        .label("Rock")
                        .emoji('🪨')
                        .style(ButtonStyle::Secondary),
                    CreateButton::new("rps_paper")
                        .label("Paper")
                        .emoji('📄')
                        .style(ButtonStyle::Secondary),
                    CreateButton::new("rps_scissors")
                        .label("Scissors")
                        .emoji('✂')
                        .style(ButtonStyle::Secondary),
                ];
                (embed, vec![CreateActionRow::Buttons(buttons)])
            }
            Some((player_move, house_move, result)) => {
                let (verdict, color) = match result {
                    DuelResult::Tie => ("It's a tie!".to_string(), 0xFFFF00),
                    DuelResult::Win => (format!("You win! +{} chips.", self.bet_amount), 0x00FF00),
                    DuelResult::Loss => (format!("You lose. -{} chips.", self.bet_amount), 0xFF0000),
                };
                let embed = CreateEmbed::new()
                    .title("Rock, Paper, Scissors")
                    .color(color)
                    .description(format!(
                        "You chose {}\nBot chose {}\n{}",
                        player_move.emoji(),
                        house_move.emoji(),
                        verdict
                    ));
                (embed, vec![])
            }
        }
    }
}
