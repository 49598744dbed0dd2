//! The blackjack round's `Game` implementation: button handling, settlement
//! mapping and embed rendering.

use super::state::{BlackjackRound, RoundPhase, RoundResult};
use crate::commands::games::engine::{Game, GameUpdate};
use crate::economy::wager::WagerOutcome;
use serenity::async_trait;
use serenity::builder::{CreateActionRow, CreateButton, CreateEmbed, CreateEmbedFooter};
use serenity::model::application::{ButtonStyle, ComponentInteraction};
use serenity::model::id::UserId;
use serenity::prelude::Context;
use std::any::Any;

#[async_trait]
impl Game for BlackjackRound {
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
        if self.phase != RoundPhase::PlayerTurn {
            return GameUpdate::NoOp;
        }

        match interaction.data.custom_id.as_str() {
            "bj_hit" => {
                interaction.defer(&ctx.http).await.ok();
                self.hit();
                if self.is_resolved() {
                    self.finish()
                } else {
                    GameUpdate::ReRender
                }
            }
            "bj_stand" => {
                interaction.defer(&ctx.http).await.ok();
                self.stand();
                self.finish()
            }
            _ => GameUpdate::NoOp,
        }
    }

    fn render(&self) -> (CreateEmbed, Vec<CreateActionRow>) {
        match self.phase {
            RoundPhase::Resolved => (self.render_resolved(), vec![]),
            _ => (self.render_player_turn(), Self::turn_buttons()),
        }
    }
}

impl BlackjackRound {
    /// Maps the terminal result onto a settlement and hands the wager over.
    pub(super) fn finish(&mut self) -> GameUpdate {
        let outcome = match self.result {
            Some(RoundResult::NaturalWin) => WagerOutcome::Win(self.natural_payout()),
            Some(RoundResult::Win) => WagerOutcome::Win(self.bet_amount),
            Some(RoundResult::Push) => WagerOutcome::Push,
            Some(RoundResult::Loss) | Some(RoundResult::Bust) | Some(RoundResult::TimedOut) => {
                WagerOutcome::Loss
            }
            None => return GameUpdate::NoOp,
        };
        GameUpdate::GameOver {
            settlement: self.wager.take().map(|w| (w, outcome)),
        }
    }

    fn turn_buttons() -> Vec<CreateActionRow> {
        vec![CreateActionRow::Buttons(vec![
            CreateButton::new("bj_hit")
                .label("Hit")
                .style(ButtonStyle::Success),
            CreateButton::new("bj_stand")
                .label("Stand")
                .style(ButtonStyle::Danger),
        ])]
    }

    /// The in-progress table: dealer's second card stays hidden.
    fn render_player_turn(&self) -> CreateEmbed {
        let mut embed = CreateEmbed::new().title("Blackjack").color(0xFF9900);
        if let Some(card) = self.last_drawn {
            embed = embed.field("Result", format!("You drew a {}", card), false);
        }
        let upcard = self
            .dealer_hand
            .cards
            .first()
            .map(|c| c.to_string())
            .unwrap_or_default();
        let upcard_value = self
            .dealer_hand
            .cards
            .first()
            .map(|c| c.rank.blackjack_value().0)
            .unwrap_or(0);
        embed
            .field(
                "Your cards",
                format!("{}\nValue: {}", self.player_hand.display(), self.player_hand.value()),
                false,
            )
            .field(
                "Dealer's cards",
                format!("{}, ?\nValue: {}", upcard, upcard_value),
                false,
            )
            .footer(CreateEmbedFooter::new(format!(
                "Bet Amount: {} chips",
                self.bet_amount
            )))
    }

    fn render_resolved(&self) -> CreateEmbed {
        let (result_text, color) = match self.result {
            Some(RoundResult::NaturalWin) => (
                format!("Blackjack! You win! +{} chips.", self.natural_payout()),
                0x00FF00,
            ),
            Some(RoundResult::Win) => (format!("You win! +{} chips.", self.bet_amount), 0x00FF00),
            Some(RoundResult::Push) => ("It's a tie!".to_string(), 0xFFFF00),
            Some(RoundResult::Loss) => (format!("You lose. -{} chips.", self.bet_amount), 0xFF0000),
            Some(RoundResult::Bust) => {
                let drew = self
                    .last_drawn
                    .map(|c| format!("You drew a {}. ", c))
                    .unwrap_or_default();
                (format!("Bust! {}You lose. -{} chips.", drew, self.bet_amount), 0xFF0000)
            }
            Some(RoundResult::TimedOut) => (
                format!("Took too long to decide. You lose. -{} chips.", self.bet_amount),
                0xFF0000,
            ),
            None => (String::new(), 0xFF9900),
        };
        CreateEmbed::new()
            .title("Blackjack")
            .color(color)
            .field(
                "Your cards",
                format!("{}\nValue: {}", self.player_hand.display(), self.player_hand.value()),
                false,
            )
            .field(
                "Dealer's cards",
                format!("{}\nValue: {}", self.dealer_hand.display(), self.dealer_hand.value()),
                false,
            )
            .field("Result", result_text, false)
    }
}
