//! The bet-validate-stake-settle protocol shared by all betting games.
//!
//! A `Wager` is only obtainable through `open_wager`, which validates the raw
//! bet against the account balance. Settlement consumes the wager by value,
//! so a wager can never be settled twice; dropping an unsettled wager (e.g.
//! a choice timeout) leaves the ledger untouched.

use crate::database::economy;
use crate::database::init::DbPool;
use crate::error::GameError;
use chrono::Utc;
use serenity::model::id::UserId;

/// A validated stake pending settlement.
#[derive(Debug)]
pub struct Wager {
    user_id: UserId,
    amount: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WagerOutcome {
    /// Credits the payout, which may differ from the wager amount
    /// (blackjack naturals pay 1.5x, dice pays by multiplier).
    Win(i64),
    /// Debits the wager amount.
    Loss,
    /// No balance change.
    Push,
}

/// Parses and validates a raw bet for `user_id`, creating the account row if
/// this is their first interaction.
pub async fn open_wager(pool: &DbPool, user_id: UserId, raw: &str) -> Result<Wager, GameError> {
    let amount: i64 = raw.parse().map_err(|_| GameError::InvalidAmount)?;
    if amount <= 0 {
        return Err(GameError::InvalidAmount);
    }

    economy::ensure_account(pool, user_id, Utc::now()).await?;
    let balance = economy::get_balance(pool, user_id).await?;
    if amount > balance {
        return Err(GameError::InsufficientFunds);
    }

    Ok(Wager { user_id, amount })
}

impl Wager {
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn amount(&self) -> i64 {
        self.amount
    }

    /// Applies the outcome to the ledger. Consumes the wager: settlement
    /// happens exactly once.
    pub async fn settle(self, pool: &DbPool, outcome: WagerOutcome) -> Result<(), sqlx::Error> {
        match outcome {
            WagerOutcome::Win(payout) => economy::credit(pool, self.user_id, payout).await,
            WagerOutcome::Loss => economy::debit(pool, self.user_id, self.amount).await,
            WagerOutcome::Push => Ok(()),
        }
    }
}
