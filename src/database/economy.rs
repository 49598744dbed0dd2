//! The ledger store: CRUD over per-user balance/cooldown rows.
//!
//! `credit` and `debit` are unconditional single-row updates, atomic at the
//! storage layer. No balance floor is enforced here; callers pre-validate
//! through the wager session.

use super::init::DbPool;
use crate::economy::cooldown::ClaimKind;
use chrono::{DateTime, Duration, Utc};
use serenity::model::id::UserId;
use sqlx::FromRow;

/// One row of the leaderboard scan.
#[derive(FromRow, Debug)]
pub struct LeaderboardEntry {
    pub user_id: i64,
    pub balance: i64,
}

/// Inserts the default account row if the user has none: balance 0 and both
/// cooldowns back-dated one day so the first claim succeeds immediately.
/// A no-op when the account already exists.
pub async fn ensure_account(
    pool: &DbPool,
    user_id: UserId,
    now: DateTime<Utc>,
) -> Result<(), sqlx::Error> {
    let initial_last_claimed = now - Duration::days(1);
    sqlx::query(
        "INSERT OR IGNORE INTO user_balance (user_id, balance, daily_last_claimed, hourly_last_claimed)
         VALUES (?, 0, ?, ?)",
    )
    .bind(user_id.get() as i64)
    .bind(initial_last_claimed)
    .bind(initial_last_claimed)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn get_balance(pool: &DbPool, user_id: UserId) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT balance FROM user_balance WHERE user_id = ?")
        .bind(user_id.get() as i64)
        .fetch_one(pool)
        .await
}

/// Unconditional balance increment.
pub async fn credit(pool: &DbPool, user_id: UserId, amount: i64) -> Result<(), sqlx::Error> {
    adjust_balance(pool, user_id, amount).await
}

/// Unconditional balance decrement.
pub async fn debit(pool: &DbPool, user_id: UserId, amount: i64) -> Result<(), sqlx::Error> {
    adjust_balance(pool, user_id, -amount).await
}

async fn adjust_balance(pool: &DbPool, user_id: UserId, delta: i64) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE user_balance SET balance = balance + ? WHERE user_id = ?")
        .bind(delta)
        .bind(user_id.get() as i64)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn get_cooldown(
    pool: &DbPool,
    user_id: UserId,
    kind: ClaimKind,
) -> Result<DateTime<Utc>, sqlx::Error> {
    let query = format!(
        "SELECT {} FROM user_balance WHERE user_id = ?",
        kind.column()
    );
    sqlx::query_scalar(&query)
        .bind(user_id.get() as i64)
        .fetch_one(pool)
        .await
}

pub async fn set_cooldown(
    pool: &DbPool,
    user_id: UserId,
    kind: ClaimKind,
    claimed_at: DateTime<Utc>,
) -> Result<(), sqlx::Error> {
    let query = format!(
        "UPDATE user_balance SET {} = ? WHERE user_id = ?",
        kind.column()
    );
    sqlx::query(&query)
        .bind(claimed_at)
        .bind(user_id.get() as i64)
        .execute(pool)
        .await?;
    Ok(())
}

/// Credits a claim reward and stamps the matching cooldown in one row update.
pub async fn apply_claim(
    pool: &DbPool,
    user_id: UserId,
    kind: ClaimKind,
    reward: i64,
    claimed_at: DateTime<Utc>,
) -> Result<(), sqlx::Error> {
    let query = format!(
        "UPDATE user_balance SET balance = balance + ?, {} = ? WHERE user_id = ?",
        kind.column()
    );
    sqlx::query(&query)
        .bind(reward)
        .bind(claimed_at)
        .bind(user_id.get() as i64)
        .execute(pool)
        .await?;
    Ok(())
}

/// Full-table scan ordered by balance descending, for the leaderboard.
pub async fn wealth_leaderboard(pool: &DbPool) -> Result<Vec<LeaderboardEntry>, sqlx::Error> {
    sqlx::query_as("SELECT user_id, balance FROM user_balance ORDER BY balance DESC")
        .fetch_all(pool)
        .await
}

/// The daily sweep: re-stamps both cooldowns for every account whose daily
/// claim has been sitting unclaimed for a day or more. Returns how many
/// accounts were touched. Safe to re-run on the same boundary.
pub async fn reset_stale_cooldowns(pool: &DbPool, now: DateTime<Utc>) -> Result<u64, sqlx::Error> {
    let rows: Vec<(i64, DateTime<Utc>)> =
        sqlx::query_as("SELECT user_id, daily_last_claimed FROM user_balance")
            .fetch_all(pool)
            .await?;

    let mut touched = 0;
    for (user_id, last_claimed) in rows {
        if now - last_claimed >= Duration::days(1) {
            sqlx::query(
                "UPDATE user_balance SET daily_last_claimed = ?, hourly_last_claimed = ? WHERE user_id = ?",
            )
            .bind(now)
            .bind(now)
            .bind(user_id)
            .execute(pool)
            .await?;
            touched += 1;
        }
    }
    Ok(touched)
}
