//! Integration tests for the ledger: account rows, wager settlement and the
//! claim/sweep flows, against an in-memory SQLite database.

use chiphouse_bot::database::economy;
use chiphouse_bot::database::init::{self, DbPool};
use chiphouse_bot::economy::cooldown::{self, Claimability, ClaimKind};
use chiphouse_bot::economy::wager::{self, WagerOutcome};
use chiphouse_bot::error::GameError;
use chrono::{Duration, Utc};
use serenity::model::id::UserId;
use sqlx::sqlite::SqlitePoolOptions;

const ALICE: UserId = UserId::new(1001);
const BOB: UserId = UserId::new(1002);

async fn test_pool() -> DbPool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory pool");
    init::run_migrations(&pool).await.expect("migrations");
    pool
}

#[tokio::test]
async fn new_accounts_start_at_zero_with_backdated_cooldowns() {
    let pool = test_pool().await;
    let now = Utc::now();

    economy::ensure_account(&pool, ALICE, now).await.unwrap();
    assert_eq!(economy::get_balance(&pool, ALICE).await.unwrap(), 0);

    // Back-dated a day so the first claim of either kind is immediately ready.
    let daily = economy::get_cooldown(&pool, ALICE, ClaimKind::Daily).await.unwrap();
    let hourly = economy::get_cooldown(&pool, ALICE, ClaimKind::Hourly).await.unwrap();
    assert_eq!(daily, hourly);
    assert!((now - daily - Duration::days(1)).num_seconds().abs() <= 1);
}

#[tokio::test]
async fn ensure_account_never_overwrites_an_existing_row() {
    let pool = test_pool().await;
    let now = Utc::now();

    economy::ensure_account(&pool, ALICE, now).await.unwrap();
    economy::credit(&pool, ALICE, 750).await.unwrap();
    economy::ensure_account(&pool, ALICE, now + Duration::hours(1)).await.unwrap();

    assert_eq!(economy::get_balance(&pool, ALICE).await.unwrap(), 750);
}

#[tokio::test]
async fn credits_and_debits_only_touch_their_account() {
    let pool = test_pool().await;
    let now = Utc::now();
    economy::ensure_account(&pool, ALICE, now).await.unwrap();
    economy::ensure_account(&pool, BOB, now).await.unwrap();

    economy::credit(&pool, ALICE, 300).await.unwrap();
    economy::debit(&pool, ALICE, 120).await.unwrap();
    economy::credit(&pool, BOB, 50).await.unwrap();

    assert_eq!(economy::get_balance(&pool, ALICE).await.unwrap(), 180);
    assert_eq!(economy::get_balance(&pool, BOB).await.unwrap(), 50);
}

#[tokio::test]
async fn open_wager_validates_amount_and_balance() {
    let pool = test_pool().await;

    assert!(matches!(
        wager::open_wager(&pool, ALICE, "abc").await,
        Err(GameError::InvalidAmount)
    ));
    assert!(matches!(
        wager::open_wager(&pool, ALICE, "0").await,
        Err(GameError::InvalidAmount)
    ));
    assert!(matches!(
        wager::open_wager(&pool, ALICE, "-20").await,
        Err(GameError::InvalidAmount)
    ));
    // A well-formed bet creates the account on first contact, at balance 0.
    assert!(matches!(
        wager::open_wager(&pool, ALICE, "50").await,
        Err(GameError::InsufficientFunds)
    ));

    economy::credit(&pool, ALICE, 100).await.unwrap();
    let w = wager::open_wager(&pool, ALICE, "100").await.unwrap();
    assert_eq!(w.amount(), 100);
    assert_eq!(w.user_id(), ALICE);
}

#[tokio::test]
async fn settlement_moves_the_right_amounts() {
    let pool = test_pool().await;
    economy::ensure_account(&pool, ALICE, Utc::now()).await.unwrap();
    economy::credit(&pool, ALICE, 500).await.unwrap();

    let w = wager::open_wager(&pool, ALICE, "200").await.unwrap();
    w.settle(&pool, WagerOutcome::Loss).await.unwrap();
    assert_eq!(economy::get_balance(&pool, ALICE).await.unwrap(), 300);

    // A natural pays 1.5x the stake without ever debiting it.
    let w = wager::open_wager(&pool, ALICE, "200").await.unwrap();
    w.settle(&pool, WagerOutcome::Win(300)).await.unwrap();
    assert_eq!(economy::get_balance(&pool, ALICE).await.unwrap(), 600);

    let w = wager::open_wager(&pool, ALICE, "200").await.unwrap();
    w.settle(&pool, WagerOutcome::Push).await.unwrap();
    assert_eq!(economy::get_balance(&pool, ALICE).await.unwrap(), 600);
}

#[tokio::test]
async fn dropping_an_unsettled_wager_leaves_the_ledger_untouched() {
    let pool = test_pool().await;
    economy::ensure_account(&pool, ALICE, Utc::now()).await.unwrap();
    economy::credit(&pool, ALICE, 400).await.unwrap();

    let w = wager::open_wager(&pool, ALICE, "400").await.unwrap();
    drop(w);
    assert_eq!(economy::get_balance(&pool, ALICE).await.unwrap(), 400);
}

#[tokio::test]
async fn hourly_claim_flow_stamps_and_waits() {
    let pool = test_pool().await;
    let now = Utc::now();
    economy::ensure_account(&pool, ALICE, now).await.unwrap();

    let last = economy::get_cooldown(&pool, ALICE, ClaimKind::Hourly).await.unwrap();
    assert_eq!(cooldown::evaluate(ClaimKind::Hourly, last, now), Claimability::Ready);

    economy::apply_claim(&pool, ALICE, ClaimKind::Hourly, 150, now).await.unwrap();
    assert_eq!(economy::get_balance(&pool, ALICE).await.unwrap(), 150);

    let last = economy::get_cooldown(&pool, ALICE, ClaimKind::Hourly).await.unwrap();
    assert!(matches!(
        cooldown::evaluate(ClaimKind::Hourly, last, now + Duration::minutes(10)),
        Claimability::Wait(_)
    ));
    assert_eq!(
        cooldown::evaluate(ClaimKind::Hourly, last, now + Duration::hours(2)),
        Claimability::Ready
    );
}

#[tokio::test]
async fn daily_reward_lands_in_range() {
    let pool = test_pool().await;
    let now = Utc::now();
    economy::ensure_account(&pool, ALICE, now).await.unwrap();

    let reward = ClaimKind::Daily.roll_reward();
    assert!((500..=2000).contains(&reward));
    economy::apply_claim(&pool, ALICE, ClaimKind::Daily, reward, now).await.unwrap();

    let balance = economy::get_balance(&pool, ALICE).await.unwrap();
    assert!((500..=2000).contains(&balance));
    let last = economy::get_cooldown(&pool, ALICE, ClaimKind::Daily).await.unwrap();
    assert!((now - last).num_seconds().abs() <= 1);
}

#[tokio::test]
async fn sweep_only_touches_stale_accounts() {
    let pool = test_pool().await;
    let now = Utc::now();
    economy::ensure_account(&pool, ALICE, now).await.unwrap();
    economy::ensure_account(&pool, BOB, now).await.unwrap();

    // Alice claimed two days ago and is stale; Bob claimed just now.
    economy::set_cooldown(&pool, ALICE, ClaimKind::Daily, now - Duration::days(2)).await.unwrap();
    economy::set_cooldown(&pool, BOB, ClaimKind::Daily, now).await.unwrap();
    economy::set_cooldown(&pool, BOB, ClaimKind::Hourly, now).await.unwrap();

    let touched = economy::reset_stale_cooldowns(&pool, now).await.unwrap();
    assert_eq!(touched, 1);

    let alice_daily = economy::get_cooldown(&pool, ALICE, ClaimKind::Daily).await.unwrap();
    let alice_hourly = economy::get_cooldown(&pool, ALICE, ClaimKind::Hourly).await.unwrap();
    assert!((now - alice_daily).num_seconds().abs() <= 1);
    assert!((now - alice_hourly).num_seconds().abs() <= 1);

    let bob_daily = economy::get_cooldown(&pool, BOB, ClaimKind::Daily).await.unwrap();
    assert!((now - bob_daily).num_seconds().abs() <= 1);
}

#[tokio::test]
async fn leaderboard_orders_by_balance_descending() {
    let pool = test_pool().await;
    let now = Utc::now();
    economy::ensure_account(&pool, ALICE, now).await.unwrap();
    economy::ensure_account(&pool, BOB, now).await.unwrap();
    economy::credit(&pool, ALICE, 100).await.unwrap();
    economy::credit(&pool, BOB, 900).await.unwrap();

    let entries = economy::wealth_leaderboard(&pool).await.unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].user_id, BOB.get() as i64);
    assert_eq!(entries[0].balance, 900);
    assert_eq!(entries[1].user_id, ALICE.get() as i64);
}
