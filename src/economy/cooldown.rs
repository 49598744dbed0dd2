//! Pure cooldown policy for the timed claim rewards.
//!
//! Two variants: the daily claim gates on calendar days in a fixed reference
//! timezone (one claim per local date, remaining wait runs to the next local
//! midnight), while the hourly claim is a plain rolling 3600-second window.

use crate::constants::{
    DAILY_REWARD_MAX, DAILY_REWARD_MIN, HOURLY_REWARD_MAX, HOURLY_REWARD_MIN,
};
use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use rand::Rng;

/// Reference timezone for the calendar-daily window and the midnight sweep.
pub const RESET_TZ: Tz = chrono_tz::America::New_York;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimKind {
    Daily,
    Hourly,
}

impl ClaimKind {
    /// Column holding this claim's last-claimed timestamp.
    pub fn column(self) -> &'static str {
        match self {
            ClaimKind::Daily => "daily_last_claimed",
            ClaimKind::Hourly => "hourly_last_claimed",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ClaimKind::Daily => "daily",
            ClaimKind::Hourly => "hourly",
        }
    }

    /// Draws a reward uniformly from this claim's range.
    pub fn roll_reward(self) -> i64 {
        let mut rng = rand::rng();
        match self {
            ClaimKind::Daily => rng.random_range(DAILY_REWARD_MIN..=DAILY_REWARD_MAX),
            ClaimKind::Hourly => rng.random_range(HOURLY_REWARD_MIN..=HOURLY_REWARD_MAX),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Claimability {
    Ready,
    Wait(Duration),
}

/// Decides whether a claim is available given its last-claimed timestamp and
/// a reference "now".
pub fn evaluate(kind: ClaimKind, last_claimed: DateTime<Utc>, now: DateTime<Utc>) -> Claimability {
    match kind {
        ClaimKind::Daily => {
            let last_date = last_claimed.with_timezone(&RESET_TZ).date_naive();
            let now_date = now.with_timezone(&RESET_TZ).date_naive();
            if now_date.signed_duration_since(last_date) >= Duration::days(1) {
                Claimability::Ready
            } else {
                Claimability::Wait(next_local_midnight(now) - now)
            }
        }
        ClaimKind::Hourly => {
            let elapsed = now - last_claimed;
            if elapsed >= Duration::hours(1) {
                Claimability::Ready
            } else {
                Claimability::Wait(Duration::hours(1) - elapsed)
            }
        }
    }
}

/// The next midnight in the reference timezone, as a UTC instant.
pub fn next_local_midnight(now: DateTime<Utc>) -> DateTime<Utc> {
    let tomorrow = now.with_timezone(&RESET_TZ).date_naive() + Duration::days(1);
    tomorrow
        .and_hms_opt(0, 0, 0)
        .and_then(|naive| naive.and_local_timezone(RESET_TZ).earliest())
        .map(|local| local.with_timezone(&Utc))
        // DST gap at midnight; fall back to a plain 24h step.
        .unwrap_or(now + Duration::days(1))
}
