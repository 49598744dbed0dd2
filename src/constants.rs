// Central constants for rewards, timeouts and game limits.

pub const DAILY_REWARD_MIN: i64 = 500;
pub const DAILY_REWARD_MAX: i64 = 2000;
pub const HOURLY_REWARD_MIN: i64 = 100;
pub const HOURLY_REWARD_MAX: i64 = 200;

/// Seconds a blackjack player gets to hit or stand before the round
/// auto-resolves as a loss.
pub const BLACKJACK_TURN_TIMEOUT_SECS: u64 = 60;
/// Seconds an rps/coinflip player gets to pick before the wager is aborted.
pub const CHOICE_TIMEOUT_SECS: u64 = 30;
/// Seconds of inactivity before help pagination buttons are removed.
pub const HELP_IDLE_TIMEOUT_SECS: u64 = 30;

pub const BLACKJACK_TARGET: u8 = 21;
pub const DEALER_STAND_MIN: u8 = 17;

/// Bounded retries when fetching a fresh secret word.
pub const WORD_FETCH_ATTEMPTS: usize = 5;
/// Per-request timeout for word source lookups.
pub const WORD_REQUEST_TIMEOUT_SECS: u64 = 10;
