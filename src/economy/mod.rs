// This file declares the economy policy modules.

pub mod cooldown;
pub mod wager;
