//! Background task that re-opens stale daily claims at local midnight.

use crate::database::economy;
use crate::database::init::DbPool;
use crate::economy::cooldown::RESET_TZ;
use chrono::{DateTime, NaiveDate, Utc};
use std::time::Duration;

/// True once `now` has crossed into a local date later than the last run's.
pub fn sweep_due(last_reset: NaiveDate, now: DateTime<Utc>) -> bool {
    now.with_timezone(&RESET_TZ).date_naive() > last_reset
}

/// Spawns the midnight sweep. Polls once a minute; the mark starts at the
/// spawn-time local date, so the first reset fires at the next local
/// midnight and a mid-day restart never re-stamps accounts early.
pub fn spawn(db: DbPool) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(60));
        let mut last_reset = Utc::now().with_timezone(&RESET_TZ).date_naive();
        loop {
            interval.tick().await;

            let now = Utc::now();
            if !sweep_due(last_reset, now) {
                continue;
            }

            match economy::reset_stale_cooldowns(&db, now).await {
                Ok(touched) => {
                    last_reset = now.with_timezone(&RESET_TZ).date_naive();
                    if touched > 0 {
                        tracing::info!(target: "sweep", touched, %last_reset, "reset stale daily cooldowns");
                    }
                }
                Err(e) => {
                    tracing::error!(target: "sweep", error = ?e, "cooldown sweep failed");
                }
            }
        }
    });
}
