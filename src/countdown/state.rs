use chrono::{DateTime, Utc};
use std::time::Duration;

use crate::helpers::time::millis_until;

/// Lifecycle of one displayed token.
///
/// Moves `Idle -> Active -> Expired`. A new `start` opens a fresh lifecycle at
/// `Active`; `cancel` discards the lifecycle and leaves the controller `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownStatus {
    Idle,
    Active,
    Expired,
}

/// Payload of a `tick` notification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    /// `ceil(remaining_ms / 1000)`, always >= 1
    pub seconds_left: u64,
    /// share of the window still remaining, in `(0, 100]`
    pub percent_remaining: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    Tick(Tick),
    Expired,
}

/// Expiration instant plus the total window used to size the progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountdownWindow {
    pub expires_at: DateTime<Utc>,
    pub total: Duration,
}

impl CountdownWindow {
    pub fn new(expires_at: DateTime<Utc>, total: Duration) -> Self {
        Self { expires_at, total }
    }

    /// Window derived from the issuance instant, if it yields a positive span.
    pub fn from_issuance(issued_at: DateTime<Utc>, expires_at: DateTime<Utc>) -> Option<Self> {
        (expires_at - issued_at)
            .to_std()
            .ok()
            .filter(|total| !total.is_zero())
            .map(|total| Self::new(expires_at, total))
    }

    pub fn observe(&self, now: DateTime<Utc>) -> TickOutcome {
        let remaining_ms = millis_until(self.expires_at, now);
        if remaining_ms <= 0 {
            return TickOutcome::Expired;
        }

        let remaining_ms = remaining_ms as u64;
        let total_ms = (self.total.as_millis() as u64).max(1);
        let percent_remaining = (remaining_ms as f64 / total_ms as f64 * 100.0).min(100.0);

        TickOutcome::Tick(Tick {
            seconds_left: remaining_ms.div_ceil(1000),
            percent_remaining,
        })
    }
}
