use chrono::{DateTime, Utc};

/// Source of "now" for countdown arithmetic.
pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> DateTime<Utc>;
}

/// System wall clock, read on every tick so it tracks NTP corrections and
/// host suspend the same way the server's `expires_at` does.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Milliseconds from `now` until `at`, negative once `at` has passed.
pub fn millis_until(at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (at - now).num_milliseconds()
}

/// Wall clock driven by tokio time: one UTC reading at construction plus the
/// elapsed `tokio::time::Instant`, so a paused runtime advances it exactly
/// as it advances timers.
#[cfg(test)]
#[derive(Debug, Clone, Copy)]
pub(crate) struct TokioClock {
    anchor_utc: DateTime<Utc>,
    anchor: tokio::time::Instant,
}

#[cfg(test)]
impl TokioClock {
    pub(crate) fn new() -> Self {
        Self {
            anchor_utc: Utc::now(),
            anchor: tokio::time::Instant::now(),
        }
    }
}

#[cfg(test)]
impl Clock for TokioClock {
    fn now(&self) -> DateTime<Utc> {
        let elapsed = tokio::time::Instant::now().saturating_duration_since(self.anchor);
        self.anchor_utc + chrono::Duration::from_std(elapsed).expect("test elapsed fits")
    }
}
