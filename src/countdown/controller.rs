use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info, trace};

use crate::config::settings::CountdownConfig;
use crate::countdown::sink::CountdownSink;
use crate::countdown::state::{CountdownStatus, CountdownWindow, TickOutcome};
use crate::helpers::time::{Clock, SystemClock};

/// Drives the countdown of one displayed token.
///
/// Owns the recurring timer task exclusively: `start` releases the previous
/// task before spawning a new one, `cancel` and drop release it for good.
/// Every schedule carries a generation number checked under the same lock the
/// tick emits under, so once `start`/`cancel` returns the old schedule is silent.
pub struct CountdownController<S: CountdownSink, C: Clock = SystemClock> {
    inner: Arc<Inner<S, C>>,
    tick_interval: Duration,
    default_total: Duration,
    handle: Option<JoinHandle<()>>,
}

/// The countdown component under its dashboard name.
pub type TokenCountdownController<S, C = SystemClock> = CountdownController<S, C>;

struct Inner<S, C> {
    sink: S,
    clock: C,
    generation: Mutex<u64>,
    status: watch::Sender<CountdownStatus>,
}

impl<S: CountdownSink> CountdownController<S, SystemClock> {
    pub fn from_config(sink: S, config: &CountdownConfig) -> Self {
        Self::new(
            sink,
            SystemClock::new(),
            Duration::from_millis(config.tick_interval_ms),
            Duration::from_secs(config.token_ttl_seconds),
        )
    }
}

impl<S: CountdownSink, C: Clock> CountdownController<S, C> {
    pub fn new(sink: S, clock: C, tick_interval: Duration, default_total: Duration) -> Self {
        let (status, _) = watch::channel(CountdownStatus::Idle);
        Self {
            inner: Arc::new(Inner {
                sink,
                clock,
                generation: Mutex::new(0),
                status,
            }),
            // tokio intervals reject a zero period
            tick_interval: tick_interval.max(Duration::from_millis(1)),
            default_total,
            handle: None,
        }
    }

    /// Starts a countdown sized by the default window.
    /// Must be called from within a tokio runtime.
    pub fn start(&mut self, expires_at: DateTime<Utc>) {
        self.start_with_window(CountdownWindow::new(expires_at, self.default_total));
    }

    pub fn start_with_window(&mut self, window: CountdownWindow) {
        let generation = {
            let mut generation = self.inner.lock_generation();
            *generation += 1;
            if let Some(handle) = self.handle.take() {
                handle.abort();
                debug!("previous countdown superseded");
            }
            self.inner.status.send_replace(CountdownStatus::Active);
            *generation
        };

        info!(
            "countdown started, expires at {}, window {} ms",
            window.expires_at,
            window.total.as_millis()
        );

        let inner = Arc::clone(&self.inner);
        let tick_interval = self.tick_interval;
        self.handle = Some(tokio::spawn(async move {
            let mut interval = time::interval(tick_interval);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                if !inner.step(&window, generation) {
                    break;
                }
            }
        }));
    }

    /// Stops the schedule without an `expired` notification. Safe to call
    /// with nothing running.
    pub fn cancel(&mut self) {
        let mut generation = self.inner.lock_generation();
        *generation += 1;
        if let Some(handle) = self.handle.take() {
            handle.abort();
            debug!("countdown cancelled");
        }
        self.inner.status.send_if_modified(|status| {
            if *status == CountdownStatus::Active {
                *status = CountdownStatus::Idle;
                true
            } else {
                false
            }
        });
    }

    pub fn status(&self) -> CountdownStatus {
        *self.inner.status.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<CountdownStatus> {
        self.inner.status.subscribe()
    }

    /// Waits until the current lifecycle ends.
    /// Returns `true` when it expired, `false` when it was cancelled or never started.
    pub async fn wait_expired(&self) -> bool {
        let mut receiver = self.subscribe();
        receiver
            .wait_for(|status| *status != CountdownStatus::Active)
            .await
            .map(|status| *status == CountdownStatus::Expired)
            .unwrap_or(false)
    }
}

impl<S: CountdownSink, C: Clock> Drop for CountdownController<S, C> {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl<S: CountdownSink, C: Clock> Inner<S, C> {
    fn lock_generation(&self) -> MutexGuard<'_, u64> {
        self.generation.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// One tick of the schedule `generation`. Returns `false` once it must stop.
    fn step(&self, window: &CountdownWindow, generation: u64) -> bool {
        let current = self.lock_generation();
        if *current != generation {
            return false;
        }

        match window.observe(self.clock.now()) {
            TickOutcome::Tick(tick) => {
                trace!(
                    "tick: {}s left, {:.1}% remaining",
                    tick.seconds_left,
                    tick.percent_remaining
                );
                self.sink.on_tick(tick);
                true
            }
            TickOutcome::Expired => {
                info!("countdown expired at {}", window.expires_at);
                // sink first: status watchers wake only once expiry is rendered
                self.sink.on_expired();
                self.status.send_replace(CountdownStatus::Expired);
                false
            }
        }
    }
}
