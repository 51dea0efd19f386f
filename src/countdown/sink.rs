use std::sync::Arc;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::debug;

use crate::countdown::state::Tick;

/// Receiver of countdown notifications.
///
/// Called from the controller's timer task while the controller's lock is
/// held, so implementations must not call back into the controller.
pub trait CountdownSink: Send + Sync + 'static {
    fn on_tick(&self, tick: Tick);
    fn on_expired(&self);
}

impl<S: CountdownSink + ?Sized> CountdownSink for Arc<S> {
    fn on_tick(&self, tick: Tick) {
        (**self).on_tick(tick)
    }

    fn on_expired(&self) {
        (**self).on_expired()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CountdownEvent {
    Tick(Tick),
    Expired,
}

/// Forwards notifications over an unbounded channel.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    sender: UnboundedSender<CountdownEvent>,
}

impl ChannelSink {
    pub fn new() -> (Self, UnboundedReceiver<CountdownEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl CountdownSink for ChannelSink {
    fn on_tick(&self, tick: Tick) {
        let _ = self
            .sender
            .send(CountdownEvent::Tick(tick))
            .map_err(|_| debug!("countdown receiver dropped, tick discarded"));
    }

    fn on_expired(&self) {
        let _ = self
            .sender
            .send(CountdownEvent::Expired)
            .map_err(|_| debug!("countdown receiver dropped, expiry discarded"));
    }
}
