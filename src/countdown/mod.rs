//! Token countdown: expiration arithmetic, the timer-driven controller and
//! the sink it notifies.

pub mod controller;
pub mod sink;
pub mod state;

pub use controller::{CountdownController, TokenCountdownController};
pub use sink::{ChannelSink, CountdownEvent, CountdownSink};
pub use state::{CountdownStatus, CountdownWindow, Tick, TickOutcome};
