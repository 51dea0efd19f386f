//! # Tap Countdown Library
//!
//! Client side of the tap dashboard: requests time-limited access tokens
//! for a tap, shows them and counts down their validity.
//!
//! Modules:
//! - `countdown`: expiration state machine driven by a recurring timer
//! - `issuer`: token issuing endpoint client
//! - `dashboard`: issue, display and countdown flow
//! - `presentation`: urgency policy and terminal view
//! - `config`: YAML configuration, defaults and validation

pub mod config;
pub mod countdown;
pub mod dashboard;
pub mod helpers;
pub mod issuer;
pub mod presentation;
pub mod token;
pub mod utils;

#[cfg(test)]
mod tests;


pub use crate::config::types::ServiceConfig;
pub use crate::countdown::{CountdownController, CountdownSink};
