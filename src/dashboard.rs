//! Member dashboard flow: request a token for a tap, show it, run its countdown.

use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};

use crate::config::settings::CountdownConfig;
use crate::config::types::ServiceConfig;
use crate::countdown::{CountdownController, CountdownSink, CountdownWindow};
use crate::issuer::{IssueToken, TokenIssuer};
use crate::token::{Tap, Token};

/// Everything the dashboard renders. Countdown notifications arrive through
/// the `CountdownSink` supertrait.
pub trait DashboardView: CountdownSink {
    fn show_loading(&self, tap: &Tap);
    fn show_token(&self, token: &Token);
    fn show_error(&self, message: &str);
}

pub struct TapDashboard<V: DashboardView, I: IssueToken = TokenIssuer> {
    issuer: I,
    view: Arc<V>,
    countdown: CountdownController<Arc<V>>,
}

impl<V: DashboardView> TapDashboard<V, TokenIssuer> {
    pub fn from_config(config: &ServiceConfig, view: Arc<V>) -> Result<Self> {
        let issuer = TokenIssuer::new(&config.issuer)?;
        Ok(Self::new(issuer, view, &config.countdown))
    }
}

impl<V: DashboardView, I: IssueToken> TapDashboard<V, I> {
    pub fn new(issuer: I, view: Arc<V>, countdown: &CountdownConfig) -> Self {
        let countdown = CountdownController::from_config(Arc::clone(&view), countdown);
        Self { issuer, view, countdown }
    }

    /// Issues a token for `tap` and starts its countdown.
    ///
    /// Any running countdown is discarded first. On failure the error message
    /// is shown and no countdown runs.
    pub async fn generate_token(&mut self, tap: &Tap) -> Result<Token> {
        self.countdown.cancel();
        self.view.show_loading(tap);

        let issued = match self.issuer.issue(&tap.id).await {
            Ok(issued) => issued,
            Err(err) => {
                warn!("no token for tap '{}': {:#}", tap.id, err);
                self.view.show_error(&err.to_string());
                return Err(err);
            }
        };

        let issued_for = match &issued.tap_name {
            Some(name) if tap.name.is_empty() => name.clone(),
            _ => tap.label().to_owned(),
        };
        let token = Token::new(issued.token, issued.expires_at, issued_for);
        self.view.show_token(&token);

        match issued
            .issued_at
            .and_then(|issued_at| CountdownWindow::from_issuance(issued_at, token.expires_at))
        {
            Some(window) => {
                info!("using server window of {} ms", window.total.as_millis());
                self.countdown.start_with_window(window);
            }
            None => self.countdown.start(token.expires_at),
        }

        Ok(token)
    }

    pub fn countdown(&self) -> &CountdownController<Arc<V>> {
        &self.countdown
    }

    /// Tears down the running countdown, if any.
    pub fn close(&mut self) {
        self.countdown.cancel();
    }
}
