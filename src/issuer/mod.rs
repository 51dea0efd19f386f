//! Token issuing endpoint client.
//!
//! Requests a token for one tap and decodes the dashboard's JSON answer.
//! Every failure carries a user-facing message as its outermost context.

pub mod response;

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use reqwest::Client;
use tracing::{debug, info, warn};

use crate::config::settings::IssuerConfig;
use crate::utils::constants::{CSRF_HEADER, MSG_CONNECTION_ERROR, MSG_ISSUE_FAILED};

pub use response::{IssueResponse, IssuedToken};

pub trait IssueToken {
    fn issue(
        &self,
        tap_id: &str,
    ) -> impl std::future::Future<Output = Result<IssuedToken>> + Send;
}

#[derive(Debug, Clone)]
pub struct TokenIssuer {
    client: Client,
    endpoint: String,
    csrf_token: Option<String>,
}

impl TokenIssuer {
    pub fn new(config: &IssuerConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .context("cannot build HTTP client")?;

        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: Client, config: &IssuerConfig) -> Self {
        Self {
            client,
            endpoint: config.endpoint(),
            csrf_token: config.csrf_token().map(str::to_owned),
        }
    }
}

impl IssueToken for TokenIssuer {
    async fn issue(&self, tap_id: &str) -> Result<IssuedToken> {
        debug!("requesting token for tap '{}' at {}", tap_id, self.endpoint);

        let mut request = self.client.post(&self.endpoint).form(&[("tap_id", tap_id)]);
        if let Some(csrf_token) = &self.csrf_token {
            request = request.header(CSRF_HEADER, csrf_token);
        }

        let response = request
            .send()
            .await
            .inspect_err(|e| warn!("token request for tap '{}' failed: {}", tap_id, e))
            .context(MSG_CONNECTION_ERROR)?;

        let status = response.status();
        let body = response
            .text()
            .await
            .inspect_err(|e| warn!("token response for tap '{}' unreadable: {}", tap_id, e))
            .context(MSG_CONNECTION_ERROR)?;

        if !status.is_success() {
            let message = IssueResponse::parse(&body)
                .ok()
                .and_then(|response| response.error)
                .unwrap_or_else(|| MSG_ISSUE_FAILED.to_owned());
            warn!("token for tap '{}' rejected ({}): {}", tap_id, status, message);
            return Err(anyhow!(message));
        }

        let issued = IssueResponse::parse(&body).and_then(IssueResponse::into_issued)?;
        info!("token issued for tap '{}', expires at {}", tap_id, issued.expires_at);
        Ok(issued)
    }
}
