use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;

use crate::utils::constants::MSG_MALFORMED_RESPONSE;

/// Body of the token issuing endpoint, success and failure alike.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct IssueResponse {
    pub token: Option<String>,
    pub expires_at: Option<String>,
    /// optional, lets the client size the countdown from the server lifetime
    pub issued_at: Option<String>,
    pub error: Option<String>,
    pub tap_name: Option<String>,
    pub dose_ml: Option<u32>,
    pub price_cents: Option<i64>,
}

/// Decoded success response.
#[derive(Debug, Clone, PartialEq)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub issued_at: Option<DateTime<Utc>>,
    pub tap_name: Option<String>,
    pub dose_ml: Option<u32>,
    pub price_cents: Option<i64>,
}

impl IssueResponse {
    pub fn parse(body: &str) -> Result<Self> {
        serde_json::from_str(body).context(MSG_MALFORMED_RESPONSE)
    }

    pub fn into_issued(self) -> Result<IssuedToken> {
        let token = self
            .token
            .filter(|token| !token.is_empty())
            .ok_or_else(|| anyhow!("token is missing"))
            .context(MSG_MALFORMED_RESPONSE)?;
        let expires_at = self
            .expires_at
            .ok_or_else(|| anyhow!("expires_at is missing"))
            .and_then(|raw| parse_timestamp(&raw))
            .context(MSG_MALFORMED_RESPONSE)?;
        // a broken issued_at only loses the server window, the token stays usable
        let issued_at = self.issued_at.and_then(|raw| parse_timestamp(&raw).ok());

        Ok(IssuedToken {
            token,
            expires_at,
            issued_at,
            tap_name: self.tap_name,
            dose_ml: self.dose_ml,
            price_cents: self.price_cents,
        })
    }
}

/// ISO-8601 timestamp; RFC 3339 with offset, or naive and taken as UTC.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(raw) {
        return Ok(with_offset.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|e| anyhow!("invalid timestamp '{}': {}", raw, e))
}
