//! Shared constants and invariants

pub const DEFAULT_HTTP_TIMEOUT_MS: u64 = 5000;
pub const DEFAULT_ISSUE_PATH: &str = "/dashboard/generate-token/";

/// countdown granularity
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 100;
/// server side token lifetime (TOKEN_EXPIRY_SECONDS on the dashboard)
pub const DEFAULT_TOKEN_TTL_SECONDS: u64 = 30;

// Rendering thresholds, seconds left
pub const WARNING_THRESHOLD_SECONDS: u64 = 10;
pub const DANGER_THRESHOLD_SECONDS: u64 = 5;

// User facing messages
pub const MSG_ISSUE_FAILED: &str = "Failed to generate QR code";
pub const MSG_CONNECTION_ERROR: &str = "Connection error. Try again.";
pub const MSG_MALFORMED_RESPONSE: &str = "Malformed token response";
pub const MSG_TOKEN_EXPIRED: &str = "QR code expired. Generate a new one.";

pub const CSRF_HEADER: &str = "X-CSRFToken";
