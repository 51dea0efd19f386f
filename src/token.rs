use chrono::{DateTime, Utc};

/// Access token as shown on the dashboard. Transient, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// opaque value rendered as a scannable code
    pub value: String,
    pub expires_at: DateTime<Utc>,
    /// display label of the tap the token was issued for
    pub issued_for: String,
}

impl Token {
    pub fn new(value: String, expires_at: DateTime<Utc>, issued_for: String) -> Self {
        Self { value, expires_at, issued_for }
    }
}

/// A dispensing point the member can request a token for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tap {
    pub id: String,
    pub name: String,
}

impl Tap {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self { id: id.into(), name: name.into() }
    }

    /// Name to show for the tap, the id when it has none.
    pub fn label(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}
