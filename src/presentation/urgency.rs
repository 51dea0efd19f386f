use crate::utils::constants::{DANGER_THRESHOLD_SECONDS, WARNING_THRESHOLD_SECONDS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency {
    Normal,
    Warning,
    Danger,
}

impl Urgency {
    pub fn from_seconds_left(seconds_left: u64) -> Self {
        if seconds_left <= DANGER_THRESHOLD_SECONDS {
            Urgency::Danger
        } else if seconds_left <= WARNING_THRESHOLD_SECONDS {
            Urgency::Warning
        } else {
            Urgency::Normal
        }
    }

    pub fn as_str(&self) -> &'static str {
        match *self {
            Urgency::Normal => "ok",
            Urgency::Warning => "warning",
            Urgency::Danger => "danger",
        }
    }
}

/// Fixed width bar, `#` for the remaining share.
pub fn progress_bar(percent_remaining: f64, width: usize) -> String {
    let share = (percent_remaining / 100.0).clamp(0.0, 1.0);
    let filled = ((share * width as f64).round() as usize).min(width);
    format!("[{}{}]", "#".repeat(filled), ".".repeat(width - filled))
}
