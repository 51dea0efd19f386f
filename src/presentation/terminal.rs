use std::io::Write;
use std::sync::{Mutex, PoisonError};

use tracing::warn;

use crate::countdown::{CountdownSink, Tick};
use crate::dashboard::DashboardView;
use crate::presentation::urgency::{progress_bar, Urgency};
use crate::token::{Tap, Token};
use crate::utils::constants::MSG_TOKEN_EXPIRED;

const BAR_WIDTH: usize = 30;

/// Dashboard view for a terminal. Countdown lines are redrawn in place with `\r`.
pub struct TerminalView<W: Write + Send> {
    out: Mutex<W>,
}

impl<W: Write + Send> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self { out: Mutex::new(out) }
    }

    fn write(&self, text: &str) {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(err) = out.write_all(text.as_bytes()).and_then(|_| out.flush()) {
            warn!("terminal write failed: {}", err);
        }
    }
}

pub fn render_tick(tick: &Tick) -> String {
    format!(
        "{} {:>3}s {:<7}",
        progress_bar(tick.percent_remaining, BAR_WIDTH),
        tick.seconds_left,
        Urgency::from_seconds_left(tick.seconds_left).as_str()
    )
}

impl<W: Write + Send + 'static> CountdownSink for TerminalView<W> {
    fn on_tick(&self, tick: Tick) {
        self.write(&format!("\r{}", render_tick(&tick)));
    }

    fn on_expired(&self) {
        self.write(&format!(
            "\r{} {:>3}s {:<7}\n{}\n",
            progress_bar(0.0, BAR_WIDTH),
            0,
            "expired",
            MSG_TOKEN_EXPIRED
        ));
    }
}

impl<W: Write + Send + 'static> DashboardView for TerminalView<W> {
    fn show_loading(&self, tap: &Tap) {
        self.write(&format!("Generating token for {}...\n", tap.label()));
    }

    fn show_token(&self, token: &Token) {
        self.write(&format!(
            "Tap:     {}\nToken:   {}\nExpires: {}\n",
            token.issued_for,
            token.value,
            token.expires_at.to_rfc3339()
        ));
    }

    fn show_error(&self, message: &str) {
        self.write(&format!("Error: {}\n", message));
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl Buffer {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    #[test]
    fn tick_line_shows_seconds_and_urgency() {
        let line = render_tick(&Tick { seconds_left: 8, percent_remaining: 26.0 });
        assert!(line.starts_with("[########......................]"), "{}", line);
        assert!(line.contains("  8s"));
        assert!(line.contains("warning"));
    }

    #[test]
    fn expiry_clears_bar_and_prints_message() {
        let buffer = Buffer::default();
        let view = TerminalView::new(buffer.clone());

        view.on_tick(Tick { seconds_left: 3, percent_remaining: 10.0 });
        view.on_expired();

        let text = buffer.text();
        assert!(text.contains("danger"));
        assert!(text.contains(&format!("[{}]   0s expired", ".".repeat(BAR_WIDTH))));
        assert!(text.ends_with(&format!("{}\n", MSG_TOKEN_EXPIRED)));
    }

    #[test]
    fn dashboard_states_are_rendered() {
        let buffer = Buffer::default();
        let view = TerminalView::new(buffer.clone());
        let expires_at = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();

        view.show_loading(&Tap::new("7", "IPA"));
        view.show_token(&Token::new("abc123".into(), expires_at, "IPA".into()));
        view.show_error("Insufficient balance");

        let text = buffer.text();
        assert!(text.contains("Generating token for IPA..."));
        assert!(text.contains("Token:   abc123"));
        assert!(text.contains("Expires: 2026-01-02T03:04:05+00:00"));
        assert!(text.contains("Error: Insufficient balance"));
    }

    #[test]
    fn loading_an_unnamed_tap_shows_its_id() {
        let buffer = Buffer::default();
        let view = TerminalView::new(buffer.clone());

        view.show_loading(&Tap::new("7", ""));

        assert_eq!(buffer.text(), "Generating token for 7...\n");
    }
}
