// tests/common/mod.rs
pub use axum::Router;
pub use serde_json::json;
pub use tokio::task::JoinHandle;

use std::net::SocketAddr;
use std::sync::Mutex;

use reqwest::Client;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::config::settings::IssuerConfig;
use crate::countdown::{CountdownEvent, CountdownSink, Tick};
use crate::dashboard::DashboardView;
use crate::token::{Tap, Token};

pub const ISSUE_PATH: &str = "/dashboard/generate-token/";

/// Spawn an Axum router on an ephemeral port and return (JoinHandle, SocketAddr)
pub async fn spawn_axum(router: Router) -> (JoinHandle<()>, SocketAddr) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind failed");
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, router).await.expect("server failed");
    });
    (handle, addr)
}

pub fn build_reqwest_client() -> Client {
    Client::builder()
        .timeout(std::time::Duration::from_secs(5))
        .build()
        .expect("reqwest client")
}

pub fn issuer_config(addr: SocketAddr, csrf_token: Option<&str>) -> IssuerConfig {
    IssuerConfig {
        base_url: format!("http://{}", addr),
        path: ISSUE_PATH.to_owned(),
        csrf_token: csrf_token.map(str::to_owned),
        timeout_ms: 5000,
    }
}

/// Everything currently buffered in the channel.
pub fn drain(receiver: &mut UnboundedReceiver<CountdownEvent>) -> Vec<CountdownEvent> {
    let mut events = Vec::new();
    while let Ok(event) = receiver.try_recv() {
        events.push(event);
    }
    events
}

pub fn ticks(events: &[CountdownEvent]) -> Vec<Tick> {
    events
        .iter()
        .filter_map(|event| match event {
            CountdownEvent::Tick(tick) => Some(*tick),
            CountdownEvent::Expired => None,
        })
        .collect()
}

pub fn expirations(events: &[CountdownEvent]) -> usize {
    events
        .iter()
        .filter(|event| matches!(event, CountdownEvent::Expired))
        .count()
}

/// View that records every call as a short string.
#[derive(Default)]
pub struct RecordingView {
    calls: Mutex<Vec<String>>,
}

impl RecordingView {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.calls().iter().filter(|call| call.starts_with(prefix)).count()
    }

    fn push(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

impl CountdownSink for RecordingView {
    fn on_tick(&self, tick: Tick) {
        self.push(format!("tick:{}", tick.seconds_left));
    }

    fn on_expired(&self) {
        self.push("expired".to_owned());
    }
}

impl DashboardView for RecordingView {
    fn show_loading(&self, tap: &Tap) {
        self.push(format!("loading:{}", tap.name));
    }

    fn show_token(&self, token: &Token) {
        self.push(format!("token:{}:{}", token.value, token.issued_for));
    }

    fn show_error(&self, message: &str) {
        self.push(format!("error:{}", message));
    }
}
