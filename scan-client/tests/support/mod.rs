// scan-client/tests/support/mod.rs
// Local HTTP fixtures

#![allow(dead_code)]

use axum::Router;
use scan_client::{ClientConfig, HttpClient, SessionState, View};

/// Serve `app` on an ephemeral localhost port, returns its base URL
pub async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Base URL of a port nobody listens on
pub async fn dead_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

pub fn http_client() -> HttpClient {
    ClientConfig::default().with_timeout(5).build_http_client().unwrap()
}

/// View that records everything it is asked to show
#[derive(Default)]
pub struct RecordingView {
    pub renders: Vec<SessionState>,
    pub alerts: Vec<String>,
}

impl View for RecordingView {
    fn render(&mut self, state: &SessionState) {
        self.renders.push(state.clone());
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }
}
