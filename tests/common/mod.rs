use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode as AxumStatus;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

use contact_relay::config::{Config, RelayConfig};
use contact_relay::state::SharedState;

pub const ACCESS_KEY: &str = "test-access-key";

/// How the fake relay answers.
#[derive(Clone, Copy)]
#[allow(dead_code)]
pub enum RelayMode {
    Accept,
    Refuse,
    Status(u16),
    NotJson,
    Slow(Duration),
}

/// In-process stand-in for the third-party form relay.
#[derive(Clone)]
pub struct MockRelay {
    pub addr: SocketAddr,
    received: Arc<Mutex<Vec<Value>>>,
}

impl MockRelay {
    pub fn url(&self) -> String {
        format!("http://{}/submit", self.addr)
    }

    pub fn received(&self) -> Vec<Value> {
        self.received.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.received.lock().unwrap().len()
    }
}

#[derive(Clone)]
struct RelayState {
    mode: RelayMode,
    received: Arc<Mutex<Vec<Value>>>,
}

async fn relay_submit(State(relay): State<RelayState>, Json(body): Json<Value>) -> Response {
    relay.received.lock().unwrap().push(body);

    match relay.mode {
        RelayMode::Accept => {
            Json(json!({ "success": true, "message": "Email sent successfully!" })).into_response()
        }
        RelayMode::Refuse => {
            Json(json!({ "success": false, "message": "Invalid access key" })).into_response()
        }
        RelayMode::Status(code) => {
            let status = AxumStatus::from_u16(code).unwrap();
            (status, Json(json!({ "success": false }))).into_response()
        }
        RelayMode::NotJson => "<html>maintenance</html>".into_response(),
        RelayMode::Slow(delay) => {
            tokio::time::sleep(delay).await;
            Json(json!({ "success": true })).into_response()
        }
    }
}

pub async fn spawn_relay(mode: RelayMode) -> MockRelay {
    let received = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route("/submit", post(relay_submit))
        .with_state(RelayState {
            mode,
            received: received.clone(),
        });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind relay port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Relay failed");
    });

    MockRelay { addr, received }
}

/// A running contact relay wired to a mock relay.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub relay: MockRelay,
    #[allow(dead_code)]
    pub state: SharedState,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Submit JSON to the contact endpoint, return (body, status).
    pub async fn submit_json(&self, data: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/v1/contact"))
            .json(data)
            .send()
            .await
            .expect("submit json failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Submit form-urlencoded data, return the raw response.
    #[allow(dead_code)]
    pub async fn submit_form(&self, data: &[(&str, &str)]) -> reqwest::Response {
        self.client
            .post(self.url("/v1/contact"))
            .form(data)
            .send()
            .await
            .expect("submit form failed")
    }
}

pub fn test_config(relay_url: String) -> Config {
    Config {
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        relay: RelayConfig {
            url: relay_url,
            access_key: ACCESS_KEY.to_string(),
            timeout_secs: 5,
        },
        min_submit_interval_ms: 3000,
        max_body_size: 65_536,
        rate_limit: 100,
        rate_limit_window_secs: 60,
        trusted_proxies: vec![],
        cors_origins: vec![],
        redirect_url: None,
        log_level: "warn".to_string(),
    }
}

pub async fn spawn_app(mode: RelayMode) -> TestApp {
    spawn_app_with(mode, |_| {}).await
}

/// Spawn the app with a config tweak applied on top of the test defaults.
pub async fn spawn_app_with(mode: RelayMode, tweak: impl FnOnce(&mut Config)) -> TestApp {
    let relay = spawn_relay(mode).await;

    let mut config = test_config(relay.url());
    tweak(&mut config);

    let (app, state) = contact_relay::build_app(config).expect("Failed to build app");

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .expect("Server failed");
    });

    let client = Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    TestApp {
        addr,
        client,
        relay,
        state,
    }
}

pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// A submission that passes every check.
pub fn valid_submission() -> Value {
    json!({
        "name": "John Doe",
        "email": "john@example.com",
        "message": "Hello, this is a test message.",
        "timestamp": (now_ms() - 5000).to_string(),
        "website": "",
        "phone2": "",
    })
}
