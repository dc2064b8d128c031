//! In-process fake of the runtime API for client tests.

use axum::Router;
use axum::extract::State;
use axum::http::{Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub body: String,
}

#[derive(Debug)]
pub struct FakeState {
    pub status: Value,
    pub pending: Value,
    pub applied: Value,
    pub audit: Value,
    /// Canned error responses keyed by "METHOD /path".
    pub failures: HashMap<String, (StatusCode, String)>,
    pub requests: Vec<RecordedRequest>,
}

impl Default for FakeState {
    fn default() -> Self {
        Self {
            status: json!({
                "loop_count": 5,
                "paused": false,
                "loop_interval_seconds": 30,
                "last_plan": null,
                "pending_patches": []
            }),
            pending: json!([]),
            applied: json!([]),
            audit: json!([]),
            failures: HashMap::new(),
            requests: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FakeRuntime {
    state: Arc<Mutex<FakeState>>,
}

impl FakeRuntime {
    pub fn with(&self, update: impl FnOnce(&mut FakeState)) -> &Self {
        update(&mut self.state.lock().unwrap());
        self
    }

    pub fn fail(&self, method: Method, path: &str, status: StatusCode, body: &str) -> &Self {
        self.with(|state| {
            state
                .failures
                .insert(format!("{} {}", method, path), (status, body.to_string()));
        })
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    /// Binds an ephemeral port and returns the base URL.
    pub async fn spawn(&self) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = Router::new().fallback(handle).with_state(self.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }
}

async fn handle(State(fake): State<FakeRuntime>, method: Method, uri: Uri, body: String) -> Response {
    let path = uri.path().to_string();
    let mut state = fake.state.lock().unwrap();
    state.requests.push(RecordedRequest {
        method: method.clone(),
        path: path.clone(),
        body,
    });

    if let Some((status, body)) = state.failures.get(&format!("{} {}", method, path)) {
        return (*status, body.clone()).into_response();
    }

    let payload = match (method.as_str(), path.as_str()) {
        ("GET", "/healthz") => json!({"status": "ok"}),
        ("GET", "/status") => state.status.clone(),
        ("GET", "/patches") => state.pending.clone(),
        ("GET", "/patches/applied") => state.applied.clone(),
        ("GET", "/patches/audit") => state.audit.clone(),
        ("POST", _) => json!({"status": "accepted"}),
        _ => return StatusCode::NOT_FOUND.into_response(),
    };
    axum::Json(payload).into_response()
}
