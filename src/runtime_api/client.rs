//! Runtime API Client
//!
//! JSON-over-HTTP client for the patch runtime: status and patch listings,
//! loop control, and patch actions.

use crate::actions::ControlAction;
use crate::environment::Environment;
use crate::patch::{AppliedPatch, AuditEntry, NewPatch, PendingPatch};
use crate::runtime_api::RuntimeApi;
use crate::runtime_api::error::RequestError;
use crate::status::{HealthStatus, StatusSnapshot};
use reqwest::{Client, ClientBuilder, Response};
use serde::de::DeserializeOwned;

// User-Agent string with the client version
const USER_AGENT: &str = concat!("patchdash/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct RuntimeClient {
    client: Client,
    environment: Environment,
}

impl RuntimeClient {
    /// No request timeout is configured; requests wait as long as the network stack does.
    pub fn new(environment: Environment) -> Result<Self, RequestError> {
        Ok(Self {
            client: ClientBuilder::new().user_agent(USER_AGENT).build()?,
            environment,
        })
    }

    fn build_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.environment.base_url().trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    fn patch_endpoint(patch_id: &str, verb: &str) -> String {
        format!("patches/{}/{}", urlencoding::encode(patch_id), verb)
    }

    fn decode_response<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, RequestError> {
        serde_json::from_slice(bytes).map_err(RequestError::Decode)
    }

    async fn handle_response_status(response: Response) -> Result<Response, RequestError> {
        if !response.status().is_success() {
            return Err(RequestError::from_response(response).await);
        }
        Ok(response)
    }

    async fn get_request<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, RequestError> {
        let url = self.build_url(endpoint);
        log::debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;

        let response = Self::handle_response_status(response).await?;
        let response_bytes = response.bytes().await?;
        Self::decode_response(&response_bytes)
    }

    /// POSTs to `endpoint`, discarding whatever the server answers on success.
    async fn post_request_no_response(
        &self,
        endpoint: &str,
        body: Option<&NewPatch>,
    ) -> Result<(), RequestError> {
        let url = self.build_url(endpoint);
        log::debug!("POST {}", url);
        let request = self.client.post(&url);
        let request = match body {
            Some(body) => request.json(body),
            None => request,
        };
        let response = request.send().await?;

        Self::handle_response_status(response).await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl RuntimeApi for RuntimeClient {
    fn environment(&self) -> &Environment {
        &self.environment
    }

    async fn health(&self) -> Result<HealthStatus, RequestError> {
        self.get_request("healthz").await
    }

    async fn status(&self) -> Result<StatusSnapshot, RequestError> {
        self.get_request("status").await
    }

    async fn pending_patches(&self) -> Result<Vec<PendingPatch>, RequestError> {
        self.get_request("patches").await
    }

    async fn applied_patches(&self) -> Result<Vec<AppliedPatch>, RequestError> {
        self.get_request("patches/applied").await
    }

    async fn audit_log(&self) -> Result<Vec<AuditEntry>, RequestError> {
        self.get_request("patches/audit").await
    }

    async fn control(&self, action: ControlAction) -> Result<(), RequestError> {
        self.post_request_no_response(&action.endpoint(), None).await
    }

    async fn apply_patch(&self, patch_id: &str) -> Result<(), RequestError> {
        self.post_request_no_response(&Self::patch_endpoint(patch_id, "apply"), None)
            .await
    }

    async fn rollback_patch(&self, patch_id: &str) -> Result<(), RequestError> {
        self.post_request_no_response(&Self::patch_endpoint(patch_id, "rollback"), None)
            .await
    }

    async fn create_patch(&self, patch: &NewPatch) -> Result<(), RequestError> {
        self.post_request_no_response("patches", Some(patch)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime_api::test_server::FakeRuntime;
    use axum::http::{Method, StatusCode};
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    async fn client_for(fake: &FakeRuntime) -> RuntimeClient {
        let base_url = fake.spawn().await;
        RuntimeClient::new(Environment::Custom { base_url }).unwrap()
    }

    #[tokio::test]
    async fn fetches_status_snapshot() {
        let fake = FakeRuntime::default();
        let client = client_for(&fake).await;

        let status = client.status().await.unwrap();
        assert_eq!(status.loop_count, 5);
        assert_eq!(status.loop_interval_seconds, 30.0);
        assert!(status.last_plan.is_none());
    }

    #[tokio::test]
    async fn fetches_patch_listings() {
        let fake = FakeRuntime::default();
        fake.with(|state| {
            state.pending = json!([
                {"patch_id": "1", "summary": "a", "author": "alice", "created_at": "2024-01-01T00:00:00Z"},
                {"patch_id": "2", "summary": "b", "author": "bob", "created_at": "2024-01-02T00:00:00Z"}
            ]);
            state.applied = json!([{"patch_id": "0", "summary": "z", "artifact_local_path": "/tmp/0.diff"}]);
            state.audit = json!([{"timestamp": "t1", "patch_id": "0", "status": "applied"}]);
        });
        let client = client_for(&fake).await;

        let pending = client.pending_patches().await.unwrap();
        assert_eq!(
            pending.iter().map(|p| p.patch_id.as_str()).collect::<Vec<_>>(),
            vec!["1", "2"]
        );
        let applied = client.applied_patches().await.unwrap();
        assert_eq!(applied[0].display_detail(), "/tmp/0.diff");
        let audit = client.audit_log().await.unwrap();
        assert_eq!(audit[0].status, "applied");
    }

    #[tokio::test]
    async fn non_success_carries_status_text_and_body() {
        let fake = FakeRuntime::default();
        fake.fail(
            Method::POST,
            "/patches/42/apply",
            StatusCode::INTERNAL_SERVER_ERROR,
            "db locked",
        );
        let client = client_for(&fake).await;

        let err = client.apply_patch("42").await.unwrap_err();
        match &err {
            RequestError::Http {
                status,
                status_text,
                body,
            } => {
                assert_eq!(*status, 500);
                assert_eq!(status_text, "Internal Server Error");
                assert_eq!(body, "db locked");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().contains("db locked"));
    }

    #[tokio::test]
    async fn posts_actions_to_their_endpoints_without_body() {
        let fake = FakeRuntime::default();
        let client = client_for(&fake).await;

        client.control(ControlAction::Pause).await.unwrap();
        client.control(ControlAction::Resume).await.unwrap();
        client.apply_patch("7").await.unwrap();
        client.rollback_patch("7").await.unwrap();

        let paths: Vec<(Method, String, String)> = fake
            .requests()
            .into_iter()
            .map(|r| (r.method, r.path, r.body))
            .collect();
        assert_eq!(
            paths,
            vec![
                (Method::POST, "/control/pause".to_string(), String::new()),
                (Method::POST, "/control/resume".to_string(), String::new()),
                (Method::POST, "/patches/7/apply".to_string(), String::new()),
                (Method::POST, "/patches/7/rollback".to_string(), String::new()),
            ]
        );
    }

    #[tokio::test]
    async fn patch_ids_are_encoded_as_one_segment() {
        let fake = FakeRuntime::default();
        let client = client_for(&fake).await;

        client.apply_patch("feature/x y").await.unwrap();
        assert_eq!(fake.requests()[0].path, "/patches/feature%2Fx%20y/apply");
    }

    #[tokio::test]
    async fn create_patch_posts_json_with_created_at() {
        let fake = FakeRuntime::default();
        let client = client_for(&fake).await;
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let patch = NewPatch::from_fields([("summary", "fix X"), ("author", "alice")], now);

        client.create_patch(&patch).await.unwrap();

        let request = &fake.requests()[0];
        assert_eq!(request.path, "/patches");
        let body: serde_json::Value = serde_json::from_str(&request.body).unwrap();
        assert_eq!(
            body,
            json!({"summary": "fix X", "author": "alice", "created_at": "2024-06-01T12:00:00.000Z"})
        );
    }

    #[tokio::test]
    async fn malformed_listing_is_a_decode_error() {
        let fake = FakeRuntime::default();
        fake.with(|state| state.pending = json!({"not": "a list"}));
        let client = client_for(&fake).await;

        let err = client.pending_patches().await.unwrap_err();
        assert!(matches!(err, RequestError::Decode(_)));
    }

    #[tokio::test]
    async fn unreachable_runtime_is_a_transport_error() {
        // Bind then drop a listener so the port is very likely closed.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let client = RuntimeClient::new(Environment::Custom {
            base_url: format!("http://{}", addr),
        })
        .unwrap();

        let err = client.status().await.unwrap_err();
        assert!(matches!(err, RequestError::Transport(_)));
        assert_eq!(err.status(), None);
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let fake = FakeRuntime::default();
        let client = client_for(&fake).await;
        assert!(client.health().await.unwrap().is_ok());
    }
}
