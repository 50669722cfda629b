//! Common helpers for end-to-end tests.

use std::net::SocketAddr;
use std::sync::Arc;

use serde_json::{Value, json};

use crate::DatasetService;

/// A running server plus an HTTP client. The server stops on drop.
pub struct TestServer {
    pub runtime: tokio::runtime::Runtime,
    pub base_url: String,
    client: reqwest::Client,
    server_task: tokio::task::JoinHandle<()>,
}

/// Status code and raw body of a response.
pub struct TestResponse {
    pub status: u16,
    pub text: String,
}

impl TestResponse {
    /// Parse the body as JSON.
    #[must_use]
    pub fn json(&self) -> Value {
        #[allow(clippy::expect_used)]
        serde_json::from_str(&self.text).expect("Response body should be JSON")
    }

    /// The `error` field of an error body.
    #[must_use]
    pub fn error_message(&self) -> String {
        self.json()["error"].as_str().unwrap_or_default().to_string()
    }
}

impl TestServer {
    /// Start a server with an empty registry.
    #[must_use]
    pub fn new() -> Self {
        #[allow(clippy::expect_used)]
        let runtime = tokio::runtime::Runtime::new().expect("Failed to create runtime");

        let service = Arc::new(DatasetService::new());
        #[allow(clippy::expect_used)]
        let (addr, serve) = runtime
            .block_on(crate::bind(SocketAddr::from(([127, 0, 0, 1], 0)), service))
            .expect("Failed to bind test server");

        let server_task = runtime.spawn(async move {
            let _ = serve.await;
        });

        Self {
            runtime,
            base_url: format!("http://{addr}"),
            client: reqwest::Client::new(),
            server_task,
        }
    }

    fn send(&self, request: reqwest::RequestBuilder) -> TestResponse {
        self.runtime.block_on(async {
            #[allow(clippy::expect_used)]
            let response = request.send().await.expect("Request failed");
            let status = response.status().as_u16();
            #[allow(clippy::expect_used)]
            let text = response.text().await.expect("Failed to read body");
            TestResponse { status, text }
        })
    }

    pub fn get(&self, path: &str) -> TestResponse {
        self.send(self.client.get(format!("{}{path}", self.base_url)))
    }

    pub fn post(&self, path: &str, body: &Value) -> TestResponse {
        self.send(self.client.post(format!("{}{path}", self.base_url)).json(body))
    }

    /// `GET /v1/query` with `q` URL-encoded by the client.
    pub fn query(&self, sql: &str) -> TestResponse {
        self.send(
            self.client
                .get(format!("{}/v1/query", self.base_url))
                .query(&[("q", sql)]),
        )
    }

    pub fn create_dataset(&self, id: &str) -> TestResponse {
        self.post("/v1/datasets", &json!({"type": "sparse.mutable", "id": id}))
    }

    pub fn record_row(&self, id: &str, row_name: &str, columns: &Value) -> TestResponse {
        self.post(
            &format!("/v1/datasets/{id}/rows"),
            &json!({"rowName": row_name, "columns": columns}),
        )
    }

    pub fn commit(&self, id: &str) -> TestResponse {
        self.post(&format!("/v1/datasets/{id}/commit"), &json!({}))
    }

    /// Create `id`, record the given row and commit. Panics on any failure.
    pub fn seed(&self, id: &str, row_name: &str, columns: &Value) {
        assert_eq!(self.create_dataset(id).status, 201);
        assert_eq!(self.record_row(id, row_name, columns).status, 200);
        assert_eq!(self.commit(id).status, 200);
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.server_task.abort();
    }
}
