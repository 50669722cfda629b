//! Common helpers for end-to-end tests.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use server::DatasetService;
use server::types::{DatasetConfig, RowRecord};

use crate::client::{ClientError, DatasetHandle, HttpServiceClient, Response, ServiceClient};

/// A server running on the current runtime. Stops on drop.
pub struct TestServer {
    pub base_url: String,
    server_task: tokio::task::JoinHandle<()>,
}

impl TestServer {
    pub async fn start() -> Self {
        #[allow(clippy::expect_used)]
        let (addr, serve) = server::bind(
            SocketAddr::from(([127, 0, 0, 1], 0)),
            Arc::new(DatasetService::new()),
        )
        .await
        .expect("Failed to bind test server");

        let server_task = tokio::spawn(async move {
            let _ = serve.await;
        });

        Self {
            base_url: format!("http://{addr}"),
            server_task,
        }
    }

    /// A new HTTP client for this server.
    #[must_use]
    pub fn client(&self) -> HttpServiceClient {
        #[allow(clippy::expect_used)]
        HttpServiceClient::new(&self.base_url).expect("Failed to build client")
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.server_task.abort();
    }
}

/// Wraps a client and keeps every logged message.
pub struct RecordingClient<C> {
    pub inner: C,
    pub logged: Mutex<Vec<String>>,
}

impl<C> RecordingClient<C> {
    pub const fn new(inner: C) -> Self {
        Self {
            inner,
            logged: Mutex::new(Vec::new()),
        }
    }

    pub fn logged(&self) -> Vec<String> {
        self.logged.lock().map(|l| l.clone()).unwrap_or_default()
    }
}

impl<C: ServiceClient> ServiceClient for RecordingClient<C> {
    async fn create_dataset(&self, config: &DatasetConfig) -> Result<DatasetHandle, ClientError> {
        self.inner.create_dataset(config).await
    }

    async fn record_row(&self, dataset_id: &str, row: &RowRecord) -> Result<(), ClientError> {
        self.inner.record_row(dataset_id, row).await
    }

    async fn commit(&self, dataset_id: &str) -> Result<(), ClientError> {
        self.inner.commit(dataset_id).await
    }

    async fn get(&self, path: &str, params: &[(&str, &str)]) -> Result<Response, ClientError> {
        self.inner.get(path, params).await
    }

    fn log(&self, message: &str) {
        if let Ok(mut logged) = self.logged.lock() {
            logged.push(message.to_string());
        }
    }
}

/// How a simulated faulty service treats statements containing a newline.
#[derive(Clone, Copy)]
pub enum NewlineFault {
    /// Reject the request with a 400.
    Reject,
    /// Answer 200 with an empty result set.
    EmptyResult,
}

/// A service that mis-handles newlines in SQL; everything else is forwarded.
pub struct NewlineFaultyClient<C> {
    pub inner: C,
    pub fault: NewlineFault,
}

impl<C: ServiceClient> ServiceClient for NewlineFaultyClient<C> {
    async fn create_dataset(&self, config: &DatasetConfig) -> Result<DatasetHandle, ClientError> {
        self.inner.create_dataset(config).await
    }

    async fn record_row(&self, dataset_id: &str, row: &RowRecord) -> Result<(), ClientError> {
        self.inner.record_row(dataset_id, row).await
    }

    async fn commit(&self, dataset_id: &str) -> Result<(), ClientError> {
        self.inner.commit(dataset_id).await
    }

    async fn get(&self, path: &str, params: &[(&str, &str)]) -> Result<Response, ClientError> {
        if !params.iter().any(|(_, v)| v.contains('\n')) {
            return self.inner.get(path, params).await;
        }
        match self.fault {
            NewlineFault::Reject => Err(ClientError::Service {
                status: 400,
                body: r#"{"error":"unexpected character '\n'","httpCode":400}"#.to_string(),
            }),
            NewlineFault::EmptyResult => Ok(Response {
                status: 200,
                text: "[]".to_string(),
            }),
        }
    }
}
