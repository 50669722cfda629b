//! Client for the dataset service.
//!
//! `ServiceClient` is the capability set a scenario needs from the service:
//! create a dataset, record rows into it, commit it, issue `GET` requests and
//! log messages. `HttpServiceClient` implements it over HTTP.

#![allow(async_fn_in_trait)] // Scenarios are generic over the client, never boxed

use std::time::Duration;

use server::types::{Cell, DatasetConfig, DatasetStatus, RowRecord};

/// Errors raised by a `ServiceClient`.
#[derive(Debug)]
pub enum ClientError {
    /// The request never got a response.
    Transport(reqwest::Error),
    /// The service answered with a non-success status.
    Service { status: u16, body: String },
    /// The service answered with a body that could not be decoded.
    Decode(String),
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(e) => write!(f, "transport error: {e}"),
            Self::Service { status, body } => write!(f, "service returned {status}: {body}"),
            Self::Decode(message) => write!(f, "invalid response body: {message}"),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Transport(e) => Some(e),
            Self::Service { .. } | Self::Decode(_) => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        Self::Transport(e)
    }
}

/// Raw response of a `GET` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub text: String,
}

/// A dataset created through a `ServiceClient`.
#[derive(Debug, PartialEq, Eq)]
pub struct DatasetHandle {
    pub dataset_type: String,
    pub id: String,
}

impl DatasetHandle {
    /// Record one row into this dataset.
    pub async fn record_row<C: ServiceClient>(
        &self,
        client: &C,
        row_name: &str,
        cells: Vec<Cell>,
    ) -> Result<(), ClientError> {
        client
            .record_row(&self.id, &RowRecord::new(row_name, cells))
            .await
    }

    /// Commit pending rows, making them queryable.
    pub async fn commit<C: ServiceClient>(&self, client: &C) -> Result<(), ClientError> {
        client.commit(&self.id).await
    }
}

/// Operations a scenario performs against the service.
///
/// Every method fails with `ClientError::Service` when the service rejects
/// the request and with `ClientError::Transport` when it cannot be reached.
pub trait ServiceClient {
    async fn create_dataset(&self, config: &DatasetConfig) -> Result<DatasetHandle, ClientError>;

    async fn record_row(&self, dataset_id: &str, row: &RowRecord) -> Result<(), ClientError>;

    async fn commit(&self, dataset_id: &str) -> Result<(), ClientError>;

    /// `GET path?params`, with each parameter URL-encoded.
    async fn get(&self, path: &str, params: &[(&str, &str)]) -> Result<Response, ClientError>;

    /// Write a message to the scenario log.
    fn log(&self, message: &str) {
        tracing::info!(target: "scenario", "{message}");
    }
}

/// `ServiceClient` over HTTP.
pub struct HttpServiceClient {
    base_url: String,
    http: reqwest::Client,
}

impl HttpServiceClient {
    /// Per-request timeout.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Build a client for the service at `base_url` (e.g. `http://127.0.0.1:3000`).
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Self::REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Turn a non-success response into `ClientError::Service`.
    async fn read(response: reqwest::Response) -> Result<Response, ClientError> {
        let status = response.status().as_u16();
        let success = response.status().is_success();
        let text = response.text().await?;
        if !success {
            return Err(ClientError::Service { status, body: text });
        }
        Ok(Response { status, text })
    }

    async fn post_json<T: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<Response, ClientError> {
        let response = self.http.post(self.url(path)).json(body).send().await?;
        Self::read(response).await
    }
}

impl ServiceClient for HttpServiceClient {
    async fn create_dataset(&self, config: &DatasetConfig) -> Result<DatasetHandle, ClientError> {
        let response = self.post_json("/v1/datasets", config).await?;
        let status: DatasetStatus =
            serde_json::from_str(&response.text).map_err(|e| ClientError::Decode(e.to_string()))?;
        tracing::debug!("created dataset '{}'", status.id);
        Ok(DatasetHandle {
            dataset_type: status.dataset_type,
            id: status.id,
        })
    }

    async fn record_row(&self, dataset_id: &str, row: &RowRecord) -> Result<(), ClientError> {
        self.post_json(&format!("/v1/datasets/{dataset_id}/rows"), row)
            .await?;
        Ok(())
    }

    async fn commit(&self, dataset_id: &str) -> Result<(), ClientError> {
        self.post_json(
            &format!("/v1/datasets/{dataset_id}/commit"),
            &serde_json::json!({}),
        )
        .await?;
        Ok(())
    }

    async fn get(&self, path: &str, params: &[(&str, &str)]) -> Result<Response, ClientError> {
        let response = self.http.get(self.url(path)).query(params).send().await?;
        Self::read(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = HttpServiceClient::new("http://127.0.0.1:3000/").unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:3000");
        assert_eq!(client.url("/v1/query"), "http://127.0.0.1:3000/v1/query");
    }

    #[test]
    fn test_service_error_display() {
        let err = ClientError::Service {
            status: 409,
            body: "{\"error\":\"dataset 'x' already exists\",\"httpCode\":409}".to_string(),
        };
        assert!(err.to_string().starts_with("service returned 409: "));
    }

    #[tokio::test]
    async fn test_unreachable_service_is_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let client = HttpServiceClient::new(&format!("http://{addr}")).unwrap();
        let err = client.get("/v1/query", &[("q", "select 1")]).await.unwrap_err();
        assert!(matches!(err, ClientError::Transport(_)));
    }
}
