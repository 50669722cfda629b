//! HTTP routes for the dataset service.
//!
//! | Method | Path                       | Success                 |
//! |--------|----------------------------|-------------------------|
//! | POST   | `/v1/datasets`             | 201 + dataset status    |
//! | GET    | `/v1/datasets/{id}`        | 200 + dataset status    |
//! | POST   | `/v1/datasets/{id}/rows`   | 200 + `{}`              |
//! | POST   | `/v1/datasets/{id}/commit` | 200 + dataset status    |
//! | GET    | `/v1/query?q=<sql>`        | 200 + rows              |
//!
//! Every error is answered with `{"error": "...", "httpCode": N}`.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};

use crate::dataset::DatasetError;
use crate::dataset_registry::RegistryError;
use crate::query::QueryError;
use crate::service::{DatasetService, ServiceError};
use crate::types::{DatasetConfig, DatasetStatus, RowRecord};

/// Build the router over a shared service.
pub fn router(service: Arc<DatasetService>) -> Router {
    Router::new()
        .route("/v1/datasets", post(create_dataset))
        .route("/v1/datasets/{id}", get(get_dataset))
        .route("/v1/datasets/{id}/rows", post(record_row))
        .route("/v1/datasets/{id}/commit", post(commit))
        .route("/v1/query", get(query))
        .with_state(service)
}

/// Error body returned for every failed request.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub error: String,
    pub http_code: u16,
}

/// An error response.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        let status = match &e {
            ServiceError::Registry(RegistryError::AlreadyExists(_)) => StatusCode::CONFLICT,
            ServiceError::Registry(RegistryError::NotFound(_))
            | ServiceError::Query(QueryError::DatasetNotFound(_)) => StatusCode::NOT_FOUND,
            ServiceError::Registry(
                RegistryError::UnknownDatasetType(_) | RegistryError::InvalidDatasetId(_),
            )
            | ServiceError::Dataset(DatasetError::InvalidRow(_))
            | ServiceError::Query(QueryError::Syntax { .. })
            | ServiceError::QueryTooLong(_) => StatusCode::BAD_REQUEST,
            ServiceError::Registry(RegistryError::LockPoisoned)
            | ServiceError::Query(QueryError::LockPoisoned) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: e.to_string(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!("{} {}", self.status, self.message);
        } else {
            tracing::debug!("{} {}", self.status, self.message);
        }
        let body = ErrorBody {
            error: self.message,
            http_code: self.status.as_u16(),
        };
        (self.status, Json(body)).into_response()
    }
}

/// Parameters of `GET /v1/query`.
#[derive(Debug, Deserialize)]
pub struct QueryParams {
    pub q: String,
}

async fn create_dataset(
    State(service): State<Arc<DatasetService>>,
    config: Result<Json<DatasetConfig>, JsonRejection>,
) -> Result<(StatusCode, Json<DatasetStatus>), ApiError> {
    let Json(config) = config?;
    let status = service.create_dataset(&config)?;
    Ok((StatusCode::CREATED, Json(status)))
}

async fn get_dataset(
    State(service): State<Arc<DatasetService>>,
    Path(id): Path<String>,
) -> Result<Json<DatasetStatus>, ApiError> {
    Ok(Json(service.get_dataset(&id)?))
}

async fn record_row(
    State(service): State<Arc<DatasetService>>,
    Path(id): Path<String>,
    row: Result<Json<RowRecord>, JsonRejection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let Json(row) = row?;
    service.record_row(&id, row)?;
    Ok(Json(serde_json::json!({})))
}

async fn commit(
    State(service): State<Arc<DatasetService>>,
    Path(id): Path<String>,
) -> Result<Json<DatasetStatus>, ApiError> {
    Ok(Json(service.commit(&id)?))
}

async fn query(
    State(service): State<Arc<DatasetService>>,
    params: Result<Query<QueryParams>, QueryRejection>,
) -> Result<Json<Vec<RowRecord>>, ApiError> {
    let Query(params) = params?;
    Ok(Json(service.query(&params.q)?))
}
