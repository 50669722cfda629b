// Life of a request:
// 1. HTTP request comes in (axum router in `http`)
// 2. Extract / validate JSON body or query string
// 3. For writes:
//     - Look up the dataset in the registry
//     - Record the row into the pending buffer, or commit pending rows
//    For queries:
//     - Tokenize and parse the SQL (any whitespace separates tokens)
//     - Read committed rows of the `FROM` dataset
//     - Respond with rows as JSON
//
// System components:
//  - Dataset registry
//  - SQL lexer / parser / executor
//  - HTTP routes

pub mod config;
mod constants;
pub mod dataset;
pub mod dataset_registry;
mod e2e_tests;
pub mod http;
pub mod query;
pub mod service;
pub mod types;

pub use constants::SPARSE_MUTABLE_DATASET_TYPE;
pub use service::DatasetService;

use std::net::SocketAddr;
use std::sync::Arc;

/// Bind `addr` and serve the dataset routes until the future is dropped.
///
/// Returns the bound address (useful with port 0) and the serve future.
pub async fn bind(
    addr: SocketAddr,
    service: Arc<DatasetService>,
) -> std::io::Result<(
    SocketAddr,
    impl std::future::Future<Output = std::io::Result<()>>,
)> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;
    let app = http::router(service);
    Ok((local_addr, async move { axum::serve(listener, app).await }))
}
