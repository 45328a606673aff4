//! Remote service clients
//!
//! The bridge talks to three platform services: the catalog, the warehouse,
//! and the central order system. Each is consumed through a narrow trait so
//! the sync and forwarding paths can be exercised against in-process fakes.

pub mod catalog;
pub mod orders;
pub mod warehouse;

// Re-exports
pub use catalog::{CatalogApi, CatalogClient};
pub use orders::{OrderGatewayApi, OrderGatewayClient};
pub use warehouse::{WarehouseApi, WarehouseClient};

use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors from remote service calls
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Remote returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Transport(err.to_string())
    }
}

/// Result type for remote service calls
pub type ClientResult<T> = Result<T, ClientError>;

/// Check the status and decode the JSON body of a response
pub(crate) async fn read_json<T: DeserializeOwned>(
    response: reqwest::Response,
) -> ClientResult<T> {
    if !response.status().is_success() {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        return Err(ClientError::Status { status, body });
    }

    response
        .json::<T>()
        .await
        .map_err(|e| ClientError::Decode(e.to_string()))
}
