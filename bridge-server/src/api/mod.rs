//! API routing
//!
//! Thin layer: routing and extraction only, all behavior lives in the
//! services and repositories.
//!
//! - [`health`] - liveness check
//! - [`accounts`] - channel account management
//! - [`offers`] - offer management and the catalog sync trigger
//! - [`orders`] - order management and the channel webhook

pub mod accounts;
pub mod health;
pub mod offers;
pub mod orders;

use crate::core::ServerState;
use axum::Router;

pub fn router(state: ServerState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(accounts::router())
        .merge(offers::router())
        .merge(orders::router())
        .with_state(state)
}
