//! Order API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use serde_json::Value;

use crate::core::ServerState;
use crate::db::models::{Order, OrderCreate};
use crate::db::repository::{OrderFilter, OrderRepository};
use shared::{AppError, AppResult};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderListQuery {
    pub account_id: Option<String>,
    pub status: Option<String>,
    pub forwarded: Option<bool>,
}

/// GET /api/orders - list orders, optionally filtered
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<OrderListQuery>,
) -> AppResult<Json<Vec<Order>>> {
    let repo = OrderRepository::new(state.db.clone());
    let orders = repo
        .find_all(OrderFilter {
            account_id: query.account_id,
            status: query.status,
            forwarded: query.forwarded,
        })
        .await?;
    Ok(Json(orders))
}

/// GET /api/orders/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    let repo = OrderRepository::new(state.db.clone());
    let order = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {}", id)))?;
    Ok(Json(order))
}

/// POST /api/orders - create an order and forward it to the order system
pub async fn create(
    State(state): State<ServerState>,
    Json(data): Json<OrderCreate>,
) -> AppResult<Json<Order>> {
    if data.external_order_id.trim().is_empty() {
        return Err(AppError::validation("external_order_id is required"));
    }

    let order = state.orders().create(data).await?;
    Ok(Json(order))
}

/// POST /api/orders/webhook - inbound channel order event
pub async fn webhook(
    State(state): State<ServerState>,
    Json(payload): Json<Value>,
) -> AppResult<Json<Order>> {
    let order = state.webhook().handle_order_event(payload).await?;
    Ok(Json(order))
}
