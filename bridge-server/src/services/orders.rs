//! Order creation
//!
//! Persist first, then forward. Forwarding failure never rolls the order
//! back; the row stays with `forwarded = false` until something re-drives it.

use super::order_forward::OrderForwardService;
use crate::db::models::{Order, OrderCreate};
use crate::db::repository::OrderRepository;
use shared::AppResult;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

#[derive(Clone)]
pub struct OrdersService {
    db: Surreal<Db>,
    forwarder: OrderForwardService,
}

impl OrdersService {
    pub fn new(db: Surreal<Db>, forwarder: OrderForwardService) -> Self {
        Self { db, forwarder }
    }

    /// Create an order and submit it to the central order system
    pub async fn create(&self, data: OrderCreate) -> AppResult<Order> {
        let repo = OrderRepository::new(self.db.clone());
        let order = repo.create(data).await?;

        match self.forwarder.dispatch(&order).await {
            Some(forwarded) => Ok(forwarded),
            None => Ok(order),
        }
    }
}
