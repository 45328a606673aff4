//! Webhook ingestion
//!
//! The channel pushes order events at-least-once. Ingestion is idempotent on
//! the channel-side order id: a known order only ever gets a status update,
//! and a duplicate delivery that races into the create path is caught by the
//! store's unique index and treated as "already exists".

use super::orders::OrdersService;
use crate::db::models::{Order, OrderCreate};
use crate::db::repository::{AccountRepository, OrderRepository};
use serde_json::Value;
use shared::webhook::OrderWebhook;
use shared::{AppError, AppResult};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

#[derive(Clone)]
pub struct WebhookService {
    db: Surreal<Db>,
    orders: OrdersService,
}

impl WebhookService {
    pub fn new(db: Surreal<Db>, orders: OrdersService) -> Self {
        Self { db, orders }
    }

    /// Handle an inbound order event
    ///
    /// Returns the order the event settled on: freshly created, or the
    /// pre-existing one (status updated when the event carried a new one).
    pub async fn handle_order_event(&self, payload: Value) -> AppResult<Order> {
        let webhook: OrderWebhook = serde_json::from_value(payload.clone())
            .map_err(|e| AppError::validation(format!("Invalid webhook payload: {e}")))?;

        let Some(external_order_id) = webhook.order_id.clone().filter(|id| !id.is_empty()) else {
            return Err(AppError::validation("orderId is required in webhook data"));
        };

        tracing::info!(order = %external_order_id, "Received channel order event");

        let repo = OrderRepository::new(self.db.clone());
        if let Some(existing) = repo.find_by_external_id(&external_order_id).await? {
            return self.apply_status(existing, &webhook.status).await;
        }

        let account_id = self.resolve_account(webhook.account_id.as_deref()).await?;

        let create = OrderCreate {
            account: account_id,
            external_order_id: external_order_id.clone(),
            customer_email: webhook.customer_email,
            customer_phone: webhook.customer_phone,
            total: webhook.total.unwrap_or(0.0),
            currency: webhook.currency.clone(),
            status: webhook.status.clone(),
            raw_data: Some(payload),
        };

        match self.orders.create(create).await {
            Ok(order) => {
                tracing::info!(
                    order = %external_order_id,
                    "Order created from channel event"
                );
                Ok(order)
            }
            // A concurrent delivery won the create race; fall back to the
            // lookup-and-update path.
            Err(AppError::Conflict(_)) => {
                let existing = repo
                    .find_by_external_id(&external_order_id)
                    .await?
                    .ok_or_else(|| AppError::not_found(format!("Order {}", external_order_id)))?;
                self.apply_status(existing, &webhook.status).await
            }
            Err(err) => Err(err),
        }
    }

    /// Update the stored status when the event carries a different one
    async fn apply_status(&self, existing: Order, status: &str) -> AppResult<Order> {
        if existing.status == status {
            return Ok(existing);
        }

        let Some(id) = existing.id.clone() else {
            return Err(AppError::database("Order row is missing its id"));
        };

        tracing::info!(
            order = %existing.external_order_id,
            from = %existing.status,
            to = %status,
            "Updating order status from channel event"
        );
        let repo = OrderRepository::new(self.db.clone());
        let updated = repo.update_status(&id, status).await?;
        Ok(updated)
    }

    /// Resolve the owning account
    ///
    /// When the event names an account it must exist. When it does not, the
    /// sole active account is used; zero or several active accounts make the
    /// event unattributable and the call fails.
    async fn resolve_account(&self, account_id: Option<&str>) -> AppResult<String> {
        let accounts = AccountRepository::new(self.db.clone());

        if let Some(account_id) = account_id {
            let account = accounts
                .find_by_id(account_id)
                .await?
                .ok_or_else(|| AppError::not_found(format!("Account {}", account_id)))?;
            let Some(id) = account.id else {
                return Err(AppError::database("Account row is missing its id"));
            };
            return Ok(id.to_string());
        }

        let active = accounts.find_active().await?;
        if active.len() == 1 {
            let Some(id) = active.into_iter().next().and_then(|a| a.id) else {
                return Err(AppError::database("Account row is missing its id"));
            };
            Ok(id.to_string())
        } else {
            Err(AppError::validation(
                "accountId is required when multiple accounts exist",
            ))
        }
    }
}
