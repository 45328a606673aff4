//! Order Repository
//!
//! `external_order_id` carries a unique index; duplicate webhook deliveries
//! that race into `create` surface as [`RepoError::Duplicate`] and are
//! treated as "already exists" by ingestion.

use super::{BaseRepository, RepoError, RepoResult, now_rfc3339, record_id, record_key};
use crate::db::models::{Order, OrderCreate};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const ORDER_TABLE: &str = "channel_order";
const ACCOUNT_TABLE: &str = "account";

/// Optional filters for order listings
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    pub account_id: Option<String>,
    pub status: Option<String>,
    pub forwarded: Option<bool>,
}

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self, filter: OrderFilter) -> RepoResult<Vec<Order>> {
        let mut conditions: Vec<&str> = Vec::new();
        if filter.account_id.is_some() {
            conditions.push("account = $account");
        }
        if filter.status.is_some() {
            conditions.push("status = $status");
        }
        if filter.forwarded.is_some() {
            conditions.push("forwarded = $forwarded");
        }

        let sql = if conditions.is_empty() {
            "SELECT * FROM channel_order".to_string()
        } else {
            format!(
                "SELECT * FROM channel_order WHERE {}",
                conditions.join(" AND ")
            )
        };

        let mut query = self.base.db().query(sql);
        if let Some(account_id) = filter.account_id {
            // account is stored in its "table:id" string form
            query = query.bind(("account", record_id(ACCOUNT_TABLE, &account_id)?.to_string()));
        }
        if let Some(status) = filter.status {
            query = query.bind(("status", status));
        }
        if let Some(forwarded) = filter.forwarded {
            query = query.bind(("forwarded", forwarded));
        }

        let orders: Vec<Order> = query.await?.take(0)?;
        Ok(orders)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        let key = record_key(ORDER_TABLE, id);
        let order: Option<Order> = self.base.db().select((ORDER_TABLE, key)).await?;
        Ok(order)
    }

    /// Look up an order by its channel-side id
    pub async fn find_by_external_id(&self, external_order_id: &str) -> RepoResult<Option<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query("SELECT * FROM channel_order WHERE external_order_id = $external_order_id LIMIT 1")
            .bind(("external_order_id", external_order_id.to_string()))
            .await?
            .take(0)?;
        Ok(orders.into_iter().next())
    }

    pub async fn create(&self, data: OrderCreate) -> RepoResult<Order> {
        let order = Order {
            id: None,
            account: record_id(ACCOUNT_TABLE, &data.account)?,
            external_order_id: data.external_order_id,
            customer_email: data.customer_email,
            customer_phone: data.customer_phone,
            total: data.total,
            currency: data.currency,
            status: data.status,
            forwarded: false,
            forwarded_order_id: None,
            raw_data: data.raw_data,
            created_at: Some(now_rfc3339()),
            updated_at: None,
        };

        let created: Option<Order> = self.base.db().create(ORDER_TABLE).content(order).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create order".to_string()))
    }

    /// Update the channel lifecycle status
    pub async fn update_status(&self, id: &RecordId, status: &str) -> RepoResult<Order> {
        let patch = serde_json::json!({
            "status": status,
            "updated_at": now_rfc3339(),
        });

        let updated: Option<Order> = self.base.db().update(id.clone()).merge(patch).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))
    }

    /// Record a successful forward: both fields change together so that
    /// `forwarded == true` always implies a central reference.
    pub async fn mark_forwarded(
        &self,
        id: &RecordId,
        forwarded_order_id: &str,
    ) -> RepoResult<Order> {
        let patch = serde_json::json!({
            "forwarded": true,
            "forwarded_order_id": forwarded_order_id,
            "updated_at": now_rfc3339(),
        });

        let updated: Option<Order> = self.base.db().update(id.clone()).merge(patch).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))
    }
}
