//! Order forwarding
//!
//! Transforms a captured channel order into the canonical shape the central
//! order system accepts and submits it. Forwarding is best-effort: a failed
//! submission is logged and the order stays unforwarded for a later re-drive;
//! it never fails the enclosing order creation.

use crate::clients::OrderGatewayApi;
use crate::db::models::Order;
use crate::db::repository::OrderRepository;
use rust_decimal::RoundingStrategy;
use rust_decimal::prelude::*;
use serde_json::Value;
use shared::forward::{CHANNEL, ForwardCustomer, ForwardOrder, ForwardOrderItem};
use shared::webhook::amount_from_value;
use std::sync::Arc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

/// Line total via decimal arithmetic, rounded to 2 places half-up
fn line_total(unit_price: f64, quantity: i64) -> f64 {
    let unit = Decimal::from_f64(unit_price).unwrap_or_default();
    let total = unit * Decimal::from(quantity);
    total
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or(0.0)
}

/// Parse the canonical line items out of a raw payload snapshot
///
/// The channel's item records are inconsistent: prices arrive under `price`
/// or `unitPrice` as numbers or strings, names under `title` or `name`. A
/// payload without an `items` array yields an empty sequence.
pub fn canonical_items(raw_data: Option<&Value>) -> Vec<ForwardOrderItem> {
    let Some(items) = raw_data
        .and_then(|data| data.get("items"))
        .and_then(|items| items.as_array())
    else {
        return Vec::new();
    };

    items
        .iter()
        .map(|item| {
            let unit_price = item
                .get("price")
                .or_else(|| item.get("unitPrice"))
                .and_then(amount_from_value)
                .unwrap_or(0.0);
            let quantity = item.get("quantity").and_then(Value::as_i64).unwrap_or(1);
            let total_price = item
                .get("totalPrice")
                .and_then(amount_from_value)
                .unwrap_or_else(|| line_total(unit_price, quantity));

            ForwardOrderItem {
                product_id: item
                    .get("productId")
                    .and_then(Value::as_str)
                    .map(str::to_string),
                sku: item.get("sku").and_then(Value::as_str).map(str::to_string),
                title: item
                    .get("title")
                    .or_else(|| item.get("name"))
                    .and_then(Value::as_str)
                    .unwrap_or("Unknown")
                    .to_string(),
                quantity,
                unit_price,
                total_price,
            }
        })
        .collect()
}

/// Build the canonical order for submission
///
/// Shipping and tax are not tracked at this layer, so subtotal equals total
/// and both extra charges go out as 0.
pub fn build_forward_order(order: &Order) -> ForwardOrder {
    ForwardOrder {
        external_order_id: order.external_order_id.clone(),
        channel: CHANNEL.to_string(),
        channel_account_id: order.account.to_string(),
        customer: ForwardCustomer {
            email: order.customer_email.clone(),
            phone: order.customer_phone.clone(),
        },
        items: canonical_items(order.raw_data.as_ref()),
        subtotal: order.total,
        shipping_cost: 0.0,
        tax_amount: 0.0,
        total: order.total,
        currency: order.currency.clone(),
        ordered_at: order.created_at.clone(),
    }
}

/// Submits captured orders to the central order system
#[derive(Clone)]
pub struct OrderForwardService {
    db: Surreal<Db>,
    gateway: Arc<dyn OrderGatewayApi>,
}

impl OrderForwardService {
    pub fn new(db: Surreal<Db>, gateway: Arc<dyn OrderGatewayApi>) -> Self {
        Self { db, gateway }
    }

    /// Forward a freshly persisted order, once
    ///
    /// On success the order row gets the central reference and
    /// `forwarded = true`, and the updated row is returned. Any failure,
    /// submission or the follow-up write, is logged and swallowed; the
    /// caller keeps the unforwarded order.
    pub async fn dispatch(&self, order: &Order) -> Option<Order> {
        let Some(order_id) = order.id.clone() else {
            tracing::error!("Cannot forward an order without an id");
            return None;
        };

        let forward = build_forward_order(order);
        let ack = match self.gateway.create_order(&forward).await {
            Ok(ack) => ack,
            Err(err) => {
                tracing::error!(
                    order = %order_id,
                    error = %err,
                    "Failed to forward order to the central order system"
                );
                return None;
            }
        };

        let repo = OrderRepository::new(self.db.clone());
        match repo.mark_forwarded(&order_id, &ack.id).await {
            Ok(updated) => {
                tracing::info!(order = %order_id, central = %ack.id, "Order forwarded");
                Some(updated)
            }
            Err(err) => {
                tracing::error!(
                    order = %order_id,
                    error = %err,
                    "Order forwarded but recording the outcome failed"
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn items_parse_with_fallbacks() {
        let raw = json!({
            "items": [
                {
                    "productId": "p-1",
                    "sku": "SKU-1",
                    "title": "Widget",
                    "quantity": 2,
                    "price": "49.50",
                    "totalPrice": 99.0
                },
                {
                    "name": "Gadget",
                    "unitPrice": 10
                },
                {}
            ]
        });

        let items = canonical_items(Some(&raw));
        assert_eq!(items.len(), 3);

        assert_eq!(
            items[0],
            ForwardOrderItem {
                product_id: Some("p-1".into()),
                sku: Some("SKU-1".into()),
                title: "Widget".into(),
                quantity: 2,
                unit_price: 49.5,
                total_price: 99.0,
            }
        );

        // title falls back to name, quantity defaults to 1,
        // total computed from unit price
        assert_eq!(items[1].title, "Gadget");
        assert_eq!(items[1].quantity, 1);
        assert_eq!(items[1].unit_price, 10.0);
        assert_eq!(items[1].total_price, 10.0);

        // fully empty item
        assert_eq!(items[2].title, "Unknown");
        assert_eq!(items[2].quantity, 1);
        assert_eq!(items[2].unit_price, 0.0);
        assert_eq!(items[2].total_price, 0.0);
    }

    #[test]
    fn missing_items_collection_yields_empty_sequence() {
        assert!(canonical_items(None).is_empty());
        assert!(canonical_items(Some(&json!({ "orderId": "B-1" }))).is_empty());
        assert!(canonical_items(Some(&json!({ "items": "not-an-array" }))).is_empty());
    }

    #[test]
    fn computed_total_rounds_to_cents() {
        let raw = json!({
            "items": [ { "title": "Thing", "quantity": 3, "price": 0.115 } ]
        });
        let items = canonical_items(Some(&raw));
        assert_eq!(items[0].total_price, 0.35);
    }

    mod dispatch {
        use super::super::*;
        use crate::db;
        use crate::db::models::{AccountCreate, OrderCreate};
        use crate::db::repository::{AccountRepository, OrderRepository};
        use crate::services::test_support::MockOrderGateway;
        use serde_json::json;

        async fn seed_order(db: &Surreal<Db>) -> Order {
            let account = AccountRepository::new(db.clone())
                .create(AccountCreate {
                    name: "main".into(),
                    credentials_ref: None,
                })
                .await
                .unwrap()
                .id
                .unwrap();

            OrderRepository::new(db.clone())
                .create(OrderCreate {
                    account: account.to_string(),
                    external_order_id: "B-77".into(),
                    customer_email: Some("buyer@example.com".into()),
                    customer_phone: None,
                    total: 120.0,
                    currency: "CZK".into(),
                    status: "pending".into(),
                    raw_data: Some(json!({
                        "items": [ { "title": "Widget", "quantity": 2, "price": 60 } ]
                    })),
                })
                .await
                .unwrap()
        }

        #[tokio::test]
        async fn success_records_central_reference() {
            let database = db::open_in_memory().await.unwrap();
            let order = seed_order(&database).await;

            let gateway = Arc::new(MockOrderGateway::default());
            let svc = OrderForwardService::new(database.clone(), gateway.clone());

            let forwarded = svc.dispatch(&order).await.unwrap();
            assert!(forwarded.forwarded);
            assert_eq!(forwarded.forwarded_order_id.as_deref(), Some("central-B-77"));
            assert_eq!(gateway.call_count(), 1);

            let sent = gateway.last_order().unwrap();
            assert_eq!(sent.channel, CHANNEL);
            assert_eq!(sent.external_order_id, "B-77");
            assert_eq!(sent.subtotal, sent.total);
            assert_eq!(sent.shipping_cost, 0.0);
            assert_eq!(sent.tax_amount, 0.0);
            assert_eq!(sent.items.len(), 1);
        }

        #[tokio::test]
        async fn failure_leaves_order_unforwarded() {
            let database = db::open_in_memory().await.unwrap();
            let order = seed_order(&database).await;

            let gateway = Arc::new(MockOrderGateway::failing());
            let svc = OrderForwardService::new(database.clone(), gateway.clone());

            assert!(svc.dispatch(&order).await.is_none());
            assert_eq!(gateway.call_count(), 1);

            let stored = OrderRepository::new(database.clone())
                .find_by_external_id("B-77")
                .await
                .unwrap()
                .unwrap();
            assert!(!stored.forwarded);
            assert!(stored.forwarded_order_id.is_none());
        }
    }
}
