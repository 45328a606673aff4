//! Wire types for forwarding orders to the central order system

use serde::{Deserialize, Serialize};

/// Channel tag sent with every forwarded order
pub const CHANNEL: &str = "bazar";

/// Customer contact fields on a forwarded order
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForwardCustomer {
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// A canonical order line item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForwardOrderItem {
    pub product_id: Option<String>,
    pub sku: Option<String>,
    pub title: String,
    pub quantity: i64,
    pub unit_price: f64,
    pub total_price: f64,
}

/// The canonical order shape the central order system accepts
///
/// Shipping and tax are not tracked at this layer; both are reported as 0
/// and `subtotal` equals `total`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForwardOrder {
    pub external_order_id: String,
    pub channel: String,
    pub channel_account_id: String,
    pub customer: ForwardCustomer,
    pub items: Vec<ForwardOrderItem>,
    pub subtotal: f64,
    pub shipping_cost: f64,
    pub tax_amount: f64,
    pub total: f64,
    pub currency: String,
    pub ordered_at: Option<String>,
}

/// Acknowledgement returned by the central order system
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForwardAck {
    pub id: String,
}
