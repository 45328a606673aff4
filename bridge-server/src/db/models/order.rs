//! Channel Order Model
//!
//! Stored in the `channel_order` table. The inbound payload is kept verbatim
//! in `raw_data`; line items are parsed from it lazily at forwarding time.

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use surrealdb::RecordId;

/// An order captured from the channel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RecordId>,
    /// Owning account reference
    #[serde(with = "serde_helpers::record_id")]
    pub account: RecordId,
    /// Channel-side order id, unique across all orders
    pub external_order_id: String,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub total: f64,
    pub currency: String,
    /// Free-form channel lifecycle status ("pending", "paid", "shipped", ...)
    pub status: String,
    /// Set once, on successful submission to the central order system
    pub forwarded: bool,
    /// Central order system reference; present iff `forwarded` is true
    pub forwarded_order_id: Option<String>,
    /// Verbatim snapshot of the inbound payload
    pub raw_data: Option<Value>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Create order payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    /// Owning account id, "account:xyz" or bare key
    pub account: String,
    pub external_order_id: String,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub total: f64,
    pub currency: String,
    pub status: String,
    pub raw_data: Option<Value>,
}
