//! Channel Offer Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// A channel listing derived from a catalog product plus live stock
///
/// At most one offer exists per (account, product_id) pair; the unique index
/// on those fields is defined at database startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Offer {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RecordId>,
    /// Owning account reference
    #[serde(with = "serde_helpers::record_id")]
    pub account: RecordId,
    /// Catalog product this offer is derived from
    pub product_id: String,
    pub title: String,
    pub description: Option<String>,
    pub price: f64,
    pub stock_quantity: i64,
    /// Primary listing image url
    pub image: Option<String>,
    /// Derived: true iff stock_quantity > 0 after the last sync
    pub is_active: bool,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Create offer payload (manual creation via the API)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfferCreate {
    /// Owning account id, "account:xyz" or bare key
    pub account: String,
    pub product_id: String,
    pub title: String,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub stock_quantity: Option<i64>,
    pub image: Option<String>,
}

/// Update offer payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfferUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub stock_quantity: Option<i64>,
    pub image: Option<String>,
    pub is_active: Option<bool>,
}

/// Field set written by one catalog sync pass over an offer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfferSyncData {
    pub title: String,
    pub description: Option<String>,
    pub price: f64,
    pub stock_quantity: i64,
    pub image: Option<String>,
    pub is_active: bool,
}
