//! Channel Account Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// A channel account the bridge manages offers and orders for
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RecordId>,
    pub name: String,
    /// Handle of the channel credential set stored outside the bridge
    pub credentials_ref: Option<String>,
    pub is_active: bool,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Create account payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountCreate {
    pub name: String,
    pub credentials_ref: Option<String>,
}

/// Update account payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountUpdate {
    pub name: Option<String>,
    pub credentials_ref: Option<String>,
    pub is_active: Option<bool>,
}
