//! Inbound channel webhook payload
//!
//! The channel pushes order events as loosely-shaped JSON. [`OrderWebhook`]
//! is the typed view of the fields ingestion cares about; the full payload
//! is stored verbatim on the order for later item parsing.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

fn default_currency() -> String {
    "CZK".to_string()
}

fn default_status() -> String {
    "pending".to_string()
}

/// Lenient numeric extraction for channel payload fields
///
/// The channel is inconsistent about money fields: sometimes a JSON number,
/// sometimes a string like "123.45". Anything else yields None.
pub fn amount_from_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn lenient_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(amount_from_value))
}

/// Typed view of an inbound order event
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderWebhook {
    pub order_id: Option<String>,
    pub account_id: Option<String>,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub total: Option<f64>,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default = "default_status")]
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_applied_for_missing_fields() {
        let payload = json!({ "orderId": "B-1001" });
        let webhook: OrderWebhook = serde_json::from_value(payload).unwrap();

        assert_eq!(webhook.order_id.as_deref(), Some("B-1001"));
        assert_eq!(webhook.currency, "CZK");
        assert_eq!(webhook.status, "pending");
        assert!(webhook.account_id.is_none());
        assert!(webhook.total.is_none());
    }

    #[test]
    fn total_parses_from_number_or_string() {
        let webhook: OrderWebhook =
            serde_json::from_value(json!({ "orderId": "B-1", "total": 149.9 })).unwrap();
        assert_eq!(webhook.total, Some(149.9));

        let webhook: OrderWebhook =
            serde_json::from_value(json!({ "orderId": "B-1", "total": "149.90" })).unwrap();
        assert_eq!(webhook.total, Some(149.9));

        let webhook: OrderWebhook =
            serde_json::from_value(json!({ "orderId": "B-1", "total": [1, 2] })).unwrap();
        assert_eq!(webhook.total, None);
    }

    #[test]
    fn amount_from_value_rejects_non_numeric() {
        assert_eq!(amount_from_value(&json!("12.5")), Some(12.5));
        assert_eq!(amount_from_value(&json!(7)), Some(7.0));
        assert_eq!(amount_from_value(&json!("abc")), None);
        assert_eq!(amount_from_value(&json!(null)), None);
    }
}
