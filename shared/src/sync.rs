//! Catalog sync request and report types

use serde::{Deserialize, Serialize};

/// Request parameters for a catalog→offer sync run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncRequest {
    pub account_id: String,
    /// Max number of catalog products fetched (single page), default 100
    pub limit: Option<usize>,
    /// Restrict the catalog query to active products, default true
    pub active_only: Option<bool>,
}

impl SyncRequest {
    pub const DEFAULT_LIMIT: usize = 100;

    pub fn new(account_id: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            limit: None,
            active_only: None,
        }
    }

    pub fn limit(&self) -> usize {
        self.limit.unwrap_or(Self::DEFAULT_LIMIT)
    }

    pub fn active_only(&self) -> bool {
        self.active_only.unwrap_or(true)
    }
}

/// Aggregated outcome of one sync run
///
/// Invariant: `created + updated + failed == total`, where `total` is the
/// number of products the catalog returned for the run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncReport {
    pub success: bool,
    pub created: usize,
    pub updated: usize,
    pub failed: usize,
    pub errors: Vec<String>,
    pub total: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_defaults() {
        let req = SyncRequest::new("account:a1");
        assert_eq!(req.limit(), 100);
        assert!(req.active_only());

        let req = SyncRequest {
            account_id: "account:a1".into(),
            limit: Some(25),
            active_only: Some(false),
        };
        assert_eq!(req.limit(), 25);
        assert!(!req.active_only());
    }

    #[test]
    fn request_deserializes_from_camel_case() {
        let req: SyncRequest =
            serde_json::from_str(r#"{"accountId":"account:a1","limit":10,"activeOnly":false}"#)
                .unwrap();
        assert_eq!(req.account_id, "account:a1");
        assert_eq!(req.limit(), 10);
        assert!(!req.active_only());
    }
}
