//! Warehouse service client

use super::{ClientResult, read_json};
use async_trait::async_trait;
use serde::Deserialize;

/// Read access to warehouse stock levels
#[async_trait]
pub trait WarehouseApi: Send + Sync {
    /// Total available quantity for a product across all warehouses
    async fn total_available(&self, product_id: &str) -> ClientResult<i64>;
}

#[derive(Debug, Deserialize)]
struct StockTotal {
    total: i64,
}

/// HTTP client for the warehouse service
pub struct WarehouseClient {
    client: reqwest::Client,
    base_url: String,
}

impl WarehouseClient {
    pub fn new(client: reqwest::Client, base_url: String) -> Self {
        Self { client, base_url }
    }
}

#[async_trait]
impl WarehouseApi for WarehouseClient {
    async fn total_available(&self, product_id: &str) -> ClientResult<i64> {
        let url = format!("{}/api/stock/{}/total", self.base_url, product_id);
        let response = self.client.get(&url).send().await?;
        let stock: StockTotal = read_json(response).await?;
        Ok(stock.total)
    }
}
