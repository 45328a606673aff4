//! Central order system client

use super::{ClientResult, read_json};
use async_trait::async_trait;
use shared::forward::{ForwardAck, ForwardOrder};

/// Submission access to the central order system
#[async_trait]
pub trait OrderGatewayApi: Send + Sync {
    async fn create_order(&self, order: &ForwardOrder) -> ClientResult<ForwardAck>;
}

/// HTTP client for the central order system
pub struct OrderGatewayClient {
    client: reqwest::Client,
    base_url: String,
}

impl OrderGatewayClient {
    pub fn new(client: reqwest::Client, base_url: String) -> Self {
        Self { client, base_url }
    }
}

#[async_trait]
impl OrderGatewayApi for OrderGatewayClient {
    async fn create_order(&self, order: &ForwardOrder) -> ClientResult<ForwardAck> {
        let url = format!("{}/api/orders", self.base_url);
        let response = self.client.post(&url).json(order).send().await?;
        read_json(response).await
    }
}
