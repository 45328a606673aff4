//! Catalog service client

use super::{ClientResult, read_json};
use async_trait::async_trait;
use shared::catalog::{CatalogProduct, MediaAsset, ProductPage, ProductPricing, ProductSearchQuery};

/// Read access to the central product catalog
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn product_by_id(&self, id: &str) -> ClientResult<CatalogProduct>;
    async fn search_products(&self, query: &ProductSearchQuery) -> ClientResult<ProductPage>;
    async fn product_pricing(&self, id: &str) -> ClientResult<ProductPricing>;
    async fn product_media(&self, id: &str) -> ClientResult<Vec<MediaAsset>>;
}

/// HTTP client for the catalog service
pub struct CatalogClient {
    client: reqwest::Client,
    base_url: String,
}

impl CatalogClient {
    pub fn new(client: reqwest::Client, base_url: String) -> Self {
        Self { client, base_url }
    }
}

#[async_trait]
impl CatalogApi for CatalogClient {
    async fn product_by_id(&self, id: &str) -> ClientResult<CatalogProduct> {
        let url = format!("{}/api/products/{}", self.base_url, id);
        let response = self.client.get(&url).send().await?;
        read_json(response).await
    }

    async fn search_products(&self, query: &ProductSearchQuery) -> ClientResult<ProductPage> {
        let url = format!("{}/api/products", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("isActive", query.is_active.to_string()),
                ("limit", query.limit.to_string()),
                ("page", query.page.to_string()),
            ])
            .send()
            .await?;
        read_json(response).await
    }

    async fn product_pricing(&self, id: &str) -> ClientResult<ProductPricing> {
        let url = format!("{}/api/products/{}/pricing", self.base_url, id);
        let response = self.client.get(&url).send().await?;
        read_json(response).await
    }

    async fn product_media(&self, id: &str) -> ClientResult<Vec<MediaAsset>> {
        let url = format!("{}/api/products/{}/media", self.base_url, id);
        let response = self.client.get(&url).send().await?;
        read_json(response).await
    }
}
