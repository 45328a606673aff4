//! In-process fakes for the remote service ports

use crate::clients::{CatalogApi, ClientError, ClientResult, OrderGatewayApi, WarehouseApi};
use async_trait::async_trait;
use shared::catalog::{CatalogProduct, MediaAsset, ProductPage, ProductPricing, ProductSearchQuery};
use shared::forward::{ForwardAck, ForwardOrder};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A catalog product fixture
pub(crate) fn product(id: &str, name: &str) -> CatalogProduct {
    CatalogProduct {
        id: id.to_string(),
        name: name.to_string(),
        title: Some(name.to_string()),
        description: Some(format!("{name} description")),
        is_active: true,
    }
}

#[derive(Clone, Default)]
pub(crate) struct MockCatalog {
    pub products: Vec<CatalogProduct>,
    pub pricing: HashMap<String, f64>,
    pub media: HashMap<String, Vec<MediaAsset>>,
    pub fail_pricing: HashSet<String>,
}

#[async_trait]
impl CatalogApi for MockCatalog {
    async fn product_by_id(&self, id: &str) -> ClientResult<CatalogProduct> {
        self.products
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(ClientError::Status {
                status: 404,
                body: "product not found".into(),
            })
    }

    async fn search_products(&self, query: &ProductSearchQuery) -> ClientResult<ProductPage> {
        let items = self
            .products
            .iter()
            .filter(|p| !query.is_active || p.is_active)
            .take(query.limit)
            .cloned()
            .collect();
        Ok(ProductPage { items })
    }

    async fn product_pricing(&self, id: &str) -> ClientResult<ProductPricing> {
        if self.fail_pricing.contains(id) {
            return Err(ClientError::Status {
                status: 500,
                body: "pricing backend down".into(),
            });
        }
        Ok(ProductPricing {
            base_price: self.pricing.get(id).copied(),
        })
    }

    async fn product_media(&self, id: &str) -> ClientResult<Vec<MediaAsset>> {
        Ok(self.media.get(id).cloned().unwrap_or_default())
    }
}

#[derive(Clone, Default)]
pub(crate) struct MockWarehouse {
    pub stock: HashMap<String, i64>,
    pub fail_for: HashSet<String>,
}

#[async_trait]
impl WarehouseApi for MockWarehouse {
    async fn total_available(&self, product_id: &str) -> ClientResult<i64> {
        if self.fail_for.contains(product_id) {
            return Err(ClientError::Status {
                status: 503,
                body: "stock lookup failed".into(),
            });
        }
        Ok(self.stock.get(product_id).copied().unwrap_or(0))
    }
}

#[derive(Default)]
pub(crate) struct MockOrderGateway {
    pub fail: bool,
    calls: AtomicUsize,
    last: Mutex<Option<ForwardOrder>>,
}

impl MockOrderGateway {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_order(&self) -> Option<ForwardOrder> {
        self.last.lock().unwrap().clone()
    }
}

#[async_trait]
impl OrderGatewayApi for MockOrderGateway {
    async fn create_order(&self, order: &ForwardOrder) -> ClientResult<ForwardAck> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap() = Some(order.clone());

        if self.fail {
            return Err(ClientError::Status {
                status: 502,
                body: "order system unavailable".into(),
            });
        }
        Ok(ForwardAck {
            id: format!("central-{}", order.external_order_id),
        })
    }
}
