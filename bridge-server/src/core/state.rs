//! Server state: database handle and remote service ports

use super::Config;
use crate::clients::{
    CatalogApi, CatalogClient, OrderGatewayApi, OrderGatewayClient, WarehouseApi, WarehouseClient,
};
use crate::db;
use crate::services::{OfferSyncService, OrderForwardService, OrdersService, WebhookService};
use shared::AppError;
use std::sync::Arc;
use std::time::Duration;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

/// Shared state handed to every request handler
#[derive(Clone)]
pub struct ServerState {
    pub db: Surreal<Db>,
    pub catalog: Arc<dyn CatalogApi>,
    pub warehouse: Arc<dyn WarehouseApi>,
    pub order_gateway: Arc<dyn OrderGatewayApi>,
}

impl ServerState {
    /// Open the database and build the HTTP clients for the platform services
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        let database = db::open(&config.work_dir).await?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to build HTTP client: {e}")))?;

        let instance_id = uuid::Uuid::new_v4();
        tracing::info!(instance = %instance_id, "Server state initialized");

        Ok(Self {
            db: database,
            catalog: Arc::new(CatalogClient::new(
                http.clone(),
                config.catalog_service_url.clone(),
            )),
            warehouse: Arc::new(WarehouseClient::new(
                http.clone(),
                config.warehouse_service_url.clone(),
            )),
            order_gateway: Arc::new(OrderGatewayClient::new(
                http,
                config.order_service_url.clone(),
            )),
        })
    }

    /// Assemble state from pre-built parts (tests, embedded use)
    pub fn with_parts(
        db: Surreal<Db>,
        catalog: Arc<dyn CatalogApi>,
        warehouse: Arc<dyn WarehouseApi>,
        order_gateway: Arc<dyn OrderGatewayApi>,
    ) -> Self {
        Self {
            db,
            catalog,
            warehouse,
            order_gateway,
        }
    }

    // ========== Service accessors ==========

    pub fn offer_sync(&self) -> OfferSyncService {
        OfferSyncService::new(self.db.clone(), self.catalog.clone(), self.warehouse.clone())
    }

    pub fn orders(&self) -> OrdersService {
        let forwarder = OrderForwardService::new(self.db.clone(), self.order_gateway.clone());
        OrdersService::new(self.db.clone(), forwarder)
    }

    pub fn webhook(&self) -> WebhookService {
        WebhookService::new(self.db.clone(), self.orders())
    }
}
