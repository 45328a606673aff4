//! Catalog→offer reconciliation
//!
//! Reads catalog, pricing, media and live stock for one account and
//! converges the account's channel offers to match. Products are processed
//! strictly one at a time: a failure on one product is recorded in the
//! report and never aborts the rest of the run. Re-running against unchanged
//! upstream state converges to the same offers: the (account, product)
//! lookup turns the second pass into pure updates.

use crate::clients::{CatalogApi, ClientError, WarehouseApi};
use crate::db::models::OfferSyncData;
use crate::db::repository::{AccountRepository, OfferRepository, RepoError};
use shared::catalog::{CatalogProduct, ProductSearchQuery, primary_image};
use shared::{AppError, AppResult, SyncReport, SyncRequest};
use std::sync::Arc;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};
use thiserror::Error;

/// What happened to a single product during a sync pass
enum SyncOutcome {
    Created,
    Updated,
}

/// A per-product failure; recorded in the report, not propagated
#[derive(Debug, Error)]
enum SyncItemError {
    #[error("{0}")]
    Client(#[from] ClientError),

    #[error("{0}")]
    Repo(#[from] RepoError),
}

/// Drives the catalog→offer sync loop for one account at a time
#[derive(Clone)]
pub struct OfferSyncService {
    db: Surreal<Db>,
    catalog: Arc<dyn CatalogApi>,
    warehouse: Arc<dyn WarehouseApi>,
}

impl OfferSyncService {
    pub fn new(
        db: Surreal<Db>,
        catalog: Arc<dyn CatalogApi>,
        warehouse: Arc<dyn WarehouseApi>,
    ) -> Self {
        Self {
            db,
            catalog,
            warehouse,
        }
    }

    /// Run one sync pass
    ///
    /// Fails fast only on bad input: a missing account id or an unknown
    /// account. Everything past that point is per-product best effort and
    /// the call always returns a structured report.
    pub async fn sync_from_catalog(&self, request: &SyncRequest) -> AppResult<SyncReport> {
        if request.account_id.trim().is_empty() {
            return Err(AppError::validation("accountId is required"));
        }

        let accounts = AccountRepository::new(self.db.clone());
        let account = accounts
            .find_by_id(&request.account_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Account {}", request.account_id)))?;
        let Some(account_id) = account.id else {
            return Err(AppError::database("Account row is missing its id"));
        };

        let query = ProductSearchQuery {
            is_active: request.active_only(),
            limit: request.limit(),
            page: 1,
        };
        let page = self
            .catalog
            .search_products(&query)
            .await
            .map_err(|e| AppError::upstream(e.to_string()))?;
        let products = page.items;

        tracing::info!(
            account = %account_id,
            count = products.len(),
            "Syncing catalog products to channel offers"
        );

        let offers = OfferRepository::new(self.db.clone());
        let mut report = SyncReport {
            success: true,
            total: products.len(),
            ..Default::default()
        };

        for product in &products {
            match self.sync_product(&offers, &account_id, product).await {
                Ok(SyncOutcome::Created) => report.created += 1,
                Ok(SyncOutcome::Updated) => report.updated += 1,
                Err(err) => {
                    report.failed += 1;
                    report.errors.push(format!("Product {}: {}", product.id, err));
                    tracing::error!(
                        product = %product.id,
                        error = %err,
                        "Failed to sync product"
                    );
                }
            }
        }

        tracing::info!(
            created = report.created,
            updated = report.updated,
            failed = report.failed,
            "Catalog sync completed"
        );
        Ok(report)
    }

    /// Sync a single product into its offer
    ///
    /// Stock is read first so that `is_active` is always recomputed from the
    /// live quantity, overriding whatever state the offer had before.
    async fn sync_product(
        &self,
        offers: &OfferRepository,
        account: &RecordId,
        product: &CatalogProduct,
    ) -> Result<SyncOutcome, SyncItemError> {
        let stock_quantity = self.warehouse.total_available(&product.id).await?;

        let existing = offers
            .find_by_account_and_product(account, &product.id)
            .await?;

        let pricing = self.catalog.product_pricing(&product.id).await?;
        let price = pricing.base_price.unwrap_or(0.0);

        let media = self.catalog.product_media(&product.id).await?;

        let data = OfferSyncData {
            title: product.listing_title().to_string(),
            description: product.description.clone(),
            price,
            stock_quantity,
            image: primary_image(&media),
            is_active: stock_quantity > 0,
        };

        match existing {
            Some(offer) => {
                let id = offer
                    .id
                    .ok_or_else(|| RepoError::Database("Offer row is missing its id".into()))?;
                offers.update_synced(&id, data).await?;
                Ok(SyncOutcome::Updated)
            }
            None => {
                offers.create_synced(account.clone(), &product.id, data).await?;
                Ok(SyncOutcome::Created)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use crate::db::models::AccountCreate;
    use crate::db::repository::OfferFilter;
    use crate::services::test_support::{MockCatalog, MockWarehouse, product};

    async fn seed_account(db: &Surreal<Db>) -> RecordId {
        AccountRepository::new(db.clone())
            .create(AccountCreate {
                name: "main".into(),
                credentials_ref: None,
            })
            .await
            .unwrap()
            .id
            .unwrap()
    }

    fn service(
        db: &Surreal<Db>,
        catalog: MockCatalog,
        warehouse: MockWarehouse,
    ) -> OfferSyncService {
        OfferSyncService::new(db.clone(), Arc::new(catalog), Arc::new(warehouse))
    }

    #[tokio::test]
    async fn missing_account_id_fails_fast() {
        let database = db::open_in_memory().await.unwrap();
        let svc = service(&database, MockCatalog::default(), MockWarehouse::default());

        let result = svc.sync_from_catalog(&SyncRequest::new("  ")).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn unknown_account_fails_fast() {
        let database = db::open_in_memory().await.unwrap();
        let svc = service(&database, MockCatalog::default(), MockWarehouse::default());

        let result = svc
            .sync_from_catalog(&SyncRequest::new("account:missing"))
            .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn first_run_creates_second_run_updates() {
        let database = db::open_in_memory().await.unwrap();
        let account = seed_account(&database).await;

        let mut catalog = MockCatalog::default();
        catalog.products = vec![product("p-1", "Widget"), product("p-2", "Gadget")];
        catalog.pricing.insert("p-1".into(), 49.5);

        let mut warehouse = MockWarehouse::default();
        warehouse.stock.insert("p-1".into(), 4);

        let svc = service(&database, catalog.clone(), warehouse.clone());
        let request = SyncRequest::new(account.to_string());

        let report = svc.sync_from_catalog(&request).await.unwrap();
        assert!(report.success);
        assert_eq!(report.created, 2);
        assert_eq!(report.updated, 0);
        assert_eq!(report.failed, 0);
        assert_eq!(report.total, 2);
        assert_eq!(report.created + report.updated + report.failed, report.total);

        // Re-run with unchanged upstream state: no new offers, only updates
        let svc = service(&database, catalog, warehouse);
        let report = svc.sync_from_catalog(&request).await.unwrap();
        assert_eq!(report.created, 0);
        assert_eq!(report.updated, 2);
        assert_eq!(report.failed, 0);

        let offers = OfferRepository::new(database.clone())
            .find_all(OfferFilter::default())
            .await
            .unwrap();
        assert_eq!(offers.len(), 2);

        let widget = offers.iter().find(|o| o.product_id == "p-1").unwrap();
        assert_eq!(widget.price, 49.5);
        assert_eq!(widget.stock_quantity, 4);
        assert!(widget.is_active);

        // No pricing record and no stock: price 0, inactive
        let gadget = offers.iter().find(|o| o.product_id == "p-2").unwrap();
        assert_eq!(gadget.price, 0.0);
        assert_eq!(gadget.stock_quantity, 0);
        assert!(!gadget.is_active);
    }

    #[tokio::test]
    async fn one_failing_product_does_not_abort_the_rest() {
        let database = db::open_in_memory().await.unwrap();
        let account = seed_account(&database).await;

        let mut catalog = MockCatalog::default();
        catalog.products = vec![product("p-1", "Widget"), product("p-2", "Gadget")];

        let mut warehouse = MockWarehouse::default();
        warehouse.stock.insert("p-1".into(), 2);
        warehouse.fail_for.insert("p-2".into());

        let svc = service(&database, catalog, warehouse);
        let report = svc
            .sync_from_catalog(&SyncRequest::new(account.to_string()))
            .await
            .unwrap();

        assert_eq!(report.created, 1);
        assert_eq!(report.updated, 0);
        assert_eq!(report.failed, 1);
        assert_eq!(report.total, 2);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].starts_with("Product p-2:"));

        let offers = OfferRepository::new(database.clone())
            .find_all(OfferFilter::default())
            .await
            .unwrap();
        assert_eq!(offers.len(), 1);
        assert_eq!(offers[0].product_id, "p-1");
    }

    #[tokio::test]
    async fn pricing_failure_is_recorded_per_product() {
        let database = db::open_in_memory().await.unwrap();
        let account = seed_account(&database).await;

        let mut catalog = MockCatalog::default();
        catalog.products = vec![product("p-1", "Widget")];
        catalog.fail_pricing.insert("p-1".into());

        let mut warehouse = MockWarehouse::default();
        warehouse.stock.insert("p-1".into(), 2);

        let svc = service(&database, catalog, warehouse);
        let report = svc
            .sync_from_catalog(&SyncRequest::new(account.to_string()))
            .await
            .unwrap();

        assert_eq!(report.failed, 1);
        assert_eq!(report.total, 1);
        assert!(report.errors[0].contains("pricing backend down"));
    }

    #[tokio::test]
    async fn stock_drop_deactivates_offer_overriding_prior_state() {
        let database = db::open_in_memory().await.unwrap();
        let account = seed_account(&database).await;

        let mut catalog = MockCatalog::default();
        catalog.products = vec![product("p-1", "Widget")];

        let mut warehouse = MockWarehouse::default();
        warehouse.stock.insert("p-1".into(), 5);

        let svc = service(&database, catalog.clone(), warehouse);
        let request = SyncRequest::new(account.to_string());
        svc.sync_from_catalog(&request).await.unwrap();

        // Stock drains to zero upstream
        let warehouse = MockWarehouse::default();
        let svc = service(&database, catalog, warehouse);
        svc.sync_from_catalog(&request).await.unwrap();

        let offer = OfferRepository::new(database.clone())
            .find_by_account_and_product(&account, "p-1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(offer.stock_quantity, 0);
        assert!(!offer.is_active);
    }

    #[tokio::test]
    async fn title_falls_back_to_name_and_media_to_first_image() {
        let database = db::open_in_memory().await.unwrap();
        let account = seed_account(&database).await;

        let mut catalog = MockCatalog::default();
        let mut untitled = product("p-1", "internal name");
        untitled.title = None;
        catalog.products = vec![untitled];
        catalog.media.insert(
            "p-1".into(),
            vec![
                shared::catalog::MediaAsset {
                    url: "first.jpg".into(),
                    is_primary: false,
                },
                shared::catalog::MediaAsset {
                    url: "second.jpg".into(),
                    is_primary: false,
                },
            ],
        );

        let svc = service(&database, catalog, MockWarehouse::default());
        svc.sync_from_catalog(&SyncRequest::new(account.to_string()))
            .await
            .unwrap();

        let offer = OfferRepository::new(database.clone())
            .find_by_account_and_product(&account, "p-1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(offer.title, "internal name");
        assert_eq!(offer.image.as_deref(), Some("first.jpg"));
    }
}
