//! Offer Repository
//!
//! The (account, product_id) unique index backs the sync loop's upsert
//! decision and keeps re-runs from duplicating offers.

use super::{BaseRepository, RepoError, RepoResult, now_rfc3339, record_id, record_key};
use crate::db::models::{Offer, OfferCreate, OfferSyncData, OfferUpdate};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const OFFER_TABLE: &str = "offer";
const ACCOUNT_TABLE: &str = "account";

/// Optional filters for offer listings
#[derive(Debug, Clone, Default)]
pub struct OfferFilter {
    pub account_id: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Clone)]
pub struct OfferRepository {
    base: BaseRepository,
}

impl OfferRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self, filter: OfferFilter) -> RepoResult<Vec<Offer>> {
        let mut conditions: Vec<&str> = Vec::new();
        if filter.account_id.is_some() {
            conditions.push("account = $account");
        }
        if filter.is_active.is_some() {
            conditions.push("is_active = $is_active");
        }

        let sql = if conditions.is_empty() {
            "SELECT * FROM offer".to_string()
        } else {
            format!("SELECT * FROM offer WHERE {}", conditions.join(" AND "))
        };

        let mut query = self.base.db().query(sql);
        if let Some(account_id) = filter.account_id {
            // account is stored in its "table:id" string form
            query = query.bind(("account", record_id(ACCOUNT_TABLE, &account_id)?.to_string()));
        }
        if let Some(is_active) = filter.is_active {
            query = query.bind(("is_active", is_active));
        }

        let offers: Vec<Offer> = query.await?.take(0)?;
        Ok(offers)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Offer>> {
        let key = record_key(OFFER_TABLE, id);
        let offer: Option<Offer> = self.base.db().select((OFFER_TABLE, key)).await?;
        Ok(offer)
    }

    /// Look up the unique offer for an (account, product) pair
    pub async fn find_by_account_and_product(
        &self,
        account: &RecordId,
        product_id: &str,
    ) -> RepoResult<Option<Offer>> {
        let offers: Vec<Offer> = self
            .base
            .db()
            .query("SELECT * FROM offer WHERE account = $account AND product_id = $product_id LIMIT 1")
            .bind(("account", account.to_string()))
            .bind(("product_id", product_id.to_string()))
            .await?
            .take(0)?;
        Ok(offers.into_iter().next())
    }

    pub async fn create(&self, data: OfferCreate) -> RepoResult<Offer> {
        let stock_quantity = data.stock_quantity.unwrap_or(0);
        let offer = Offer {
            id: None,
            account: record_id(ACCOUNT_TABLE, &data.account)?,
            product_id: data.product_id,
            title: data.title,
            description: data.description,
            price: data.price.unwrap_or(0.0),
            stock_quantity,
            image: data.image,
            is_active: stock_quantity > 0,
            created_at: Some(now_rfc3339()),
            updated_at: None,
        };

        let created: Option<Offer> = self.base.db().create(OFFER_TABLE).content(offer).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create offer".to_string()))
    }

    pub async fn update(&self, id: &str, data: OfferUpdate) -> RepoResult<Offer> {
        let key = record_key(OFFER_TABLE, id);

        let mut patch = serde_json::Map::new();
        if let Some(v) = data.title {
            patch.insert("title".into(), v.into());
        }
        if let Some(v) = data.description {
            patch.insert("description".into(), v.into());
        }
        if let Some(v) = data.price {
            patch.insert("price".into(), v.into());
        }
        if let Some(v) = data.stock_quantity {
            patch.insert("stock_quantity".into(), v.into());
        }
        if let Some(v) = data.image {
            patch.insert("image".into(), v.into());
        }
        if let Some(v) = data.is_active {
            patch.insert("is_active".into(), v.into());
        }
        patch.insert("updated_at".into(), now_rfc3339().into());

        let updated: Option<Offer> = self
            .base
            .db()
            .update((OFFER_TABLE, key))
            .merge(serde_json::Value::Object(patch))
            .await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Offer {} not found", id)))
    }

    /// Soft delete
    pub async fn delete(&self, id: &str) -> RepoResult<Offer> {
        self.update(
            id,
            OfferUpdate {
                title: None,
                description: None,
                price: None,
                stock_quantity: None,
                image: None,
                is_active: Some(false),
            },
        )
        .await
    }

    /// Create an offer from one sync pass
    pub async fn create_synced(
        &self,
        account: RecordId,
        product_id: &str,
        data: OfferSyncData,
    ) -> RepoResult<Offer> {
        let offer = Offer {
            id: None,
            account,
            product_id: product_id.to_string(),
            title: data.title,
            description: data.description,
            price: data.price,
            stock_quantity: data.stock_quantity,
            image: data.image,
            is_active: data.is_active,
            created_at: Some(now_rfc3339()),
            updated_at: None,
        };

        let created: Option<Offer> = self.base.db().create(OFFER_TABLE).content(offer).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create offer".to_string()))
    }

    /// Overwrite the synced field set of an existing offer
    pub async fn update_synced(&self, id: &RecordId, data: OfferSyncData) -> RepoResult<Offer> {
        let mut patch = serde_json::to_value(&data)
            .map_err(|e| RepoError::Database(e.to_string()))?;
        if let Some(map) = patch.as_object_mut() {
            map.insert("updated_at".into(), now_rfc3339().into());
        }

        let updated: Option<Offer> = self.base.db().update(id.clone()).merge(patch).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Offer {} not found", id)))
    }
}
