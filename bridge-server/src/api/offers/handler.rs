//! Offer API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::db::models::{Offer, OfferCreate, OfferUpdate};
use crate::db::repository::{OfferFilter, OfferRepository};
use shared::catalog::CatalogProduct;
use shared::{AppError, AppResult, SyncReport, SyncRequest};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferListQuery {
    pub account_id: Option<String>,
    pub is_active: Option<bool>,
}

/// Offer with live catalog and stock data attached (best effort)
#[derive(Debug, Serialize)]
pub struct OfferDetail {
    #[serde(flatten)]
    pub offer: Offer,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<CatalogProduct>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
}

/// GET /api/offers - list offers, optionally filtered
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<OfferListQuery>,
) -> AppResult<Json<Vec<Offer>>> {
    let repo = OfferRepository::new(state.db.clone());
    let offers = repo
        .find_all(OfferFilter {
            account_id: query.account_id,
            is_active: query.is_active,
        })
        .await?;
    Ok(Json(offers))
}

/// GET /api/offers/:id - offer enriched with live product and stock data
///
/// Enrichment is best effort: when the catalog or warehouse is unreachable
/// the plain offer is returned and the failure is only logged.
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<OfferDetail>> {
    let repo = OfferRepository::new(state.db.clone());
    let offer = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Offer {}", id)))?;

    let mut detail = OfferDetail {
        offer,
        product: None,
        stock: None,
    };

    let product_id = detail.offer.product_id.clone();
    let live = async {
        let product = state.catalog.product_by_id(&product_id).await?;
        let stock = state.warehouse.total_available(&product_id).await?;
        Ok::<_, crate::clients::ClientError>((product, stock))
    };
    match live.await {
        Ok((product, stock)) => {
            detail.product = Some(product);
            detail.stock = Some(stock);
        }
        Err(err) => {
            tracing::warn!(
                offer = %id,
                error = %err,
                "Failed to fetch product data for offer"
            );
        }
    }

    Ok(Json(detail))
}

/// POST /api/offers
pub async fn create(
    State(state): State<ServerState>,
    Json(data): Json<OfferCreate>,
) -> AppResult<Json<Offer>> {
    let repo = OfferRepository::new(state.db.clone());
    let offer = repo.create(data).await?;
    Ok(Json(offer))
}

/// PUT /api/offers/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(data): Json<OfferUpdate>,
) -> AppResult<Json<Offer>> {
    let repo = OfferRepository::new(state.db.clone());
    let offer = repo.update(&id, data).await?;
    Ok(Json(offer))
}

/// DELETE /api/offers/:id - soft delete
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Offer>> {
    let repo = OfferRepository::new(state.db.clone());
    let offer = repo.delete(&id).await?;
    Ok(Json(offer))
}

/// POST /api/offers/sync - run one catalog→offer sync pass
pub async fn sync(
    State(state): State<ServerState>,
    Json(request): Json<SyncRequest>,
) -> AppResult<Json<SyncReport>> {
    let report = state.offer_sync().sync_from_catalog(&request).await?;
    Ok(Json(report))
}
