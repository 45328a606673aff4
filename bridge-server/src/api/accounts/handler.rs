//! Account API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::models::{Account, AccountCreate, AccountUpdate};
use crate::db::repository::AccountRepository;
use shared::{AppError, AppResult};

/// GET /api/accounts - list active accounts
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Account>>> {
    let repo = AccountRepository::new(state.db.clone());
    let accounts = repo.find_active().await?;
    Ok(Json(accounts))
}

/// GET /api/accounts/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Account>> {
    let repo = AccountRepository::new(state.db.clone());
    let account = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Account {}", id)))?;
    Ok(Json(account))
}

/// POST /api/accounts
pub async fn create(
    State(state): State<ServerState>,
    Json(data): Json<AccountCreate>,
) -> AppResult<Json<Account>> {
    if data.name.trim().is_empty() {
        return Err(AppError::validation("name is required"));
    }

    let repo = AccountRepository::new(state.db.clone());
    let account = repo.create(data).await?;
    Ok(Json(account))
}

/// PUT /api/accounts/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(data): Json<AccountUpdate>,
) -> AppResult<Json<Account>> {
    let repo = AccountRepository::new(state.db.clone());
    let account = repo.update(&id, data).await?;
    Ok(Json(account))
}

/// DELETE /api/accounts/:id - soft delete
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Account>> {
    let repo = AccountRepository::new(state.db.clone());
    let account = repo.delete(&id).await?;
    Ok(Json(account))
}
