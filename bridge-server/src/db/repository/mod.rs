//! Repository Module
//!
//! CRUD operations for the bridge's SurrealDB tables.

pub mod account;
pub mod offer;
pub mod order;

// Re-exports
pub use account::AccountRepository;
pub use offer::{OfferFilter, OfferRepository};
pub use order::{OrderFilter, OrderRepository};

use shared::AppError;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        let message = err.to_string();
        // Unique index violations surface as "index ... already contains ..."
        if message.contains("already contains") {
            RepoError::Duplicate(message)
        } else {
            RepoError::Database(message)
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Duplicate(msg) => AppError::Conflict(msg),
            RepoError::Database(msg) => AppError::Database(msg),
            RepoError::Validation(msg) => AppError::Validation(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Parse an id that may arrive as "table:key" or as a bare key
pub fn record_id(table: &str, id: &str) -> RepoResult<RecordId> {
    if id.contains(':') {
        let parsed: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid id: {}", id)))?;
        if parsed.table() != table {
            return Err(RepoError::Validation(format!(
                "Expected {} id, got: {}",
                table, id
            )));
        }
        Ok(parsed)
    } else {
        Ok(RecordId::from_table_key(table, id))
    }
}

/// Strip a "table:" prefix from an id if present
pub fn record_key<'a>(table: &str, id: &'a str) -> &'a str {
    id.strip_prefix(table)
        .and_then(|rest| rest.strip_prefix(':'))
        .unwrap_or(id)
}

/// Current timestamp in the RFC3339 form the models store
pub fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}
