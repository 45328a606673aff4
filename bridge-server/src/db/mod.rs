//! Database Module
//!
//! Embedded SurrealDB: RocksDB-backed in production, in-memory for tests.

pub mod models;
pub mod repository;

use shared::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

const NAMESPACE: &str = "bazar";
const DATABASE: &str = "bridge";

/// Open the persistent database under `{work_dir}/data`
pub async fn open(work_dir: &str) -> Result<Surreal<Db>, AppError> {
    let path = format!("{}/data", work_dir);
    let db = Surreal::new::<RocksDb>(path.as_str())
        .await
        .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;
    init(&db).await?;
    tracing::info!(path = %path, "Database opened");
    Ok(db)
}

/// Open an in-memory database (tests, local experiments)
pub async fn open_in_memory() -> Result<Surreal<Db>, AppError> {
    let db = Surreal::new::<Mem>(())
        .await
        .map_err(|e| AppError::database(format!("Failed to open in-memory database: {e}")))?;
    init(&db).await?;
    Ok(db)
}

async fn init(db: &Surreal<Db>) -> Result<(), AppError> {
    db.use_ns(NAMESPACE)
        .use_db(DATABASE)
        .await
        .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;
    define_schema(db).await
}

/// Declare the unique indexes the sync and ingestion paths rely on
async fn define_schema(db: &Surreal<Db>) -> Result<(), AppError> {
    db.query(
        "DEFINE INDEX IF NOT EXISTS uniq_offer_account_product \
         ON TABLE offer FIELDS account, product_id UNIQUE",
    )
    .await
    .map_err(|e| AppError::database(format!("Failed to define offer index: {e}")))?
    .check()
    .map_err(|e| AppError::database(format!("Failed to define offer index: {e}")))?;

    db.query(
        "DEFINE INDEX IF NOT EXISTS uniq_order_external_id \
         ON TABLE channel_order FIELDS external_order_id UNIQUE",
    )
    .await
    .map_err(|e| AppError::database(format!("Failed to define order index: {e}")))?
    .check()
    .map_err(|e| AppError::database(format!("Failed to define order index: {e}")))?;

    Ok(())
}
