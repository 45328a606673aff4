//! Bazar Bridge Server - marketplace channel integration
//!
//! Bridges the bazar marketplace channel against the central platform:
//!
//! - **Offer sync** (`services::offer_sync`): reconciles catalog products,
//!   pricing, media and live stock into channel offers
//! - **Order forwarding** (`services::order_forward`): submits captured
//!   channel orders to the central order system
//! - **Webhook ingestion** (`services::webhook`): accepts channel-pushed
//!   order events idempotently
//!
//! # Module structure
//!
//! ```text
//! bridge-server/src/
//! ├── core/          # configuration, state, server bootstrap
//! ├── clients/       # catalog / warehouse / order system ports
//! ├── db/            # embedded SurrealDB models and repositories
//! ├── services/      # sync, forwarding and ingestion logic
//! ├── api/           # HTTP routes and handlers
//! └── utils/         # logging
//! ```

pub mod api;
pub mod clients;
pub mod core;
pub mod db;
pub mod services;
pub mod utils;

// Re-export public types
pub use crate::core::{Config, Server, ServerState};
pub use utils::{init_logger, init_logger_with_file};

/// Load .env, prepare the working directory and start logging
pub fn setup_environment() -> std::io::Result<()> {
    dotenv::dotenv().ok();

    let work_dir = std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/bazar/bridge".into());
    let log_dir = format!("{work_dir}/logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_level = std::env::var("LOG_LEVEL").ok();
    init_logger_with_file(log_level.as_deref(), Some(&log_dir));

    Ok(())
}
