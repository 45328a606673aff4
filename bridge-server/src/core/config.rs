/// Bridge server configuration
///
/// # Environment variables
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | WORK_DIR | /var/lib/bazar/bridge | Working directory (database, logs) |
/// | HTTP_PORT | 3700 | HTTP API port |
/// | CATALOG_SERVICE_URL | http://localhost:3100 | Catalog service base url |
/// | WAREHOUSE_SERVICE_URL | http://localhost:3200 | Warehouse service base url |
/// | ORDER_SERVICE_URL | http://localhost:3300 | Central order system base url |
/// | REQUEST_TIMEOUT_MS | 30000 | Outbound request timeout (ms) |
/// | ENVIRONMENT | development | Runtime environment |
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory for the embedded database and log files
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// Runtime environment: development | staging | production
    pub environment: String,

    // === Remote platform services ===
    pub catalog_service_url: String,
    pub warehouse_service_url: String,
    pub order_service_url: String,
    /// Timeout applied to every outbound service call (milliseconds)
    pub request_timeout_ms: u64,
}

impl Config {
    /// Load configuration from environment variables, with defaults
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/bazar/bridge".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3700),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),

            catalog_service_url: std::env::var("CATALOG_SERVICE_URL")
                .unwrap_or_else(|_| "http://localhost:3100".into()),
            warehouse_service_url: std::env::var("WAREHOUSE_SERVICE_URL")
                .unwrap_or_else(|_| "http://localhost:3200".into()),
            order_service_url: std::env::var("ORDER_SERVICE_URL")
                .unwrap_or_else(|_| "http://localhost:3300".into()),
            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30000),
        }
    }

    /// Override the parts tests care about
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
