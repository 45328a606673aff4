//! HTTP server bootstrap

use super::{Config, ServerState};
use crate::api;
use tower_http::trace::TraceLayer;

pub struct Server {
    config: Config,
    state: ServerState,
}

impl Server {
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self { config, state }
    }

    /// Bind the API router and serve until the process is stopped
    pub async fn run(self) -> anyhow::Result<()> {
        let app = api::router(self.state).layer(TraceLayer::new_for_http());

        let addr = format!("0.0.0.0:{}", self.config.http_port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        tracing::info!("Bridge server listening on {}", addr);

        axum::serve(listener, app).await?;
        Ok(())
    }
}
