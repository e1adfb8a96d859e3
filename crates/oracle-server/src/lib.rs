mod cors;
mod health;

use std::net::SocketAddr;

use axum::Router;
use oracle_config::{Config, ProviderKind};
use oracle_llm::OracleState;
use tower_http::trace::TraceLayer;

/// Assembled server with all routes and middleware
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
}

impl Server {
    /// Build the server from configuration
    ///
    /// Missing provider credentials are not an error here; they are checked
    /// again on every request.
    ///
    /// # Errors
    ///
    /// Returns an error if the CORS header values are invalid or the
    /// oracle state cannot be built
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let listen_address = config
            .server
            .listen_address
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

        log_available_providers(&config);

        let cors = cors::CorsHeaders::from_config(&config.server.cors)?;
        let oracle_path = config.oracle.path.clone();
        let oracle_state = OracleState::from_config(config.oracle)?;

        let mut app = Router::new();

        // Health check
        if config.server.health.enabled {
            app = app.route(&config.server.health.path, axum::routing::get(health::health_handler));
        }

        // Oracle route, with CORS headers on every response
        app = app.merge(cors.apply(oracle_llm::oracle_router(oracle_state)));
        tracing::debug!(path = %oracle_path, "oracle route mounted");

        // Tracing
        app = app.layer(TraceLayer::new_for_http());

        Ok(Self {
            router: app,
            listen_address,
        })
    }

    /// Get the configured listen address
    #[must_use]
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving requests
    ///
    /// Blocks until the cancellation token is triggered.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the TCP listener or serving fails
    pub async fn serve(self, shutdown: tokio_util::sync::CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
            })
            .await?;

        Ok(())
    }
}

fn log_available_providers(config: &Config) {
    let available = config.oracle.credentials().available();

    if available.is_empty() {
        tracing::warn!("no AI provider configured, oracle requests will fail until GROQ_API_KEY or GEMINI_API_KEY is set");
        return;
    }

    let providers: Vec<&str> = available.into_iter().map(ProviderKind::as_str).collect();
    tracing::info!(
        providers = %providers.join(","),
        primary_weight = config.oracle.primary_weight,
        "oracle providers available"
    );
}
