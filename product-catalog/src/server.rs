//! HTTP server with graceful shutdown

use axum::{extract::DefaultBodyLimit, Router};
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::{
    catch_panic::CatchPanicLayer,
    compression::CompressionLayer,
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};

use crate::{
    config::Config,
    error::{panic_response, Result},
    middleware::{
        request_id_header, request_id_layer, request_id_propagation_layer,
        sensitive_headers_layer,
    },
};

/// Server instance
pub struct Server {
    config: Config,
}

impl Server {
    /// Create a new server instance
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Wrap `app` in the middleware stack
    ///
    /// Layers added later wrap the ones added before, so a request passes
    /// CORS first and the body limit last.
    pub fn with_middleware(&self, app: Router) -> Result<Router> {
        let middleware = &self.config.middleware;
        let request_id = request_id_header(&middleware.request_id_header)?;

        let mut app = app.layer(DefaultBodyLimit::max(middleware.body_limit_bytes()));

        if middleware.catch_panic {
            app = app.layer(CatchPanicLayer::custom(panic_response));
        }

        app = app
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(DefaultMakeSpan::new().include_headers(true))
                    .on_response(DefaultOnResponse::new().include_headers(true)),
            )
            .layer(sensitive_headers_layer())
            .layer(request_id_propagation_layer(request_id.clone()))
            .layer(request_id_layer(request_id));

        if middleware.compression {
            app = app.layer(CompressionLayer::new());
        }

        Ok(app.layer(self.build_cors_layer()))
    }

    /// Run the server with the given router until SIGINT or SIGTERM
    pub async fn serve(self, app: Router) -> Result<()> {
        let addr = self.config.bind_addr();
        let app = self.with_middleware(app)?;

        self.log_middleware_config();

        let listener = TcpListener::bind(addr).await?;
        let local = listener.local_addr()?;

        tracing::info!("Server listening on {}", local);
        tracing::info!("Server running on http://localhost:{}", local.port());
        if self.config.docs.enabled {
            tracing::info!(
                "Swagger docs: http://localhost:{}{}",
                local.port(),
                self.config.docs.path
            );
        }

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }

    /// Log middleware configuration for debugging
    fn log_middleware_config(&self) {
        let middleware = &self.config.middleware;
        tracing::info!("Middleware configuration:");
        tracing::info!("  - Panic recovery: {}", middleware.catch_panic);
        tracing::info!("  - Request ID header: {}", middleware.request_id_header);
        tracing::info!("  - Request body limit: {} KB", middleware.body_limit_kb);
        tracing::info!("  - Compression: {}", middleware.compression);
        tracing::info!("  - CORS mode: {}", middleware.cors_mode);
    }

    /// Build CORS layer based on configuration
    fn build_cors_layer(&self) -> CorsLayer {
        match self.config.middleware.cors_mode.as_str() {
            "permissive" => {
                tracing::debug!("Enabling permissive CORS");
                CorsLayer::permissive()
            }
            "restrictive" => {
                tracing::debug!("Enabling restrictive CORS (default deny)");
                CorsLayer::new()
            }
            "disabled" => {
                tracing::debug!("CORS disabled (using restrictive)");
                CorsLayer::new()
            }
            other => {
                tracing::warn!("Unknown CORS mode: {}, defaulting to permissive", other);
                CorsLayer::permissive()
            }
        }
    }
}

/// Wait for shutdown signal (SIGTERM or SIGINT)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl+C), starting graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        },
    }

    tracing::info!("Shutdown signal received, draining requests...");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_creation() {
        let config = Config::default();
        let server = Server::new(config.clone());
        assert_eq!(server.config().service.port, config.service.port);
    }

    #[test]
    fn test_invalid_request_id_header_is_rejected() {
        let mut config = Config::default();
        config.middleware.request_id_header = "not a header".to_string();

        let result = Server::new(config).with_middleware(Router::new());
        assert!(result.is_err());
    }
}
