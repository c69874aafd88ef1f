//! ServerBuilder for fluent API to build HTTP servers

use super::handlers::AppState;
use super::router::{build_api_routes, health_routes};
use crate::config::NavoraConfig;
use crate::core::auth::{AuthProvider, DemoAuthProvider};
use crate::core::contact::ContactService;
use crate::core::dashboard::DashboardSnapshot;
use crate::core::demo::{DemoResponder, ScriptedDemoResponder};
use crate::core::service::CatalogService;
use crate::core::upload::{SimulatedUploadService, UploadService};
use crate::storage::{InMemoryCatalogService, InMemoryInbox};
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Builder for the marketplace HTTP server
///
/// Every service is optional; anything not set is built from the
/// configuration (in-memory catalog, demo auth, scripted demos).
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_config(NavoraConfig::from_yaml_file("navora.yaml")?)
///     .build()?;
/// ```
pub struct ServerBuilder {
    config: NavoraConfig,
    catalog: Option<Arc<dyn CatalogService>>,
    demo: Option<Arc<dyn DemoResponder>>,
    auth: Option<Arc<dyn AuthProvider>>,
    contact: Option<Arc<dyn ContactService>>,
    uploads: Option<Arc<dyn UploadService>>,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder with the default configuration
    pub fn new() -> Self {
        Self {
            config: NavoraConfig::default(),
            catalog: None,
            demo: None,
            auth: None,
            contact: None,
            uploads: None,
            custom_routes: Vec::new(),
        }
    }

    pub fn with_config(mut self, config: NavoraConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_catalog_service(mut self, service: impl CatalogService + 'static) -> Self {
        self.catalog = Some(Arc::new(service));
        self
    }

    pub fn with_demo_responder(mut self, responder: impl DemoResponder + 'static) -> Self {
        self.demo = Some(Arc::new(responder));
        self
    }

    pub fn with_auth_provider(mut self, provider: impl AuthProvider + 'static) -> Self {
        self.auth = Some(Arc::new(provider));
        self
    }

    /// Keep a handle on the contact service to inspect submissions
    pub fn with_contact_service(mut self, service: Arc<dyn ContactService>) -> Self {
        self.contact = Some(service);
        self
    }

    pub fn with_upload_service(mut self, service: impl UploadService + 'static) -> Self {
        self.uploads = Some(Arc::new(service));
        self
    }

    /// Add custom routes to the server
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the shared handler state, filling gaps from the configuration
    pub fn build_state(&mut self) -> Result<AppState> {
        let latency = &self.config.latency;

        let catalog = match self.catalog.take() {
            Some(catalog) => catalog,
            None => {
                let seed = self.config.load_catalog()?;
                tracing::info!(listings = seed.listings.len(), "catalog loaded");
                Arc::new(InMemoryCatalogService::new(seed).with_latency(latency.catalog()))
            }
        };

        Ok(AppState {
            catalog,
            demo: self
                .demo
                .take()
                .unwrap_or_else(|| Arc::new(ScriptedDemoResponder::new(latency.demo()))),
            auth: self
                .auth
                .take()
                .unwrap_or_else(|| Arc::new(DemoAuthProvider::new(latency.auth()))),
            contact: self
                .contact
                .take()
                .unwrap_or_else(|| {
                    Arc::new(
                        InMemoryInbox::with_capacity(self.config.contact.inbox_capacity)
                            .with_latency(latency.contact()),
                    )
                }),
            uploads: self
                .uploads
                .take()
                .unwrap_or_else(|| Arc::new(SimulatedUploadService::new(latency.upload()))),
            dashboard: Arc::new(DashboardSnapshot::sample()?),
        })
    }

    /// Build the final router
    ///
    /// Health routes, the API, then custom routes, wrapped in request
    /// tracing and a permissive CORS layer.
    pub fn build(mut self) -> Result<Router> {
        let state = self.build_state()?;
        let mut app = health_routes().merge(build_api_routes(state));

        for custom_router in std::mem::take(&mut self.custom_routes) {
            app = app.merge(custom_router);
        }

        Ok(app
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()))
    }

    /// Serve the application with graceful shutdown
    ///
    /// Binds to the configured host and port and stops on SIGTERM or
    /// Ctrl+C.
    pub async fn serve(self) -> Result<()> {
        let addr = self.config.bind_addr()?;
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for Ctrl+C");
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
                tracing::warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::CatalogSeed;

    #[test]
    fn test_new_creates_empty_builder() {
        let builder = ServerBuilder::new();
        assert!(builder.catalog.is_none());
        assert!(builder.custom_routes.is_empty());
        assert_eq!(builder.config, NavoraConfig::default());
    }

    #[test]
    fn test_build_state_fills_defaults() {
        let mut builder = ServerBuilder::new();
        let state = builder.build_state().expect("state should build");
        assert_eq!(state.dashboard.stats.total_sales, 152);
        assert!(builder.catalog.is_none());
    }

    #[tokio::test]
    async fn test_build_state_keeps_injected_catalog() {
        let mut seed = CatalogSeed::sample().unwrap();
        seed.listings.truncate(2);
        seed.reviews.retain(|r| r.agent_id == "1" || r.agent_id == "2");

        let mut builder =
            ServerBuilder::new().with_catalog_service(InMemoryCatalogService::new(seed));
        let state = builder.build_state().unwrap();
        assert_eq!(state.catalog.list().await.unwrap().len(), 2);
    }

    #[test]
    fn test_missing_catalog_file_fails_build() {
        let mut config = NavoraConfig::default();
        config.catalog.path = Some("/nonexistent/catalog.yaml".to_string());
        let result = ServerBuilder::new().with_config(config).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_with_custom_routes_appends_router() {
        let builder = ServerBuilder::new()
            .with_custom_routes(Router::new())
            .with_custom_routes(Router::new());
        assert_eq!(builder.custom_routes.len(), 2);
    }
}
