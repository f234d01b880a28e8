//! ServerBuilder for fluent API to build HTTP servers

use super::handlers::AppState;
use super::links::ResourceLinks;
use super::router::build_api_routes;
use crate::config::LibraryConfig;
use crate::core::repository::CourseLibraryRepository;
use crate::entities::default_property_mappings;
use crate::mapping::PropertyMappingService;
use crate::storage::InMemoryCourseLibraryRepository;
use anyhow::{Context, Result};
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builder for the course library HTTP server
///
/// Everything is optional: without a repository an empty in-memory one is
/// used, and without a mapping service the default author and course
/// mappings are registered.
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_config(LibraryConfig::from_yaml_file("library.yaml")?)
///     .with_repository(InMemoryCourseLibraryRepository::new())
///     .build()?;
/// ```
pub struct ServerBuilder {
    config: LibraryConfig,
    repository: Option<Arc<dyn CourseLibraryRepository>>,
    mappings: Option<PropertyMappingService>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder
    pub fn new() -> Self {
        Self {
            config: LibraryConfig::default(),
            repository: None,
            mappings: None,
        }
    }

    /// Use the given configuration
    pub fn with_config(mut self, config: LibraryConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the repository
    pub fn with_repository(mut self, repository: impl CourseLibraryRepository + 'static) -> Self {
        self.repository = Some(Arc::new(repository));
        self
    }

    /// Replace the default property mappings
    pub fn with_mappings(mut self, mappings: PropertyMappingService) -> Self {
        self.mappings = Some(mappings);
        self
    }

    /// Build the shared handler state
    pub fn build_state(self) -> Result<AppState> {
        let mappings = match self.mappings {
            Some(mappings) => mappings,
            None => default_property_mappings().context("registering default property mappings")?,
        };
        let links = ResourceLinks::new(&self.config.server.public_base_url)
            .with_context(|| {
                format!(
                    "invalid public base url '{}'",
                    self.config.server.public_base_url
                )
            })?;
        let repository = self
            .repository
            .unwrap_or_else(|| Arc::new(InMemoryCourseLibraryRepository::new()));

        Ok(AppState {
            repository,
            mappings: Arc::new(mappings),
            config: Arc::new(self.config),
            links: Arc::new(links),
        })
    }

    /// Build the final REST router
    pub fn build(self) -> Result<Router> {
        Ok(build_api_routes(self.build_state()?))
    }

    /// Serve the application with graceful shutdown
    ///
    /// This will:
    /// - Bind to the configured address
    /// - Start serving requests
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    pub async fn serve(self) -> Result<()> {
        let addr = self.config.bind_address();
        let app = self.build()?;
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("binding {}", addr))?;

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
            tracing::error!("failed to install Ctrl+C handler: {}", e);
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
                tracing::error!("failed to install SIGTERM handler: {}", e);
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
