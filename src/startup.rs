//! Application Startup
//!
//! Application building, server initialization and graceful shutdown.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::Router;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::compression::CompressionLayer;

use crate::application::services::{
    CategoryService, CategoryServiceImpl, ProductService, ProductServiceImpl,
};
use crate::config::{CorsSettings, Settings};
use crate::infrastructure::database;
use crate::infrastructure::repositories::{PgCategoryRepository, PgProductRepository};
use crate::presentation::http::{handlers, routes};
use crate::presentation::middleware::{cors, logging};
use crate::shared::context::RequestContext;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub category_service: Arc<dyn CategoryService>,
    pub product_service: Arc<dyn ProductService>,
    /// Deadline given to each request context
    pub request_timeout: Duration,
    /// Cancelled once the shutdown grace period runs out
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(
        category_service: Arc<dyn CategoryService>,
        product_service: Arc<dyn ProductService>,
        request_timeout: Duration,
    ) -> Self {
        Self {
            category_service,
            product_service,
            request_timeout,
            shutdown: CancellationToken::new(),
        }
    }

    /// Context for one request: child of the shutdown token, bounded by the request timeout.
    pub fn request_context(&self) -> RequestContext {
        RequestContext::new(self.shutdown.child_token()).with_timeout(self.request_timeout)
    }
}

/// Application instance
pub struct Application {
    listener: TcpListener,
    router: Router,
    db: PgPool,
    shutdown: CancellationToken,
    shutdown_timeout: Duration,
}

impl Application {
    /// Build the application from settings
    pub async fn build(settings: Settings) -> Result<Self> {
        handlers::health::init_server_start();

        let db = database::create_pool(&settings.database).await?;
        tracing::info!(
            max_connections = settings.database.max_connections,
            "Database connection pool created"
        );

        let category_repo = Arc::new(PgCategoryRepository::new(db.clone()));
        let product_repo = Arc::new(PgProductRepository::new(db.clone()));

        let category_service: Arc<dyn CategoryService> =
            Arc::new(CategoryServiceImpl::new(category_repo.clone()));
        let product_service: Arc<dyn ProductService> =
            Arc::new(ProductServiceImpl::new(product_repo, category_repo));

        let state = AppState::new(
            category_service,
            product_service,
            settings.server.request_timeout(),
        );
        let shutdown = state.shutdown.clone();

        let router = with_middleware(routes::create_router(state, db.clone()), &settings.cors);

        let addr = settings.server.socket_addr()?;
        let listener = TcpListener::bind(addr).await?;
        tracing::info!("Listening on {}", listener.local_addr()?);

        Ok(Self {
            listener,
            router,
            db,
            shutdown,
            shutdown_timeout: settings.server.shutdown_timeout(),
        })
    }

    /// Run the server until a shutdown signal arrives and in-flight requests drain
    pub async fn run_until_stopped(self) -> Result<()> {
        let shutdown = self.shutdown.clone();
        let grace = self.shutdown_timeout;

        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown_signal().await;
                tracing::info!(
                    grace_secs = grace.as_secs(),
                    "Shutdown signal received, draining in-flight requests"
                );
                tokio::spawn(async move {
                    tokio::time::sleep(grace).await;
                    tracing::warn!("Shutdown grace period elapsed, cancelling in-flight requests");
                    shutdown.cancel();
                });
            })
            .await?;

        self.shutdown.cancel();
        self.db.close().await;
        tracing::info!("Database connection pool closed");
        Ok(())
    }

    /// Get the bound address
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}

/// Wrap the router in compression, request tracing and CORS (outermost).
fn with_middleware(router: Router, cors_settings: &CorsSettings) -> Router {
    router
        .layer(CompressionLayer::new())
        .layer(logging::create_trace_layer())
        .layer(cors::create_cors_layer(cors_settings))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
