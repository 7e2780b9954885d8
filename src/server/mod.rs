//! Server initialization and routing

use crate::api;
use crate::config::Config;
use crate::db::{ensure_schema, ConnectionPool, QueryExecutor};
use crate::middleware::ObservabilityLayer;
use crate::repository::{
    CategoryRepositoryImpl, PageRepositoryImpl, ProductRepositoryImpl, RouteRepositoryImpl,
    SliderRepositoryImpl, SpecificationRepositoryImpl,
};
use crate::service::{NavigationService, ProductDetailService, ProductService, WriteCoordinator};
use crate::state::HasServices;
use anyhow::Result;
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

pub type CatalogProductService =
    ProductService<ProductRepositoryImpl, SliderRepositoryImpl, SpecificationRepositoryImpl>;
pub type CatalogProductDetailService =
    ProductDetailService<ProductRepositoryImpl, SliderRepositoryImpl, SpecificationRepositoryImpl>;
pub type CatalogNavigationService =
    NavigationService<PageRepositoryImpl, RouteRepositoryImpl, CategoryRepositoryImpl>;
pub type CatalogWriteCoordinator = WriteCoordinator<ProductRepositoryImpl, PageRepositoryImpl>;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub executor: QueryExecutor,
    pub product_service: Arc<CatalogProductService>,
    pub product_detail_service: Arc<CatalogProductDetailService>,
    pub navigation_service: Arc<CatalogNavigationService>,
    pub write_coordinator: Arc<CatalogWriteCoordinator>,
    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    /// Wire repositories and services over one shared pool
    pub fn new(
        config: Config,
        pool: ConnectionPool,
        prometheus_handle: Option<PrometheusHandle>,
    ) -> Self {
        let executor = QueryExecutor::new(pool);

        let product_repo = Arc::new(ProductRepositoryImpl::new(executor.clone()));
        let slider_repo = Arc::new(SliderRepositoryImpl::new(executor.clone()));
        let specification_repo = Arc::new(SpecificationRepositoryImpl::new(executor.clone()));
        let page_repo = Arc::new(PageRepositoryImpl::new(executor.clone()));
        let route_repo = Arc::new(RouteRepositoryImpl::new(executor.clone()));
        let category_repo = Arc::new(CategoryRepositoryImpl::new(executor.clone()));

        let product_service = Arc::new(ProductService::new(
            product_repo.clone(),
            slider_repo.clone(),
            specification_repo.clone(),
        ));
        let write_coordinator = Arc::new(WriteCoordinator::new(
            product_repo.clone(),
            page_repo.clone(),
        ));
        let product_detail_service = Arc::new(ProductDetailService::new(
            product_repo,
            slider_repo,
            specification_repo,
        ));
        let navigation_service = Arc::new(NavigationService::new(
            page_repo,
            route_repo,
            category_repo,
        ));

        Self {
            config: Arc::new(config),
            write_coordinator,
            executor,
            product_service,
            product_detail_service,
            navigation_service,
            prometheus_handle,
        }
    }
}

impl HasServices for AppState {
    type ProductRepo = ProductRepositoryImpl;
    type SliderRepo = SliderRepositoryImpl;
    type SpecificationRepo = SpecificationRepositoryImpl;
    type PageRepo = PageRepositoryImpl;
    type RouteRepo = RouteRepositoryImpl;
    type CategoryRepo = CategoryRepositoryImpl;

    fn product_service(
        &self,
    ) -> &ProductService<Self::ProductRepo, Self::SliderRepo, Self::SpecificationRepo> {
        &self.product_service
    }

    fn product_detail_service(
        &self,
    ) -> &ProductDetailService<Self::ProductRepo, Self::SliderRepo, Self::SpecificationRepo> {
        &self.product_detail_service
    }

    fn navigation_service(
        &self,
    ) -> &NavigationService<Self::PageRepo, Self::RouteRepo, Self::CategoryRepo> {
        &self.navigation_service
    }

    fn write_coordinator(&self) -> &WriteCoordinator<Self::ProductRepo, Self::PageRepo> {
        &self.write_coordinator
    }

    fn prometheus_handle(&self) -> Option<&PrometheusHandle> {
        self.prometheus_handle.as_ref()
    }

    async fn check_ready(&self) -> bool {
        self.executor.ping().await.is_ok()
    }
}

/// Run the HTTP server until Ctrl-C, then close the pool
pub async fn run(config: Config, prometheus_handle: Option<PrometheusHandle>) -> Result<()> {
    let pool = ConnectionPool::connect(&config.database).await?;
    info!(
        host = %config.database.host,
        database = %config.database.name,
        "Connected to database"
    );

    let state = AppState::new(config.clone(), pool.clone(), prometheus_handle);
    ensure_schema(&state.executor).await?;

    let app = build_router(state);

    let http_addr = config.http_addr();
    let listener = TcpListener::bind(&http_addr).await?;
    info!("HTTP server started on {}", http_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Build the HTTP router
pub fn build_router<S: HasServices>(state: S) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health endpoints
        .route("/health", get(api::health::health))
        .route("/ready", get(api::health::ready::<S>))
        .route("/metrics", get(api::metrics::metrics_handler::<S>))
        // Products
        .route("/create/product", post(api::product::create::<S>))
        .route("/get/products", get(api::product::list::<S>))
        .route("/get/product", get(api::product::get::<S>))
        .route("/get/productDetails", get(api::product::get_detail::<S>))
        .route("/update/product", put(api::product::update::<S>))
        .route("/delete/product", delete(api::product::delete::<S>))
        .route("/delete/productList", delete(api::product::delete_list::<S>))
        // Sliders
        .route("/create/slider", post(api::slider::create::<S>))
        .route("/update/slider", put(api::slider::update::<S>))
        .route("/delete/slider", delete(api::slider::delete::<S>))
        // Specifications
        .route("/create/specification", post(api::specification::create::<S>))
        .route("/get/specifications", get(api::specification::list::<S>))
        .route("/update/specification", put(api::specification::update::<S>))
        .route("/delete/specification", delete(api::specification::delete::<S>))
        // Pages
        .route("/create/page", post(api::page::create::<S>))
        .route("/get/page", get(api::page::get::<S>))
        .route("/update/page", put(api::page::update::<S>))
        .route("/delete/page", delete(api::page::delete::<S>))
        // Routes
        .route("/create/route", post(api::route::create::<S>))
        .route("/get/route", get(api::route::list::<S>))
        // Categories
        .route("/create/category", post(api::category::create::<S>))
        .route("/get/category", get(api::category::list::<S>))
        .route("/update/category", put(api::category::update::<S>))
        // Add middleware
        .layer(ObservabilityLayer)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Resolves on Ctrl-C, or SIGTERM on unix
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
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

    info!("Shutdown signal received");
}
