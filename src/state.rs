//! Application state traits for dependency injection
//!
//! Handlers are generic over [`HasServices`], so the same router runs over
//! the MySQL-backed `AppState` in production and over in-memory
//! repositories in tests.

use crate::repository::{
    CategoryRepository, PageRepository, ProductRepository, RouteRepository, SliderRepository,
    SpecificationRepository,
};
use crate::service::{NavigationService, ProductDetailService, ProductService, WriteCoordinator};
use metrics_exporter_prometheus::PrometheusHandle;

/// Trait for application state that provides access to all services.
pub trait HasServices: Clone + Send + Sync + 'static {
    type ProductRepo: ProductRepository + 'static;
    type SliderRepo: SliderRepository + 'static;
    type SpecificationRepo: SpecificationRepository + 'static;
    type PageRepo: PageRepository + 'static;
    type RouteRepo: RouteRepository + 'static;
    type CategoryRepo: CategoryRepository + 'static;

    fn product_service(
        &self,
    ) -> &ProductService<Self::ProductRepo, Self::SliderRepo, Self::SpecificationRepo>;

    fn product_detail_service(
        &self,
    ) -> &ProductDetailService<Self::ProductRepo, Self::SliderRepo, Self::SpecificationRepo>;

    fn navigation_service(
        &self,
    ) -> &NavigationService<Self::PageRepo, Self::RouteRepo, Self::CategoryRepo>;

    fn write_coordinator(&self) -> &WriteCoordinator<Self::ProductRepo, Self::PageRepo>;

    /// Renderer for `/metrics`; `None` when metrics are disabled
    fn prometheus_handle(&self) -> Option<&PrometheusHandle>;

    /// Whether the store answers; drives `/ready`
    fn check_ready(&self) -> impl std::future::Future<Output = bool> + Send;
}
