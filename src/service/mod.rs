//! Business logic layer

pub mod navigation;
pub mod product;
pub mod product_detail;
pub mod write_coordinator;

pub use navigation::NavigationService;
pub use product::ProductService;
pub use product_detail::ProductDetailService;
pub use write_coordinator::WriteCoordinator;
