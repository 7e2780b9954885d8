//! Data access layer (Repository pattern)

pub mod category;
pub mod page;
pub mod product;
pub mod route;
pub mod slider;
pub mod specification;

pub use category::{CategoryRepository, CategoryRepositoryImpl};
pub use page::{PageRepository, PageRepositoryImpl};
pub use product::{ProductRepository, ProductRepositoryImpl};
pub use route::{RouteRepository, RouteRepositoryImpl};
pub use slider::{SliderRepository, SliderRepositoryImpl};
pub use specification::{SpecificationRepository, SpecificationRepositoryImpl};

#[cfg(test)]
pub use category::MockCategoryRepository;
#[cfg(test)]
pub use page::MockPageRepository;
#[cfg(test)]
pub use product::MockProductRepository;
#[cfg(test)]
pub use route::MockRouteRepository;
#[cfg(test)]
pub use slider::MockSliderRepository;
#[cfg(test)]
pub use specification::MockSpecificationRepository;
