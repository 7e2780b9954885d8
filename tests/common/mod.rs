//! Common test utilities
//!
//! In-memory repositories stand in for MySQL behind the repository traits.
//! They share one [`TestStore`] so that deletes reach dependent rows the way
//! the schema's cascades do, and they log every call so tests can assert
//! which reads happened.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use catalog_core::domain::{
    BatchDeleteReport, Category, CreateCategoryInput, CreatePageInput, CreateProductInput,
    CreateRouteInput, CreateSliderInput, CreateSpecificationInput, Page, PageDeleteReport,
    Product, ProductImageSlider, Route, Specification, StringUuid, UpdateCategoryInput,
    UpdatePageInput, UpdateProductInput, UpdateSliderInput, UpdateSpecificationInput,
};
use catalog_core::error::{AppError, Result};
use catalog_core::repository::{
    CategoryRepository, PageRepository, ProductRepository, RouteRepository, SliderRepository,
    SpecificationRepository,
};
use catalog_core::server::build_router;
use catalog_core::service::{
    NavigationService, ProductDetailService, ProductService, WriteCoordinator,
};
use catalog_core::state::HasServices;
use metrics_exporter_prometheus::PrometheusHandle;
use rust_decimal::Decimal;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::RwLock;
use tower::ServiceExt;

// ============================================================================
// In-memory store
// ============================================================================

pub struct TestStore {
    pub products: RwLock<Vec<Product>>,
    pub sliders: RwLock<Vec<ProductImageSlider>>,
    pub specifications: RwLock<Vec<Specification>>,
    pub pages: RwLock<Vec<Page>>,
    pub routes: RwLock<Vec<Route>>,
    pub categories: RwLock<Vec<Category>>,
    next_id: AtomicI64,
    calls: Mutex<Vec<String>>,
    unavailable: AtomicBool,
}

impl TestStore {
    pub fn new() -> Self {
        Self {
            products: RwLock::new(vec![]),
            sliders: RwLock::new(vec![]),
            specifications: RwLock::new(vec![]),
            pages: RwLock::new(vec![]),
            routes: RwLock::new(vec![]),
            categories: RwLock::new(vec![]),
            next_id: AtomicI64::new(1),
            calls: Mutex::new(vec![]),
            unavailable: AtomicBool::new(false),
        }
    }

    /// Make every later call fail the way an unreachable database does
    pub fn go_down(&self) {
        self.unavailable.store(true, Ordering::SeqCst);
    }

    pub fn is_up(&self) -> bool {
        !self.unavailable.load(Ordering::SeqCst)
    }

    /// Repository calls in order, as `"<repository>.<method>"`
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn enter(&self, call: &str) -> Result<()> {
        self.calls.lock().unwrap().push(call.to_string());
        if self.is_up() {
            Ok(())
        } else {
            Err(AppError::QueryFailed(sqlx::Error::Protocol(
                "Table 'testdb.products' doesn't exist".to_string(),
            )))
        }
    }

    fn next_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    pub async fn add_product(&self, name: &str) -> Product {
        let product = Product {
            id: self.next_id(),
            name: name.to_string(),
            price: Decimal::new(1999, 2),
            ..Default::default()
        };
        self.products.write().await.push(product.clone());
        product
    }

    pub async fn add_slider(&self, product_id: i64) -> ProductImageSlider {
        let slider = ProductImageSlider {
            id: self.next_id(),
            product_id,
            images: vec!["front.jpg".to_string(), "back.jpg".to_string()],
            pagination_type: Some("dots".to_string()),
            ..Default::default()
        };
        self.sliders.write().await.push(slider.clone());
        slider
    }

    pub async fn add_specification(&self, product_id: i64, title: &str, value: &str) {
        let specification = Specification {
            id: self.next_id(),
            product_id,
            title: title.to_string(),
            value: value.to_string(),
        };
        self.specifications.write().await.push(specification);
    }
}

impl Default for TestStore {
    fn default() -> Self {
        Self::new()
    }
}

fn count_removed<T>(rows: &mut Vec<T>, remove: impl Fn(&T) -> bool) -> u64 {
    let before = rows.len();
    rows.retain(|row| !remove(row));
    (before - rows.len()) as u64
}

// ============================================================================
// Test repositories
// ============================================================================

pub struct TestProductRepository(pub Arc<TestStore>);

#[async_trait]
impl ProductRepository for TestProductRepository {
    async fn create(&self, input: &CreateProductInput) -> Result<Product> {
        self.0.enter("products.create")?;
        let product = Product {
            id: self.0.next_id(),
            name: input.name.clone(),
            price: input.price,
            image: input.image.clone(),
            styles: input.styles.clone(),
        };
        self.0.products.write().await.push(product.clone());
        Ok(product)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Product>> {
        self.0.enter("products.find_by_id")?;
        let products = self.0.products.read().await;
        Ok(products.iter().find(|p| p.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<Product>> {
        self.0.enter("products.list")?;
        let mut products = self.0.products.read().await.clone();
        products.sort_by_key(|p| p.id);
        Ok(products)
    }

    async fn update(&self, input: &UpdateProductInput) -> Result<Product> {
        self.0.enter("products.update")?;
        let mut products = self.0.products.write().await;
        let product = products
            .iter_mut()
            .find(|p| p.id == input.id)
            .ok_or_else(|| AppError::NotFound(format!("Product {} not found", input.id)))?;
        product.name = input.name.clone();
        product.price = input.price;
        product.image = input.image.clone();
        product.styles = input.styles.clone();
        Ok(product.clone())
    }

    async fn delete_with_dependents(&self, ids: &[i64]) -> Result<BatchDeleteReport> {
        self.0.enter("products.delete_with_dependents")?;
        let sliders_deleted =
            count_removed(&mut *self.0.sliders.write().await, |s| ids.contains(&s.product_id));
        let specifications_deleted = count_removed(&mut *self.0.specifications.write().await, |s| {
            ids.contains(&s.product_id)
        });
        let products_deleted =
            count_removed(&mut *self.0.products.write().await, |p| ids.contains(&p.id));
        Ok(BatchDeleteReport {
            requested: ids.to_vec(),
            sliders_deleted,
            specifications_deleted,
            products_deleted,
        })
    }
}

pub struct TestSliderRepository(pub Arc<TestStore>);

#[async_trait]
impl SliderRepository for TestSliderRepository {
    async fn create(&self, input: &CreateSliderInput) -> Result<ProductImageSlider> {
        self.0.enter("sliders.create")?;
        let mut sliders = self.0.sliders.write().await;
        // UNIQUE (productId)
        if sliders.iter().any(|s| s.product_id == input.product_id) {
            return Err(AppError::Conflict(format!(
                "Duplicate entry '{}' for key 'productId'",
                input.product_id
            )));
        }
        let slider = ProductImageSlider {
            id: self.0.next_id(),
            product_id: input.product_id,
            images: input.images.clone(),
            pagination_type: input.pagination_type.clone(),
            slider_styles: input.slider_styles.clone(),
            image_styles: input.image_styles.clone(),
        };
        sliders.push(slider.clone());
        Ok(slider)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ProductImageSlider>> {
        self.0.enter("sliders.find_by_id")?;
        let sliders = self.0.sliders.read().await;
        Ok(sliders.iter().find(|s| s.id == id).cloned())
    }

    async fn find_by_product(&self, product_id: i64) -> Result<Option<ProductImageSlider>> {
        self.0.enter("sliders.find_by_product")?;
        let sliders = self.0.sliders.read().await;
        Ok(sliders.iter().find(|s| s.product_id == product_id).cloned())
    }

    async fn update(&self, input: &UpdateSliderInput) -> Result<ProductImageSlider> {
        self.0.enter("sliders.update")?;
        let mut sliders = self.0.sliders.write().await;
        let slider = sliders
            .iter_mut()
            .find(|s| s.id == input.id && s.product_id == input.product_id)
            .ok_or_else(|| AppError::NotFound(format!("Slider {} not found", input.id)))?;
        slider.images = input.images.clone();
        slider.pagination_type = input.pagination_type.clone();
        slider.slider_styles = input.slider_styles.clone();
        slider.image_styles = input.image_styles.clone();
        Ok(slider.clone())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        self.0.enter("sliders.delete")?;
        match count_removed(&mut *self.0.sliders.write().await, |s| s.id == id) {
            0 => Err(AppError::NotFound(format!("Slider {} not found", id))),
            _ => Ok(()),
        }
    }
}

pub struct TestSpecificationRepository(pub Arc<TestStore>);

#[async_trait]
impl SpecificationRepository for TestSpecificationRepository {
    async fn create(&self, input: &CreateSpecificationInput) -> Result<Specification> {
        self.0.enter("specifications.create")?;
        let specification = Specification {
            id: self.0.next_id(),
            product_id: input.product_id,
            title: input.title.clone(),
            value: input.value.clone(),
        };
        self.0
            .specifications
            .write()
            .await
            .push(specification.clone());
        Ok(specification)
    }

    async fn list_by_product(&self, product_id: i64) -> Result<Vec<Specification>> {
        self.0.enter("specifications.list_by_product")?;
        let specifications = self.0.specifications.read().await;
        Ok(specifications
            .iter()
            .filter(|s| s.product_id == product_id)
            .cloned()
            .collect())
    }

    async fn update(&self, input: &UpdateSpecificationInput) -> Result<Specification> {
        self.0.enter("specifications.update")?;
        let mut specifications = self.0.specifications.write().await;
        let specification = specifications
            .iter_mut()
            .find(|s| s.id == input.id && s.product_id == input.product_id)
            .ok_or_else(|| AppError::NotFound(format!("Specification {} not found", input.id)))?;
        specification.title = input.title.clone();
        specification.value = input.value.clone();
        Ok(specification.clone())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        self.0.enter("specifications.delete")?;
        match count_removed(&mut *self.0.specifications.write().await, |s| s.id == id) {
            0 => Err(AppError::NotFound(format!("Specification {} not found", id))),
            _ => Ok(()),
        }
    }
}

pub struct TestPageRepository(pub Arc<TestStore>);

#[async_trait]
impl PageRepository for TestPageRepository {
    async fn create(&self, input: &CreatePageInput) -> Result<Page> {
        self.0.enter("pages.create")?;
        let page = Page {
            node_guid: StringUuid::new_v4(),
            page_name: input.page_name.clone(),
            path: input.path.clone(),
            route_type: input.route_type.clone(),
            app_screen_name: input.app_screen_name.clone(),
        };
        self.0.pages.write().await.push(page.clone());
        Ok(page)
    }

    async fn find_by_id(&self, node_guid: StringUuid) -> Result<Option<Page>> {
        self.0.enter("pages.find_by_id")?;
        let pages = self.0.pages.read().await;
        Ok(pages.iter().find(|p| p.node_guid == node_guid).cloned())
    }

    async fn list(&self) -> Result<Vec<Page>> {
        self.0.enter("pages.list")?;
        let mut pages = self.0.pages.read().await.clone();
        pages.sort_by(|a, b| a.page_name.cmp(&b.page_name));
        Ok(pages)
    }

    async fn update(&self, input: &UpdatePageInput) -> Result<Page> {
        self.0.enter("pages.update")?;
        let mut pages = self.0.pages.write().await;
        let page = pages
            .iter_mut()
            .find(|p| p.node_guid == input.node_guid)
            .ok_or_else(|| AppError::NotFound(format!("Page {} not found", input.node_guid)))?;
        page.page_name = input.page_name.clone();
        page.path = input.path.clone();
        page.route_type = input.route_type.clone();
        page.app_screen_name = input.app_screen_name.clone();
        Ok(page.clone())
    }

    async fn delete_with_dependents(&self, node_guid: StringUuid) -> Result<PageDeleteReport> {
        self.0.enter("pages.delete_with_dependents")?;
        Ok(PageDeleteReport {
            routes_deleted: count_removed(&mut *self.0.routes.write().await, |r| {
                r.node_guid == node_guid
            }),
            categories_deleted: count_removed(&mut *self.0.categories.write().await, |c| {
                c.node_guid == node_guid
            }),
            pages_deleted: count_removed(&mut *self.0.pages.write().await, |p| {
                p.node_guid == node_guid
            }),
        })
    }
}

pub struct TestRouteRepository(pub Arc<TestStore>);

#[async_trait]
impl RouteRepository for TestRouteRepository {
    async fn create(&self, input: &CreateRouteInput) -> Result<Route> {
        self.0.enter("routes.create")?;
        let route = Route {
            node_guid: input.node_guid,
            path: input.path.clone(),
            route_type: input.route_type.clone(),
            app_screen_name: input.app_screen_name.clone(),
        };
        self.0.routes.write().await.push(route.clone());
        Ok(route)
    }

    async fn list(&self) -> Result<Vec<Route>> {
        self.0.enter("routes.list")?;
        Ok(self.0.routes.read().await.clone())
    }

    async fn list_by_page(&self, node_guid: StringUuid) -> Result<Vec<Route>> {
        self.0.enter("routes.list_by_page")?;
        let routes = self.0.routes.read().await;
        Ok(routes
            .iter()
            .filter(|r| r.node_guid == node_guid)
            .cloned()
            .collect())
    }
}

pub struct TestCategoryRepository(pub Arc<TestStore>);

#[async_trait]
impl CategoryRepository for TestCategoryRepository {
    async fn create(&self, input: &CreateCategoryInput) -> Result<Category> {
        self.0.enter("categories.create")?;
        let category = Category {
            node_guid: input.node_guid,
            name: input.name.clone(),
            icon: input.icon.clone(),
            styles: input.styles.clone(),
        };
        self.0.categories.write().await.push(category.clone());
        Ok(category)
    }

    async fn list(&self) -> Result<Vec<Category>> {
        self.0.enter("categories.list")?;
        Ok(self.0.categories.read().await.clone())
    }

    async fn list_by_page(&self, node_guid: StringUuid) -> Result<Vec<Category>> {
        self.0.enter("categories.list_by_page")?;
        let categories = self.0.categories.read().await;
        Ok(categories
            .iter()
            .filter(|c| c.node_guid == node_guid)
            .cloned()
            .collect())
    }

    async fn update_by_page(&self, input: &UpdateCategoryInput) -> Result<u64> {
        self.0.enter("categories.update_by_page")?;
        let mut matched = 0;
        for category in self
            .0
            .categories
            .write()
            .await
            .iter_mut()
            .filter(|c| c.node_guid == input.node_guid)
        {
            category.name = input.name.clone();
            category.icon = input.icon.clone();
            category.styles = input.styles.clone();
            matched += 1;
        }
        if matched == 0 {
            return Err(AppError::NotFound(format!(
                "No category found for page {}",
                input.node_guid
            )));
        }
        Ok(matched)
    }
}

// ============================================================================
// Test AppState
// ============================================================================

#[derive(Clone)]
pub struct TestAppState {
    pub store: Arc<TestStore>,
    pub product_service: Arc<
        ProductService<TestProductRepository, TestSliderRepository, TestSpecificationRepository>,
    >,
    pub product_detail_service: Arc<
        ProductDetailService<
            TestProductRepository,
            TestSliderRepository,
            TestSpecificationRepository,
        >,
    >,
    pub navigation_service:
        Arc<NavigationService<TestPageRepository, TestRouteRepository, TestCategoryRepository>>,
    pub write_coordinator: Arc<WriteCoordinator<TestProductRepository, TestPageRepository>>,
    pub prometheus_handle: Option<PrometheusHandle>,
}

impl TestAppState {
    pub fn new(store: Arc<TestStore>) -> Self {
        let product_repo = Arc::new(TestProductRepository(store.clone()));
        let slider_repo = Arc::new(TestSliderRepository(store.clone()));
        let specification_repo = Arc::new(TestSpecificationRepository(store.clone()));
        let page_repo = Arc::new(TestPageRepository(store.clone()));

        Self {
            product_service: Arc::new(ProductService::new(
                product_repo.clone(),
                slider_repo.clone(),
                specification_repo.clone(),
            )),
            product_detail_service: Arc::new(ProductDetailService::new(
                product_repo.clone(),
                slider_repo,
                specification_repo,
            )),
            navigation_service: Arc::new(NavigationService::new(
                page_repo.clone(),
                Arc::new(TestRouteRepository(store.clone())),
                Arc::new(TestCategoryRepository(store.clone())),
            )),
            write_coordinator: Arc::new(WriteCoordinator::new(product_repo, page_repo)),
            prometheus_handle: None,
            store,
        }
    }

    pub fn with_prometheus(mut self, handle: PrometheusHandle) -> Self {
        self.prometheus_handle = Some(handle);
        self
    }
}

impl HasServices for TestAppState {
    type ProductRepo = TestProductRepository;
    type SliderRepo = TestSliderRepository;
    type SpecificationRepo = TestSpecificationRepository;
    type PageRepo = TestPageRepository;
    type RouteRepo = TestRouteRepository;
    type CategoryRepo = TestCategoryRepository;

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
        self.store.is_up()
    }
}

/// Production router over an empty in-memory store
pub fn test_app() -> (Router, Arc<TestStore>) {
    let store = Arc::new(TestStore::new());
    let app = build_router(TestAppState::new(store.clone()));
    (app, store)
}

// ============================================================================
// HTTP helpers
// ============================================================================

async fn send<R: DeserializeOwned>(app: &Router, request: Request<Body>) -> (StatusCode, Option<R>) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();

    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap_or_default();

    if body_bytes.is_empty() {
        return (status, None);
    }

    match serde_json::from_slice(&body_bytes) {
        Ok(data) => (status, Some(data)),
        Err(_) => (status, None),
    }
}

fn json_request<T: Serialize>(method: Method, path: &str, body: &T) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(path)
        .header("Content-Type", "application/json")
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

/// Make a GET request and parse JSON response
pub async fn get_json<R: DeserializeOwned>(app: &Router, path: &str) -> (StatusCode, Option<R>) {
    let request = Request::builder()
        .method(Method::GET)
        .uri(path)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// Make a POST request with JSON body and parse JSON response
pub async fn post_json<T: Serialize, R: DeserializeOwned>(
    app: &Router,
    path: &str,
    body: &T,
) -> (StatusCode, Option<R>) {
    send(app, json_request(Method::POST, path, body)).await
}

/// Make a PUT request with JSON body and parse JSON response
pub async fn put_json<T: Serialize, R: DeserializeOwned>(
    app: &Router,
    path: &str,
    body: &T,
) -> (StatusCode, Option<R>) {
    send(app, json_request(Method::PUT, path, body)).await
}

/// Make a DELETE request with JSON body and parse JSON response
pub async fn delete_json<T: Serialize, R: DeserializeOwned>(
    app: &Router,
    path: &str,
    body: &T,
) -> (StatusCode, Option<R>) {
    send(app, json_request(Method::DELETE, path, body)).await
}
