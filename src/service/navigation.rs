//! Page, route and category business logic

use crate::domain::{
    Category, CreateCategoryInput, CreatePageInput, CreateRouteInput, Page, Route, StringUuid,
    UpdateCategoryInput, UpdatePageInput,
};
use crate::error::{AppError, Result};
use crate::repository::{CategoryRepository, PageRepository, RouteRepository};
use std::sync::Arc;
use tracing::info;
use validator::Validate;

pub struct NavigationService<Pg: PageRepository, R: RouteRepository, C: CategoryRepository> {
    page_repo: Arc<Pg>,
    route_repo: Arc<R>,
    category_repo: Arc<C>,
}

impl<Pg: PageRepository, R: RouteRepository, C: CategoryRepository> NavigationService<Pg, R, C> {
    pub fn new(page_repo: Arc<Pg>, route_repo: Arc<R>, category_repo: Arc<C>) -> Self {
        Self {
            page_repo,
            route_repo,
            category_repo,
        }
    }

    pub async fn create_page(&self, input: CreatePageInput) -> Result<Page> {
        input.validate()?;
        let page = self.page_repo.create(&input).await?;
        info!(node_guid = %page.node_guid, page_name = %page.page_name, "Page created");
        Ok(page)
    }

    pub async fn get_page(&self, node_guid: StringUuid) -> Result<Page> {
        self.page_repo
            .find_by_id(node_guid)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Page {} not found", node_guid)))
    }

    pub async fn list_pages(&self) -> Result<Vec<Page>> {
        self.page_repo.list().await
    }

    pub async fn update_page(&self, input: UpdatePageInput) -> Result<Page> {
        input.validate()?;
        self.page_repo.update(&input).await
    }

    pub async fn create_route(&self, input: CreateRouteInput) -> Result<Route> {
        input.validate()?;

        // Verify page exists
        let _ = self.get_page(input.node_guid).await?;

        self.route_repo.create(&input).await
    }

    /// All routes, or only those under `node_guid`
    pub async fn list_routes(&self, node_guid: Option<StringUuid>) -> Result<Vec<Route>> {
        match node_guid {
            Some(node_guid) => self.route_repo.list_by_page(node_guid).await,
            None => self.route_repo.list().await,
        }
    }

    pub async fn create_category(&self, input: CreateCategoryInput) -> Result<Category> {
        input.validate()?;

        // Verify page exists
        let _ = self.get_page(input.node_guid).await?;

        self.category_repo.create(&input).await
    }

    /// All categories, or only those under `node_guid`
    pub async fn list_categories(&self, node_guid: Option<StringUuid>) -> Result<Vec<Category>> {
        match node_guid {
            Some(node_guid) => self.category_repo.list_by_page(node_guid).await,
            None => self.category_repo.list().await,
        }
    }

    /// Overwrite the page's categories and return them as stored afterwards
    pub async fn update_category(&self, input: UpdateCategoryInput) -> Result<Vec<Category>> {
        input.validate()?;
        let updated = self.category_repo.update_by_page(&input).await?;
        info!(node_guid = %input.node_guid, updated = updated, "Categories updated");
        self.category_repo.list_by_page(input.node_guid).await
    }
}
