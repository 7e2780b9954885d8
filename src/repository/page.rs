//! Page repository

use super::{category, route};
use crate::db::{QueryExecutor, Statement};
use crate::domain::{CreatePageInput, Page, PageDeleteReport, StringUuid, UpdatePageInput};
use crate::error::{AppError, Result};
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PageRepository: Send + Sync {
    async fn create(&self, input: &CreatePageInput) -> Result<Page>;
    async fn find_by_id(&self, node_guid: StringUuid) -> Result<Option<Page>>;
    async fn list(&self) -> Result<Vec<Page>>;
    async fn update(&self, input: &UpdatePageInput) -> Result<Page>;
    /// Remove a page with its routes and categories in one unit of work
    async fn delete_with_dependents(&self, node_guid: StringUuid) -> Result<PageDeleteReport>;
}

pub struct PageRepositoryImpl {
    db: QueryExecutor,
}

impl PageRepositoryImpl {
    pub fn new(db: QueryExecutor) -> Self {
        Self { db }
    }
}

/// `DELETE FROM pages WHERE nodeGuid = ?`
pub fn delete_by_id(node_guid: StringUuid) -> Statement {
    Statement::write("DELETE FROM pages WHERE nodeGuid = ?").bind(node_guid)
}

/// Statements removing a page and everything registered under it, children first
pub fn delete_plan(node_guid: StringUuid) -> Vec<Statement> {
    vec![
        route::delete_by_page(node_guid),
        category::delete_by_page(node_guid),
        delete_by_id(node_guid),
    ]
}

#[async_trait]
impl PageRepository for PageRepositoryImpl {
    async fn create(&self, input: &CreatePageInput) -> Result<Page> {
        let page = Page {
            node_guid: StringUuid::new_v4(),
            page_name: input.page_name.clone(),
            path: input.path.clone(),
            route_type: input.route_type.clone(),
            app_screen_name: input.app_screen_name.clone(),
        };

        self.db
            .write(
                Statement::write(
                    r#"
                    INSERT INTO pages (nodeGuid, pageName, path, routeType, appScreenName)
                    VALUES (?, ?, ?, ?, ?)
                    "#,
                )
                .bind(page.node_guid)
                .bind(&page.page_name)
                .bind(&page.path)
                .bind(&page.route_type)
                .bind(&page.app_screen_name),
            )
            .await?;

        Ok(page)
    }

    async fn find_by_id(&self, node_guid: StringUuid) -> Result<Option<Page>> {
        self.db
            .fetch_optional(
                Statement::read(
                    r#"
                    SELECT nodeGuid, pageName, path, routeType, appScreenName
                    FROM pages
                    WHERE nodeGuid = ?
                    "#,
                )
                .bind(node_guid),
            )
            .await
    }

    async fn list(&self) -> Result<Vec<Page>> {
        self.db
            .fetch_all(Statement::read(
                r#"
                SELECT nodeGuid, pageName, path, routeType, appScreenName
                FROM pages
                ORDER BY pageName
                "#,
            ))
            .await
    }

    async fn update(&self, input: &UpdatePageInput) -> Result<Page> {
        let outcome = self
            .db
            .write(
                Statement::write(
                    r#"
                    UPDATE pages
                    SET pageName = ?, path = ?, routeType = ?, appScreenName = ?
                    WHERE nodeGuid = ?
                    "#,
                )
                .bind(&input.page_name)
                .bind(&input.path)
                .bind(&input.route_type)
                .bind(&input.app_screen_name)
                .bind(input.node_guid),
            )
            .await?;

        if outcome.rows_affected == 0 {
            return Err(AppError::NotFound(format!(
                "Page {} not found",
                input.node_guid
            )));
        }

        Ok(Page {
            node_guid: input.node_guid,
            page_name: input.page_name.clone(),
            path: input.path.clone(),
            route_type: input.route_type.clone(),
            app_screen_name: input.app_screen_name.clone(),
        })
    }

    async fn delete_with_dependents(&self, node_guid: StringUuid) -> Result<PageDeleteReport> {
        let outcomes = self.db.unit_of_work(delete_plan(node_guid)).await?;
        match outcomes.as_slice() {
            [routes, categories, pages] => Ok(PageDeleteReport {
                routes_deleted: routes.rows_affected,
                categories_deleted: categories.rows_affected,
                pages_deleted: pages.rows_affected,
            }),
            _ => Err(AppError::Internal(anyhow::anyhow!(
                "expected three delete outcomes, got {}",
                outcomes.len()
            ))),
        }
    }
}
