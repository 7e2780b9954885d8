//! Category repository

use crate::db::{QueryExecutor, Statement};
use crate::domain::{Category, CreateCategoryInput, StringUuid, UpdateCategoryInput};
use crate::error::{AppError, Result};
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn create(&self, input: &CreateCategoryInput) -> Result<Category>;
    async fn list(&self) -> Result<Vec<Category>>;
    async fn list_by_page(&self, node_guid: StringUuid) -> Result<Vec<Category>>;
    /// Overwrite the categories stored under a page. Returns the number of
    /// rows matched.
    async fn update_by_page(&self, input: &UpdateCategoryInput) -> Result<u64>;
}

pub struct CategoryRepositoryImpl {
    db: QueryExecutor,
}

impl CategoryRepositoryImpl {
    pub fn new(db: QueryExecutor) -> Self {
        Self { db }
    }
}

/// `DELETE FROM category WHERE nodeGuid = ?`
pub fn delete_by_page(node_guid: StringUuid) -> Statement {
    Statement::write("DELETE FROM category WHERE nodeGuid = ?").bind(node_guid)
}

#[async_trait]
impl CategoryRepository for CategoryRepositoryImpl {
    async fn create(&self, input: &CreateCategoryInput) -> Result<Category> {
        self.db
            .write(
                Statement::write(
                    "INSERT INTO category (nodeGuid, name, icon, styles) VALUES (?, ?, ?, ?)",
                )
                .bind(input.node_guid)
                .bind(&input.name)
                .bind(input.icon.as_ref())
                .bind(input.styles.as_ref()),
            )
            .await?;

        Ok(Category {
            node_guid: input.node_guid,
            name: input.name.clone(),
            icon: input.icon.clone(),
            styles: input.styles.clone(),
        })
    }

    async fn list(&self) -> Result<Vec<Category>> {
        self.db
            .fetch_all(Statement::read(
                "SELECT nodeGuid, name, icon, styles FROM category",
            ))
            .await
    }

    async fn list_by_page(&self, node_guid: StringUuid) -> Result<Vec<Category>> {
        self.db
            .fetch_all(
                Statement::read(
                    r#"
                    SELECT nodeGuid, name, icon, styles
                    FROM category
                    WHERE nodeGuid = ?
                    "#,
                )
                .bind(node_guid),
            )
            .await
    }

    async fn update_by_page(&self, input: &UpdateCategoryInput) -> Result<u64> {
        let outcome = self
            .db
            .write(
                Statement::write(
                    r#"
                    UPDATE category
                    SET name = ?, icon = ?, styles = ?
                    WHERE nodeGuid = ?
                    "#,
                )
                .bind(&input.name)
                .bind(input.icon.as_ref())
                .bind(input.styles.as_ref())
                .bind(input.node_guid),
            )
            .await?;

        if outcome.rows_affected == 0 {
            return Err(AppError::NotFound(format!(
                "No category found for page {}",
                input.node_guid
            )));
        }

        Ok(outcome.rows_affected)
    }
}
