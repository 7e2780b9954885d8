//! Specification repository

use crate::db::{placeholders, QueryExecutor, Statement};
use crate::domain::{CreateSpecificationInput, Specification, UpdateSpecificationInput};
use crate::error::{AppError, Result};
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SpecificationRepository: Send + Sync {
    async fn create(&self, input: &CreateSpecificationInput) -> Result<Specification>;
    /// Every specification of a product, in insertion order. May be empty.
    async fn list_by_product(&self, product_id: i64) -> Result<Vec<Specification>>;
    async fn update(&self, input: &UpdateSpecificationInput) -> Result<Specification>;
    async fn delete(&self, id: i64) -> Result<()>;
}

pub struct SpecificationRepositoryImpl {
    db: QueryExecutor,
}

impl SpecificationRepositoryImpl {
    pub fn new(db: QueryExecutor) -> Self {
        Self { db }
    }
}

/// `DELETE FROM specifications WHERE productInfoModulesId IN (...)`
pub fn delete_by_product_ids(product_ids: &[i64]) -> Statement {
    Statement::write(format!(
        "DELETE FROM specifications WHERE productInfoModulesId IN ({})",
        placeholders(product_ids.len())
    ))
    .bind_all(product_ids.iter().copied())
}

#[async_trait]
impl SpecificationRepository for SpecificationRepositoryImpl {
    async fn create(&self, input: &CreateSpecificationInput) -> Result<Specification> {
        let outcome = self
            .db
            .write(
                Statement::write(
                    "INSERT INTO specifications (productInfoModulesId, title, value) VALUES (?, ?, ?)",
                )
                .bind(input.product_id)
                .bind(&input.title)
                .bind(&input.value),
            )
            .await?;

        Ok(Specification {
            id: outcome.last_insert_id as i64,
            product_id: input.product_id,
            title: input.title.clone(),
            value: input.value.clone(),
        })
    }

    async fn list_by_product(&self, product_id: i64) -> Result<Vec<Specification>> {
        self.db
            .fetch_all(
                Statement::read(
                    r#"
                    SELECT id, productInfoModulesId, title, value
                    FROM specifications
                    WHERE productInfoModulesId = ?
                    ORDER BY id
                    "#,
                )
                .bind(product_id),
            )
            .await
    }

    async fn update(&self, input: &UpdateSpecificationInput) -> Result<Specification> {
        let outcome = self
            .db
            .write(
                Statement::write(
                    r#"
                    UPDATE specifications
                    SET title = ?, value = ?
                    WHERE id = ? AND productInfoModulesId = ?
                    "#,
                )
                .bind(&input.title)
                .bind(&input.value)
                .bind(input.id)
                .bind(input.product_id),
            )
            .await?;

        if outcome.rows_affected == 0 {
            return Err(AppError::NotFound(format!(
                "Specification {} not found for product {}",
                input.id, input.product_id
            )));
        }

        Ok(Specification {
            id: input.id,
            product_id: input.product_id,
            title: input.title.clone(),
            value: input.value.clone(),
        })
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let outcome = self
            .db
            .write(Statement::write("DELETE FROM specifications WHERE id = ?").bind(id))
            .await?;

        if outcome.rows_affected == 0 {
            return Err(AppError::NotFound(format!("Specification {} not found", id)));
        }

        Ok(())
    }
}
