//! Product repository

use super::{slider, specification};
use crate::db::{placeholders, QueryExecutor, Statement, WriteOutcome};
use crate::domain::{BatchDeleteReport, CreateProductInput, Product, UpdateProductInput};
use crate::error::{AppError, Result};
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn create(&self, input: &CreateProductInput) -> Result<Product>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Product>>;
    async fn list(&self) -> Result<Vec<Product>>;
    async fn update(&self, input: &UpdateProductInput) -> Result<Product>;
    /// Remove the products with their sliders and specifications in one
    /// unit of work. Ids with no row are skipped.
    async fn delete_with_dependents(&self, ids: &[i64]) -> Result<BatchDeleteReport>;
}

pub struct ProductRepositoryImpl {
    db: QueryExecutor,
}

impl ProductRepositoryImpl {
    pub fn new(db: QueryExecutor) -> Self {
        Self { db }
    }
}

/// `DELETE FROM products WHERE id IN (...)`
pub fn delete_by_ids(ids: &[i64]) -> Statement {
    Statement::write(format!(
        "DELETE FROM products WHERE id IN ({})",
        placeholders(ids.len())
    ))
    .bind_all(ids.iter().copied())
}

/// Statements removing products and their dependents, children first.
///
/// The child deletes are issued even though the schema cascades, so the
/// plan stays correct against a store without cascade support.
pub fn delete_plan(ids: &[i64]) -> Vec<Statement> {
    vec![
        slider::delete_by_product_ids(ids),
        specification::delete_by_product_ids(ids),
        delete_by_ids(ids),
    ]
}

fn delete_report(ids: &[i64], outcomes: &[WriteOutcome]) -> Result<BatchDeleteReport> {
    match outcomes {
        [sliders, specifications, products] => Ok(BatchDeleteReport {
            requested: ids.to_vec(),
            sliders_deleted: sliders.rows_affected,
            specifications_deleted: specifications.rows_affected,
            products_deleted: products.rows_affected,
        }),
        _ => Err(AppError::Internal(anyhow::anyhow!(
            "expected three delete outcomes, got {}",
            outcomes.len()
        ))),
    }
}

#[async_trait]
impl ProductRepository for ProductRepositoryImpl {
    async fn create(&self, input: &CreateProductInput) -> Result<Product> {
        let outcome = self
            .db
            .write(
                Statement::write(
                    "INSERT INTO products (name, price, image, styles) VALUES (?, ?, ?, ?)",
                )
                .bind(&input.name)
                .bind(input.price)
                .bind(input.image.as_ref())
                .bind(input.styles.as_ref()),
            )
            .await?;

        Ok(Product {
            id: outcome.last_insert_id as i64,
            name: input.name.clone(),
            price: input.price,
            image: input.image.clone(),
            styles: input.styles.clone(),
        })
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Product>> {
        self.db
            .fetch_optional(
                Statement::read(
                    r#"
                    SELECT id, name, price, image, styles
                    FROM products
                    WHERE id = ?
                    "#,
                )
                .bind(id),
            )
            .await
    }

    async fn list(&self) -> Result<Vec<Product>> {
        self.db
            .fetch_all(Statement::read(
                r#"
                SELECT id, name, price, image, styles
                FROM products
                ORDER BY id
                "#,
            ))
            .await
    }

    async fn update(&self, input: &UpdateProductInput) -> Result<Product> {
        let outcome = self
            .db
            .write(
                Statement::write(
                    r#"
                    UPDATE products
                    SET name = ?, price = ?, image = ?, styles = ?
                    WHERE id = ?
                    "#,
                )
                .bind(&input.name)
                .bind(input.price)
                .bind(input.image.as_ref())
                .bind(input.styles.as_ref())
                .bind(input.id),
            )
            .await?;

        // Connections report matched rows, so zero means no such product
        if outcome.rows_affected == 0 {
            return Err(AppError::NotFound(format!("Product {} not found", input.id)));
        }

        Ok(Product {
            id: input.id,
            name: input.name.clone(),
            price: input.price,
            image: input.image.clone(),
            styles: input.styles.clone(),
        })
    }

    async fn delete_with_dependents(&self, ids: &[i64]) -> Result<BatchDeleteReport> {
        let outcomes = self.db.unit_of_work(delete_plan(ids)).await?;
        delete_report(ids, &outcomes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::SqlValue;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_delete_by_ids_generates_placeholders() {
        let stmt = delete_by_ids(&[1, 2, 3]);
        assert_eq!(stmt.sql(), "DELETE FROM products WHERE id IN (?, ?, ?)");
        assert_eq!(
            stmt.params(),
            &[SqlValue::Int(1), SqlValue::Int(2), SqlValue::Int(3)]
        );
    }

    #[test]
    fn test_delete_plan_orders_children_first() {
        let plan = delete_plan(&[1, 2, 3]);
        let sql: Vec<&str> = plan.iter().map(|s| s.sql()).collect();
        assert_eq!(
            sql,
            vec![
                "DELETE FROM productImageSliders WHERE productId IN (?, ?, ?)",
                "DELETE FROM specifications WHERE productInfoModulesId IN (?, ?, ?)",
                "DELETE FROM products WHERE id IN (?, ?, ?)",
            ]
        );
        for statement in &plan {
            assert_eq!(
                statement.params(),
                &[SqlValue::Int(1), SqlValue::Int(2), SqlValue::Int(3)]
            );
        }
    }

    #[test]
    fn test_delete_report_counts_each_table() {
        let outcome = |rows_affected| WriteOutcome {
            rows_affected,
            last_insert_id: 0,
        };
        let report = delete_report(&[4, 5], &[outcome(1), outcome(3), outcome(2)]).unwrap();
        assert_eq!(
            report,
            BatchDeleteReport {
                requested: vec![4, 5],
                sliders_deleted: 1,
                specifications_deleted: 3,
                products_deleted: 2,
            }
        );

        assert!(delete_report(&[4], &[outcome(1)]).is_err());
    }
}
