//! Multi-table deletes
//!
//! Children are deleted before their parent, in one unit of work, so a
//! failure part-way leaves every table as it was.

use crate::domain::{BatchDeleteReport, PageDeleteReport, ProductIdBatch, StringUuid};
use crate::error::{AppError, Result};
use crate::repository::{PageRepository, ProductRepository};
use std::sync::Arc;
use tracing::info;

pub struct WriteCoordinator<P: ProductRepository, G: PageRepository> {
    product_repo: Arc<P>,
    page_repo: Arc<G>,
}

impl<P: ProductRepository, G: PageRepository> WriteCoordinator<P, G> {
    pub fn new(product_repo: Arc<P>, page_repo: Arc<G>) -> Self {
        Self {
            product_repo,
            page_repo,
        }
    }

    /// Delete one product with its slider and specifications.
    pub async fn delete_product(&self, id: i64) -> Result<()> {
        let report = self.product_repo.delete_with_dependents(&[id]).await?;

        if report.products_deleted == 0 {
            return Err(AppError::NotFound(format!("Product {} not found", id)));
        }

        info!(
            product_id = id,
            sliders_deleted = report.sliders_deleted,
            specifications_deleted = report.specifications_deleted,
            "Deleted product"
        );
        Ok(())
    }

    /// Delete a batch of products given as raw JSON values.
    ///
    /// A batch with any non-integer member is rejected before the store is
    /// touched. Ids with no matching row are not an error; the report carries
    /// the counts that were actually removed.
    pub async fn delete_product_list(
        &self,
        values: &[serde_json::Value],
    ) -> Result<BatchDeleteReport> {
        let batch = ProductIdBatch::from_values(values)?;
        self.delete_product_batch(&batch).await
    }

    pub async fn delete_product_batch(&self, batch: &ProductIdBatch) -> Result<BatchDeleteReport> {
        let report = self.product_repo.delete_with_dependents(batch.ids()).await?;

        info!(
            requested = batch.len(),
            products_deleted = report.products_deleted,
            sliders_deleted = report.sliders_deleted,
            specifications_deleted = report.specifications_deleted,
            "Deleted product batch"
        );
        Ok(report)
    }

    /// Delete a page with its routes and categories.
    pub async fn delete_page(&self, node_guid: StringUuid) -> Result<PageDeleteReport> {
        let report = self.page_repo.delete_with_dependents(node_guid).await?;

        if report.pages_deleted == 0 {
            return Err(AppError::NotFound(format!("Page {} not found", node_guid)));
        }

        info!(
            node_guid = %node_guid,
            routes_deleted = report.routes_deleted,
            categories_deleted = report.categories_deleted,
            "Deleted page"
        );
        Ok(report)
    }
}
