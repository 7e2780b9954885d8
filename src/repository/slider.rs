//! Product image slider repository

use crate::db::{placeholders, QueryExecutor, Statement};
use crate::domain::{CreateSliderInput, ProductImageSlider, UpdateSliderInput};
use crate::error::{AppError, Result};
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SliderRepository: Send + Sync {
    async fn create(&self, input: &CreateSliderInput) -> Result<ProductImageSlider>;
    async fn find_by_id(&self, id: i64) -> Result<Option<ProductImageSlider>>;
    /// The product's slider; a product has at most one
    async fn find_by_product(&self, product_id: i64) -> Result<Option<ProductImageSlider>>;
    async fn update(&self, input: &UpdateSliderInput) -> Result<ProductImageSlider>;
    async fn delete(&self, id: i64) -> Result<()>;
}

pub struct SliderRepositoryImpl {
    db: QueryExecutor,
}

impl SliderRepositoryImpl {
    pub fn new(db: QueryExecutor) -> Self {
        Self { db }
    }
}

fn images_json(images: &[String]) -> Result<String> {
    serde_json::to_string(images).map_err(|e| AppError::Internal(e.into()))
}

/// `DELETE FROM productImageSliders WHERE productId IN (...)`
pub fn delete_by_product_ids(product_ids: &[i64]) -> Statement {
    Statement::write(format!(
        "DELETE FROM productImageSliders WHERE productId IN ({})",
        placeholders(product_ids.len())
    ))
    .bind_all(product_ids.iter().copied())
}

#[async_trait]
impl SliderRepository for SliderRepositoryImpl {
    async fn create(&self, input: &CreateSliderInput) -> Result<ProductImageSlider> {
        let images = images_json(&input.images)?;
        let outcome = self
            .db
            .write(
                Statement::write(
                    r#"
                    INSERT INTO productImageSliders
                        (productId, images, paginationType, sliderStyles, imageStyles)
                    VALUES (?, ?, ?, ?, ?)
                    "#,
                )
                .bind(input.product_id)
                .bind(images)
                .bind(input.pagination_type.as_ref())
                .bind(input.slider_styles.as_ref())
                .bind(input.image_styles.as_ref()),
            )
            .await?;

        Ok(ProductImageSlider {
            id: outcome.last_insert_id as i64,
            product_id: input.product_id,
            images: input.images.clone(),
            pagination_type: input.pagination_type.clone(),
            slider_styles: input.slider_styles.clone(),
            image_styles: input.image_styles.clone(),
        })
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ProductImageSlider>> {
        self.db
            .fetch_optional(
                Statement::read(
                    r#"
                    SELECT id, productId, images, paginationType, sliderStyles, imageStyles
                    FROM productImageSliders
                    WHERE id = ?
                    "#,
                )
                .bind(id),
            )
            .await
    }

    async fn find_by_product(&self, product_id: i64) -> Result<Option<ProductImageSlider>> {
        self.db
            .fetch_optional(
                Statement::read(
                    r#"
                    SELECT id, productId, images, paginationType, sliderStyles, imageStyles
                    FROM productImageSliders
                    WHERE productId = ?
                    "#,
                )
                .bind(product_id),
            )
            .await
    }

    async fn update(&self, input: &UpdateSliderInput) -> Result<ProductImageSlider> {
        let images = images_json(&input.images)?;
        let outcome = self
            .db
            .write(
                Statement::write(
                    r#"
                    UPDATE productImageSliders
                    SET images = ?, paginationType = ?, sliderStyles = ?, imageStyles = ?
                    WHERE id = ? AND productId = ?
                    "#,
                )
                .bind(images)
                .bind(input.pagination_type.as_ref())
                .bind(input.slider_styles.as_ref())
                .bind(input.image_styles.as_ref())
                .bind(input.id)
                .bind(input.product_id),
            )
            .await?;

        if outcome.rows_affected == 0 {
            return Err(AppError::NotFound(format!(
                "Slider {} not found for product {}",
                input.id, input.product_id
            )));
        }

        Ok(ProductImageSlider {
            id: input.id,
            product_id: input.product_id,
            images: input.images.clone(),
            pagination_type: input.pagination_type.clone(),
            slider_styles: input.slider_styles.clone(),
            image_styles: input.image_styles.clone(),
        })
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let outcome = self
            .db
            .write(Statement::write("DELETE FROM productImageSliders WHERE id = ?").bind(id))
            .await?;

        if outcome.rows_affected == 0 {
            return Err(AppError::NotFound(format!("Slider {} not found", id)));
        }

        Ok(())
    }
}
