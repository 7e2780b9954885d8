//! Product, slider and specification business logic

use crate::domain::{
    CreateProductInput, CreateSliderInput, CreateSpecificationInput, Product, ProductImageSlider,
    Specification, UpdateProductInput, UpdateSliderInput, UpdateSpecificationInput,
};
use crate::error::{AppError, Result};
use crate::repository::{ProductRepository, SliderRepository, SpecificationRepository};
use std::sync::Arc;
use validator::Validate;

pub struct ProductService<P: ProductRepository, S: SliderRepository, Sp: SpecificationRepository> {
    repo: Arc<P>,
    slider_repo: Arc<S>,
    specification_repo: Arc<Sp>,
}

impl<P: ProductRepository, S: SliderRepository, Sp: SpecificationRepository>
    ProductService<P, S, Sp>
{
    pub fn new(repo: Arc<P>, slider_repo: Arc<S>, specification_repo: Arc<Sp>) -> Self {
        Self {
            repo,
            slider_repo,
            specification_repo,
        }
    }

    pub async fn create(&self, input: CreateProductInput) -> Result<Product> {
        input.validate()?;
        self.repo.create(&input).await
    }

    pub async fn get(&self, id: i64) -> Result<Product> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Product {} not found", id)))
    }

    pub async fn list(&self) -> Result<Vec<Product>> {
        self.repo.list().await
    }

    pub async fn update(&self, input: UpdateProductInput) -> Result<Product> {
        input.validate()?;
        self.repo.update(&input).await
    }

    pub async fn add_slider(&self, input: CreateSliderInput) -> Result<ProductImageSlider> {
        input.validate()?;

        // Verify product exists
        let _ = self.get(input.product_id).await?;

        if let Some(existing) = self.slider_repo.find_by_product(input.product_id).await? {
            return Err(AppError::Conflict(format!(
                "Product {} already has slider {}",
                input.product_id, existing.id
            )));
        }

        self.slider_repo.create(&input).await
    }

    pub async fn update_slider(&self, input: UpdateSliderInput) -> Result<ProductImageSlider> {
        input.validate()?;
        self.slider_repo.update(&input).await
    }

    pub async fn remove_slider(&self, id: i64) -> Result<()> {
        self.slider_repo.delete(id).await
    }

    pub async fn add_specification(
        &self,
        input: CreateSpecificationInput,
    ) -> Result<Specification> {
        input.validate()?;

        // Verify product exists
        let _ = self.get(input.product_id).await?;

        self.specification_repo.create(&input).await
    }

    pub async fn list_specifications(&self, product_id: i64) -> Result<Vec<Specification>> {
        self.specification_repo.list_by_product(product_id).await
    }

    pub async fn update_specification(
        &self,
        input: UpdateSpecificationInput,
    ) -> Result<Specification> {
        input.validate()?;
        self.specification_repo.update(&input).await
    }

    pub async fn remove_specification(&self, id: i64) -> Result<()> {
        self.specification_repo.delete(id).await
    }
}
