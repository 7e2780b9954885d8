//! Product detail aggregation

use crate::domain::ProductDetailView;
use crate::error::{AppError, Result};
use crate::repository::{ProductRepository, SliderRepository, SpecificationRepository};
use std::sync::Arc;

/// Assembles a product with its slider and specifications.
///
/// The three reads are independent executor calls on separate connections.
/// They are not a consistent snapshot; a concurrent writer may land between
/// them.
pub struct ProductDetailService<P: ProductRepository, S: SliderRepository, Sp: SpecificationRepository>
{
    product_repo: Arc<P>,
    slider_repo: Arc<S>,
    specification_repo: Arc<Sp>,
}

impl<P: ProductRepository, S: SliderRepository, Sp: SpecificationRepository>
    ProductDetailService<P, S, Sp>
{
    pub fn new(product_repo: Arc<P>, slider_repo: Arc<S>, specification_repo: Arc<Sp>) -> Self {
        Self {
            product_repo,
            slider_repo,
            specification_repo,
        }
    }

    pub async fn get_product_detail(&self, product_id: i64) -> Result<ProductDetailView> {
        let product = self
            .product_repo
            .find_by_id(product_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Product {} not found", product_id)))?;

        let (slider, specifications) = tokio::try_join!(
            self.slider_repo.find_by_product(product_id),
            self.specification_repo.list_by_product(product_id),
        )?;

        Ok(ProductDetailView {
            product,
            slider,
            specifications,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Product, ProductImageSlider, Specification};
    use crate::repository::{
        MockProductRepository, MockSliderRepository, MockSpecificationRepository,
    };
    use mockall::predicate::*;
    use pretty_assertions::assert_eq;

    fn create_test_service(
        product_repo: MockProductRepository,
        slider_repo: MockSliderRepository,
        specification_repo: MockSpecificationRepository,
    ) -> ProductDetailService<MockProductRepository, MockSliderRepository, MockSpecificationRepository>
    {
        ProductDetailService::new(
            Arc::new(product_repo),
            Arc::new(slider_repo),
            Arc::new(specification_repo),
        )
    }

    #[tokio::test]
    async fn test_get_product_detail_assembles_view() {
        let mut product_repo = MockProductRepository::new();
        product_repo
            .expect_find_by_id()
            .with(eq(4))
            .returning(|id| {
                Ok(Some(Product {
                    id,
                    name: "Lamp".to_string(),
                    ..Default::default()
                }))
            });

        let mut slider_repo = MockSliderRepository::new();
        slider_repo
            .expect_find_by_product()
            .with(eq(4))
            .returning(|product_id| {
                Ok(Some(ProductImageSlider {
                    id: 1,
                    product_id,
                    images: vec!["lamp.jpg".to_string()],
                    ..Default::default()
                }))
            });

        let mut specification_repo = MockSpecificationRepository::new();
        specification_repo
            .expect_list_by_product()
            .with(eq(4))
            .returning(|product_id| {
                Ok(vec![
                    Specification {
                        id: 1,
                        product_id,
                        title: "Height".to_string(),
                        value: "40cm".to_string(),
                    },
                    Specification {
                        id: 2,
                        product_id,
                        title: "Bulb".to_string(),
                        value: "E27".to_string(),
                    },
                ])
            });

        let service = create_test_service(product_repo, slider_repo, specification_repo);
        let view = service.get_product_detail(4).await.unwrap();

        assert_eq!(view.product.name, "Lamp");
        assert_eq!(view.slider.map(|s| s.id), Some(1));
        assert_eq!(view.specifications.len(), 2);
        assert_eq!(view.specifications[1].title, "Bulb");
    }

    #[tokio::test]
    async fn test_get_product_detail_not_found_skips_dependent_reads() {
        let mut product_repo = MockProductRepository::new();
        product_repo.expect_find_by_id().returning(|_| Ok(None));

        let mut slider_repo = MockSliderRepository::new();
        slider_repo.expect_find_by_product().times(0);

        let mut specification_repo = MockSpecificationRepository::new();
        specification_repo.expect_list_by_product().times(0);

        let service = create_test_service(product_repo, slider_repo, specification_repo);
        let result = service.get_product_detail(99).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_get_product_detail_without_slider_or_specifications() {
        let mut product_repo = MockProductRepository::new();
        product_repo.expect_find_by_id().returning(|id| {
            Ok(Some(Product {
                id,
                ..Default::default()
            }))
        });

        let mut slider_repo = MockSliderRepository::new();
        slider_repo.expect_find_by_product().returning(|_| Ok(None));

        let mut specification_repo = MockSpecificationRepository::new();
        specification_repo
            .expect_list_by_product()
            .returning(|_| Ok(vec![]));

        let service = create_test_service(product_repo, slider_repo, specification_repo);
        let view = service.get_product_detail(2).await.unwrap();

        assert!(view.slider.is_none());
        assert!(view.specifications.is_empty());

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["slider"], serde_json::Value::Null);
        assert_eq!(json["specifications"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_get_product_detail_propagates_query_failure() {
        let mut product_repo = MockProductRepository::new();
        product_repo.expect_find_by_id().returning(|id| {
            Ok(Some(Product {
                id,
                ..Default::default()
            }))
        });

        let mut slider_repo = MockSliderRepository::new();
        slider_repo
            .expect_find_by_product()
            .returning(|_| Err(AppError::QueryFailed(sqlx::Error::RowNotFound)));

        let mut specification_repo = MockSpecificationRepository::new();
        specification_repo
            .expect_list_by_product()
            .returning(|_| Ok(vec![]));

        let service = create_test_service(product_repo, slider_repo, specification_repo);
        let result = service.get_product_detail(2).await;

        assert!(matches!(result, Err(AppError::QueryFailed(_))));
    }
}
