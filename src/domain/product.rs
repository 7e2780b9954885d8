//! Product, image slider and specification models

use super::common::StyleDocument;
use crate::error::{AppError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Product entity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: i64,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub image: Option<String>,
    pub styles: Option<StyleDocument>,
}

/// Image slider attached to a product
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
#[sqlx(rename_all = "camelCase")]
pub struct ProductImageSlider {
    pub id: i64,
    pub product_id: i64,
    #[sqlx(json)]
    pub images: Vec<String>,
    pub pagination_type: Option<String>,
    pub slider_styles: Option<StyleDocument>,
    pub image_styles: Option<StyleDocument>,
}

/// Title/value pair describing a product
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Specification {
    pub id: i64,
    /// Owning product
    #[sqlx(rename = "productInfoModulesId")]
    pub product_id: i64,
    pub title: String,
    pub value: String,
}

/// Product assembled with its slider and specifications
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductDetailView {
    pub product: Product,
    pub slider: Option<ProductImageSlider>,
    pub specifications: Vec<Specification>,
}

/// Rows actually removed by a product delete
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchDeleteReport {
    pub requested: Vec<i64>,
    pub sliders_deleted: u64,
    pub specifications_deleted: u64,
    pub products_deleted: u64,
}

fn validate_price(price: &Decimal) -> std::result::Result<(), validator::ValidationError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(validator::ValidationError::new("negative_price"));
    }
    Ok(())
}

/// Input for creating a new product
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProductInput {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[validate(custom(function = "validate_price"))]
    pub price: Decimal,
    #[validate(length(max = 255))]
    pub image: Option<String>,
    pub styles: Option<StyleDocument>,
}

/// Input for replacing every field of a product
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateProductInput {
    pub id: i64,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[validate(custom(function = "validate_price"))]
    pub price: Decimal,
    #[validate(length(max = 255))]
    pub image: Option<String>,
    pub styles: Option<StyleDocument>,
}

/// Input for attaching an image slider to a product
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSliderInput {
    pub product_id: i64,
    #[serde(default)]
    pub images: Vec<String>,
    #[validate(length(max = 50))]
    pub pagination_type: Option<String>,
    pub slider_styles: Option<StyleDocument>,
    pub image_styles: Option<StyleDocument>,
}

/// Input for replacing a slider's content
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSliderInput {
    pub id: i64,
    pub product_id: i64,
    #[serde(default)]
    pub images: Vec<String>,
    #[validate(length(max = 50))]
    pub pagination_type: Option<String>,
    pub slider_styles: Option<StyleDocument>,
    pub image_styles: Option<StyleDocument>,
}

/// Input for adding a specification row to a product
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSpecificationInput {
    pub product_id: i64,
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(length(min = 1, max = 255))]
    pub value: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSpecificationInput {
    pub id: i64,
    pub product_id: i64,
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(length(min = 1, max = 255))]
    pub value: String,
}

/// A non-empty list of product identifiers, validated as a whole.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductIdBatch(Vec<i64>);

impl ProductIdBatch {
    /// Accept raw JSON values only if every one of them is an integer.
    /// A malformed batch is rejected in full.
    pub fn from_values(values: &[serde_json::Value]) -> Result<Self> {
        if values.is_empty() {
            return Err(AppError::InvalidInput(
                "Invalid input: ids should be a non-empty array of numbers.".to_string(),
            ));
        }

        let ids = values
            .iter()
            .map(|value| value.as_i64())
            .collect::<Option<Vec<i64>>>()
            .ok_or_else(|| {
                AppError::InvalidInput(
                    "Invalid input: ids should be an array of numbers.".to_string(),
                )
            })?;

        Ok(ProductIdBatch(ids))
    }

    pub fn ids(&self) -> &[i64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
