//! Request DTOs
//!
//! Data structures for API request bodies and query strings.

use serde::{Deserialize, Deserializer};
use validator::Validate;

use crate::domain::{CategoriesFilter, Category, Pagination, Product, ProductFilter, ProductPatch};

/// Create/update category request
#[derive(Debug, Deserialize, Validate)]
pub struct CategoryRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
}

impl CategoryRequest {
    pub fn into_domain(self) -> Category {
        Category::new(self.name)
    }
}

/// Category list query parameters
#[derive(Debug, Default, Deserialize)]
pub struct CategoriesQueryParams {
    pub name: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl CategoriesQueryParams {
    pub fn into_domain(self) -> CategoriesFilter {
        CategoriesFilter {
            name: self.name,
            pagination: Pagination::new(self.limit.unwrap_or(0), self.offset.unwrap_or(0)),
        }
    }
}

/// Create product request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,

    #[validate(length(min = 1, max = 100, message = "SKU must be 1-100 characters"))]
    pub sku: String,

    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    pub price: f64,

    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    pub stock: i32,

    #[validate(length(max = 255, message = "Image URL must be at most 255 characters"))]
    pub image_url: Option<String>,

    #[validate(length(min = 1, message = "Category ID is required"))]
    pub category_id: String,
}

impl CreateProductRequest {
    pub fn into_domain(self) -> Product {
        Product {
            name: self.name,
            description: self.description,
            sku: self.sku,
            price: self.price,
            stock: self.stock,
            image_url: self.image_url.filter(|url| !url.is_empty()),
            category_id: self.category_id,
            ..Product::default()
        }
    }
}

/// Update product request
///
/// Absent fields are left unchanged. `imageUrl: null` or `""` clears the image.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: Option<String>,

    pub description: Option<String>,

    #[validate(length(min = 1, max = 100, message = "SKU must be 1-100 characters"))]
    pub sku: Option<String>,

    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    pub price: Option<f64>,

    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    pub stock: Option<i32>,

    #[validate(length(max = 255, message = "Image URL must be at most 255 characters"))]
    #[serde(default, deserialize_with = "nullable")]
    pub image_url: Option<Option<String>>,

    pub category_id: Option<String>,
}

impl UpdateProductRequest {
    pub fn into_domain(self) -> ProductPatch {
        ProductPatch {
            id: String::new(),
            name: self.name,
            description: self.description,
            sku: self.sku,
            price: self.price,
            stock: self.stock,
            image_url: self.image_url.map(|url| url.filter(|url| !url.is_empty())),
            category_id: self.category_id,
        }
    }
}

/// Distinguish an explicit `null` (`Some(None)`) from a missing field (`None`).
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Product list query parameters
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductsQueryParams {
    pub name: Option<String>,
    pub category_id: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl ProductsQueryParams {
    pub fn into_domain(self) -> ProductFilter {
        ProductFilter {
            name: self.name,
            category_id: self.category_id,
            min_price: self.min_price,
            max_price: self.max_price,
            pagination: Pagination::new(self.limit.unwrap_or(0), self.offset.unwrap_or(0)),
        }
    }
}
