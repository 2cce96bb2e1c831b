//! Response DTOs
//!
//! Data structures for API response bodies.

use serde::Serialize;

use crate::domain::{Category, Product};

/// Body returned by create endpoints
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: String,
}

/// Body returned by update/delete endpoints
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

impl StatusResponse {
    pub fn updated() -> Self {
        Self { status: "updated" }
    }

    pub fn deleted() -> Self {
        Self { status: "deleted" }
    }
}

/// Category response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub id: String,
    pub name: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            created_at: category.created_at.to_rfc3339(),
            updated_at: category.updated_at.to_rfc3339(),
        }
    }
}

/// Category summary embedded in a product
#[derive(Debug, Serialize)]
pub struct CategorySummary {
    pub id: String,
    pub name: String,
}

/// Product response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub sku: String,
    pub price: f64,
    pub stock: i32,
    pub image_url: Option<String>,
    pub category_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<CategorySummary>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            sku: product.sku,
            price: product.price,
            stock: product.stock,
            image_url: product.image_url,
            category_id: product.category_id,
            category: product.category.map(|c| CategorySummary {
                id: c.id,
                name: c.name,
            }),
            created_at: product.created_at.to_rfc3339(),
            updated_at: product.updated_at.to_rfc3339(),
        }
    }
}
