//! Product entity, partial update and repository trait.
//!
//! Maps to the `products` table in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::category::Category;
use crate::domain::value_objects::Pagination;
use crate::shared::context::RequestContext;
use crate::shared::error::AppError;

/// Represents a product in the catalog.
///
/// Maps to the `products` table:
/// - id: UUID PRIMARY KEY
/// - name: VARCHAR(255) NOT NULL
/// - description: TEXT NOT NULL
/// - sku: VARCHAR(100) NOT NULL, unique among live rows
/// - price: DOUBLE PRECISION NOT NULL CHECK (price >= 0)
/// - stock: INTEGER NOT NULL CHECK (stock >= 0)
/// - image_url: VARCHAR(255) NULL
/// - category_id: UUID NOT NULL REFERENCES categories(id)
/// - created_at / updated_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// - deleted_at: TIMESTAMPTZ NULL (soft delete marker)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Opaque identifier, assigned by the repository when empty
    pub id: String,

    pub name: String,

    pub description: String,

    /// Stock keeping unit, unique across products
    pub sku: String,

    /// Unit price (non-negative)
    pub price: f64,

    /// Units on hand (non-negative)
    pub stock: i32,

    pub image_url: Option<String>,

    /// Category this product belongs to
    pub category_id: String,

    /// Category resolved by read operations; ignored on write
    pub category: Option<Category>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Default for Product {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            id: String::new(),
            name: String::new(),
            description: String::new(),
            sku: String::new(),
            price: 0.0,
            stock: 0,
            image_url: None,
            category_id: String::new(),
            category: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update of a product.
///
/// `None` leaves the stored value untouched; `Some` overwrites it, including
/// with an empty string. `image_url` is nullable in the store, so
/// `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    /// Target product; stamped by the service from the request path
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub sku: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<i32>,
    pub image_url: Option<Option<String>>,
    /// Empty means "keep the current category"
    pub category_id: Option<String>,
}

impl ProductPatch {
    /// The category the product should move to, if any.
    pub fn category_change(&self) -> Option<&str> {
        self.category_id.as_deref().filter(|id| !id.is_empty())
    }

    /// True when the patch would not change any column.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.sku.is_none()
            && self.price.is_none()
            && self.stock.is_none()
            && self.image_url.is_none()
            && self.category_change().is_none()
    }
}

/// Search predicates for listing products. All set predicates must match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    /// Case-insensitive substring match on the name
    pub name: Option<String>,

    /// Exact category match
    pub category_id: Option<String>,

    /// Inclusive lower price bound
    pub min_price: Option<f64>,

    /// Inclusive upper price bound
    pub max_price: Option<f64>,

    pub pagination: Pagination,
}

impl ProductFilter {
    pub fn name_term(&self) -> Option<&str> {
        self.name.as_deref().map(str::trim).filter(|n| !n.is_empty())
    }

    pub fn category_term(&self) -> Option<&str> {
        self.category_id.as_deref().filter(|id| !id.is_empty())
    }

    /// A price bound that is NaN or infinite.
    pub fn has_non_finite_price_bound(&self) -> bool {
        [self.min_price, self.max_price]
            .into_iter()
            .flatten()
            .any(|bound| !bound.is_finite())
    }

    /// Both bounds present and the lower one above the upper one.
    pub fn has_inverted_price_range(&self) -> bool {
        matches!((self.min_price, self.max_price), (Some(min), Some(max)) if min > max)
    }
}

/// Repository trait for Product data access operations.
///
/// Reads resolve the referenced category so callers never need a second lookup.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Persist a new product and return its identifier.
    async fn create(&self, ctx: &RequestContext, product: &Product) -> Result<String, AppError>;

    /// Find a live product by ID with its category attached.
    async fn find_by_id(&self, ctx: &RequestContext, id: &str) -> Result<Product, AppError>;

    /// Write only the fields set in the patch.
    async fn update(&self, ctx: &RequestContext, patch: &ProductPatch) -> Result<(), AppError>;

    /// List products matching every set predicate, within the pagination window.
    async fn find_all(
        &self,
        ctx: &RequestContext,
        filter: &ProductFilter,
    ) -> Result<Vec<Product>, AppError>;

    /// Delete a product. Deleting a missing product is not an error.
    async fn delete(&self, ctx: &RequestContext, id: &str) -> Result<(), AppError>;
}
