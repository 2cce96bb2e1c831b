//! Category entity and repository trait.
//!
//! Maps to the `categories` table in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::Pagination;
use crate::shared::context::RequestContext;
use crate::shared::error::AppError;

/// Represents a product category.
///
/// Maps to the `categories` table:
/// - id: UUID PRIMARY KEY
/// - name: VARCHAR(100) NOT NULL, unique among live rows
/// - created_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// - updated_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// - deleted_at: TIMESTAMPTZ NULL (soft delete marker)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Opaque identifier, assigned by the repository when empty
    pub id: String,

    /// Display name
    pub name: String,

    /// Creation timestamp (store-managed)
    pub created_at: DateTime<Utc>,

    /// Last update timestamp (store-managed)
    pub updated_at: DateTime<Utc>,
}

impl Category {
    /// A category that has not been persisted yet.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            id: String::new(),
            name: String::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Search predicates for listing categories.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoriesFilter {
    /// Case-insensitive substring match on the name
    pub name: Option<String>,

    pub pagination: Pagination,
}

impl CategoriesFilter {
    /// The name predicate, if one is actually set.
    pub fn name_term(&self) -> Option<&str> {
        self.name.as_deref().map(str::trim).filter(|n| !n.is_empty())
    }
}

/// Repository trait for Category data access operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Persist a new category and return its identifier.
    async fn create(&self, ctx: &RequestContext, category: &Category) -> Result<String, AppError>;

    /// Find a live category by ID. Fails with `NotFound` when nothing matches.
    async fn find_by_id(&self, ctx: &RequestContext, id: &str) -> Result<Category, AppError>;

    /// Overwrite the writable fields (`name`) of the category identified by `category.id`.
    async fn update(&self, ctx: &RequestContext, category: &Category) -> Result<(), AppError>;

    /// List categories matching the filter within its pagination window.
    async fn find_all(
        &self,
        ctx: &RequestContext,
        filter: &CategoriesFilter,
    ) -> Result<Vec<Category>, AppError>;

    /// Delete a category. Deleting a missing category is not an error.
    async fn delete(&self, ctx: &RequestContext, id: &str) -> Result<(), AppError>;
}
