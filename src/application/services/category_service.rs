//! Category Service
//!
//! Handles category management operations.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::instrument;

use crate::domain::{CategoriesFilter, Category, CategoryRepository};
use crate::shared::context::RequestContext;
use crate::shared::error::AppError;

/// Category service trait
#[async_trait]
pub trait CategoryService: Send + Sync {
    /// Create a new category, returning its identifier
    async fn create(&self, ctx: &RequestContext, category: Category) -> Result<String, AppError>;

    /// Update the category identified by `id`
    async fn update(&self, ctx: &RequestContext, id: &str, category: Category) -> Result<(), AppError>;

    /// Get category by ID
    async fn get_by_id(&self, ctx: &RequestContext, id: &str) -> Result<Category, AppError>;

    /// List categories
    async fn get_all(
        &self,
        ctx: &RequestContext,
        filter: CategoriesFilter,
    ) -> Result<Vec<Category>, AppError>;

    /// Delete category
    async fn delete(&self, ctx: &RequestContext, id: &str) -> Result<(), AppError>;
}

/// CategoryService implementation
pub struct CategoryServiceImpl<C>
where
    C: CategoryRepository,
{
    category_repo: Arc<C>,
}

impl<C> CategoryServiceImpl<C>
where
    C: CategoryRepository,
{
    pub fn new(category_repo: Arc<C>) -> Self {
        Self { category_repo }
    }
}

#[async_trait]
impl<C> CategoryService for CategoryServiceImpl<C>
where
    C: CategoryRepository + 'static,
{
    #[instrument(skip(self, ctx, category), fields(name = %category.name))]
    async fn create(&self, ctx: &RequestContext, category: Category) -> Result<String, AppError> {
        let id = self.category_repo.create(ctx, &category).await?;
        tracing::debug!(category_id = %id, "Category created");
        Ok(id)
    }

    #[instrument(skip(self, ctx, category))]
    async fn update(&self, ctx: &RequestContext, id: &str, mut category: Category) -> Result<(), AppError> {
        category.id = id.to_string();
        self.category_repo.update(ctx, &category).await
    }

    #[instrument(skip(self, ctx))]
    async fn get_by_id(&self, ctx: &RequestContext, id: &str) -> Result<Category, AppError> {
        self.category_repo.find_by_id(ctx, id).await
    }

    #[instrument(skip(self, ctx))]
    async fn get_all(
        &self,
        ctx: &RequestContext,
        mut filter: CategoriesFilter,
    ) -> Result<Vec<Category>, AppError> {
        filter.pagination = filter.pagination.normalized();
        self.category_repo.find_all(ctx, &filter).await
    }

    #[instrument(skip(self, ctx))]
    async fn delete(&self, ctx: &RequestContext, id: &str) -> Result<(), AppError> {
        self.category_repo.delete(ctx, id).await
    }
}
