//! Product Service
//!
//! Handles product management operations. Every write that names a category
//! is checked against the category repository before the product repository
//! is touched.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::instrument;

use crate::domain::{CategoryRepository, Product, ProductFilter, ProductPatch, ProductRepository};
use crate::shared::context::RequestContext;
use crate::shared::error::AppError;

/// Product service trait
#[async_trait]
pub trait ProductService: Send + Sync {
    /// Create a new product, returning its identifier
    async fn create(&self, ctx: &RequestContext, product: Product) -> Result<String, AppError>;

    /// Apply a partial update to the product identified by `id`
    async fn update(&self, ctx: &RequestContext, id: &str, patch: ProductPatch) -> Result<(), AppError>;

    /// Get product by ID, with its category attached
    async fn get_by_id(&self, ctx: &RequestContext, id: &str) -> Result<Product, AppError>;

    /// List products
    async fn get_all(&self, ctx: &RequestContext, filter: ProductFilter) -> Result<Vec<Product>, AppError>;

    /// Delete product
    async fn delete(&self, ctx: &RequestContext, id: &str) -> Result<(), AppError>;
}

/// ProductService implementation
pub struct ProductServiceImpl<P, C>
where
    P: ProductRepository,
    C: CategoryRepository,
{
    product_repo: Arc<P>,
    category_repo: Arc<C>,
}

impl<P, C> ProductServiceImpl<P, C>
where
    P: ProductRepository,
    C: CategoryRepository,
{
    pub fn new(product_repo: Arc<P>, category_repo: Arc<C>) -> Self {
        Self {
            product_repo,
            category_repo,
        }
    }

    /// The lookup error is returned unchanged so callers see the same
    /// `NotFound` the category endpoint would produce.
    async fn ensure_category_exists(&self, ctx: &RequestContext, category_id: &str) -> Result<(), AppError> {
        self.category_repo
            .find_by_id(ctx, category_id)
            .await
            .map(|_| ())
            .inspect_err(|e| tracing::debug!(category_id, error = %e, "Category check failed"))
    }
}

#[async_trait]
impl<P, C> ProductService for ProductServiceImpl<P, C>
where
    P: ProductRepository + 'static,
    C: CategoryRepository + 'static,
{
    #[instrument(skip(self, ctx, product), fields(sku = %product.sku, category_id = %product.category_id))]
    async fn create(&self, ctx: &RequestContext, product: Product) -> Result<String, AppError> {
        self.ensure_category_exists(ctx, &product.category_id).await?;

        let id = self.product_repo.create(ctx, &product).await?;
        tracing::debug!(product_id = %id, "Product created");
        Ok(id)
    }

    #[instrument(skip(self, ctx, patch))]
    async fn update(&self, ctx: &RequestContext, id: &str, mut patch: ProductPatch) -> Result<(), AppError> {
        if let Some(category_id) = patch.category_change() {
            self.ensure_category_exists(ctx, category_id).await?;
        }

        patch.id = id.to_string();
        self.product_repo.update(ctx, &patch).await
    }

    #[instrument(skip(self, ctx))]
    async fn get_by_id(&self, ctx: &RequestContext, id: &str) -> Result<Product, AppError> {
        self.product_repo.find_by_id(ctx, id).await
    }

    #[instrument(skip(self, ctx))]
    async fn get_all(&self, ctx: &RequestContext, mut filter: ProductFilter) -> Result<Vec<Product>, AppError> {
        filter.pagination = filter.pagination.normalized();

        if filter.has_non_finite_price_bound() {
            tracing::debug!(
                min_price = ?filter.min_price,
                max_price = ?filter.max_price,
                "Rejected non-finite price bound"
            );
            return Err(AppError::InvalidArgument(
                "price bounds must be finite numbers".into(),
            ));
        }

        if filter.has_inverted_price_range() {
            tracing::debug!(
                min_price = ?filter.min_price,
                max_price = ?filter.max_price,
                "Rejected inverted price range"
            );
            return Err(AppError::InvalidArgument(
                "min price cannot be greater than max price".into(),
            ));
        }

        self.product_repo.find_all(ctx, &filter).await
    }

    #[instrument(skip(self, ctx))]
    async fn delete(&self, ctx: &RequestContext, id: &str) -> Result<(), AppError> {
        self.product_repo.delete(ctx, id).await
    }
}
