//! Category Repository Implementation
//!
//! PostgreSQL implementation of the CategoryRepository trait.
//! Rows are soft-deleted through `deleted_at`; every read skips them.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::{like_pattern, map_write_error, new_id, parse_id, run_query};
use crate::domain::{CategoriesFilter, Category, CategoryRepository};
use crate::shared::context::RequestContext;
use crate::shared::error::AppError;

const TABLE: &str = "categories";

/// Database row representation of the categories table.
#[derive(Debug, sqlx::FromRow)]
struct CategoryRow {
    id: Uuid,
    name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CategoryRow {
    fn into_category(self) -> Category {
        Category {
            id: self.id.to_string(),
            name: self.name,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

fn not_found(id: &str) -> AppError {
    AppError::NotFound(format!("category {} not found", id))
}

fn require_name(category: &Category) -> Result<(), AppError> {
    if category.name.trim().is_empty() {
        return Err(AppError::InvalidArgument("category name cannot be empty".into()));
    }
    Ok(())
}

/// PostgreSQL category repository implementation.
#[derive(Clone)]
pub struct PgCategoryRepository {
    pool: PgPool,
}

impl PgCategoryRepository {
    /// Create a new PgCategoryRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn create(&self, ctx: &RequestContext, category: &Category) -> Result<String, AppError> {
        require_name(category)?;
        let id = new_id(&category.id)?;

        let created = run_query(ctx, "create", TABLE, async {
            sqlx::query_scalar::<_, Uuid>(
                r#"
                INSERT INTO categories (id, name)
                VALUES ($1, $2)
                RETURNING id
                "#,
            )
            .bind(id)
            .bind(&category.name)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_write_error(e, "category name already exists"))
        })
        .await?;

        Ok(created.to_string())
    }

    async fn find_by_id(&self, ctx: &RequestContext, id: &str) -> Result<Category, AppError> {
        let uuid = parse_id(id).ok_or_else(|| not_found(id))?;

        let row = run_query(ctx, "find_by_id", TABLE, async {
            sqlx::query_as::<_, CategoryRow>(
                r#"
                SELECT id, name, created_at, updated_at
                FROM categories
                WHERE id = $1 AND deleted_at IS NULL
                "#,
            )
            .bind(uuid)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
        })
        .await?;

        row.map(CategoryRow::into_category)
            .ok_or_else(|| not_found(id))
    }

    async fn update(&self, ctx: &RequestContext, category: &Category) -> Result<(), AppError> {
        require_name(category)?;
        let uuid = parse_id(&category.id).ok_or_else(|| not_found(&category.id))?;

        let result = run_query(ctx, "update", TABLE, async {
            sqlx::query(
                r#"
                UPDATE categories
                SET name = $2,
                    updated_at = NOW()
                WHERE id = $1 AND deleted_at IS NULL
                "#,
            )
            .bind(uuid)
            .bind(&category.name)
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error(e, "category name already exists"))
        })
        .await?;

        if result.rows_affected() == 0 {
            return Err(not_found(&category.id));
        }

        Ok(())
    }

    async fn find_all(
        &self,
        ctx: &RequestContext,
        filter: &CategoriesFilter,
    ) -> Result<Vec<Category>, AppError> {
        let rows = run_query(ctx, "find_all", TABLE, async {
            let mut query = QueryBuilder::<Postgres>::new(
                "SELECT id, name, created_at, updated_at FROM categories WHERE deleted_at IS NULL",
            );
            if let Some(name) = filter.name_term() {
                query.push(" AND name ILIKE ").push_bind(like_pattern(name));
            }
            query
                .push(" ORDER BY created_at ASC, id ASC LIMIT ")
                .push_bind(filter.pagination.limit)
                .push(" OFFSET ")
                .push_bind(filter.pagination.offset);

            query
                .build_query_as::<CategoryRow>()
                .fetch_all(&self.pool)
                .await
                .map_err(AppError::from)
        })
        .await?;

        Ok(rows.into_iter().map(CategoryRow::into_category).collect())
    }

    async fn delete(&self, ctx: &RequestContext, id: &str) -> Result<(), AppError> {
        let Some(uuid) = parse_id(id) else {
            tracing::debug!(category_id = id, "Delete of unknown category ignored");
            return Ok(());
        };

        let result = run_query(ctx, "delete", TABLE, async {
            sqlx::query(
                r#"
                UPDATE categories
                SET deleted_at = NOW()
                WHERE id = $1 AND deleted_at IS NULL
                "#,
            )
            .bind(uuid)
            .execute(&self.pool)
            .await
            .map_err(AppError::from)
        })
        .await?;

        if result.rows_affected() == 0 {
            tracing::debug!(category_id = id, "Delete of unknown category ignored");
        }

        Ok(())
    }
}
