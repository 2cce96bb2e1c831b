//! Product Repository Implementation
//!
//! PostgreSQL implementation of the ProductRepository trait.
//! Reads LEFT JOIN the owning category so a product whose category was
//! soft-deleted still loads, just without `category`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::{like_pattern, map_write_error, new_id, parse_id, run_query};
use crate::domain::{Category, Product, ProductFilter, ProductPatch, ProductRepository};
use crate::shared::context::RequestContext;
use crate::shared::error::AppError;

const TABLE: &str = "products";

const SKU_TAKEN: &str = "product sku already exists";

const SELECT_PRODUCTS: &str = r#"
    SELECT p.id, p.name, p.description, p.sku, p.price, p.stock, p.image_url,
           p.category_id, p.created_at, p.updated_at,
           c.name AS category_name,
           c.created_at AS category_created_at,
           c.updated_at AS category_updated_at
    FROM products p
    LEFT JOIN categories c ON c.id = p.category_id AND c.deleted_at IS NULL
    WHERE p.deleted_at IS NULL"#;

/// Product row joined with its (possibly missing) live category.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: Uuid,
    name: String,
    description: String,
    sku: String,
    price: f64,
    stock: i32,
    image_url: Option<String>,
    category_id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    category_name: Option<String>,
    category_created_at: Option<DateTime<Utc>>,
    category_updated_at: Option<DateTime<Utc>>,
}

impl ProductRow {
    fn into_product(self) -> Product {
        let category = match (
            self.category_name,
            self.category_created_at,
            self.category_updated_at,
        ) {
            (Some(name), Some(created_at), Some(updated_at)) => Some(Category {
                id: self.category_id.to_string(),
                name,
                created_at,
                updated_at,
            }),
            _ => None,
        };

        Product {
            id: self.id.to_string(),
            name: self.name,
            description: self.description,
            sku: self.sku,
            price: self.price,
            stock: self.stock,
            image_url: self.image_url,
            category_id: self.category_id.to_string(),
            category,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

fn not_found(id: &str) -> AppError {
    AppError::NotFound(format!("product {} not found", id))
}

fn category_not_found() -> AppError {
    AppError::NotFound("category not found".to_string())
}

/// `UPDATE` touching only the fields present in the patch, plus `updated_at`.
fn build_update(
    patch: &ProductPatch,
    id: Uuid,
    category_id: Option<Uuid>,
) -> QueryBuilder<'_, Postgres> {
    let mut query = QueryBuilder::<Postgres>::new("UPDATE products SET ");
    let mut columns = query.separated(", ");
    if let Some(name) = &patch.name {
        columns.push("name = ").push_bind_unseparated(name);
    }
    if let Some(description) = &patch.description {
        columns
            .push("description = ")
            .push_bind_unseparated(description);
    }
    if let Some(sku) = &patch.sku {
        columns.push("sku = ").push_bind_unseparated(sku);
    }
    if let Some(price) = patch.price {
        columns.push("price = ").push_bind_unseparated(price);
    }
    if let Some(stock) = patch.stock {
        columns.push("stock = ").push_bind_unseparated(stock);
    }
    if let Some(image_url) = &patch.image_url {
        columns
            .push("image_url = ")
            .push_bind_unseparated(image_url.as_deref());
    }
    if let Some(category_id) = category_id {
        columns
            .push("category_id = ")
            .push_bind_unseparated(category_id);
    }
    columns.push("updated_at = NOW()");

    query
        .push(" WHERE id = ")
        .push_bind(id)
        .push(" AND deleted_at IS NULL");
    query
}

/// Live products matching every present filter, oldest first.
fn build_find_all(filter: &ProductFilter, category_id: Option<Uuid>) -> QueryBuilder<'_, Postgres> {
    let mut query = QueryBuilder::<Postgres>::new(SELECT_PRODUCTS);
    if let Some(name) = filter.name_term() {
        query.push(" AND p.name ILIKE ").push_bind(like_pattern(name));
    }
    if let Some(category_id) = category_id {
        query.push(" AND p.category_id = ").push_bind(category_id);
    }
    if let Some(min_price) = filter.min_price {
        query.push(" AND p.price >= ").push_bind(min_price);
    }
    if let Some(max_price) = filter.max_price {
        query.push(" AND p.price <= ").push_bind(max_price);
    }
    query
        .push(" ORDER BY p.created_at ASC, p.id ASC LIMIT ")
        .push_bind(filter.pagination.limit)
        .push(" OFFSET ")
        .push_bind(filter.pagination.offset);
    query
}

/// PostgreSQL product repository implementation.
#[derive(Clone)]
pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    /// Create a new PgProductRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn create(&self, ctx: &RequestContext, product: &Product) -> Result<String, AppError> {
        let id = new_id(&product.id)?;
        let category_id = parse_id(&product.category_id).ok_or_else(category_not_found)?;

        let created = run_query(ctx, "create", TABLE, async {
            sqlx::query_scalar::<_, Uuid>(
                r#"
                INSERT INTO products (id, name, description, sku, price, stock, image_url, category_id)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                RETURNING id
                "#,
            )
            .bind(id)
            .bind(&product.name)
            .bind(&product.description)
            .bind(&product.sku)
            .bind(product.price)
            .bind(product.stock)
            .bind(product.image_url.as_deref())
            .bind(category_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_write_error(e, SKU_TAKEN))
        })
        .await?;

        Ok(created.to_string())
    }

    async fn find_by_id(&self, ctx: &RequestContext, id: &str) -> Result<Product, AppError> {
        let uuid = parse_id(id).ok_or_else(|| not_found(id))?;

        let row = run_query(ctx, "find_by_id", TABLE, async {
            let mut query = QueryBuilder::<Postgres>::new(SELECT_PRODUCTS);
            query.push(" AND p.id = ").push_bind(uuid);

            query
                .build_query_as::<ProductRow>()
                .fetch_optional(&self.pool)
                .await
                .map_err(AppError::from)
        })
        .await?;

        row.map(ProductRow::into_product)
            .ok_or_else(|| not_found(id))
    }

    async fn update(&self, ctx: &RequestContext, patch: &ProductPatch) -> Result<(), AppError> {
        if patch.is_empty() {
            return Err(AppError::InvalidArgument(
                "product update cannot be empty".to_string(),
            ));
        }
        let uuid = parse_id(&patch.id).ok_or_else(|| not_found(&patch.id))?;
        let category_id = match patch.category_change() {
            Some(raw) => Some(parse_id(raw).ok_or_else(category_not_found)?),
            None => None,
        };

        let result = run_query(ctx, "update", TABLE, async {
            let mut query = build_update(patch, uuid, category_id);

            query
                .build()
                .execute(&self.pool)
                .await
                .map_err(|e| map_write_error(e, SKU_TAKEN))
        })
        .await?;

        if result.rows_affected() == 0 {
            return Err(not_found(&patch.id));
        }

        Ok(())
    }

    async fn find_all(
        &self,
        ctx: &RequestContext,
        filter: &ProductFilter,
    ) -> Result<Vec<Product>, AppError> {
        let category_id = match filter.category_term() {
            Some(raw) => match parse_id(raw) {
                Some(uuid) => Some(uuid),
                // no product can reference a non-UUID category
                None => return Ok(Vec::new()),
            },
            None => None,
        };

        let rows = run_query(ctx, "find_all", TABLE, async {
            let mut query = build_find_all(filter, category_id);

            query
                .build_query_as::<ProductRow>()
                .fetch_all(&self.pool)
                .await
                .map_err(AppError::from)
        })
        .await?;

        Ok(rows.into_iter().map(ProductRow::into_product).collect())
    }

    async fn delete(&self, ctx: &RequestContext, id: &str) -> Result<(), AppError> {
        let Some(uuid) = parse_id(id) else {
            tracing::debug!(product_id = id, "Delete of unknown product ignored");
            return Ok(());
        };

        let result = run_query(ctx, "delete", TABLE, async {
            sqlx::query(
                r#"
                UPDATE products
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
            tracing::debug!(product_id = id, "Delete of unknown product ignored");
        }

        Ok(())
    }
}
