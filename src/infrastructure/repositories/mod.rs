//! Repository Implementations
//!
//! PostgreSQL implementations of domain repository traits.
//!
//! ## Available Repositories
//!
//! - **PgCategoryRepository** - Category CRUD with soft delete
//! - **PgProductRepository** - Product CRUD, joined category reads, partial updates
//!
//! Both share one injected `PgPool`; every query runs under the caller's
//! `RequestContext` and is timed into `db_query_duration_seconds`.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use sqlx::PgPool;
//! use crate::infrastructure::repositories::{PgCategoryRepository, PgProductRepository};
//!
//! fn setup_repositories(pool: PgPool) {
//!     let category_repo = PgCategoryRepository::new(pool.clone());
//!     let product_repo = PgProductRepository::new(pool);
//! }
//! ```

pub mod category_repository;
pub mod product_repository;

pub use category_repository::PgCategoryRepository;
pub use product_repository::PgProductRepository;

use std::future::Future;
use std::time::Instant;

use uuid::Uuid;

use crate::infrastructure::metrics;
use crate::shared::context::RequestContext;
use crate::shared::error::AppError;

/// Run a query under the request context and record its latency.
pub(crate) async fn run_query<T, F>(
    ctx: &RequestContext,
    operation: &'static str,
    table: &'static str,
    query: F,
) -> Result<T, AppError>
where
    F: Future<Output = Result<T, AppError>>,
{
    let started = Instant::now();
    let result = ctx.run(query).await;
    metrics::record_db_query(operation, table, started.elapsed().as_secs_f64());
    result
}

/// Identifiers are UUIDs in the store; anything else can never match a row.
pub(crate) fn parse_id(id: &str) -> Option<Uuid> {
    Uuid::parse_str(id).ok()
}

/// Identifier for a row about to be inserted.
///
/// An empty request gets a fresh time-ordered UUID.
pub(crate) fn new_id(requested: &str) -> Result<Uuid, AppError> {
    if requested.is_empty() {
        return Ok(Uuid::now_v7());
    }
    parse_id(requested)
        .ok_or_else(|| AppError::InvalidArgument(format!("invalid id: {}", requested)))
}

/// ILIKE pattern matching `term` anywhere, with LIKE wildcards escaped.
pub(crate) fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

/// Translate constraint violations raised by inserts and updates.
pub(crate) fn map_write_error(e: sqlx::Error, unique_message: &str) -> AppError {
    match &e {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            AppError::Internal(unique_message.to_string())
        }
        sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
            AppError::NotFound("category not found".to_string())
        }
        sqlx::Error::Database(db_err) if db_err.is_check_violation() => AppError::InvalidArgument(
            format!(
                "value violates constraint {}",
                db_err.constraint().unwrap_or("unknown")
            ),
        ),
        _ => AppError::Database(e),
    }
}
