//! Common Test Utilities
//!
//! In-memory repositories and a `TestApp` driving the real router through
//! `axum-test`, so API tests need no database.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum_test::TestServer;
use chrono::Utc;
use parking_lot::Mutex;
use serde_json::{json, Value};

use catalog_service::application::services::{CategoryServiceImpl, ProductServiceImpl};
use catalog_service::domain::{
    CategoriesFilter, Category, CategoryRepository, Pagination, Product, ProductFilter,
    ProductPatch, ProductRepository,
};
use catalog_service::presentation::http::routes;
use catalog_service::shared::context::RequestContext;
use catalog_service::shared::error::AppError;
use catalog_service::startup::AppState;

fn page<T: Clone>(items: impl Iterator<Item = T>, pagination: Pagination) -> Vec<T> {
    items
        .skip(pagination.offset.max(0) as usize)
        .take(pagination.limit.max(0) as usize)
        .collect()
}

/// Category store kept in insertion order.
#[derive(Default)]
pub struct InMemoryCategoryRepository {
    rows: Mutex<Vec<Category>>,
    last_filter: Mutex<Option<CategoriesFilter>>,
}

impl InMemoryCategoryRepository {
    pub fn get(&self, id: &str) -> Option<Category> {
        self.rows.lock().iter().find(|c| c.id == id).cloned()
    }

    /// Filter received by the most recent `find_all`.
    pub fn last_filter(&self) -> Option<CategoriesFilter> {
        self.last_filter.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.rows.lock().len()
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn create(&self, _ctx: &RequestContext, category: &Category) -> Result<String, AppError> {
        let mut rows = self.rows.lock();
        if rows.iter().any(|c| c.name == category.name) {
            return Err(AppError::Internal("category name already exists".into()));
        }

        let mut stored = category.clone();
        if stored.id.is_empty() {
            stored.id = uuid::Uuid::now_v7().to_string();
        }
        let now = Utc::now();
        stored.created_at = now;
        stored.updated_at = now;

        let id = stored.id.clone();
        rows.push(stored);
        Ok(id)
    }

    async fn find_by_id(&self, _ctx: &RequestContext, id: &str) -> Result<Category, AppError> {
        self.get(id)
            .ok_or_else(|| AppError::NotFound(format!("category {} not found", id)))
    }

    async fn update(&self, _ctx: &RequestContext, category: &Category) -> Result<(), AppError> {
        let mut rows = self.rows.lock();
        let stored = rows
            .iter_mut()
            .find(|c| c.id == category.id)
            .ok_or_else(|| AppError::NotFound(format!("category {} not found", category.id)))?;
        stored.name = category.name.clone();
        stored.updated_at = Utc::now();
        Ok(())
    }

    async fn find_all(
        &self,
        _ctx: &RequestContext,
        filter: &CategoriesFilter,
    ) -> Result<Vec<Category>, AppError> {
        *self.last_filter.lock() = Some(filter.clone());

        let term = filter.name_term().map(str::to_lowercase);
        let rows = self.rows.lock();
        let matching = rows
            .iter()
            .filter(|c| match &term {
                Some(term) => c.name.to_lowercase().contains(term),
                None => true,
            })
            .cloned();
        Ok(page(matching, filter.pagination))
    }

    async fn delete(&self, _ctx: &RequestContext, id: &str) -> Result<(), AppError> {
        self.rows.lock().retain(|c| c.id != id);
        Ok(())
    }
}

/// Product store that resolves categories from the category fake on read.
pub struct InMemoryProductRepository {
    rows: Mutex<Vec<Product>>,
    categories: Arc<InMemoryCategoryRepository>,
    last_filter: Mutex<Option<ProductFilter>>,
}

impl InMemoryProductRepository {
    pub fn new(categories: Arc<InMemoryCategoryRepository>) -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            categories,
            last_filter: Mutex::new(None),
        }
    }

    /// Filter received by the most recent `find_all`.
    pub fn last_filter(&self) -> Option<ProductFilter> {
        self.last_filter.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.rows.lock().len()
    }

    fn with_category(&self, mut product: Product) -> Product {
        product.category = self.categories.get(&product.category_id);
        product
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, _ctx: &RequestContext, product: &Product) -> Result<String, AppError> {
        let mut rows = self.rows.lock();
        if rows.iter().any(|p| p.sku == product.sku) {
            return Err(AppError::Internal("product sku already exists".into()));
        }

        let mut stored = product.clone();
        if stored.id.is_empty() {
            stored.id = uuid::Uuid::now_v7().to_string();
        }
        stored.category = None;

        let id = stored.id.clone();
        rows.push(stored);
        Ok(id)
    }

    async fn find_by_id(&self, _ctx: &RequestContext, id: &str) -> Result<Product, AppError> {
        let found = self.rows.lock().iter().find(|p| p.id == id).cloned();
        found
            .map(|p| self.with_category(p))
            .ok_or_else(|| AppError::NotFound(format!("product {} not found", id)))
    }

    async fn update(&self, _ctx: &RequestContext, patch: &ProductPatch) -> Result<(), AppError> {
        if patch.is_empty() {
            return Err(AppError::InvalidArgument(
                "product update cannot be empty".into(),
            ));
        }

        let mut rows = self.rows.lock();
        let stored = rows
            .iter_mut()
            .find(|p| p.id == patch.id)
            .ok_or_else(|| AppError::NotFound(format!("product {} not found", patch.id)))?;

        if let Some(name) = &patch.name {
            stored.name = name.clone();
        }
        if let Some(description) = &patch.description {
            stored.description = description.clone();
        }
        if let Some(sku) = &patch.sku {
            stored.sku = sku.clone();
        }
        if let Some(price) = patch.price {
            stored.price = price;
        }
        if let Some(stock) = patch.stock {
            stored.stock = stock;
        }
        if let Some(image_url) = &patch.image_url {
            stored.image_url = image_url.clone();
        }
        if let Some(category_id) = patch.category_change() {
            stored.category_id = category_id.to_string();
        }
        stored.updated_at = Utc::now();
        Ok(())
    }

    async fn find_all(
        &self,
        _ctx: &RequestContext,
        filter: &ProductFilter,
    ) -> Result<Vec<Product>, AppError> {
        *self.last_filter.lock() = Some(filter.clone());

        let term = filter.name_term().map(str::to_lowercase);
        let matching: Vec<Product> = {
            let rows = self.rows.lock();
            let iter = rows
                .iter()
                .filter(|p| match &term {
                    Some(term) => p.name.to_lowercase().contains(term),
                    None => true,
                })
                .filter(|p| filter.category_term().map_or(true, |c| p.category_id == c))
                .filter(|p| filter.min_price.map_or(true, |min| p.price >= min))
                .filter(|p| filter.max_price.map_or(true, |max| p.price <= max))
                .cloned();
            page(iter, filter.pagination)
        };

        Ok(matching.into_iter().map(|p| self.with_category(p)).collect())
    }

    async fn delete(&self, _ctx: &RequestContext, id: &str) -> Result<(), AppError> {
        self.rows.lock().retain(|p| p.id != id);
        Ok(())
    }
}

/// Test application wired with in-memory repositories
pub struct TestApp {
    pub server: TestServer,
    pub categories: Arc<InMemoryCategoryRepository>,
    pub products: Arc<InMemoryProductRepository>,
}

impl TestApp {
    pub fn new() -> Self {
        let categories = Arc::new(InMemoryCategoryRepository::default());
        let products = Arc::new(InMemoryProductRepository::new(categories.clone()));

        let state = AppState::new(
            Arc::new(CategoryServiceImpl::new(categories.clone())),
            Arc::new(ProductServiceImpl::new(products.clone(), categories.clone())),
            Duration::from_secs(5),
        );

        let router = Router::new().nest("/api/v1", routes::api_routes(state));
        let server = TestServer::new(router).expect("failed to start test server");

        Self {
            server,
            categories,
            products,
        }
    }

    /// Create a category through the API and return its id
    pub async fn create_category(&self, name: &str) -> String {
        let response = self
            .server
            .post("/api/v1/categories")
            .json(&json!({ "name": name }))
            .await;
        response.assert_status(axum::http::StatusCode::CREATED);
        id_of(&response.json::<Value>())
    }

    /// Create a product through the API and return its id
    pub async fn create_product(&self, name: &str, sku: &str, price: f64, category_id: &str) -> String {
        let response = self
            .server
            .post("/api/v1/products")
            .json(&product_body(name, sku, price, category_id))
            .await;
        response.assert_status(axum::http::StatusCode::CREATED);
        id_of(&response.json::<Value>())
    }
}

/// Valid create-product body
pub fn product_body(name: &str, sku: &str, price: f64, category_id: &str) -> Value {
    json!({
        "name": name,
        "description": format!("{} description", name),
        "sku": sku,
        "price": price,
        "stock": 10,
        "categoryId": category_id,
    })
}

pub fn id_of(body: &Value) -> String {
    body["id"].as_str().expect("id in body").to_string()
}
