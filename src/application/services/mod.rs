//! Application Services
//!
//! Business logic services that coordinate domain operations.
//!
//! ## Available Services
//!
//! - **CategoryService**: Category CRUD with pagination normalization
//! - **ProductService**: Product CRUD with category-reference and price-range checks

pub mod category_service;
pub mod product_service;

pub use category_service::{CategoryService, CategoryServiceImpl};
pub use product_service::{ProductService, ProductServiceImpl};
