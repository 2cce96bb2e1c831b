//! HTTP Handlers
//!
//! Request handlers for all HTTP endpoints.

pub mod category;
pub mod health;
pub mod product;
