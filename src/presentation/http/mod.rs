//! HTTP API
//!
//! Routes, handlers and extractors for the REST interface.

pub mod extractors;
pub mod handlers;
pub mod routes;
