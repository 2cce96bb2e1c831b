//! Infrastructure Layer
//!
//! Implementations for external systems:
//! - Database pool and health check (PostgreSQL)
//! - Repository implementations (PostgreSQL)
//! - Prometheus metrics

pub mod database;
pub mod metrics;
pub mod repositories;
