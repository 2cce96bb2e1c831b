//! # Catalog Service Library
//!
//! This crate provides a product catalog service with:
//! - RESTful HTTP API for products and categories
//! - PostgreSQL for persistent storage, with soft deletes
//! - Prometheus metrics and structured logging
//!
//! ## Architecture
//!
//! The crate follows Clean Architecture principles:
//!
//! - **Domain Layer**: Entities, filters and repository traits
//! - **Application Layer**: Business services and DTOs
//! - **Infrastructure Layer**: Database repositories and metrics
//! - **Presentation Layer**: HTTP handlers, extractors and middleware
//!
//! ## Module Structure
//!
//! ```text
//! catalog_service/
//! +-- config/         Configuration management
//! +-- domain/         Entities, value objects, and repository traits
//! +-- application/    Application services and DTOs
//! +-- infrastructure/ Database repositories and metrics
//! +-- presentation/   HTTP routes, handlers and middleware
//! +-- shared/         Errors, request context, validation helpers
//! ```

// Configuration module
pub mod config;

// Domain layer - Core business logic
pub mod domain;

// Application layer - Business services
pub mod application;

// Infrastructure layer - External implementations
pub mod infrastructure;

// Presentation layer - HTTP handlers
pub mod presentation;

// Shared utilities
pub mod shared;

// Application startup and state management
pub mod startup;

// Telemetry and observability
pub mod telemetry;
