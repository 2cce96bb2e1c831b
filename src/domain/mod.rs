//! # Domain Layer
//!
//! The domain layer contains the core data model of the catalog service.
//! It is independent of any external frameworks or infrastructure concerns.
//!
//! ## Structure
//!
//! - **entities**: Core domain entities (Category, Product) and their repository traits
//! - **value_objects**: Immutable value types (Pagination)
//!
//! ## Design Principles
//!
//! - No dependencies on infrastructure or presentation layers
//! - Repository traits define data access contracts
//! - Entities are plain data; business rules live in the application services

pub mod entities;
pub mod value_objects;

// Re-export commonly used types
pub use entities::*;
pub use value_objects::*;
