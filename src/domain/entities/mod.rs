//! # Domain Entities
//!
//! Core domain entities of the catalog. All entities map directly to their
//! corresponding database tables.
//!
//! - **Category**: A named grouping of products
//! - **Product**: A sellable item that belongs to exactly one category
//!
//! ## Repository Traits
//!
//! Each entity has an associated repository trait defining data access operations.
//! These traits are implemented in the infrastructure layer, following the
//! dependency inversion principle.

mod category;
mod product;

pub use category::{CategoriesFilter, Category, CategoryRepository};
pub use product::{Product, ProductFilter, ProductPatch, ProductRepository};

#[cfg(test)]
pub use category::MockCategoryRepository;
#[cfg(test)]
pub use product::MockProductRepository;
