//! # Domain Value Objects
//!
//! Immutable value types that represent domain concepts without identity.
//!
//! ## Value Objects
//!
//! - **Pagination**: `{limit, offset}` window with default/maximum clamping

mod pagination;

pub use pagination::*;
