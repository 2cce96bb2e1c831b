//! Shared Utilities
//!
//! Common utilities used across all layers.

pub mod context;
pub mod error;
pub mod validation;
