//! Data Transfer Objects
//!
//! DTOs for API request/response serialization.

pub mod request;
pub mod response;

pub use request::{
    CategoriesQueryParams, CategoryRequest, CreateProductRequest, ProductsQueryParams,
    UpdateProductRequest,
};
pub use response::{
    CategoryResponse, CategorySummary, CreatedResponse, ProductResponse, StatusResponse,
};
