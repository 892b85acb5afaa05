//! HTTP request handlers, one module per resource.

pub mod application;
pub mod company;
pub mod contract;
pub mod health;
pub mod schedule;
pub mod user;

use certmatch_core::error::AppError;

use crate::error::ApiError;

/// Fallback for unmatched routes, rendered in the standard error envelope.
pub async fn not_found() -> ApiError {
    AppError::not_found("No such route").into()
}
