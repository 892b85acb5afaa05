//! Convenience result type alias for CertMatch.

use crate::error::AppError;

/// A specialized `Result` type for CertMatch operations.
pub type AppResult<T> = Result<T, AppError>;
