//! Path parameter helpers.

use std::str::FromStr;

use certmatch_core::error::AppError;

/// Parse a typed id from a path segment, reporting a validation error
/// instead of the framework's plain-text rejection.
pub fn parse_id<T: FromStr>(raw: &str, what: &str) -> Result<T, AppError> {
    raw.parse::<T>()
        .map_err(|_| AppError::validation(format!("Invalid {what} id: '{raw}'")))
}
