//! Custom Axum extractors.

pub mod actor;
pub mod json;
pub mod pagination;
pub mod path;
pub mod query;
pub mod search;

pub use actor::{ACTOR_HEADER, Actor};
pub use json::ValidJson;
pub use pagination::PaginationParams;
pub use path::parse_id;
pub use query::ValidQuery;
pub use search::SearchQuery;
