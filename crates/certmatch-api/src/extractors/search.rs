//! Lenient extractor for company search criteria.

use std::convert::Infallible;

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use tracing::debug;

use certmatch_entity::company::SearchCriteria;

/// Search criteria read from the query string.
///
/// Never rejects: repeated keys keep their first value, unknown keys are
/// dropped and an unparsable query string means no criteria at all.
#[derive(Debug, Clone, Default)]
pub struct SearchQuery(pub SearchCriteria);

impl<S> FromRequestParts<S> for SearchQuery
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let criteria = match Query::<Vec<(String, String)>>::try_from_uri(&parts.uri) {
            Ok(Query(pairs)) => pairs.into_iter().collect(),
            Err(rejection) => {
                debug!(error = %rejection.body_text(), "Ignoring unparsable search query");
                SearchCriteria::default()
            }
        };
        Ok(Self(criteria))
    }
}
