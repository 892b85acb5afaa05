//! Acting user extractor.
//!
//! The upstream gateway authenticates the caller and forwards its user id
//! in the `x-user-id` header. The extractor resolves that id against the
//! user store and yields a [`RequestContext`].

use std::ops::Deref;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use certmatch_core::error::AppError;
use certmatch_core::types::UserId;
use certmatch_service::context::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Header carrying the acting user's id.
pub const ACTOR_HEADER: &str = "x-user-id";

/// The resolved acting user.
#[derive(Debug, Clone)]
pub struct Actor(pub RequestContext);

impl Deref for Actor {
    type Target = RequestContext;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for Actor {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(ACTOR_HEADER)
            .ok_or_else(|| AppError::authentication("Missing x-user-id header"))?;

        let user_id = raw
            .to_str()
            .ok()
            .and_then(|value| value.trim().parse::<UserId>().ok())
            .ok_or_else(|| AppError::authentication("Malformed x-user-id header"))?;

        let ctx = state.user_service.resolve_actor(user_id).await?;
        Ok(Actor(ctx))
    }
}
