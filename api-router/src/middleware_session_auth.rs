use axum::{
    extract::{FromRequestParts, Request},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use common::storage::types::user::User;

use crate::{error::ApiError, AuthSessionType};

/// Extractor for handlers behind `require_auth`; the middleware has already
/// placed the signed-in user in request extensions.
#[derive(Debug, Clone)]
pub struct RequireUser(pub User);

impl<S> FromRequestParts<S> for RequireUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<User>()
            .cloned()
            .map(RequireUser)
            .ok_or_else(|| ApiError::Unauthorized("You have to be signed in".to_string()))
    }
}

/// Session-auth middleware that adds the current user to request extensions.
pub async fn require_auth(
    auth: AuthSessionType,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    match auth.current_user {
        Some(user) => {
            request.extensions_mut().insert(user);
            Ok(next.run(request).await)
        }
        None => Err(ApiError::Unauthorized(
            "You have to be signed in".to_string(),
        )),
    }
}
