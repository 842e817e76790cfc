use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use scriptorium_common::{EditorSession, SessionToken};

use crate::domain::AppState;
use crate::infrastructure::http::api::ApiError;

/// Extractor for requests carrying a live editor session as bearer token.
/// Rejects everything else with 401.
#[derive(Debug, Clone)]
pub struct Editor(pub EditorSession);

impl<S: AppState> FromRequestParts<S> for Editor {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or(ApiError::Unauthorized)?;
        state
            .sessions()
            .resolve(&SessionToken::from(token))
            .await
            .map(Editor)
            .ok_or(ApiError::Unauthorized)
    }
}

pub(crate) fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
