use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::domain::AppState;
use crate::infrastructure::http::api::{ApiError, ApiSuccess};
use crate::infrastructure::http::auth::Editor;

pub mod drafts;
pub mod posts;

// health check handler
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

pub async fn login<S: AppState>(
    State(state): State<S>,
    Json(request): Json<LoginRequest>,
) -> Result<ApiSuccess<LoginResponse>, ApiError> {
    let session = state
        .password_gate()
        .login(&request.password)
        .ok_or(ApiError::Unauthorized)?;
    let token = session.token().to_string();
    state.sessions().insert(session).await;

    Ok(ApiSuccess::new(StatusCode::OK, LoginResponse { token }))
}

pub async fn logout<S: AppState>(
    State(state): State<S>,
    Editor(session): Editor,
) -> StatusCode {
    state.sessions().revoke(session.token()).await;
    StatusCode::NO_CONTENT
}
