use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use scriptorium_common::{DraftId, parse_id};

use crate::domain::AppState;
use crate::infrastructure::http::api::{ApiError, ApiSuccess};
use crate::infrastructure::http::auth::Editor;
use crate::infrastructure::http::handlers::drafts::dto::{DraftResponse, SaveDraftRequest};
use crate::infrastructure::http::handlers::posts::dto::SavedResponse;

pub mod dto;

pub async fn list_drafts<S: AppState>(
    State(state): State<S>,
    Editor(session): Editor,
) -> Result<ApiSuccess<Vec<DraftResponse>>, ApiError> {
    let result = state
        .workflow()
        .list_drafts(&session)
        .await
        .into_iter()
        .map(DraftResponse::from)
        .collect::<Vec<_>>();

    Ok(ApiSuccess::new(StatusCode::OK, result))
}

pub async fn find_draft<S: AppState>(
    Path(id): Path<u64>,
    State(state): State<S>,
    Editor(session): Editor,
) -> Result<ApiSuccess<DraftResponse>, ApiError> {
    state
        .workflow()
        .find_draft(&session, DraftId(id))
        .await
        .map(|draft| ApiSuccess::new(StatusCode::OK, DraftResponse::from(draft)))
        .ok_or(ApiError::NotFound)
}

pub async fn save_draft<S: AppState>(
    State(state): State<S>,
    Editor(session): Editor,
    Json(request): Json<SaveDraftRequest>,
) -> Result<ApiSuccess<SavedResponse>, ApiError> {
    let draft_id = parse_id::<DraftId>(request.draft_id.as_deref());

    let id = state
        .workflow()
        .save_draft(&session, &request.input, draft_id)
        .await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        SavedResponse {
            id: id.into(),
            location: "/drafts?saved=1".to_string(),
        },
    ))
}

pub async fn delete_draft<S: AppState>(
    Path(id): Path<u64>,
    State(state): State<S>,
    Editor(session): Editor,
) -> Result<StatusCode, ApiError> {
    state.workflow().delete_draft(&session, DraftId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
