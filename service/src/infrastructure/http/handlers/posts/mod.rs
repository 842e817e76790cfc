use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use scriptorium_common::{ArticleId, DraftId, parse_id};

use crate::domain::AppState;
use crate::infrastructure::http::api::{ApiError, ApiSuccess};
use crate::infrastructure::http::auth::Editor;
use crate::infrastructure::http::handlers::posts::dto::{
    ArticleResponse, ArticleSummaryResponse, PublishRequest, SavedResponse,
};

pub mod dto;

pub async fn list_posts<S: AppState>(
    State(state): State<S>,
) -> Result<ApiSuccess<Vec<ArticleSummaryResponse>>, ApiError> {
    let result = state
        .workflow()
        .list_articles()
        .await
        .iter()
        .map(ArticleSummaryResponse::from)
        .collect::<Vec<_>>();

    Ok(ApiSuccess::new(StatusCode::OK, result))
}

pub async fn find_post<S: AppState>(
    Path(id): Path<u64>,
    State(state): State<S>,
) -> Result<ApiSuccess<ArticleResponse>, ApiError> {
    state
        .workflow()
        .find_article(ArticleId(id))
        .await
        .map(|article| ApiSuccess::new(StatusCode::OK, ArticleResponse::from(article)))
        .ok_or(ApiError::NotFound)
}

pub async fn publish_post<S: AppState>(
    State(state): State<S>,
    Editor(session): Editor,
    Json(request): Json<PublishRequest>,
) -> Result<ApiSuccess<SavedResponse>, ApiError> {
    let post_id = parse_id::<ArticleId>(request.post_id.as_deref());
    let draft_id = parse_id::<DraftId>(request.draft_id.as_deref());

    let id = state
        .workflow()
        .publish_post(&session, &request.input, post_id, draft_id)
        .await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        SavedResponse {
            id: id.into(),
            location: format!("/post/{id}"),
        },
    ))
}

pub async fn delete_post<S: AppState>(
    Path(id): Path<u64>,
    State(state): State<S>,
    Editor(session): Editor,
) -> Result<StatusCode, ApiError> {
    state.workflow().delete_post(&session, ArticleId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
