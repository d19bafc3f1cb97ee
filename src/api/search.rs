//! Search endpoints

use axum::{
    Json,
    extract::{Path, Query, State},
};

use super::dto::{
    HotSearchResponse, KeywordParams, SearchHistoryResponse, SearchParams, SearchResultResponse,
    SuccessResponse,
};
use crate::AppState;
use crate::auth::CurrentUser;
use crate::data::SearchCategory;
use crate::error::AppError;

/// GET /api/search
pub async fn search(
    State(state): State<AppState>,
    CurrentUser(session): CurrentUser,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResultResponse>, AppError> {
    let category = match params.category.as_deref() {
        None => SearchCategory::All,
        Some(value) => SearchCategory::parse(value).ok_or_else(|| {
            AppError::Validation(format!("Unknown search category: {}", value))
        })?,
    };

    let results = state
        .search
        .search(&session.user_id, &params.keyword, category)
        .await?;
    Ok(Json(results.into()))
}

/// POST /api/search/history?keyword=
pub async fn record(
    State(state): State<AppState>,
    CurrentUser(session): CurrentUser,
    Query(params): Query<KeywordParams>,
) -> Result<Json<SuccessResponse>, AppError> {
    state
        .search
        .record_search(&session.user_id, &params.keyword)
        .await?;
    Ok(Json(SuccessResponse::ok()))
}

/// GET /api/search/history
pub async fn history(
    State(state): State<AppState>,
    CurrentUser(session): CurrentUser,
) -> Result<Json<Vec<SearchHistoryResponse>>, AppError> {
    let entries = state.search.history(&session.user_id).await?;
    Ok(Json(entries.into_iter().map(Into::into).collect()))
}

/// DELETE /api/search/history/:id
pub async fn delete_entry(
    State(state): State<AppState>,
    CurrentUser(session): CurrentUser,
    Path(entry_id): Path<String>,
) -> Result<Json<SuccessResponse>, AppError> {
    state
        .search
        .delete_history_entry(&session.user_id, &entry_id)
        .await?;
    Ok(Json(SuccessResponse::ok()))
}

/// DELETE /api/search/history
pub async fn clear_history(
    State(state): State<AppState>,
    CurrentUser(session): CurrentUser,
) -> Result<Json<SuccessResponse>, AppError> {
    let removed = state.search.clear_history(&session.user_id).await?;
    tracing::debug!(user_id = %session.user_id, removed, "Search history cleared");
    Ok(Json(SuccessResponse::ok()))
}

/// GET /api/search/hot
pub async fn hot(State(state): State<AppState>) -> Result<Json<Vec<HotSearchResponse>>, AppError> {
    let hot = state.search.hot_searches().await?;
    Ok(Json(hot.into_iter().map(Into::into).collect()))
}
