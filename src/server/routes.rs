use axum::{
    body::Bytes,
    extract::State,
    Json,
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use crate::server::AppState;
use crate::server::extract::{bad_request, ApiJson, ApiPath, ApiQuery};
use crate::library::{BookInput, SummaryMode, SummaryOutcome, DEFAULT_RECENT_LIMIT};
use crate::storage::DbStats;
use crate::{Book, BookId, Error, Summary};
use std::sync::Arc;

#[derive(Deserialize)]
pub struct RecentParams {
    pub limit: Option<usize>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressBody {
    pub current_page: i64,
}

#[derive(Deserialize, Default)]
pub struct SummaryRequest {
    /// Defaults to the reader's current page
    pub page: Option<i64>,
    /// Generate a new summary even if one exists for the page
    #[serde(default)]
    pub force: bool,
}

#[derive(Deserialize)]
pub struct PageParams {
    pub page: i64,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(e: Error) -> ApiError {
    let status = match &e {
        Error::Validation(_) => StatusCode::BAD_REQUEST,
        Error::BookNotFound(_) => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
        tracing::error!("Request failed: {}", e);
    }
    (status, Json(ErrorResponse { error: e.to_string() }))
}

pub async fn list_books(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Book>>, ApiError> {
    let books = state.library.books().await.map_err(api_error)?;
    Ok(Json(books))
}

pub async fn recent_books(
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<RecentParams>,
) -> Result<Json<Vec<Book>>, ApiError> {
    let limit = params.limit.unwrap_or(DEFAULT_RECENT_LIMIT);
    let books = state.library.recent_books(limit).await.map_err(api_error)?;
    Ok(Json(books))
}

pub async fn add_book(
    State(state): State<Arc<AppState>>,
    ApiJson(input): ApiJson<BookInput>,
) -> Result<(StatusCode, Json<Book>), ApiError> {
    let book = state.library.add_book(&input).await.map_err(api_error)?;
    Ok((StatusCode::CREATED, Json(book)))
}

pub async fn get_book(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<BookId>,
) -> Result<Json<Book>, ApiError> {
    let book = state.library.book(id).await.map_err(api_error)?;
    Ok(Json(book))
}

pub async fn delete_book(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<BookId>,
) -> Result<Json<Book>, ApiError> {
    let book = state.library.delete_book(id).await.map_err(api_error)?;
    Ok(Json(book))
}

pub async fn update_progress(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<BookId>,
    ApiJson(body): ApiJson<ProgressBody>,
) -> Result<Json<Book>, ApiError> {
    let book = state
        .library
        .update_progress(id, body.current_page)
        .await
        .map_err(api_error)?;
    Ok(Json(book))
}

pub async fn list_summaries(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<BookId>,
) -> Result<Json<Vec<Summary>>, ApiError> {
    let summaries = state.library.summaries(id).await.map_err(api_error)?;
    Ok(Json(summaries))
}

pub async fn latest_summary(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<BookId>,
    ApiQuery(params): ApiQuery<PageParams>,
) -> Result<Json<Option<Summary>>, ApiError> {
    let summary = state
        .library
        .store()
        .latest_summary(id, params.page)
        .await
        .map_err(api_error)?;
    Ok(Json(summary))
}

pub async fn summarize(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<BookId>,
    body: Bytes,
) -> Result<Json<SummaryOutcome>, ApiError> {
    // An empty body asks for the reader's current page
    let request: SummaryRequest = if body.iter().all(u8::is_ascii_whitespace) {
        SummaryRequest::default()
    } else {
        serde_json::from_slice(&body).map_err(bad_request)?
    };
    let mode = if request.force {
        SummaryMode::AlwaysNew
    } else {
        SummaryMode::ReuseExisting
    };
    let outcome = state
        .library
        .summarize(id, request.page, mode)
        .await
        .map_err(api_error)?;
    Ok(Json(outcome))
}

pub async fn get_stats(State(state): State<Arc<AppState>>) -> Result<Json<DbStats>, ApiError> {
    let stats = state.library.stats().await.map_err(api_error)?;
    Ok(Json(stats))
}
