//! # 페이지(DocumentPage) 라우트 핸들러
//!
//! ## 엔드포인트
//! - `GET    /api/documents/{id}/pages`                      → 페이지 목록 (pageNumber 순)
//! - `POST   /api/documents/{id}/pages`                      → 페이지 추가
//! - `PATCH  /api/documents/{document_id}/pages/{page_id}`   → 페이지 수정
//! - `DELETE /api/documents/{document_id}/pages/{page_id}`   → 페이지와 그 단락 삭제
//!
//! 수정/삭제는 페이지가 경로의 문서에 속할 때만 허용합니다. 다른 문서의 페이지면 404.

use super::AppState;
use crate::{error::AppError, extract::AppJson, models::*};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

/// 경로의 문서에 속한 페이지인지 확인합니다.
async fn page_of_document(
    state: &AppState,
    document_id: &str,
    page_id: &str,
) -> Result<DocumentPage, AppError> {
    state
        .store
        .get_page(page_id)
        .await?
        .filter(|page| page.document_id == document_id)
        .ok_or(AppError::NotFound)
}

/// `GET /documents/{id}/pages` — 없는 문서면 빈 목록입니다.
pub async fn list_pages(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<DocumentPage>>, AppError> {
    Ok(Json(state.store.list_pages(&id).await?))
}

/// `POST /documents/{id}/pages`
///
/// 문서의 totalPages는 max(이전 값, pageNumber)가 됩니다.
/// 본문 예: `{ "pageNumber": 4, "content": [] }`
pub async fn create_page(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(req): AppJson<NewPage>,
) -> Result<(StatusCode, Json<DocumentPage>), AppError> {
    let page = state
        .store
        .create_page(&id, &req)
        .await?
        .ok_or(AppError::NotFound)?;
    tracing::debug!("Added page {} to document {}", page.page_number, id);
    Ok((StatusCode::CREATED, Json(page)))
}

/// `PATCH /documents/{document_id}/pages/{page_id}`
pub async fn update_page(
    State(state): State<AppState>,
    Path((document_id, page_id)): Path<(String, String)>,
    AppJson(req): AppJson<UpdatePageRequest>,
) -> Result<Json<DocumentPage>, AppError> {
    page_of_document(&state, &document_id, &page_id).await?;
    let page = state
        .store
        .update_page(&page_id, &req)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(page))
}

/// `DELETE /documents/{document_id}/pages/{page_id}` — 204 No Content
///
/// 문서의 totalPages는 줄이지 않습니다.
pub async fn delete_page(
    State(state): State<AppState>,
    Path((document_id, page_id)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    page_of_document(&state, &document_id, &page_id).await?;
    if !state.store.delete_page(&page_id).await? {
        return Err(AppError::NotFound);
    }
    Ok(StatusCode::NO_CONTENT)
}
