//! # 단락(Paragraph) 라우트 핸들러
//!
//! ## 엔드포인트
//! - `GET    /api/documents/{id}/paragraphs` → 문서 전체 단락 (페이지 번호 → orderIndex 순)
//! - `GET    /api/pages/{id}/paragraphs`     → 한 페이지의 단락 (orderIndex 순)
//! - `POST   /api/paragraphs`                → 단락 추가
//! - `PATCH  /api/paragraphs/{id}`           → 단락 수정 (인라인 편집 저장 포함)
//! - `DELETE /api/paragraphs/{id}`           → 단락 삭제

use super::AppState;
use crate::{error::AppError, extract::AppJson, models::*};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

pub async fn list_document_paragraphs(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Paragraph>>, AppError> {
    Ok(Json(state.store.list_paragraphs_by_document(&id).await?))
}

pub async fn list_page_paragraphs(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Paragraph>>, AppError> {
    Ok(Json(state.store.list_paragraphs_by_page(&id).await?))
}

/// `POST /paragraphs` — 페이지가 없으면 404
///
/// 본문 예: `{ "pageId": "...", "content": "...", "orderIndex": 2 }`
pub async fn create_paragraph(
    State(state): State<AppState>,
    AppJson(req): AppJson<NewParagraph>,
) -> Result<(StatusCode, Json<Paragraph>), AppError> {
    let paragraph = state
        .store
        .create_paragraph(&req)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok((StatusCode::CREATED, Json(paragraph)))
}

/// `PATCH /paragraphs/{id}`
///
/// 없는 단락이면 404이고 저장소는 바뀌지 않습니다.
/// `"formatting": null`은 서식을 지웁니다 (키를 생략하면 그대로).
pub async fn update_paragraph(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(req): AppJson<UpdateParagraphRequest>,
) -> Result<Json<Paragraph>, AppError> {
    let paragraph = state
        .store
        .update_paragraph(&id, &req)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(paragraph))
}

pub async fn delete_paragraph(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    if !state.store.delete_paragraph(&id).await? {
        return Err(AppError::NotFound);
    }
    Ok(StatusCode::NO_CONTENT)
}
