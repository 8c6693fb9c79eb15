//! # 문서(Document) 라우트 핸들러
//!
//! ## 엔드포인트
//! - `GET    /api/documents`       → 샘플(가장 먼저 만든) 문서 조회
//! - `POST   /api/documents`       → 새 문서 생성
//! - `GET    /api/documents/{id}`  → 단일 문서 조회
//! - `PATCH  /api/documents/{id}`  → 문서 수정 (부분 업데이트)
//! - `DELETE /api/documents/{id}`  → 문서 삭제 (페이지와 단락도 함께)
//!
//! ## Axum 핸들러 패턴
//! - `State(state)`: 공유 저장소
//! - `Path(id)`: URL 경로 파라미터
//! - `AppJson(body)`: 요청 본문 JSON. 모양이 틀리면 400
//!
//! 반환 타입이 `Result<T, AppError>`이면 `Err`는 공통 에러 JSON 응답이 됩니다.

use super::AppState;
use crate::{error::AppError, extract::AppJson, models::*};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

/// `GET /documents` — 뷰어가 처음 여는 문서를 반환합니다.
///
/// 문서 목록 화면이 없으므로 가장 먼저 만들어진 문서 하나만 돌려줍니다.
/// 문서가 하나도 없으면 404.
pub async fn get_sample_document(
    State(state): State<AppState>,
) -> Result<Json<Document>, AppError> {
    let document = state
        .store
        .first_document()
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(document))
}

/// `GET /documents/{id}`
pub async fn get_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Document>, AppError> {
    let document = state
        .store
        .get_document(&id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(document))
}

/// `POST /documents` — 새 문서를 생성합니다 (totalPages 1, status draft).
///
/// 성공 시 201 Created와 생성된 문서를 반환합니다.
pub async fn create_document(
    State(state): State<AppState>,
    AppJson(req): AppJson<CreateDocumentRequest>,
) -> Result<(StatusCode, Json<Document>), AppError> {
    let document = state.store.create_document(&req).await?;
    tracing::info!("Created document {} ({})", document.id, document.filename);
    Ok((StatusCode::CREATED, Json(document)))
}

/// `PATCH /documents/{id}` — 본문에 있는 필드만 바꿉니다.
/// 예: `{ "status": "completed" }`
pub async fn update_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(req): AppJson<UpdateDocumentRequest>,
) -> Result<Json<Document>, AppError> {
    let document = state
        .store
        .update_document(&id, &req)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(document))
}

/// `DELETE /documents/{id}` — 성공 시 204 No Content
pub async fn delete_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    if !state.store.delete_document(&id).await? {
        return Err(AppError::NotFound);
    }
    Ok(StatusCode::NO_CONTENT)
}
