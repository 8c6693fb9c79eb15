//! # 내보내기 / 검증 라우트 핸들러
//!
//! 폼 빌더와 PDF 필드 편집기가 만든 정의를 다운로드용 JSON 파일로 돌려주고,
//! 폼 미리보기의 제출 값을 검증합니다. 저장소는 사용하지 않습니다.
//!
//! ## 엔드포인트
//! - `POST /api/forms/export`   → `{ title, fields, createdAt }` 첨부 파일
//! - `POST /api/forms/validate` → `{ valid, errors }`
//! - `POST /api/fields/export`  → `{ filename, totalPages, fields, createdAt }` 첨부 파일

use crate::{
    editor::{forms::DEFAULT_FORM_TITLE, validate_submission, Field, FormField, ValidationReport},
    error::AppError,
    extract::AppJson,
    models::timestamp,
    services,
};
use axum::{
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::{Map, Value};

fn default_form_title() -> String {
    DEFAULT_FORM_TITLE.to_string()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportFormRequest {
    #[serde(default = "default_form_title")]
    pub title: String,
    pub fields: Vec<FormField>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateFormRequest {
    pub fields: Vec<FormField>,
    /// 필드 ID → 입력 값
    #[serde(default)]
    pub values: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportFieldsRequest {
    pub filename: String,
    pub total_pages: u32,
    pub fields: Vec<Field>,
}

/// JSON 본문 + `Content-Disposition: attachment` 응답
fn attachment(file_name: &str, body: String) -> Response {
    let headers = [
        (header::CONTENT_TYPE, "application/json".to_string()),
        (header::CONTENT_DISPOSITION, services::content_disposition(file_name)),
    ];
    (headers, body).into_response()
}

/// `POST /forms/export`
pub async fn export_form(
    AppJson(req): AppJson<ExportFormRequest>,
) -> Result<Response, AppError> {
    let export = services::export_form(&req.title, req.fields, timestamp());
    let file_name = services::form_file_name(&export.title);
    let body = services::to_pretty_json(&export)?;
    tracing::debug!("Exported form {:?} with {} fields", export.title, export.fields.len());
    Ok(attachment(&file_name, body))
}

/// `POST /forms/validate` — 검증 실패도 200으로 응답합니다 (`valid: false`).
pub async fn validate_form(
    AppJson(req): AppJson<ValidateFormRequest>,
) -> Json<ValidationReport> {
    Json(validate_submission(&req.fields, &req.values))
}

/// `POST /fields/export`
pub async fn export_fields(
    AppJson(req): AppJson<ExportFieldsRequest>,
) -> Result<Response, AppError> {
    let export = services::export_fields(&req.filename, req.total_pages, req.fields, timestamp());
    let file_name = services::field_file_name(&export.filename);
    let body = services::to_pretty_json(&export)?;
    Ok(attachment(&file_name, body))
}
