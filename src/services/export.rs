//! # JSON 내보내기 서비스
//!
//! 폼 정의와 PDF 필드 배치를 다운로드용 JSON 파일로 만듭니다.
//!
//! - `export_form()`: `{ title, fields, createdAt }`
//! - `export_fields()`: `{ filename, totalPages, fields, createdAt }`
//! - `form_file_name()` / `field_file_name()`: 다운로드 파일 이름
//! - `to_pretty_json()`: 2칸 들여쓰기 JSON 문자열

use crate::editor::{clamp_rect, Field, FormField, RectLimits};
use crate::error::AppError;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormExport {
    pub title: String,
    pub fields: Vec<FormField>,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldExport {
    pub filename: String,
    pub total_pages: u32,
    pub fields: Vec<Field>,
    pub created_at: String,
}

pub fn export_form(title: &str, fields: Vec<FormField>, created_at: String) -> FormExport {
    FormExport {
        title: title.to_string(),
        fields,
        created_at,
    }
}

/// 필드 배치를 내보냅니다. 밖에서 편집된 좌표가 들어와도 범위 안으로 맞춥니다.
pub fn export_fields(
    filename: &str,
    total_pages: u32,
    fields: Vec<Field>,
    created_at: String,
) -> FieldExport {
    let fields = fields
        .into_iter()
        .map(|field| Field {
            rect: clamp_rect(field.rect, RectLimits::FIELD),
            ..field
        })
        .collect();

    FieldExport {
        filename: filename.to_string(),
        total_pages,
        fields,
        created_at,
    }
}

/// 폼 제목으로 파일 이름을 만듭니다.
///
/// # 예시
/// ```
/// # use inkdraft::services::form_file_name;
/// assert_eq!(form_file_name("Client Intake Form"), "client-intake-form-form.json");
/// assert_eq!(form_file_name("   "), "untitled-form.json");
/// ```
pub fn form_file_name(title: &str) -> String {
    let slug = slug::slugify(title);
    if slug.is_empty() {
        "untitled-form.json".to_string()
    } else {
        format!("{}-form.json", slug)
    }
}

/// PDF 파일 이름에서 `.pdf`를 떼고 `-fields.json`을 붙입니다.
///
/// # 예시
/// ```
/// # use inkdraft::services::field_file_name;
/// assert_eq!(field_file_name("nda.pdf"), "nda-fields.json");
/// assert_eq!(field_file_name("Lease.PDF"), "Lease-fields.json");
/// ```
pub fn field_file_name(filename: &str) -> String {
    let stem = match filename.len().checked_sub(4) {
        Some(cut)
            if filename.is_char_boundary(cut) && filename[cut..].eq_ignore_ascii_case(".pdf") =>
        {
            &filename[..cut]
        }
        _ => filename,
    };
    let stem = if stem.trim().is_empty() { "document" } else { stem };
    format!("{}-fields.json", stem)
}

/// `Content-Disposition` 헤더 값
///
/// 헤더에 넣을 수 없는 문자(따옴표, 백슬래시, 경로 구분자, 제어 문자, 비ASCII)는 `_`로 바꿉니다.
pub fn content_disposition(file_name: &str) -> String {
    let safe: String = file_name
        .chars()
        .map(|c| match c {
            '"' | '\\' | '/' => '_',
            c if c.is_ascii_graphic() || c == ' ' => c,
            _ => '_',
        })
        .collect();
    format!("attachment; filename=\"{}\"", safe)
}

pub fn to_pretty_json<T: Serialize>(value: &T) -> Result<String, AppError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| AppError::Internal(format!("Failed to encode export: {e}")))
}
