//! # 데이터 모델 모듈
//!
//! API와 저장소가 주고받는 데이터 구조체(struct)들을 정의합니다.
//! - `document`: 문서(Document)와 상태(DocumentStatus)
//! - `page`: 문서 페이지(DocumentPage)
//! - `paragraph`: 페이지 안의 단락(Paragraph)
//!
//! JSON 키는 모두 camelCase입니다 (`totalPages`, `pageNumber`, `orderIndex` ...).
//! 프론트엔드가 기대하는 모양 그대로 직렬화하기 위해
//! `#[serde(rename_all = "camelCase")]`를 사용합니다.

pub mod document;
pub mod page;
pub mod paragraph;

pub use document::*;
pub use page::*;
pub use paragraph::*;

use serde::{Deserialize, Deserializer};

/// 새 엔티티 ID를 만듭니다 (UUIDv7: 생성 순서대로 정렬 가능).
pub fn new_id() -> String {
    uuid::Uuid::now_v7().to_string()
}

/// 현재 시각을 RFC 3339(UTC, 밀리초) 문자열로 반환합니다.
/// 예: "2026-02-16T12:00:00.000Z"
pub fn timestamp() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

/// PATCH 본문에서 "필드 누락"과 "명시적 null"을 구분합니다.
///
/// `#[serde(default, deserialize_with = "nullable")]`와 함께 쓰면:
/// - 키 없음 → `None` (변경 안 함)
/// - `null` → `Some(None)` (값 지우기)
/// - 값 → `Some(Some(v))`
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
