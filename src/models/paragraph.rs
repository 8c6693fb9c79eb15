use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::nullable;

/// 페이지 안의 단락 엔티티
///
/// `order_index`는 같은 페이지 안에서의 렌더링 순서를 정하는 정수 정렬 키입니다.
/// 중복이나 빈 번호를 정리하지 않습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paragraph {
    pub id: String,
    pub page_id: String,
    /// 리치 텍스트(HTML) 문자열
    pub content: String,
    pub order_index: i64,
    pub is_editing: bool,
    /// bold/italic/underline 등 서식 정보 (형식은 프론트엔드가 정함)
    pub formatting: Option<Value>,
    pub created_at: String,
    pub updated_at: String,
}

impl Paragraph {
    pub fn apply(&mut self, req: &UpdateParagraphRequest, now: &str) {
        if let Some(content) = &req.content {
            self.content = content.clone();
        }
        if let Some(order_index) = req.order_index {
            self.order_index = order_index;
        }
        if let Some(is_editing) = req.is_editing {
            self.is_editing = is_editing;
        }
        if let Some(formatting) = &req.formatting {
            self.formatting = formatting.clone();
        }
        if let Some(page_id) = &req.page_id {
            self.page_id = page_id.clone();
        }
        self.updated_at = now.to_string();
    }
}

/// `POST /api/paragraphs` 요청 본문
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewParagraph {
    pub page_id: String,
    pub content: String,
    pub order_index: i64,
    #[serde(default)]
    pub formatting: Option<Value>,
}

/// `PATCH /api/paragraphs/{id}` 요청 본문 (부분 업데이트)
///
/// None = 필드 누락 (변경 안 함).
/// `formatting`만 `Some(None)`(명시적 null → 서식 제거)을 따로 구분합니다.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateParagraphRequest {
    pub content: Option<String>,
    pub order_index: Option<i64>,
    pub is_editing: Option<bool>,
    #[serde(default, deserialize_with = "nullable")]
    pub formatting: Option<Option<Value>>,
    pub page_id: Option<String>,
}
