use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentPage {
    pub id: String,
    pub document_id: String,
    /// 1부터 시작. 문서 안에서 유일하다고 가정하지만 검사하지는 않습니다.
    pub page_number: i64,
    /// 불투명(opaque) JSON 값. 서버는 내용을 해석하지 않습니다.
    pub content: Value,
    pub created_at: String,
    pub updated_at: String,
}

impl DocumentPage {
    pub fn apply(&mut self, req: &UpdatePageRequest, now: &str) {
        if let Some(page_number) = req.page_number {
            self.page_number = page_number;
        }
        if let Some(content) = &req.content {
            self.content = content.clone();
        }
        self.updated_at = now.to_string();
    }
}

/// `POST /api/documents/{id}/pages` 요청 본문.
/// documentId는 URL 경로에서 가져옵니다.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPage {
    pub page_number: i64,
    pub content: Value,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdatePageRequest {
    pub page_number: Option<i64>,
    pub content: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_page_requires_number_and_content() {
        assert!(serde_json::from_value::<NewPage>(json!({ "content": [] })).is_err());
        assert!(serde_json::from_value::<NewPage>(json!({ "pageNumber": 2 })).is_err());
        assert!(serde_json::from_value::<NewPage>(json!({ "pageNumber": "2", "content": [] })).is_err());

        let page: NewPage = serde_json::from_value(json!({ "pageNumber": 4, "content": [] })).unwrap();
        assert_eq!(page.page_number, 4);
    }
}
