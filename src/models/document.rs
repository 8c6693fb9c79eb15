use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    #[default]
    Draft,
    Published,
    Completed,
}

impl DocumentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            DocumentStatus::Draft => "draft",
            DocumentStatus::Published => "published",
            DocumentStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(DocumentStatus::Draft),
            "published" => Ok(DocumentStatus::Published),
            "completed" => Ok(DocumentStatus::Completed),
            other => Err(format!("unknown document status: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    pub title: String,
    pub filename: String,
    /// 소유자 참조 (인증/권한 검사는 하지 않음)
    pub owner_id: String,
    pub total_pages: i64,
    pub status: DocumentStatus,
    pub created_at: String,
    pub updated_at: String,
}

impl Document {
    /// 요청에 포함된 필드만 덮어쓰고 updated_at을 갱신합니다 (얕은 병합).
    pub fn apply(&mut self, req: &UpdateDocumentRequest, now: &str) {
        if let Some(title) = &req.title {
            self.title = title.clone();
        }
        if let Some(filename) = &req.filename {
            self.filename = filename.clone();
        }
        if let Some(status) = req.status {
            self.status = status;
        }
        self.updated_at = now.to_string();
    }

    /// 페이지 번호가 늘어나면 총 페이지 수를 따라 올립니다. 줄이지는 않습니다.
    pub fn grow_to(&mut self, page_number: i64, now: &str) {
        self.total_pages = self.total_pages.max(page_number);
        self.updated_at = now.to_string();
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDocumentRequest {
    pub title: String,
    pub filename: String,
    pub owner_id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateDocumentRequest {
    pub title: Option<String>,
    pub filename: Option<String>,
    pub status: Option<DocumentStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Document {
        Document {
            id: "doc-1".into(),
            title: "Service Agreement Contract".into(),
            filename: "Contract_Agreement_v3.pdf".into(),
            owner_id: "user-1".into(),
            total_pages: 3,
            status: DocumentStatus::Draft,
            created_at: "2026-01-01T00:00:00.000Z".into(),
            updated_at: "2026-01-01T00:00:00.000Z".into(),
        }
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["totalPages"], 3);
        assert_eq!(value["ownerId"], "user-1");
        assert_eq!(value["status"], "draft");
    }

    #[test]
    fn grow_never_shrinks() {
        let mut doc = sample();
        doc.grow_to(2, "later");
        assert_eq!(doc.total_pages, 3);
        doc.grow_to(5, "later");
        assert_eq!(doc.total_pages, 5);
        assert_eq!(doc.updated_at, "later");
    }

    #[test]
    fn patch_rejects_unknown_keys_and_bad_status() {
        assert!(serde_json::from_value::<UpdateDocumentRequest>(json!({ "totalPages": 9 })).is_err());
        assert!(serde_json::from_value::<UpdateDocumentRequest>(json!({ "status": "archived" })).is_err());

        let req: UpdateDocumentRequest =
            serde_json::from_value(json!({ "status": "published" })).unwrap();
        let mut doc = sample();
        doc.apply(&req, "now");
        assert_eq!(doc.status, DocumentStatus::Published);
        assert_eq!(doc.title, "Service Agreement Contract");
    }

    #[test]
    fn status_round_trips_through_text() {
        for status in [DocumentStatus::Draft, DocumentStatus::Published, DocumentStatus::Completed] {
            assert_eq!(status.as_str().parse::<DocumentStatus>(), Ok(status));
        }
        assert!("void".parse::<DocumentStatus>().is_err());
    }
}
