//! # 단락 인라인 편집 세션
//!
//! 문서 뷰어에서는 한 번에 한 단락만 편집할 수 있습니다.
//! 상태를 `Option<String>` 편집 ID 대신 두 상태의 enum으로 표현해서
//! "편집 중이 아닌데 초안이 있는" 상태가 생기지 않게 합니다.

use crate::error::AppError;
use crate::models::{Paragraph, UpdateParagraphRequest};
use crate::store::Store;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EditError {
    #[error("no paragraph is being edited")]
    NotEditing,
    #[error("paragraph {0} no longer exists")]
    NotFound(String),
    #[error(transparent)]
    Store(#[from] AppError),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditSession {
    #[default]
    Viewing,
    Editing { paragraph_id: String, draft: String },
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// 단락 편집을 시작합니다. 초안은 저장된 내용에서 시작합니다.
    /// 다른 단락을 편집 중이었다면 그 초안은 버려집니다.
    pub fn begin(&mut self, paragraph: &Paragraph) {
        *self = EditSession::Editing {
            paragraph_id: paragraph.id.clone(),
            draft: paragraph.content.clone(),
        };
    }

    pub fn editing_id(&self) -> Option<&str> {
        match self {
            EditSession::Editing { paragraph_id, .. } => Some(paragraph_id),
            EditSession::Viewing => None,
        }
    }

    pub fn draft(&self) -> Option<&str> {
        match self {
            EditSession::Editing { draft, .. } => Some(draft),
            EditSession::Viewing => None,
        }
    }

    pub fn is_editing(&self, paragraph_id: &str) -> bool {
        self.editing_id() == Some(paragraph_id)
    }

    pub fn set_draft(&mut self, text: impl Into<String>) -> Result<(), EditError> {
        match self {
            EditSession::Editing { draft, .. } => {
                *draft = text.into();
                Ok(())
            }
            EditSession::Viewing => Err(EditError::NotEditing),
        }
    }

    /// 초안을 버리고 보기 모드로 돌아갑니다.
    pub fn cancel(&mut self) {
        *self = EditSession::Viewing;
    }

    /// 초안을 저장소에 저장하고 보기 모드로 돌아갑니다.
    ///
    /// 실패하면 편집 상태와 초안을 그대로 둡니다 (다시 저장을 시도할 수 있음).
    pub async fn save(&mut self, store: &dyn Store) -> Result<Paragraph, EditError> {
        let EditSession::Editing { paragraph_id, draft } = &*self else {
            return Err(EditError::NotEditing);
        };

        let req = UpdateParagraphRequest {
            content: Some(draft.clone()),
            is_editing: Some(false),
            ..Default::default()
        };
        let saved = store
            .update_paragraph(paragraph_id, &req)
            .await?
            .ok_or_else(|| EditError::NotFound(paragraph_id.clone()))?;

        tracing::debug!("Saved paragraph {}", saved.id);
        *self = EditSession::Viewing;
        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{contract, MemoryStore};

    async fn paragraph(store: &MemoryStore) -> Paragraph {
        let doc = contract::new_document(store).await;
        let page = contract::add_page(store, &doc.id, 1).await;
        contract::add_paragraph(store, &page.id, 0, "This Agreement is entered into...").await
    }

    #[tokio::test]
    async fn save_persists_the_draft() {
        let store = MemoryStore::new();
        let para = paragraph(&store).await;

        let mut session = EditSession::new();
        session.begin(&para);
        assert_eq!(session.draft(), Some("This Agreement is entered into..."));
        session.set_draft("This Agreement is made on 1 March.").unwrap();

        let saved = session.save(&store).await.unwrap();
        assert_eq!(saved.content, "This Agreement is made on 1 March.");
        assert_eq!(session, EditSession::Viewing);

        let stored = store.get_paragraph(&para.id).await.unwrap().unwrap();
        assert_eq!(stored.content, saved.content);
        assert!(!stored.is_editing);
    }

    #[tokio::test]
    async fn cancel_discards_the_draft() {
        let store = MemoryStore::new();
        let para = paragraph(&store).await;

        let mut session = EditSession::new();
        session.begin(&para);
        session.set_draft("scratch").unwrap();
        session.cancel();
        assert!(session.draft().is_none());
        assert!(matches!(session.set_draft("late"), Err(EditError::NotEditing)));

        let stored = store.get_paragraph(&para.id).await.unwrap().unwrap();
        assert_eq!(stored.content, para.content);
    }

    #[tokio::test]
    async fn switching_paragraphs_restarts_the_draft() {
        let store = MemoryStore::new();
        let first = paragraph(&store).await;
        let second = contract::add_paragraph(&store, &first.page_id, 1, "second").await;

        let mut session = EditSession::new();
        session.begin(&first);
        session.set_draft("unsaved").unwrap();
        session.begin(&second);
        assert!(session.is_editing(&second.id));
        assert_eq!(session.draft(), Some("second"));
    }

    #[tokio::test]
    async fn failed_save_keeps_editing() {
        let store = MemoryStore::new();
        let para = paragraph(&store).await;

        let mut session = EditSession::new();
        session.begin(&para);
        session.set_draft("kept").unwrap();
        store.delete_paragraph(&para.id).await.unwrap();

        let err = session.save(&store).await.unwrap_err();
        assert!(matches!(err, EditError::NotFound(id) if id == para.id));
        assert_eq!(session.draft(), Some("kept"));

        assert!(matches!(
            EditSession::new().save(&store).await,
            Err(EditError::NotEditing)
        ));
    }
}
