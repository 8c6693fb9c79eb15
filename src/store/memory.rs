//! # 메모리 저장소
//!
//! 세 개의 HashMap(문서/페이지/단락)을 하나의 `RwLock` 뒤에 둡니다.
//! 읽기는 동시에, 쓰기는 한 번에 하나씩 처리되므로
//! "페이지 추가 + total_pages 증가", "페이지 삭제 + 단락 삭제" 같은
//! 여러 단계 작업이 중간 상태로 관찰되지 않습니다.

use super::Store;
use crate::error::AppError;
use crate::models::*;
use async_trait::async_trait;
use std::collections::HashMap;
// tokio::sync::RwLock: await 지점을 넘어 잠금을 쥐고 있어도 되는 비동기 RwLock
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Tables {
    documents: HashMap<String, Document>,
    pages: HashMap<String, DocumentPage>,
    paragraphs: HashMap<String, Paragraph>,
}

impl Tables {
    fn pages_of(&self, document_id: &str) -> Vec<DocumentPage> {
        let mut pages: Vec<DocumentPage> = self
            .pages
            .values()
            .filter(|page| page.document_id == document_id)
            .cloned()
            .collect();
        pages.sort_by(|a, b| {
            a.page_number
                .cmp(&b.page_number)
                .then_with(|| a.created_at.cmp(&b.created_at))
                .then_with(|| a.id.cmp(&b.id))
        });
        pages
    }

    fn remove_page(&mut self, page_id: &str) -> bool {
        if self.pages.remove(page_id).is_none() {
            return false;
        }
        // retain: 조건이 true인 항목만 남깁니다.
        self.paragraphs.retain(|_, paragraph| paragraph.page_id != page_id);
        true
    }
}

/// 프로세스 메모리 기반 `Store` 구현
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn sort_paragraphs(paragraphs: &mut [Paragraph], page_numbers: &HashMap<&str, i64>) {
    paragraphs.sort_by(|a, b| {
        let page_a = page_numbers.get(a.page_id.as_str()).copied().unwrap_or(i64::MAX);
        let page_b = page_numbers.get(b.page_id.as_str()).copied().unwrap_or(i64::MAX);
        page_a
            .cmp(&page_b)
            .then_with(|| a.order_index.cmp(&b.order_index))
            .then_with(|| a.created_at.cmp(&b.created_at))
            .then_with(|| a.id.cmp(&b.id))
    });
}

#[async_trait]
impl Store for MemoryStore {
    async fn first_document(&self) -> Result<Option<Document>, AppError> {
        let tables = self.tables.read().await;
        // min_by: 비교 함수 기준 최솟값. 생성 시각이 같으면 (시간 순서) UUIDv7 ID로 결정합니다.
        Ok(tables
            .documents
            .values()
            .min_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)))
            .cloned())
    }

    async fn get_document(&self, id: &str) -> Result<Option<Document>, AppError> {
        Ok(self.tables.read().await.documents.get(id).cloned())
    }

    async fn create_document(&self, req: &CreateDocumentRequest) -> Result<Document, AppError> {
        let now = timestamp();
        let document = Document {
            id: new_id(),
            title: req.title.clone(),
            filename: req.filename.clone(),
            owner_id: req.owner_id.clone(),
            total_pages: 1,
            status: DocumentStatus::Draft,
            created_at: now.clone(),
            updated_at: now,
        };
        self.tables
            .write()
            .await
            .documents
            .insert(document.id.clone(), document.clone());
        Ok(document)
    }

    async fn update_document(
        &self,
        id: &str,
        req: &UpdateDocumentRequest,
    ) -> Result<Option<Document>, AppError> {
        let mut tables = self.tables.write().await;
        // get_mut: 맵 안의 값을 가변 참조로 꺼냅니다. 없으면 None.
        Ok(tables.documents.get_mut(id).map(|document| {
            document.apply(req, &timestamp());
            document.clone()
        }))
    }

    async fn delete_document(&self, id: &str) -> Result<bool, AppError> {
        let mut tables = self.tables.write().await;
        if tables.documents.remove(id).is_none() {
            return Ok(false);
        }
        let page_ids: Vec<String> = tables.pages_of(id).into_iter().map(|page| page.id).collect();
        for page_id in page_ids {
            tables.remove_page(&page_id);
        }
        Ok(true)
    }

    async fn list_pages(&self, document_id: &str) -> Result<Vec<DocumentPage>, AppError> {
        Ok(self.tables.read().await.pages_of(document_id))
    }

    async fn get_page(&self, id: &str) -> Result<Option<DocumentPage>, AppError> {
        Ok(self.tables.read().await.pages.get(id).cloned())
    }

    async fn create_page(
        &self,
        document_id: &str,
        req: &NewPage,
    ) -> Result<Option<DocumentPage>, AppError> {
        let mut tables = self.tables.write().await;
        let now = timestamp();

        let Some(document) = tables.documents.get_mut(document_id) else {
            return Ok(None);
        };
        document.grow_to(req.page_number, &now);

        let page = DocumentPage {
            id: new_id(),
            document_id: document_id.to_string(),
            page_number: req.page_number,
            content: req.content.clone(),
            created_at: now.clone(),
            updated_at: now,
        };
        tables.pages.insert(page.id.clone(), page.clone());
        Ok(Some(page))
    }

    async fn update_page(
        &self,
        id: &str,
        req: &UpdatePageRequest,
    ) -> Result<Option<DocumentPage>, AppError> {
        let mut tables = self.tables.write().await;
        let now = timestamp();
        let Some(page) = tables.pages.get_mut(id) else {
            return Ok(None);
        };
        page.apply(req, &now);
        let page = page.clone();

        // 번호를 바꾼 페이지도 문서의 페이지 이동 범위 안에 있어야 합니다.
        if req.page_number.is_some() {
            if let Some(document) = tables.documents.get_mut(&page.document_id) {
                document.grow_to(page.page_number, &now);
            }
        }
        Ok(Some(page))
    }

    async fn delete_page(&self, id: &str) -> Result<bool, AppError> {
        Ok(self.tables.write().await.remove_page(id))
    }

    async fn list_paragraphs_by_document(
        &self,
        document_id: &str,
    ) -> Result<Vec<Paragraph>, AppError> {
        let tables = self.tables.read().await;
        let pages = tables.pages_of(document_id);
        let page_numbers: HashMap<&str, i64> = pages
            .iter()
            .map(|page| (page.id.as_str(), page.page_number))
            .collect();

        let mut paragraphs: Vec<Paragraph> = tables
            .paragraphs
            .values()
            .filter(|paragraph| page_numbers.contains_key(paragraph.page_id.as_str()))
            .cloned()
            .collect();
        sort_paragraphs(&mut paragraphs, &page_numbers);
        Ok(paragraphs)
    }

    async fn list_paragraphs_by_page(&self, page_id: &str) -> Result<Vec<Paragraph>, AppError> {
        let tables = self.tables.read().await;
        let mut paragraphs: Vec<Paragraph> = tables
            .paragraphs
            .values()
            .filter(|paragraph| paragraph.page_id == page_id)
            .cloned()
            .collect();
        sort_paragraphs(&mut paragraphs, &HashMap::new());
        Ok(paragraphs)
    }

    async fn get_paragraph(&self, id: &str) -> Result<Option<Paragraph>, AppError> {
        Ok(self.tables.read().await.paragraphs.get(id).cloned())
    }

    async fn create_paragraph(&self, req: &NewParagraph) -> Result<Option<Paragraph>, AppError> {
        let mut tables = self.tables.write().await;
        if !tables.pages.contains_key(&req.page_id) {
            return Ok(None);
        }

        let now = timestamp();
        let paragraph = Paragraph {
            id: new_id(),
            page_id: req.page_id.clone(),
            content: req.content.clone(),
            order_index: req.order_index,
            is_editing: false,
            formatting: req.formatting.clone(),
            created_at: now.clone(),
            updated_at: now,
        };
        tables.paragraphs.insert(paragraph.id.clone(), paragraph.clone());
        Ok(Some(paragraph))
    }

    async fn update_paragraph(
        &self,
        id: &str,
        req: &UpdateParagraphRequest,
    ) -> Result<Option<Paragraph>, AppError> {
        let mut tables = self.tables.write().await;
        // 없는 페이지로 옮기려 하면 아무것도 바꾸지 않습니다.
        if let Some(page_id) = &req.page_id {
            if !tables.pages.contains_key(page_id) {
                return Ok(None);
            }
        }
        Ok(tables.paragraphs.get_mut(id).map(|paragraph| {
            paragraph.apply(req, &timestamp());
            paragraph.clone()
        }))
    }

    async fn delete_paragraph(&self, id: &str) -> Result<bool, AppError> {
        Ok(self.tables.write().await.paragraphs.remove(id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::contract;
    use std::sync::Arc;

    #[tokio::test]
    async fn document_defaults() {
        contract::document_defaults(&MemoryStore::new()).await;
    }

    #[tokio::test]
    async fn page_creation_grows_total_pages() {
        contract::page_creation_grows_total_pages(&MemoryStore::new()).await;
    }

    #[tokio::test]
    async fn page_delete_cascades_only_its_paragraphs() {
        contract::page_delete_cascades_only_its_paragraphs(&MemoryStore::new()).await;
    }

    #[tokio::test]
    async fn paragraphs_order_by_page_then_index() {
        contract::paragraphs_order_by_page_then_index(&MemoryStore::new()).await;
    }

    #[tokio::test]
    async fn paragraph_update_merges() {
        contract::paragraph_update_merges(&MemoryStore::new()).await;
    }

    #[tokio::test]
    async fn document_update_and_delete() {
        contract::document_update_and_delete(&MemoryStore::new()).await;
    }

    #[tokio::test]
    async fn paragraph_move_requires_existing_page() {
        contract::paragraph_move_requires_existing_page(&MemoryStore::new()).await;
    }

    #[tokio::test]
    async fn page_renumber_grows_total_pages() {
        contract::page_renumber_grows_total_pages(&MemoryStore::new()).await;
    }

    #[tokio::test]
    async fn seeding_is_idempotent() {
        contract::seeding_is_idempotent(&MemoryStore::new()).await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_page_inserts_keep_the_highest_total() {
        let store = Arc::new(MemoryStore::new());
        let doc = contract::new_document(store.as_ref()).await;

        let mut handles = Vec::new();
        for page_number in 1..=20 {
            let store = Arc::clone(&store);
            let document_id = doc.id.clone();
            handles.push(tokio::spawn(async move {
                store
                    .create_page(&document_id, &NewPage { page_number, content: serde_json::json!([]) })
                    .await
                    .unwrap()
                    .unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(store.get_document(&doc.id).await.unwrap().unwrap().total_pages, 20);
        assert_eq!(store.list_pages(&doc.id).await.unwrap().len(), 20);
    }
}
