//! # 저장소(Repository) 계층
//!
//! 문서/페이지/단락에 대한 CRUD 계약을 `Store` 트레이트로 정의합니다.
//! 라우트 핸들러는 구체적인 저장 방식을 모른 채 `Arc<dyn Store>`만 사용합니다.
//!
//! 구현체:
//! - `MemoryStore` (이 모듈의 `memory`): 프로세스 메모리의 HashMap. 기본값.
//! - `SqliteStore` (`crate::db`): `DATABASE_URL`이 설정되면 사용하는 SQLite 백엔드.
//!
//! ## 반환값 규칙
//! - 조회/수정: 대상이 없으면 `Ok(None)` → 핸들러가 404로 변환
//! - 삭제: 대상이 없으면 `Ok(false)`
//! - 생성: 부모(문서/페이지)가 없으면 `Ok(None)`
//! - `Err(AppError)`는 저장소 자체의 장애(DB 에러 등)에만 사용합니다.

pub mod memory;

pub use memory::MemoryStore;

use crate::error::AppError;
use crate::models::*;
use async_trait::async_trait;
use serde_json::json;

/// 문서 편집기 데이터 저장소 계약
///
/// `Send + Sync`: 여러 Tokio 작업(요청)이 동시에 같은 저장소를 공유할 수 있어야 합니다.
/// `#[async_trait]`: 트레이트 객체(`dyn Store`)로 쓸 수 있도록 async 메서드를
/// `Pin<Box<dyn Future>>`를 반환하는 형태로 바꿔줍니다.
#[async_trait]
pub trait Store: Send + Sync {
    // ── 문서(Document) ──

    /// 가장 먼저 생성된 문서 (샘플 문서 조회용)
    async fn first_document(&self) -> Result<Option<Document>, AppError>;
    async fn get_document(&self, id: &str) -> Result<Option<Document>, AppError>;
    /// 새 문서: total_pages = 1, status = draft
    async fn create_document(&self, req: &CreateDocumentRequest) -> Result<Document, AppError>;
    async fn update_document(
        &self,
        id: &str,
        req: &UpdateDocumentRequest,
    ) -> Result<Option<Document>, AppError>;
    /// 문서와 그 페이지, 단락을 모두 삭제합니다.
    async fn delete_document(&self, id: &str) -> Result<bool, AppError>;

    // ── 페이지(DocumentPage) ──

    /// page_number 오름차순
    async fn list_pages(&self, document_id: &str) -> Result<Vec<DocumentPage>, AppError>;
    async fn get_page(&self, id: &str) -> Result<Option<DocumentPage>, AppError>;
    /// 페이지를 추가하고 문서의 total_pages를 max(이전 값, page_number)로 올립니다.
    /// 두 작업은 한 단계로 처리됩니다.
    async fn create_page(
        &self,
        document_id: &str,
        req: &NewPage,
    ) -> Result<Option<DocumentPage>, AppError>;
    /// page_number를 바꾸면 문서의 total_pages도 max(이전 값, 새 번호)로 올립니다.
    async fn update_page(
        &self,
        id: &str,
        req: &UpdatePageRequest,
    ) -> Result<Option<DocumentPage>, AppError>;
    /// 페이지와, page_id가 그 페이지인 단락만 삭제합니다.
    async fn delete_page(&self, id: &str) -> Result<bool, AppError>;

    // ── 단락(Paragraph) ──

    /// 문서의 모든 페이지에 걸친 단락 (페이지 번호 → order_index 순)
    async fn list_paragraphs_by_document(
        &self,
        document_id: &str,
    ) -> Result<Vec<Paragraph>, AppError>;
    /// order_index 오름차순
    async fn list_paragraphs_by_page(&self, page_id: &str) -> Result<Vec<Paragraph>, AppError>;
    async fn get_paragraph(&self, id: &str) -> Result<Option<Paragraph>, AppError>;
    async fn create_paragraph(&self, req: &NewParagraph) -> Result<Option<Paragraph>, AppError>;
    /// page_id로 옮길 페이지가 없으면 `Ok(None)`이고 아무것도 바뀌지 않습니다.
    async fn update_paragraph(
        &self,
        id: &str,
        req: &UpdateParagraphRequest,
    ) -> Result<Option<Paragraph>, AppError>;
    async fn delete_paragraph(&self, id: &str) -> Result<bool, AppError>;
}

/// 샘플 계약서의 페이지별 단락 내용 (페이지 1~3)
const SAMPLE_PAGES: [&[&str]; 3] = [
    &[
        "<strong>1. PARTIES</strong><br><br>This Agreement is entered into between the Service Provider and the Client as identified in the signature section below.",
        "<strong>1.1 SERVICE PROVIDER</strong><br><br>The Service Provider agrees to perform the services outlined in this agreement with professional competence and in accordance with the highest standards of the industry.",
    ],
    &[
        "<strong>2. SCOPE OF SERVICES</strong><br><br>This Agreement outlines the professional services to be provided by the Service Provider to the Client. The services include but are not limited to consulting, implementation, and ongoing support for digital transformation initiatives.",
        "The Service Provider agrees to maintain the highest standards of professional conduct and confidentiality throughout the duration of this agreement. All work performed shall be completed in accordance with industry best practices and applicable regulatory requirements.",
        "<strong>3. PAYMENT TERMS</strong><br><br>Payment for services rendered under this Agreement shall be made according to the schedule outlined in Exhibit B. All invoices are due within thirty (30) days of receipt unless otherwise specified.",
    ],
    &[
        "<strong>4. INTELLECTUAL PROPERTY</strong><br><br>All intellectual property rights in any work product created or developed by the Service Provider in the course of providing services under this Agreement shall remain the exclusive property of the Client, unless otherwise specified in writing.",
        "<strong>5. TERMINATION</strong><br><br>Either party may terminate this Agreement with thirty (30) days written notice to the other party. Upon termination, all work product and materials shall be delivered to the Client.",
    ],
];

/// 비어 있는 저장소에 샘플 계약서(3페이지, 7단락)를 넣습니다.
///
/// 이미 문서가 하나라도 있으면 아무것도 하지 않고 `Ok(None)`을 반환합니다.
/// SQLite처럼 재시작 후에도 데이터가 남는 백엔드에서 중복 시드를 막습니다.
pub async fn seed_sample_document(store: &dyn Store) -> Result<Option<Document>, AppError> {
    if store.first_document().await?.is_some() {
        return Ok(None);
    }

    let document = store
        .create_document(&CreateDocumentRequest {
            title: "Service Agreement Contract".to_string(),
            filename: "Contract_Agreement_v3.pdf".to_string(),
            owner_id: new_id(),
        })
        .await?;

    // enumerate(): (인덱스, 값) 쌍을 돌려주는 이터레이터
    for (page_index, contents) in SAMPLE_PAGES.iter().enumerate() {
        let page = store
            .create_page(
                &document.id,
                &NewPage {
                    page_number: page_index as i64 + 1,
                    content: json!([]),
                },
            )
            .await?
            .ok_or(AppError::Internal("Seed document vanished".to_string()))?;

        for (order_index, content) in contents.iter().enumerate() {
            store
                .create_paragraph(&NewParagraph {
                    page_id: page.id.clone(),
                    content: content.to_string(),
                    order_index: order_index as i64,
                    formatting: None,
                })
                .await?;
        }
    }

    tracing::info!("Seeded sample document {}", document.id);
    store.get_document(&document.id).await
}
