//! # SQLite 저장소 (Data Access Layer)
//!
//! `DATABASE_URL`이 설정되었을 때 사용하는 `Store` 구현입니다.
//! 테이블별 쿼리 함수는 하위 모듈에 있고, `SqliteStore`는 그것들을 조합합니다.
//!
//! - `documents`: 문서 쿼리
//! - `pages`: 페이지 쿼리
//! - `paragraphs`: 단락 쿼리
//!
//! 수정 작업은 "조회 → 모델에서 병합(apply) → 전체 컬럼 저장" 순서로,
//! 하나의 트랜잭션 안에서 처리합니다. 메모리 저장소와 병합 규칙이 같아집니다.

pub mod documents;
pub mod pages;
pub mod paragraphs;

use crate::error::AppError;
use crate::models::*;
use crate::store::Store;
use async_trait::async_trait;
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

fn decode_json(text: &str) -> Result<Value, AppError> {
    serde_json::from_str(text).map_err(|e| AppError::Internal(format!("Corrupt JSON column: {e}")))
}

fn encode_json(value: &Value) -> Result<String, AppError> {
    serde_json::to_string(value).map_err(|e| AppError::Internal(format!("Unencodable JSON: {e}")))
}

/// SQLite 연결 풀 기반 `Store` 구현
///
/// `SqlitePool`은 내부적으로 Arc를 사용하므로 clone해도 같은 풀을 가리킵니다.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// 데이터베이스에 연결하고 마이그레이션을 실행합니다.
    ///
    /// 파일이 없으면 새로 만듭니다. `sqlite::memory:`는 연결마다 별도 DB가 되므로
    /// 연결을 하나로 제한하고 닫히지 않게 유지합니다.
    pub async fn connect(database_url: &str) -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        let in_memory = database_url.contains(":memory:");
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };

        let pool = pool_options.connect_with(options).await?;
        Self::from_pool(pool).await
    }

    /// 이미 만들어진 풀에 마이그레이션을 적용해 저장소를 만듭니다.
    pub async fn from_pool(pool: SqlitePool) -> Result<Self, AppError> {
        tracing::info!("Running database migrations...");
        // sqlx::migrate!: 컴파일 타임에 ./migrations 폴더의 SQL 파일들을 바이너리에 포함시킵니다.
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }
}

#[async_trait]
impl Store for SqliteStore {
    async fn first_document(&self) -> Result<Option<Document>, AppError> {
        let mut conn = self.pool.acquire().await?;
        documents::first_document(&mut conn).await
    }

    async fn get_document(&self, id: &str) -> Result<Option<Document>, AppError> {
        let mut conn = self.pool.acquire().await?;
        documents::get_document(&mut conn, id).await
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

        let mut conn = self.pool.acquire().await?;
        documents::insert_document(&mut conn, &document).await?;
        Ok(document)
    }

    async fn update_document(
        &self,
        id: &str,
        req: &UpdateDocumentRequest,
    ) -> Result<Option<Document>, AppError> {
        let mut tx = self.pool.begin().await?;
        let Some(mut document) = documents::get_document(&mut tx, id).await? else {
            return Ok(None); // tx가 drop되면 자동으로 롤백됩니다.
        };
        document.apply(req, &timestamp());
        documents::save_document(&mut tx, &document).await?;
        tx.commit().await?;
        Ok(Some(document))
    }

    async fn delete_document(&self, id: &str) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await?;
        let deleted = documents::delete_document(&mut tx, id).await?;
        if deleted {
            // 단락을 먼저 지워야 페이지 ID로 찾을 수 있습니다.
            paragraphs::delete_by_document(&mut tx, id).await?;
            pages::delete_pages_of_document(&mut tx, id).await?;
        }
        tx.commit().await?;
        Ok(deleted)
    }

    async fn list_pages(&self, document_id: &str) -> Result<Vec<DocumentPage>, AppError> {
        let mut conn = self.pool.acquire().await?;
        pages::list_pages(&mut conn, document_id).await
    }

    async fn get_page(&self, id: &str) -> Result<Option<DocumentPage>, AppError> {
        let mut conn = self.pool.acquire().await?;
        pages::get_page(&mut conn, id).await
    }

    async fn create_page(
        &self,
        document_id: &str,
        req: &NewPage,
    ) -> Result<Option<DocumentPage>, AppError> {
        let mut tx = self.pool.begin().await?;
        let Some(mut document) = documents::get_document(&mut tx, document_id).await? else {
            return Ok(None);
        };

        let now = timestamp();
        let page = DocumentPage {
            id: new_id(),
            document_id: document_id.to_string(),
            page_number: req.page_number,
            content: req.content.clone(),
            created_at: now.clone(),
            updated_at: now.clone(),
        };
        pages::insert_page(&mut tx, &page).await?;

        document.grow_to(req.page_number, &now);
        documents::save_document(&mut tx, &document).await?;

        tx.commit().await?;
        Ok(Some(page))
    }

    async fn update_page(
        &self,
        id: &str,
        req: &UpdatePageRequest,
    ) -> Result<Option<DocumentPage>, AppError> {
        let mut tx = self.pool.begin().await?;
        let Some(mut page) = pages::get_page(&mut tx, id).await? else {
            return Ok(None);
        };
        let now = timestamp();
        page.apply(req, &now);
        pages::save_page(&mut tx, &page).await?;

        if req.page_number.is_some() {
            if let Some(mut document) = documents::get_document(&mut tx, &page.document_id).await? {
                document.grow_to(page.page_number, &now);
                documents::save_document(&mut tx, &document).await?;
            }
        }
        tx.commit().await?;
        Ok(Some(page))
    }

    async fn delete_page(&self, id: &str) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await?;
        let deleted = pages::delete_page(&mut tx, id).await?;
        if deleted {
            let removed = paragraphs::delete_by_page(&mut tx, id).await?;
            tracing::debug!("Deleted page {} and {} paragraphs", id, removed);
        }
        tx.commit().await?;
        Ok(deleted)
    }

    async fn list_paragraphs_by_document(
        &self,
        document_id: &str,
    ) -> Result<Vec<Paragraph>, AppError> {
        let mut conn = self.pool.acquire().await?;
        paragraphs::list_by_document(&mut conn, document_id).await
    }

    async fn list_paragraphs_by_page(&self, page_id: &str) -> Result<Vec<Paragraph>, AppError> {
        let mut conn = self.pool.acquire().await?;
        paragraphs::list_by_page(&mut conn, page_id).await
    }

    async fn get_paragraph(&self, id: &str) -> Result<Option<Paragraph>, AppError> {
        let mut conn = self.pool.acquire().await?;
        paragraphs::get_paragraph(&mut conn, id).await
    }

    async fn create_paragraph(&self, req: &NewParagraph) -> Result<Option<Paragraph>, AppError> {
        let mut tx = self.pool.begin().await?;
        if pages::get_page(&mut tx, &req.page_id).await?.is_none() {
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
        paragraphs::insert_paragraph(&mut tx, &paragraph).await?;
        tx.commit().await?;
        Ok(Some(paragraph))
    }

    async fn update_paragraph(
        &self,
        id: &str,
        req: &UpdateParagraphRequest,
    ) -> Result<Option<Paragraph>, AppError> {
        let mut tx = self.pool.begin().await?;
        if let Some(page_id) = &req.page_id {
            if pages::get_page(&mut tx, page_id).await?.is_none() {
                return Ok(None);
            }
        }
        let Some(mut paragraph) = paragraphs::get_paragraph(&mut tx, id).await? else {
            return Ok(None);
        };
        paragraph.apply(req, &timestamp());
        paragraphs::save_paragraph(&mut tx, &paragraph).await?;
        tx.commit().await?;
        Ok(Some(paragraph))
    }

    async fn delete_paragraph(&self, id: &str) -> Result<bool, AppError> {
        let mut conn = self.pool.acquire().await?;
        paragraphs::delete_paragraph(&mut conn, id).await
    }
}
