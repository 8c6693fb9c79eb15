//! # 페이지 테이블 쿼리 모듈
//!
//! `document_pages` 테이블 쿼리. `content`는 JSON 텍스트로 저장합니다.

use super::{decode_json, encode_json};
use crate::error::AppError;
use crate::models::DocumentPage;
use sqlx::SqliteConnection;

#[derive(Debug, sqlx::FromRow)]
struct PageRow {
    id: String,
    document_id: String,
    page_number: i64,
    content: String,
    created_at: String,
    updated_at: String,
}

impl TryFrom<PageRow> for DocumentPage {
    type Error = AppError;

    fn try_from(row: PageRow) -> Result<Self, Self::Error> {
        Ok(DocumentPage {
            id: row.id,
            document_id: row.document_id,
            page_number: row.page_number,
            content: decode_json(&row.content)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// 문서의 페이지 목록 (page_number 오름차순)
pub async fn list_pages(
    conn: &mut SqliteConnection,
    document_id: &str,
) -> Result<Vec<DocumentPage>, AppError> {
    let rows = sqlx::query_as::<_, PageRow>(
        r#"
        SELECT id, document_id, page_number, content, created_at, updated_at
        FROM document_pages
        WHERE document_id = ?
        ORDER BY page_number, created_at, id
        "#,
    )
    .bind(document_id)
    .fetch_all(&mut *conn)
    .await?;

    // collect::<Result<Vec<_>, _>>(): 하나라도 변환에 실패하면 첫 에러를 반환합니다.
    rows.into_iter().map(DocumentPage::try_from).collect()
}

pub async fn get_page(
    conn: &mut SqliteConnection,
    id: &str,
) -> Result<Option<DocumentPage>, AppError> {
    let row = sqlx::query_as::<_, PageRow>(
        r#"
        SELECT id, document_id, page_number, content, created_at, updated_at
        FROM document_pages
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    row.map(DocumentPage::try_from).transpose()
}

pub async fn insert_page(conn: &mut SqliteConnection, page: &DocumentPage) -> Result<(), AppError> {
    sqlx::query(
        r#"
        INSERT INTO document_pages (id, document_id, page_number, content, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&page.id)
    .bind(&page.document_id)
    .bind(page.page_number)
    .bind(encode_json(&page.content)?)
    .bind(&page.created_at)
    .bind(&page.updated_at)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

pub async fn save_page(conn: &mut SqliteConnection, page: &DocumentPage) -> Result<(), AppError> {
    sqlx::query(
        r#"
        UPDATE document_pages
        SET page_number = ?, content = ?, updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(page.page_number)
    .bind(encode_json(&page.content)?)
    .bind(&page.updated_at)
    .bind(&page.id)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

/// 페이지 한 행을 삭제합니다. 단락 정리는 호출자(트랜잭션)가 함께 처리합니다.
pub async fn delete_page(conn: &mut SqliteConnection, id: &str) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM document_pages WHERE id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// 문서에 속한 모든 페이지를 삭제합니다.
pub async fn delete_pages_of_document(
    conn: &mut SqliteConnection,
    document_id: &str,
) -> Result<u64, AppError> {
    let result = sqlx::query("DELETE FROM document_pages WHERE document_id = ?")
        .bind(document_id)
        .execute(&mut *conn)
        .await?;

    Ok(result.rows_affected())
}
