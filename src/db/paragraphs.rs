//! # 단락 테이블 쿼리 모듈

use super::{decode_json, encode_json};
use crate::error::AppError;
use crate::models::Paragraph;
use sqlx::SqliteConnection;

#[derive(Debug, sqlx::FromRow)]
struct ParagraphRow {
    id: String,
    page_id: String,
    content: String,
    order_index: i64,
    is_editing: bool,
    formatting: Option<String>,
    created_at: String,
    updated_at: String,
}

impl TryFrom<ParagraphRow> for Paragraph {
    type Error = AppError;

    fn try_from(row: ParagraphRow) -> Result<Self, Self::Error> {
        Ok(Paragraph {
            id: row.id,
            page_id: row.page_id,
            content: row.content,
            order_index: row.order_index,
            is_editing: row.is_editing,
            // Option<String> → Option<Value>: 값이 있을 때만 JSON 파싱
            formatting: row.formatting.as_deref().map(decode_json).transpose()?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// 문서의 모든 페이지에 걸친 단락 목록
///
/// 페이지 테이블과 JOIN하여 페이지 번호 → order_index 순으로 정렬합니다.
pub async fn list_by_document(
    conn: &mut SqliteConnection,
    document_id: &str,
) -> Result<Vec<Paragraph>, AppError> {
    let rows = sqlx::query_as::<_, ParagraphRow>(
        r#"
        SELECT p.id, p.page_id, p.content, p.order_index, p.is_editing, p.formatting,
               p.created_at, p.updated_at
        FROM paragraphs p
        JOIN document_pages pg ON pg.id = p.page_id
        WHERE pg.document_id = ?
        ORDER BY pg.page_number, p.order_index, p.created_at, p.id
        "#,
    )
    .bind(document_id)
    .fetch_all(&mut *conn)
    .await?;

    rows.into_iter().map(Paragraph::try_from).collect()
}

pub async fn list_by_page(
    conn: &mut SqliteConnection,
    page_id: &str,
) -> Result<Vec<Paragraph>, AppError> {
    let rows = sqlx::query_as::<_, ParagraphRow>(
        r#"
        SELECT id, page_id, content, order_index, is_editing, formatting, created_at, updated_at
        FROM paragraphs
        WHERE page_id = ?
        ORDER BY order_index, created_at, id
        "#,
    )
    .bind(page_id)
    .fetch_all(&mut *conn)
    .await?;

    rows.into_iter().map(Paragraph::try_from).collect()
}

pub async fn get_paragraph(
    conn: &mut SqliteConnection,
    id: &str,
) -> Result<Option<Paragraph>, AppError> {
    let row = sqlx::query_as::<_, ParagraphRow>(
        r#"
        SELECT id, page_id, content, order_index, is_editing, formatting, created_at, updated_at
        FROM paragraphs
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    row.map(Paragraph::try_from).transpose()
}

pub async fn insert_paragraph(
    conn: &mut SqliteConnection,
    paragraph: &Paragraph,
) -> Result<(), AppError> {
    // Option<&Value> → Option<String>: None이면 SQL NULL로 바인딩됩니다.
    let formatting = paragraph.formatting.as_ref().map(encode_json).transpose()?;

    sqlx::query(
        r#"
        INSERT INTO paragraphs (id, page_id, content, order_index, is_editing, formatting, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&paragraph.id)
    .bind(&paragraph.page_id)
    .bind(&paragraph.content)
    .bind(paragraph.order_index)
    .bind(paragraph.is_editing)
    .bind(formatting)
    .bind(&paragraph.created_at)
    .bind(&paragraph.updated_at)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

pub async fn save_paragraph(
    conn: &mut SqliteConnection,
    paragraph: &Paragraph,
) -> Result<(), AppError> {
    let formatting = paragraph.formatting.as_ref().map(encode_json).transpose()?;

    sqlx::query(
        r#"
        UPDATE paragraphs
        SET page_id = ?, content = ?, order_index = ?, is_editing = ?, formatting = ?, updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(&paragraph.page_id)
    .bind(&paragraph.content)
    .bind(paragraph.order_index)
    .bind(paragraph.is_editing)
    .bind(formatting)
    .bind(&paragraph.updated_at)
    .bind(&paragraph.id)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

pub async fn delete_paragraph(conn: &mut SqliteConnection, id: &str) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM paragraphs WHERE id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// 한 페이지의 단락을 모두 삭제합니다 (페이지 삭제 시 연쇄 삭제용).
pub async fn delete_by_page(conn: &mut SqliteConnection, page_id: &str) -> Result<u64, AppError> {
    let result = sqlx::query("DELETE FROM paragraphs WHERE page_id = ?")
        .bind(page_id)
        .execute(&mut *conn)
        .await?;

    Ok(result.rows_affected())
}

/// 문서에 속한 모든 페이지의 단락을 삭제합니다.
pub async fn delete_by_document(
    conn: &mut SqliteConnection,
    document_id: &str,
) -> Result<u64, AppError> {
    let result = sqlx::query(
        "DELETE FROM paragraphs WHERE page_id IN (SELECT id FROM document_pages WHERE document_id = ?)",
    )
    .bind(document_id)
    .execute(&mut *conn)
    .await?;

    Ok(result.rows_affected())
}
