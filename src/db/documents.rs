//! # 문서 테이블 쿼리 모듈
//!
//! `documents` 테이블에 대한 CRUD 쿼리 함수들입니다.
//!
//! 모든 함수는 `&mut SqliteConnection`을 받습니다.
//! 풀에서 빌린 연결(`PoolConnection`)과 트랜잭션(`Transaction`) 모두
//! `SqliteConnection`으로 역참조(deref)되므로, 같은 함수를 트랜잭션 안팎에서 쓸 수 있습니다.

use crate::error::AppError;
use crate::models::{Document, DocumentStatus};
use sqlx::SqliteConnection;

/// `documents` 테이블 한 행. status는 TEXT로 저장됩니다.
#[derive(Debug, sqlx::FromRow)]
struct DocumentRow {
    id: String,
    title: String,
    filename: String,
    owner_id: String,
    total_pages: i64,
    status: String,
    created_at: String,
    updated_at: String,
}

// TryFrom: 실패할 수 있는 변환. 알 수 없는 status 문자열이면 에러를 반환합니다.
impl TryFrom<DocumentRow> for Document {
    type Error = AppError;

    fn try_from(row: DocumentRow) -> Result<Self, Self::Error> {
        let status: DocumentStatus = row.status.parse().map_err(AppError::Internal)?;
        Ok(Document {
            id: row.id,
            title: row.title,
            filename: row.filename,
            owner_id: row.owner_id,
            total_pages: row.total_pages,
            status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// 가장 먼저 생성된 문서를 조회합니다.
pub async fn first_document(conn: &mut SqliteConnection) -> Result<Option<Document>, AppError> {
    let row = sqlx::query_as::<_, DocumentRow>(
        r#"
        SELECT id, title, filename, owner_id, total_pages, status, created_at, updated_at
        FROM documents
        ORDER BY created_at, id
        LIMIT 1
        "#,
    )
    .fetch_optional(&mut *conn)
    .await?;

    // Option<DocumentRow> → Option<Document>. transpose()로 Result를 바깥으로 꺼냅니다.
    row.map(Document::try_from).transpose()
}

/// ID로 단일 문서를 조회합니다.
///
/// - `Ok(Some(Document))`: 문서를 찾은 경우
/// - `Ok(None)`: 해당 ID의 문서가 없는 경우
pub async fn get_document(
    conn: &mut SqliteConnection,
    id: &str,
) -> Result<Option<Document>, AppError> {
    let row = sqlx::query_as::<_, DocumentRow>(
        r#"
        SELECT id, title, filename, owner_id, total_pages, status, created_at, updated_at
        FROM documents
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    row.map(Document::try_from).transpose()
}

/// 완성된 Document 값을 그대로 삽입합니다. (ID와 타임스탬프는 호출자가 채움)
pub async fn insert_document(
    conn: &mut SqliteConnection,
    document: &Document,
) -> Result<(), AppError> {
    sqlx::query(
        r#"
        INSERT INTO documents (id, title, filename, owner_id, total_pages, status, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&document.id)
    .bind(&document.title)
    .bind(&document.filename)
    .bind(&document.owner_id)
    .bind(document.total_pages)
    .bind(document.status.as_str())
    .bind(&document.created_at)
    .bind(&document.updated_at)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

/// 병합이 끝난 문서의 변경 가능한 컬럼을 모두 덮어씁니다.
pub async fn save_document(
    conn: &mut SqliteConnection,
    document: &Document,
) -> Result<(), AppError> {
    sqlx::query(
        r#"
        UPDATE documents
        SET title = ?, filename = ?, total_pages = ?, status = ?, updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(&document.title)
    .bind(&document.filename)
    .bind(document.total_pages)
    .bind(document.status.as_str())
    .bind(&document.updated_at)
    .bind(&document.id)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

/// 문서 행을 삭제합니다. 삭제된 행이 있으면 true.
pub async fn delete_document(conn: &mut SqliteConnection, id: &str) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM documents WHERE id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    // .rows_affected(): 쿼리에 의해 영향받은 행 수
    Ok(result.rows_affected() > 0)
}
