//! `/api` HTTP 시나리오 테스트
//!
//! 실제 소켓 없이 `axum_test::TestServer`로 라우터 전체(미들웨어 포함)를 호출합니다.

use axum::http::{header, StatusCode};
use axum_test::TestServer;
use inkdraft::{
    db::SqliteStore,
    models::{Document, DocumentPage, Paragraph},
    routes::{self, AppState},
    store::{seed_sample_document, MemoryStore, Store},
};
use serde_json::{json, Value};

/// 샘플 문서가 들어 있는 메모리 저장소 서버
async fn seeded() -> (TestServer, AppState, Document) {
    let state = AppState::new(MemoryStore::new());
    let document = seed_sample_document(state.store.as_ref())
        .await
        .unwrap()
        .unwrap();
    let server = TestServer::new(routes::app(state.clone(), None)).unwrap();
    (server, state, document)
}

fn error_code(body: &Value) -> &str {
    body["error"]["code"].as_str().unwrap_or_default()
}

#[tokio::test]
async fn health() {
    let (server, _, _) = seeded().await;
    let res = server.get("/api/health").await;
    res.assert_status(StatusCode::OK);
    assert_eq!(res.json::<Value>(), json!({ "status": "ok" }));
}

#[tokio::test]
async fn sample_document_is_served() {
    let (server, _, seeded) = seeded().await;
    let res = server.get("/api/documents").await;
    res.assert_status(StatusCode::OK);
    let document = res.json::<Document>();
    assert_eq!(document.id, seeded.id);
    assert_eq!(document.total_pages, 3);

    let pages = server
        .get(&format!("/api/documents/{}/pages", seeded.id))
        .await
        .json::<Vec<DocumentPage>>();
    let numbers: Vec<i64> = pages.iter().map(|p| p.page_number).collect();
    assert_eq!(numbers, vec![1, 2, 3]);

    let paragraphs = server
        .get(&format!("/api/pages/{}/paragraphs", pages[1].id))
        .await
        .json::<Vec<Paragraph>>();
    assert_eq!(paragraphs.len(), 3);
}

#[tokio::test]
async fn empty_store_has_no_sample() {
    let server = TestServer::new(routes::app(AppState::new(MemoryStore::new()), None)).unwrap();
    let res = server.get("/api/documents").await;
    res.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(error_code(&res.json::<Value>()), "not_found");
}

#[tokio::test]
async fn adding_page_five_grows_total_pages() {
    let (server, _, document) = seeded().await;

    let res = server
        .post(&format!("/api/documents/{}/pages", document.id))
        .json(&json!({ "pageNumber": 5, "content": [] }))
        .await;
    res.assert_status(StatusCode::CREATED);
    let page = res.json::<DocumentPage>();
    assert_eq!(page.page_number, 5);
    assert_eq!(page.document_id, document.id);

    let updated = server
        .get(&format!("/api/documents/{}", document.id))
        .await
        .json::<Document>();
    assert_eq!(updated.total_pages, 5);

    // 더 작은 번호는 totalPages를 줄이지 않습니다.
    server
        .post(&format!("/api/documents/{}/pages", document.id))
        .json(&json!({ "pageNumber": 2, "content": [] }))
        .await
        .assert_status(StatusCode::CREATED);
    let again = server
        .get(&format!("/api/documents/{}", document.id))
        .await
        .json::<Document>();
    assert_eq!(again.total_pages, 5);
}

#[tokio::test]
async fn page_for_missing_document_is_404() {
    let (server, _, _) = seeded().await;
    server
        .post("/api/documents/nope/pages")
        .json(&json!({ "pageNumber": 1, "content": [] }))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn bad_bodies_are_400() {
    let (server, _, document) = seeded().await;
    let path = format!("/api/documents/{}/pages", document.id);

    // 필수 키 누락
    let res = server.post(&path).json(&json!({ "content": [] })).await;
    res.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&res.json::<Value>()), "bad_request");

    // 타입 불일치
    server
        .post(&path)
        .json(&json!({ "pageNumber": "five", "content": [] }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    // JSON 문법 오류
    server
        .post(&path)
        .bytes("{ \"pageNumber\": ".into())
        .content_type("application/json")
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    // Content-Type 없음
    server
        .post(&path)
        .text("pageNumber=1")
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    // PATCH 본문의 알 수 없는 키
    server
        .patch(&format!("/api/documents/{}", document.id))
        .json(&json!({ "totalPages": 99 }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn patch_missing_paragraph_leaves_store_unchanged() {
    let (server, state, document) = seeded().await;
    let before = state.store.list_paragraphs_by_document(&document.id).await.unwrap();

    let res = server
        .patch("/api/paragraphs/does-not-exist")
        .json(&json!({ "content": "Overwritten" }))
        .await;
    res.assert_status(StatusCode::NOT_FOUND);

    let after = state.store.list_paragraphs_by_document(&document.id).await.unwrap();
    assert_eq!(before, after);
}

#[tokio::test]
async fn paragraph_lifecycle() {
    let (server, _, document) = seeded().await;
    let pages = server
        .get(&format!("/api/documents/{}/pages", document.id))
        .await
        .json::<Vec<DocumentPage>>();

    let res = server
        .post("/api/paragraphs")
        .json(&json!({
            "pageId": pages[0].id,
            "content": "<strong>1.2 CLIENT</strong>",
            "orderIndex": 5,
            "formatting": { "bold": true }
        }))
        .await;
    res.assert_status(StatusCode::CREATED);
    let created = res.json::<Paragraph>();
    assert!(!created.is_editing);

    let res = server
        .patch(&format!("/api/paragraphs/{}", created.id))
        .json(&json!({ "isEditing": true, "formatting": null }))
        .await;
    res.assert_status(StatusCode::OK);
    let patched = res.json::<Paragraph>();
    assert!(patched.is_editing);
    assert_eq!(patched.formatting, None);
    assert_eq!(patched.content, created.content);

    server
        .delete(&format!("/api/paragraphs/{}", created.id))
        .await
        .assert_status(StatusCode::NO_CONTENT);
    server
        .delete(&format!("/api/paragraphs/{}", created.id))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    server
        .post("/api/paragraphs")
        .json(&json!({ "pageId": "missing", "content": "x", "orderIndex": 0 }))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn paragraph_cannot_move_to_missing_page() {
    let (server, state, document) = seeded().await;
    let before = state.store.list_paragraphs_by_document(&document.id).await.unwrap();

    let res = server
        .patch(&format!("/api/paragraphs/{}", before[0].id))
        .json(&json!({ "pageId": "no-such-page" }))
        .await;
    res.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(error_code(&res.json::<Value>()), "not_found");

    let after = state.store.list_paragraphs_by_document(&document.id).await.unwrap();
    assert_eq!(before, after);

    // 같은 문서의 다른 페이지로는 옮길 수 있습니다.
    let pages = state.store.list_pages(&document.id).await.unwrap();
    let res = server
        .patch(&format!("/api/paragraphs/{}", before[0].id))
        .json(&json!({ "pageId": pages[2].id }))
        .await;
    res.assert_status(StatusCode::OK);
    assert_eq!(res.json::<Paragraph>().page_id, pages[2].id);
}

#[tokio::test]
async fn document_paragraphs_follow_page_order() {
    let (server, _, document) = seeded().await;
    let pages = server
        .get(&format!("/api/documents/{}/pages", document.id))
        .await
        .json::<Vec<DocumentPage>>();

    // 3페이지에 orderIndex 0인 단락을 추가해도 1페이지 단락보다 앞에 오지 않습니다.
    server
        .post("/api/paragraphs")
        .json(&json!({ "pageId": pages[2].id, "content": "late", "orderIndex": -1 }))
        .await
        .assert_status(StatusCode::CREATED);

    let paragraphs = server
        .get(&format!("/api/documents/{}/paragraphs", document.id))
        .await
        .json::<Vec<Paragraph>>();
    assert_eq!(paragraphs.len(), 8);
    let page_of: Vec<&str> = paragraphs.iter().map(|p| p.page_id.as_str()).collect();
    assert_eq!(page_of[0], pages[0].id);
    assert_eq!(page_of[5], pages[2].id);
    assert_eq!(paragraphs[5].content, "late");
}

#[tokio::test]
async fn deleting_a_page_removes_its_paragraphs() {
    let (server, state, document) = seeded().await;
    let pages = state.store.list_pages(&document.id).await.unwrap();

    // 다른 문서 경로로는 수정하거나 삭제할 수 없습니다.
    server
        .patch(&format!("/api/documents/other/pages/{}", pages[1].id))
        .json(&json!({ "pageNumber": 7 }))
        .await
        .assert_status(StatusCode::NOT_FOUND);
    assert_eq!(
        state.store.get_page(&pages[1].id).await.unwrap().unwrap().page_number,
        2
    );
    server
        .delete(&format!("/api/documents/other/pages/{}", pages[1].id))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    server
        .delete(&format!("/api/documents/{}/pages/{}", document.id, pages[1].id))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let remaining = state.store.list_paragraphs_by_document(&document.id).await.unwrap();
    assert_eq!(remaining.len(), 4);
    assert!(remaining.iter().all(|p| p.page_id != pages[1].id));
}

#[tokio::test]
async fn page_patch_and_document_delete() {
    let (server, state, document) = seeded().await;
    let pages = state.store.list_pages(&document.id).await.unwrap();

    let res = server
        .patch(&format!("/api/documents/{}/pages/{}", document.id, pages[0].id))
        .json(&json!({ "content": [{ "kind": "heading" }] }))
        .await;
    res.assert_status(StatusCode::OK);
    assert_eq!(res.json::<DocumentPage>().content[0]["kind"], "heading");

    let res = server
        .patch(&format!("/api/documents/{}", document.id))
        .json(&json!({ "status": "completed" }))
        .await;
    res.assert_status(StatusCode::OK);
    assert_eq!(res.json::<Value>()["status"], "completed");

    server
        .delete(&format!("/api/documents/{}", document.id))
        .await
        .assert_status(StatusCode::NO_CONTENT);
    server
        .get(&format!("/api/documents/{}", document.id))
        .await
        .assert_status(StatusCode::NOT_FOUND);
    assert!(state.store.list_pages(&document.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn renumbering_a_page_grows_total_pages() {
    let (server, state, document) = seeded().await;
    let pages = state.store.list_pages(&document.id).await.unwrap();

    server
        .patch(&format!("/api/documents/{}/pages/{}", document.id, pages[2].id))
        .json(&json!({ "pageNumber": 9 }))
        .await
        .assert_status(StatusCode::OK);
    let updated = server
        .get(&format!("/api/documents/{}", document.id))
        .await
        .json::<Document>();
    assert_eq!(updated.total_pages, 9);
}

#[tokio::test]
async fn unknown_api_paths_stay_json_with_a_frontend() {
    let dist = std::env::temp_dir().join(format!("inkdraft-dist-{}", uuid::Uuid::now_v7()));
    std::fs::create_dir_all(&dist).unwrap();
    std::fs::write(dist.join("index.html"), "<!doctype html><div id=\"root\"></div>").unwrap();

    let server =
        TestServer::new(routes::app(AppState::new(MemoryStore::new()), Some(&dist))).unwrap();

    let res = server.get("/api/no-such-route").await;
    res.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(error_code(&res.json::<Value>()), "not_found");

    // API가 아닌 경로는 SPA의 index.html로 갑니다.
    let page = server.get("/documents/123/edit").await;
    assert!(page.text().contains("id=\"root\""));

    std::fs::remove_dir_all(&dist).ok();
}

#[tokio::test]
async fn create_document() {
    let (server, _, _) = seeded().await;
    let res = server
        .post("/api/documents")
        .json(&json!({ "title": "NDA", "filename": "nda.pdf", "ownerId": "user-1" }))
        .await;
    res.assert_status(StatusCode::CREATED);
    let body = res.json::<Value>();
    assert_eq!(body["totalPages"], 1);
    assert_eq!(body["status"], "draft");
    assert_eq!(body["ownerId"], "user-1");
}

#[tokio::test]
async fn form_export_is_an_attachment() {
    let (server, _, _) = seeded().await;
    let res = server
        .post("/api/forms/export")
        .json(&json!({
            "title": "Client Intake",
            "fields": [
                { "id": "f1", "type": "email", "label": "Email", "required": true },
                { "id": "f2", "type": "select", "label": "Plan", "required": false,
                  "options": ["Basic", "Pro"] }
            ]
        }))
        .await;
    res.assert_status(StatusCode::OK);
    assert_eq!(
        res.header(header::CONTENT_DISPOSITION),
        "attachment; filename=\"client-intake-form.json\""
    );
    let body = res.json::<Value>();
    assert_eq!(body["title"], "Client Intake");
    assert_eq!(body["fields"][1]["options"][1], "Pro");
    assert!(body["createdAt"].as_str().unwrap().ends_with('Z'));
}

#[tokio::test]
async fn field_export_names_after_the_pdf() {
    let (server, _, _) = seeded().await;
    let res = server
        .post("/api/fields/export")
        .json(&json!({
            "filename": "Contract_Agreement_v3.pdf",
            "totalPages": 3,
            "fields": [{
                "id": "sig", "type": "signature", "label": "Signature Field",
                "x": 99, "y": 80, "width": 30, "height": 8, "page": 3, "required": true
            }]
        }))
        .await;
    res.assert_status(StatusCode::OK);
    assert_eq!(
        res.header(header::CONTENT_DISPOSITION),
        "attachment; filename=\"Contract_Agreement_v3-fields.json\""
    );
    let body = res.json::<Value>();
    assert_eq!(body["totalPages"], 3);
    assert_eq!(body["fields"][0]["x"], 95.0);
}

#[tokio::test]
async fn form_validation_reports_per_field() {
    let (server, _, _) = seeded().await;
    let res = server
        .post("/api/forms/validate")
        .json(&json!({
            "fields": [
                { "id": "email", "type": "email", "label": "Email", "required": true },
                { "id": "name", "type": "text", "label": "Name", "required": true,
                  "validation": { "minLength": 2 } }
            ],
            "values": { "name": "Al" }
        }))
        .await;
    res.assert_status(StatusCode::OK);
    assert_eq!(
        res.json::<Value>(),
        json!({ "valid": false, "errors": { "email": "Email is required" } })
    );
}

#[tokio::test]
async fn sqlite_backend_serves_the_same_api() {
    let store = SqliteStore::connect("sqlite::memory:").await.unwrap();
    let state = AppState::new(store);
    let document = seed_sample_document(state.store.as_ref())
        .await
        .unwrap()
        .unwrap();
    let server = TestServer::new(routes::app(state, None)).unwrap();

    server
        .post(&format!("/api/documents/{}/pages", document.id))
        .json(&json!({ "pageNumber": 5, "content": [] }))
        .await
        .assert_status(StatusCode::CREATED);
    let updated = server
        .get(&format!("/api/documents/{}", document.id))
        .await
        .json::<Document>();
    assert_eq!(updated.total_pages, 5);

    let paragraphs = server
        .get(&format!("/api/documents/{}/paragraphs", document.id))
        .await
        .json::<Vec<Paragraph>>();
    assert_eq!(paragraphs.len(), 7);
}
