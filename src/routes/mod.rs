//! # 라우트 핸들러 모듈
//!
//! HTTP 요청을 처리하는 핸들러 함수와 라우터 조립을 담당합니다.
//! 모든 API는 `/api` 아래에 있습니다.
//!
//! 각 하위 모듈:
//! - `documents`: 문서 CRUD
//! - `pages`: 문서 페이지 목록/추가/수정/삭제
//! - `paragraphs`: 단락 조회/추가/수정/삭제
//! - `exports`: 폼/필드 배치 내보내기, 폼 제출 검증
//! - `health`: 서버 상태 확인

pub mod documents;
pub mod exports;
pub mod health;
pub mod pages;
pub mod paragraphs;

pub use documents::*;
pub use exports::*;
pub use health::*;
pub use pages::*;
pub use paragraphs::*;

use crate::error::AppError;
use crate::store::Store;
use axum::{
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Router,
};
use std::any::Any;
use std::path::Path;
use std::sync::Arc;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{self, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

/// 애플리케이션 공유 상태
///
/// 모든 핸들러가 `State(state): State<AppState>`로 접근합니다.
/// `Arc<dyn Store>`이므로 clone해도 저장소는 하나입니다.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
}

impl AppState {
    pub fn new(store: impl Store + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

/// `/api` 아래의 라우트만 담은 라우터 (미들웨어 없음)
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        // 문서(Document)
        .route("/documents", get(get_sample_document).post(create_document))
        .route(
            "/documents/{id}",
            get(get_document).patch(update_document).delete(delete_document),
        )
        // 페이지(DocumentPage)
        .route("/documents/{id}/pages", get(list_pages).post(create_page))
        .route(
            "/documents/{document_id}/pages/{page_id}",
            patch(update_page).delete(delete_page),
        )
        // 단락(Paragraph)
        .route("/documents/{id}/paragraphs", get(list_document_paragraphs))
        .route("/pages/{id}/paragraphs", get(list_page_paragraphs))
        .route("/paragraphs", post(create_paragraph))
        .route("/paragraphs/{id}", patch(update_paragraph).delete(delete_paragraph))
        // 내보내기 / 검증
        .route("/forms/export", post(export_form))
        .route("/forms/validate", post(validate_form))
        .route("/fields/export", post(export_fields))
        // /api 아래의 없는 경로는 SPA가 아니라 JSON 404로 응답합니다.
        .fallback(api_not_found)
        .with_state(state)
}

/// 핸들러 패닉을 공통 에러 JSON(500)으로 바꿉니다.
fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    AppError::Internal(format!("Handler panicked: {detail}")).into_response()
}

/// 완성된 애플리케이션 라우터: `/api` 중첩 + CORS + 요청 로깅 + 패닉 처리
///
/// `frontend_dist`가 주어지면 API가 아닌 경로는 SPA로 보냅니다
/// (찾을 수 없는 파일은 index.html).
pub fn app(state: AppState, frontend_dist: Option<&Path>) -> Router {
    // 개발 환경과 같은 설정: 모든 출처/메서드/헤더 허용
    let cors = CorsLayer::new()
        .allow_origin(cors::Any)
        .allow_methods(cors::Any)
        .allow_headers(cors::Any);

    let router = Router::new().nest("/api", api_routes(state));
    let router = match frontend_dist {
        Some(dir) => {
            let serve_dir =
                ServeDir::new(dir).not_found_service(ServeFile::new(dir.join("index.html")));
            router.fallback_service(serve_dir)
        }
        None => router.fallback(api_not_found),
    };

    router
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// 일치하는 라우트가 없을 때
async fn api_not_found() -> AppError {
    AppError::NotFound
}
