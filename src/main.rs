//! # Inkdraft 웹 서버 진입점
//!
//! 이 파일이 수행하는 작업:
//! 1. 환경변수(.env) 로딩
//! 2. 로깅(tracing) 초기화
//! 3. 저장소 선택 (DATABASE_URL이 있으면 SQLite, 없으면 메모리)
//! 4. 샘플 계약서 문서 생성 (저장소가 비어 있을 때만)
//! 5. 라우터 설정 후 HTTP 서버 시작

use anyhow::Result; // main에서만 쓰는 범용 에러 타입
use inkdraft::{
    config::Config,
    db::SqliteStore,
    routes::{self, AppState},
    store::{seed_sample_document, MemoryStore},
};
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1단계: 환경변수 로딩 ──
    // .env 파일이 없어도 에러 없이 넘어갑니다.
    dotenvy::dotenv().ok();

    // ── 2단계: 로깅 초기화 ──
    // RUST_LOG가 없으면 inkdraft, tower_http, axum을 debug 레벨로 출력합니다.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "inkdraft=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // ── 3단계: 설정 로딩 ──
    let config = Config::from_env();
    tracing::info!("Starting Inkdraft server on {}:{}", config.host, config.port);

    // ── 4단계: 저장소 선택 ──
    let state = match config.database_url.as_deref() {
        Some(url) => {
            tracing::info!("Using SQLite store at {}", url);
            AppState::new(SqliteStore::connect(url).await?)
        }
        None => {
            tracing::info!("DATABASE_URL not set, using in-memory store");
            AppState::new(MemoryStore::new())
        }
    };

    // ── 5단계: 샘플 문서 ──
    if config.seed_sample {
        match seed_sample_document(state.store.as_ref()).await? {
            Some(document) => tracing::info!(
                "Seeded sample document {} ({} pages)",
                document.id,
                document.total_pages
            ),
            None => tracing::debug!("Store already has documents, skipping sample"),
        }
    }

    // ── 6단계: 라우터 ──
    // 빌드된 프론트엔드가 있으면 같은 서버에서 서빙합니다 (SPA fallback).
    let frontend_dist = Path::new(&config.frontend_dist);
    let app = if frontend_dist.exists() {
        tracing::info!("Serving frontend static files from {}", config.frontend_dist);
        routes::app(state, Some(frontend_dist))
    } else {
        tracing::warn!("Frontend dist directory not found, serving API only");
        routes::app(state, None)
    };

    // ── 7단계: 서버 시작 ──
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
