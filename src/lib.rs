//! # Inkdraft
//!
//! 계약서 문서 편집기의 백엔드 라이브러리입니다.
//!
//! - `store` / `db`: 문서·페이지·단락 저장소 (메모리 또는 SQLite)
//! - `routes`: `/api` HTTP 라우터
//! - `editor`: 필드 좌표, 폼 빌더, 제출 검증, 인라인 편집 세션
//! - `services`: JSON 내보내기
//!
//! 서버 실행 파일(`main.rs`)과 통합 테스트(`tests/`)가 이 크레이트를 사용합니다.

pub mod config;
pub mod db;
pub mod editor;
pub mod error;
pub mod extract;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;
