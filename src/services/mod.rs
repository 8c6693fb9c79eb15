//! # 서비스 계층
//!
//! HTTP나 저장소에 묶이지 않는 가공 로직입니다.
//! - `export`: 폼/필드 배치 JSON 내보내기와 파일 이름 생성

pub mod export;

pub use export::*;
