//! # 애플리케이션 설정(Configuration) 모듈
//!
//! 환경변수에서 서버 설정값을 읽어오는 모듈입니다.
//! `.env` 파일이나 시스템 환경변수에서 값을 가져옵니다.
//!
//! 설정 항목:
//! - `HOST`: 서버 바인딩 주소 (기본값 "0.0.0.0")
//! - `PORT`: 서버 포트 번호 (기본값 5000)
//! - `DATABASE_URL`: SQLite 데이터베이스 경로. 없으면 메모리 저장소를 사용합니다.
//! - `SEED_SAMPLE`: 비어 있는 저장소에 샘플 계약서를 넣을지 여부 (기본값 true)
//! - `FRONTEND_DIST`: 빌드된 프론트엔드 디렉토리 (기본값 "client/dist")

use std::env;

/// 애플리케이션 전체 설정을 담는 구조체
///
/// 서버 시작 시 환경변수에서 한 번 읽어온 후 main에서만 사용됩니다.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// 서버가 바인딩할 호스트 주소
    pub host: String,
    /// 서버 포트 번호
    pub port: u16,
    /// SQLite 연결 문자열 (예: "sqlite:data/inkdraft.db?mode=rwc")
    /// None이면 프로세스 메모리에만 데이터를 둡니다.
    pub database_url: Option<String>,
    /// 빈 저장소에 샘플 문서를 시드할지 여부
    pub seed_sample: bool,
    /// SPA 정적 파일 디렉토리
    pub frontend_dist: String,
}

impl Config {
    /// 환경변수에서 설정값을 읽어 Config 인스턴스를 생성합니다.
    ///
    /// 모든 항목에 기본값이 있으므로 실패하지 않습니다.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 키 → 값 조회 함수로부터 설정을 만듭니다.
    ///
    /// 테스트에서 프로세스 환경변수를 건드리지 않고 설정 파싱을 검증할 수 있습니다.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            // 파싱 실패 시 기본값 5000 사용
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            // 빈 문자열은 "설정 안 함"으로 취급합니다.
            database_url: lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()),
            seed_sample: lookup("SEED_SAMPLE")
                .map(|v| !matches!(v.trim().to_ascii_lowercase().as_str(), "0" | "false" | "no" | "off"))
                .unwrap_or(true),
            frontend_dist: lookup("FRONTEND_DIST").unwrap_or_else(|| "client/dist".to_string()),
        }
    }
}
