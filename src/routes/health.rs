//! # 헬스체크(Health Check) 핸들러
//!
//! - `GET /api/health` → `{ "status": "ok" }`
//!
//! 로드밸런서나 컨테이너 헬스체크가 호출합니다. 저장소에는 접근하지 않습니다.

use axum::Json;
use serde_json::{json, Value};

/// `GET /health` — 항상 200
pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
