//! # 요청 본문 추출기(Extractor)
//!
//! Axum의 기본 `Json<T>` 추출기는 본문이 타입과 맞지 않으면 422를,
//! Content-Type이 없으면 415를 돌려줍니다. 이 API는 모든 본문 모양 오류를
//! 400(`bad_request`)과 공통 에러 JSON으로 보고하므로, `Json<T>`를 감싼
//! `AppJson<T>`를 핸들러 매개변수로 사용합니다.

use crate::error::AppError;
use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};

/// 실패 시 `AppError::BadRequest`로 거절하는 JSON 추출기
///
/// 사용법은 `Json<T>`와 같습니다: `AppJson(req): AppJson<NewPage>`
#[derive(Debug, Clone, Copy, Default)]
pub struct AppJson<T>(pub T);

// FromRequest<S>: 요청 전체(헤더 + 본문)를 소비하는 추출기 트레이트.
// 본문을 읽지 않는 추출기(State, Path 등)는 FromRequestParts를 구현합니다.
impl<S, T> FromRequest<S> for AppJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(AppJson(value)),
            Err(rejection) => {
                tracing::debug!("Rejected request body: {}", rejection.body_text());
                Err(AppError::BadRequest(rejection.body_text()))
            }
        }
    }
}
