//! # 편집 모델
//!
//! 화면 상태를 HTTP와 무관한 순수 Rust 타입으로 표현합니다.
//! 서버 라우트(내보내기, 검증)와 테스트가 같은 규칙을 공유합니다.
//!
//! - `layout`: 퍼센트 좌표, 클램프, 드래그/리사이즈 제스처, 쌓임 순서
//! - `fields`: PDF 위에 배치하는 서명/날짜/텍스트 필드 목록
//! - `forms`: 폼 빌더 (필드 추가/복제/재정렬)
//! - `validation`: 폼 제출 값 검증
//! - `reorder`: 순서 있는 목록 조작
//! - `session`: 단락 인라인 편집 세션

pub mod fields;
pub mod forms;
pub mod layout;
pub mod reorder;
pub mod session;
pub mod validation;

pub use fields::{Assignee, Field, FieldLayout, FieldPatch, FieldType};
pub use forms::{FormBuilder, FormField, FormFieldPatch, FormFieldType, Validation};
pub use layout::{
    clamp_rect, drag, percent_delta, resize, to_pixels, ContainerSize, Gesture, GestureKind,
    PixelRect, Point, Rect, RectLimits, StackLevel,
};
pub use reorder::{move_item, ListError};
pub use session::{EditError, EditSession};
pub use validation::{validate_submission, ValidationReport};

/// "signature" → "Signature Field"
pub(crate) fn default_label(type_name: &str) -> String {
    let mut chars = type_name.chars();
    match chars.next() {
        Some(first) => format!("{}{} Field", first.to_uppercase(), chars.as_str()),
        None => "Field".to_string(),
    }
}
