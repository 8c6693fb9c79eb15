//! # 필드 좌표 모델
//!
//! 필드는 페이지(컨테이너) 크기에 대한 **퍼센트** 사각형으로 저장됩니다.
//! 화면 배율이 바뀌어도 위치가 유지되도록, 픽셀은 그릴 때와 포인터 제스처를
//! 해석할 때만 사용합니다.
//!
//! ```text
//!   포인터 이동(px) ──÷ 컨테이너 크기(px) × 100──▶ 퍼센트 변화량
//!   시작 사각형(%) + 퍼센트 변화량 ──clamp_rect──▶ 새 사각형(%)
//! ```
//!
//! 모든 경로(드래그, 리사이즈, 속성 패널 숫자 입력)는 `clamp_rect` 하나로 범위를 맞춥니다.

use serde::{Deserialize, Serialize};

/// 원점(x, y)의 최댓값. 필드 왼쪽 위 모서리가 페이지 밖으로 나가지 않습니다.
/// 오른쪽/아래쪽 가장자리는 따로 제한하지 않습니다.
pub const MAX_ORIGIN: f64 = 95.0;
/// 너비/높이 최댓값 (페이지 전체)
pub const MAX_SIZE: f64 = 100.0;
/// 리사이즈 제스처로 줄일 수 있는 최소 크기
pub const RESIZE_MIN_SIZE: f64 = 5.0;
/// 숫자 입력으로 지정할 수 있는 최소 크기
pub const FIELD_MIN_SIZE: f64 = 1.0;

/// 컨테이너 대비 퍼센트 단위 사각형
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }
}

/// `clamp_rect`가 적용할 범위
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectLimits {
    pub max_origin: f64,
    pub min_size: f64,
    pub max_size: f64,
}

impl RectLimits {
    /// 배치, 드래그, 숫자 입력: 원점 0..=95, 크기 1..=100
    pub const FIELD: RectLimits = RectLimits {
        max_origin: MAX_ORIGIN,
        min_size: FIELD_MIN_SIZE,
        max_size: MAX_SIZE,
    };

    /// 리사이즈 제스처: 원점 0..=95, 크기 5..=100
    pub const RESIZE: RectLimits = RectLimits {
        max_origin: MAX_ORIGIN,
        min_size: RESIZE_MIN_SIZE,
        max_size: MAX_SIZE,
    };
}

fn clamp_value(value: f64, min: f64, max: f64) -> f64 {
    // NaN/무한대는 하한으로 보냅니다. f64::clamp는 NaN을 그대로 통과시킵니다.
    if value.is_finite() {
        value.clamp(min, max)
    } else {
        min
    }
}

/// 사각형을 주어진 범위 안으로 맞춥니다.
pub fn clamp_rect(rect: Rect, limits: RectLimits) -> Rect {
    Rect {
        x: clamp_value(rect.x, 0.0, limits.max_origin),
        y: clamp_value(rect.y, 0.0, limits.max_origin),
        width: clamp_value(rect.width, limits.min_size, limits.max_size),
        height: clamp_value(rect.height, limits.min_size, limits.max_size),
    }
}

/// 컨테이너(페이지 표면)의 현재 픽셀 크기
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContainerSize {
    pub width: f64,
    pub height: f64,
}

impl ContainerSize {
    /// 크기를 아직 모를 때 쓰는 US Letter(612 × 792pt)
    pub const LETTER: ContainerSize = ContainerSize {
        width: 612.0,
        height: 792.0,
    };

    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// 아직 렌더링되지 않았거나 숨겨진 컨테이너
    pub fn is_degenerate(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0)
    }
}

impl Default for ContainerSize {
    fn default() -> Self {
        Self::LETTER
    }
}

/// 포인터 좌표 또는 픽셀 이동량
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// 렌더링용 픽셀 사각형
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PixelRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

pub fn to_pixels(rect: Rect, container: ContainerSize) -> PixelRect {
    PixelRect {
        left: rect.x / 100.0 * container.width,
        top: rect.y / 100.0 * container.height,
        width: rect.width / 100.0 * container.width,
        height: rect.height / 100.0 * container.height,
    }
}

/// 픽셀 이동량을 퍼센트 이동량으로 바꿉니다. 크기를 모르는 컨테이너면 (0, 0).
pub fn percent_delta(delta: Point, container: ContainerSize) -> Point {
    if container.is_degenerate() {
        return Point::default();
    }
    Point {
        x: delta.x / container.width * 100.0,
        y: delta.y / container.height * 100.0,
    }
}

/// 원점을 옮깁니다. 크기는 바꾸지 않습니다.
pub fn drag(rect: Rect, delta: Point, container: ContainerSize) -> Rect {
    let shift = percent_delta(delta, container);
    clamp_rect(
        Rect {
            x: rect.x + shift.x,
            y: rect.y + shift.y,
            ..rect
        },
        RectLimits::FIELD,
    )
}

/// 너비/높이를 바꿉니다. 원점은 그대로입니다.
pub fn resize(rect: Rect, delta: Point, container: ContainerSize) -> Rect {
    let grow = percent_delta(delta, container);
    clamp_rect(
        Rect {
            width: rect.width + grow.x,
            height: rect.height + grow.y,
            ..rect
        },
        RectLimits::RESIZE,
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GestureKind {
    Move,
    Resize,
}

/// 진행 중인 포인터 제스처 (pointer-down ~ pointer-up)
///
/// 시작 포인터 위치와 시작 사각형을 기억하고, 매 pointer-move마다
/// **시작 상태로부터** 새 사각형을 다시 계산합니다. 이동 이벤트를 누적하지 않으므로
/// 반올림 오차나 클램프 때문에 필드가 포인터에서 어긋나지 않습니다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gesture {
    pub kind: GestureKind,
    pub start_pointer: Point,
    pub start_rect: Rect,
}

impl Gesture {
    pub fn begin(kind: GestureKind, rect: Rect, pointer: Point) -> Self {
        Self {
            kind,
            start_pointer: pointer,
            start_rect: rect,
        }
    }

    /// 현재 포인터 위치에 해당하는 사각형. pointer-up 시점의 값이 최종 결과입니다.
    pub fn update(&self, pointer: Point, container: ContainerSize) -> Rect {
        let delta = Point {
            x: pointer.x - self.start_pointer.x,
            y: pointer.y - self.start_pointer.y,
        };
        match self.kind {
            GestureKind::Move => drag(self.start_rect, delta, container),
            GestureKind::Resize => resize(self.start_rect, delta, container),
        }
    }
}

/// 겹친 필드의 그리기 우선순위: 드래그 중 > 선택됨 > 나머지
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StackLevel {
    Resting,
    Selected,
    Dragging,
}

impl StackLevel {
    pub fn of(is_dragging: bool, is_selected: bool) -> Self {
        match (is_dragging, is_selected) {
            (true, _) => StackLevel::Dragging,
            (false, true) => StackLevel::Selected,
            (false, false) => StackLevel::Resting,
        }
    }

    /// CSS z-index 값
    pub fn z_index(self) -> u32 {
        match self {
            StackLevel::Resting => 10,
            StackLevel::Selected => 100,
            StackLevel::Dragging => 1000,
        }
    }
}
