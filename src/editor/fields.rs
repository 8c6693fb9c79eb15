//! # PDF 필드 배치
//!
//! 업로드한 PDF 페이지 위에 서명/날짜/텍스트 같은 입력 필드를 올려놓는 편집기의 상태입니다.
//! 필드 위치는 `layout::Rect`(퍼센트)로 저장하고, 모든 위치 변경은 `clamp_rect`를 거칩니다.

use super::layout::{clamp_rect, ContainerSize, Gesture, GestureKind, Point, Rect, RectLimits, StackLevel};
use super::reorder::{insert_after, ListError};
use crate::models::{new_id, nullable};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Signature,
    Date,
    Text,
    Checkbox,
    Initial,
    Name,
    Email,
    Title,
}

impl FieldType {
    pub const ALL: [FieldType; 8] = [
        FieldType::Signature,
        FieldType::Date,
        FieldType::Text,
        FieldType::Checkbox,
        FieldType::Initial,
        FieldType::Name,
        FieldType::Email,
        FieldType::Title,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Signature => "signature",
            FieldType::Date => "date",
            FieldType::Text => "text",
            FieldType::Checkbox => "checkbox",
            FieldType::Initial => "initial",
            FieldType::Name => "name",
            FieldType::Email => "email",
            FieldType::Title => "title",
        }
    }

    /// 새로 배치할 때의 (너비, 높이) 퍼센트
    pub fn default_size(&self) -> (f64, f64) {
        match self {
            FieldType::Signature => (30.0, 8.0),
            FieldType::Checkbox => (3.0, 3.0),
            _ => (20.0, 5.0),
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            FieldType::Signature => "Sign here",
            FieldType::Date => "Date",
            FieldType::Text => "Enter text",
            FieldType::Name => "Full name",
            FieldType::Email => "Email address",
            FieldType::Title => "Job title",
            FieldType::Initial => "Initial",
            FieldType::Checkbox => "Field",
        }
    }

    /// 서명과 날짜는 기본적으로 필수입니다.
    pub fn required_by_default(&self) -> bool {
        matches!(self, FieldType::Signature | FieldType::Date)
    }
}

/// 필드를 채울 사람
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Assignee {
    #[default]
    Signer1,
    Signer2,
    Sender,
}

pub const DEFAULT_FONT_SIZE: u32 = 12;
/// 새 필드의 왼쪽 위 모서리 (페이지의 25%, 25%)
pub const DEFAULT_ORIGIN: f64 = 25.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub id: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub label: String,
    /// JSON에서는 x, y, width, height가 필드 객체에 바로 들어갑니다.
    #[serde(flatten)]
    pub rect: Rect,
    /// 1부터 시작하는 페이지 번호
    pub page: u32,
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<Assignee>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl Field {
    /// 타입별 기본값으로 새 필드를 만듭니다.
    pub fn new(field_type: FieldType, page: u32) -> Self {
        let (width, height) = field_type.default_size();
        Self {
            id: new_id(),
            field_type,
            label: super::default_label(field_type.as_str()),
            rect: Rect::new(DEFAULT_ORIGIN, DEFAULT_ORIGIN, width, height),
            page,
            required: field_type.required_by_default(),
            assignee: Some(Assignee::default()),
            placeholder: Some(field_type.placeholder().to_string()),
            font_size: Some(DEFAULT_FONT_SIZE),
            value: None,
        }
    }
}

/// 속성 패널에서 입력한 부분 수정
///
/// 좌표 숫자는 `RectLimits::FIELD`로 클램프됩니다.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FieldPatch {
    pub label: Option<String>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub page: Option<u32>,
    pub required: Option<bool>,
    #[serde(default, deserialize_with = "nullable")]
    pub assignee: Option<Option<Assignee>>,
    #[serde(default, deserialize_with = "nullable")]
    pub placeholder: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub font_size: Option<Option<u32>>,
    #[serde(default, deserialize_with = "nullable")]
    pub value: Option<Option<String>>,
}

impl FieldPatch {
    fn apply_to(&self, field: &mut Field) {
        if let Some(label) = &self.label {
            field.label = label.clone();
        }
        let rect = Rect {
            x: self.x.unwrap_or(field.rect.x),
            y: self.y.unwrap_or(field.rect.y),
            width: self.width.unwrap_or(field.rect.width),
            height: self.height.unwrap_or(field.rect.height),
        };
        field.rect = clamp_rect(rect, RectLimits::FIELD);
        if let Some(page) = self.page {
            field.page = page;
        }
        if let Some(required) = self.required {
            field.required = required;
        }
        if let Some(assignee) = self.assignee {
            field.assignee = assignee;
        }
        if let Some(placeholder) = &self.placeholder {
            field.placeholder = placeholder.clone();
        }
        if let Some(font_size) = self.font_size {
            field.font_size = font_size;
        }
        if let Some(value) = &self.value {
            field.value = value.clone();
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct ActiveGesture {
    field_id: String,
    gesture: Gesture,
}

/// 한 PDF의 필드 목록과 선택/제스처 상태
///
/// 선택은 최대 하나입니다. 진행 중인 제스처도 최대 하나입니다.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldLayout {
    fields: Vec<Field>,
    selected: Option<String>,
    active: Option<ActiveGesture>,
}

impl FieldLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// 이미 저장된 필드 목록으로 시작합니다.
    pub fn from_fields(fields: Vec<Field>) -> Self {
        Self {
            fields,
            ..Self::default()
        }
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn into_fields(self) -> Vec<Field> {
        self.fields
    }

    pub fn get(&self, id: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.id == id)
    }

    fn position(&self, id: &str) -> Result<usize, ListError> {
        self.fields
            .iter()
            .position(|f| f.id == id)
            .ok_or_else(|| ListError::UnknownId(id.to_string()))
    }

    pub fn selected(&self) -> Option<&Field> {
        self.selected.as_deref().and_then(|id| self.get(id))
    }

    /// `None`이면 선택 해제. 없는 ID는 무시하고 false를 반환합니다.
    pub fn select(&mut self, id: Option<&str>) -> bool {
        match id {
            None => {
                self.selected = None;
                true
            }
            Some(id) if self.get(id).is_some() => {
                self.selected = Some(id.to_string());
                true
            }
            Some(_) => false,
        }
    }

    /// 새 필드를 목록 끝에 추가하고 선택합니다.
    pub fn add(&mut self, field_type: FieldType, page: u32) -> &Field {
        let field = Field::new(field_type, page);
        self.selected = Some(field.id.clone());
        self.fields.push(field);
        &self.fields[self.fields.len() - 1]
    }

    pub fn update(&mut self, id: &str, patch: &FieldPatch) -> Result<&Field, ListError> {
        let index = self.position(id)?;
        patch.apply_to(&mut self.fields[index]);
        Ok(&self.fields[index])
    }

    /// 필드를 삭제합니다. 선택되어 있었다면 선택도 해제합니다.
    pub fn remove(&mut self, id: &str) -> Result<Field, ListError> {
        let index = self.position(id)?;
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        }
        if self.active.as_ref().is_some_and(|a| a.field_id == id) {
            self.active = None;
        }
        Ok(self.fields.remove(index))
    }

    /// 같은 설정의 필드를 원본 바로 뒤에 새 ID로 추가합니다.
    pub fn duplicate(&mut self, id: &str) -> Result<&Field, ListError> {
        let index = self.position(id)?;
        let copy = Field {
            id: new_id(),
            ..self.fields[index].clone()
        };
        let at = insert_after(&mut self.fields, index, copy);
        Ok(&self.fields[at])
    }

    /// 현재 페이지에 그릴 필드
    pub fn on_page(&self, page: u32) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(move |f| f.page == page)
    }

    // ── 포인터 제스처 ──

    /// pointer-down: 필드를 선택하고 제스처를 시작합니다.
    pub fn begin_gesture(
        &mut self,
        id: &str,
        kind: GestureKind,
        pointer: Point,
    ) -> Result<(), ListError> {
        let index = self.position(id)?;
        self.selected = Some(id.to_string());
        self.active = Some(ActiveGesture {
            field_id: id.to_string(),
            gesture: Gesture::begin(kind, self.fields[index].rect, pointer),
        });
        Ok(())
    }

    /// pointer-move: 시작 상태로부터 사각형을 다시 계산해 바로 반영합니다.
    /// 진행 중인 제스처가 없으면 `None`.
    pub fn update_gesture(&mut self, pointer: Point, container: ContainerSize) -> Option<Rect> {
        let active = self.active.as_ref()?;
        let rect = active.gesture.update(pointer, container);
        let field = self.fields.iter_mut().find(|f| f.id == active.field_id)?;
        field.rect = rect;
        Some(rect)
    }

    /// pointer-up: 마지막 위치를 확정하고 제스처를 끝냅니다.
    pub fn end_gesture(&mut self, pointer: Point, container: ContainerSize) -> Option<Rect> {
        let rect = self.update_gesture(pointer, container);
        self.active = None;
        rect
    }

    pub fn is_dragging(&self, id: &str) -> bool {
        self.active.as_ref().is_some_and(|a| a.field_id == id)
    }

    pub fn stack_level(&self, id: &str) -> StackLevel {
        StackLevel::of(self.is_dragging(id), self.selected.as_deref() == Some(id))
    }
}
