//! # 폼 빌더
//!
//! 팔레트에서 필드를 골라 세로 목록으로 쌓는 폼 편집기 상태입니다.
//! 목록 순서가 곧 렌더링 순서이며, 드래그 앤 드롭 재정렬은 `reorder::move_item`을 씁니다.

use super::reorder::{insert_after, move_item, ListError};
use crate::models::{new_id, nullable};
use serde::{Deserialize, Serialize};

pub const DEFAULT_FORM_TITLE: &str = "Untitled Form";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormFieldType {
    Text,
    Email,
    Textarea,
    Select,
    Checkbox,
    Radio,
    Date,
    Signature,
}

impl FormFieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormFieldType::Text => "text",
            FormFieldType::Email => "email",
            FormFieldType::Textarea => "textarea",
            FormFieldType::Select => "select",
            FormFieldType::Checkbox => "checkbox",
            FormFieldType::Radio => "radio",
            FormFieldType::Date => "date",
            FormFieldType::Signature => "signature",
        }
    }

    /// 선택지 목록이 있는 타입
    pub fn has_options(&self) -> bool {
        matches!(self, FormFieldType::Select | FormFieldType::Radio)
    }

    pub fn default_placeholder(&self) -> String {
        match self {
            FormFieldType::Textarea => "Enter your text here...".to_string(),
            other => format!("Enter {}...", other.as_str()),
        }
    }
}

/// 문자열 값에 대한 추가 규칙
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Validation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    /// 값 전체와 일치해야 하는 정규식
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    pub id: String,
    #[serde(rename = "type")]
    pub field_type: FormFieldType,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<Validation>,
}

impl FormField {
    pub fn new(field_type: FormFieldType) -> Self {
        Self {
            id: new_id(),
            field_type,
            label: super::default_label(field_type.as_str()),
            placeholder: Some(field_type.default_placeholder()),
            required: false,
            options: field_type
                .has_options()
                .then(|| vec!["Option 1".to_string(), "Option 2".to_string()]),
            validation: None,
        }
    }
}

/// 속성 패널의 부분 수정. `null`은 값을 지웁니다.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FormFieldPatch {
    pub label: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub placeholder: Option<Option<String>>,
    pub required: Option<bool>,
    #[serde(default, deserialize_with = "nullable")]
    pub options: Option<Option<Vec<String>>>,
    #[serde(default, deserialize_with = "nullable")]
    pub validation: Option<Option<Validation>>,
}

impl FormFieldPatch {
    fn apply_to(&self, field: &mut FormField) {
        if let Some(label) = &self.label {
            field.label = label.clone();
        }
        if let Some(placeholder) = &self.placeholder {
            field.placeholder = placeholder.clone();
        }
        if let Some(required) = self.required {
            field.required = required;
        }
        if let Some(options) = &self.options {
            field.options = options.clone();
        }
        if let Some(validation) = &self.validation {
            field.validation = validation.clone();
        }
    }
}

/// 편집 중인 폼: 제목, 순서 있는 필드 목록, 선택된 필드
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormBuilder {
    pub title: String,
    fields: Vec<FormField>,
    #[serde(skip)]
    selected: Option<String>,
}

impl Default for FormBuilder {
    fn default() -> Self {
        Self {
            title: DEFAULT_FORM_TITLE.to_string(),
            fields: Vec::new(),
            selected: None,
        }
    }
}

impl FormBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn get(&self, id: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.id == id)
    }

    fn position(&self, id: &str) -> Result<usize, ListError> {
        self.fields
            .iter()
            .position(|f| f.id == id)
            .ok_or_else(|| ListError::UnknownId(id.to_string()))
    }

    pub fn selected(&self) -> Option<&FormField> {
        self.selected.as_deref().and_then(|id| self.get(id))
    }

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

    /// 목록 끝에 새 필드를 추가하고 선택합니다.
    pub fn add(&mut self, field_type: FormFieldType) -> &FormField {
        let field = FormField::new(field_type);
        self.selected = Some(field.id.clone());
        self.fields.push(field);
        &self.fields[self.fields.len() - 1]
    }

    pub fn update(&mut self, id: &str, patch: &FormFieldPatch) -> Result<&FormField, ListError> {
        let index = self.position(id)?;
        patch.apply_to(&mut self.fields[index]);
        Ok(&self.fields[index])
    }

    pub fn remove(&mut self, id: &str) -> Result<FormField, ListError> {
        let index = self.position(id)?;
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        }
        Ok(self.fields.remove(index))
    }

    /// 원본 바로 뒤에 복제본을 넣습니다. 라벨 끝에 " (Copy)"가 붙습니다.
    pub fn duplicate(&mut self, id: &str) -> Result<&FormField, ListError> {
        let index = self.position(id)?;
        let source = &self.fields[index];
        let copy = FormField {
            id: new_id(),
            label: format!("{} (Copy)", source.label),
            ..source.clone()
        };
        let at = insert_after(&mut self.fields, index, copy);
        Ok(&self.fields[at])
    }

    /// 인덱스로 재정렬합니다.
    pub fn move_field(&mut self, from: usize, to: usize) -> Result<(), ListError> {
        move_item(&mut self.fields, from, to)
    }

    /// 드롭 이벤트: `active_id` 필드를 `over_id` 필드가 있던 자리로 옮깁니다.
    pub fn move_field_to(&mut self, active_id: &str, over_id: &str) -> Result<(), ListError> {
        if active_id == over_id {
            return Ok(());
        }
        let from = self.position(active_id)?;
        let to = self.position(over_id)?;
        self.move_field(from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(builder: &FormBuilder) -> Vec<&str> {
        builder.fields().iter().map(|f| f.label.as_str()).collect()
    }

    #[test]
    fn defaults_depend_on_type() {
        let mut builder = FormBuilder::new();
        assert_eq!(builder.title, "Untitled Form");

        let select = builder.add(FormFieldType::Select).clone();
        assert_eq!(select.label, "Select Field");
        assert_eq!(select.placeholder.as_deref(), Some("Enter select..."));
        assert_eq!(select.options, Some(vec!["Option 1".to_string(), "Option 2".to_string()]));
        assert!(!select.required);

        let notes = builder.add(FormFieldType::Textarea).clone();
        assert_eq!(notes.placeholder.as_deref(), Some("Enter your text here..."));
        assert_eq!(notes.options, None);
        assert_eq!(builder.selected().map(|f| f.id.as_str()), Some(notes.id.as_str()));
    }

    #[test]
    fn duplicate_inserts_after_source() {
        let mut builder = FormBuilder::new();
        let name = builder.add(FormFieldType::Text).id.clone();
        builder.add(FormFieldType::Email);
        builder
            .update(&name, &FormFieldPatch { required: Some(true), ..Default::default() })
            .unwrap();

        let copy = builder.duplicate(&name).unwrap().clone();
        assert_eq!(labels(&builder), vec!["Text Field", "Text Field (Copy)", "Email Field"]);
        assert_ne!(copy.id, name);

        let source = builder.get(&name).unwrap();
        assert_eq!(
            FormField { id: source.id.clone(), label: source.label.clone(), ..copy },
            *source
        );
    }

    #[test]
    fn drop_on_another_field_reorders() {
        let mut builder = FormBuilder::new();
        let a = builder.add(FormFieldType::Text).id.clone();
        builder.add(FormFieldType::Date);
        let c = builder.add(FormFieldType::Radio).id.clone();

        builder.move_field_to(&a, &c).unwrap();
        assert_eq!(labels(&builder), vec!["Date Field", "Radio Field", "Text Field"]);

        assert_eq!(
            builder.move_field(0, 3),
            Err(ListError::OutOfRange { index: 3, len: 3 })
        );
        assert!(builder.move_field_to(&a, "nope").is_err());
    }

    #[test]
    fn patch_can_clear_and_set() {
        let mut builder = FormBuilder::new();
        let id = builder.add(FormFieldType::Radio).id.clone();
        let patch: FormFieldPatch = serde_json::from_str(
            r#"{ "options": null, "validation": { "minLength": 2 }, "label": "Plan" }"#,
        )
        .unwrap();
        let field = builder.update(&id, &patch).unwrap();
        assert_eq!(field.options, None);
        assert_eq!(field.validation.as_ref().and_then(|v| v.min_length), Some(2));
        assert_eq!(field.label, "Plan");

        assert!(serde_json::from_str::<FormFieldPatch>(r#"{ "colour": "red" }"#).is_err());
    }

    #[test]
    fn remove_clears_selection() {
        let mut builder = FormBuilder::new();
        let id = builder.add(FormFieldType::Checkbox).id.clone();
        builder.remove(&id).unwrap();
        assert!(builder.selected().is_none());
        assert!(builder.fields().is_empty());
    }
}
