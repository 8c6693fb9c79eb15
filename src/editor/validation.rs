//! # 폼 제출 값 검증
//!
//! 필드마다 규칙을 순서대로 검사하고, 처음 실패한 규칙의 메시지 하나만 남깁니다.
//!
//! 1. required: 값이 없음 / null / false / 공백뿐인 문자열 / 빈 배열
//! 2. minLength, maxLength (비어 있지 않은 문자열만)
//! 3. pattern (비어 있지 않은 문자열만, 값 전체 일치)
//! 4. email 타입의 형식

use super::forms::{FormField, FormFieldType};
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::LazyLock;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid")
});

/// 검증 결과. `errors`는 필드 ID → 메시지.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: BTreeMap<String, String>,
}

fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        Some(_) => false,
    }
}

fn check_field(field: &FormField, value: Option<&Value>) -> Option<String> {
    let label = &field.label;
    if field.required && is_blank(value) {
        return Some(format!("{label} is required"));
    }

    // 이하 규칙은 입력된 문자열에만 적용됩니다.
    let text = match value {
        Some(Value::String(s)) if !s.is_empty() => s.as_str(),
        _ => return None,
    };

    if let Some(rules) = &field.validation {
        let length = text.chars().count();
        if let Some(min) = rules.min_length.filter(|&m| m > 0) {
            if length < min {
                return Some(format!("{label} must be at least {min} characters"));
            }
        }
        if let Some(max) = rules.max_length.filter(|&m| m > 0) {
            if length > max {
                return Some(format!("{label} must not exceed {max} characters"));
            }
        }
        if let Some(pattern) = rules.pattern.as_deref().filter(|p| !p.is_empty()) {
            match Regex::new(&format!("^(?:{pattern})$")) {
                Ok(re) if !re.is_match(text) => {
                    return Some(format!("{label} has an invalid format"));
                }
                Ok(_) => {}
                Err(e) => tracing::debug!("Ignoring invalid pattern on {}: {}", field.id, e),
            }
        }
    }

    if field.field_type == FormFieldType::Email && !EMAIL_RE.is_match(text) {
        return Some("Please enter a valid email address".to_string());
    }

    None
}

/// 제출 값(`values`: 필드 ID → 값)을 폼 정의에 맞춰 검사합니다.
pub fn validate_submission(fields: &[FormField], values: &Map<String, Value>) -> ValidationReport {
    let errors: BTreeMap<String, String> = fields
        .iter()
        .filter_map(|field| {
            check_field(field, values.get(&field.id)).map(|message| (field.id.clone(), message))
        })
        .collect();

    ValidationReport {
        valid: errors.is_empty(),
        errors,
    }
}
