use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

use crate::database::models::NOT_MODIFIED;
use crate::error::AppError;

static CREDENTIAL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9]{8,}$").expect("valid credential pattern"));

static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9가-힣 ]+$").expect("valid name pattern"));

static DATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}/\d{2}/\d{2}$").expect("valid date pattern"));

const DATE_FORMAT: &str = "%Y/%m/%d";

// Placeholder the web client sends for an unmodified event
const NOT_MODIFIED_KO: &str = "없음";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKind {
    Event,
    Team,
    Activity,
}

impl NameKind {
    fn invalid_message(self) -> &'static str {
        match self {
            NameKind::Event => "행사이름을 숫자와 문자 조합으로 만들어주세요.",
            NameKind::Team => "유효한 팀 이름을 입력해주세요.",
            NameKind::Activity => "유효한 활동 이름을 입력해주세요.",
        }
    }
}

pub fn validate_admin_id(id: &str) -> Result<(), AppError> {
    if id.is_empty() {
        return Err(AppError::Validation("아이디는 필수 입력 항목입니다.".to_string()));
    }
    if !CREDENTIAL_PATTERN.is_match(id) {
        return Err(AppError::Validation(
            "아이디는 8자 이상의 영문 대소문자와 숫자로 이루어져야 합니다.".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), AppError> {
    if password.is_empty() {
        return Err(AppError::Validation("비밀번호는 필수 입력 항목입니다.".to_string()));
    }
    if !CREDENTIAL_PATTERN.is_match(password) {
        return Err(AppError::Validation(
            "비밀번호는 8자 이상의 영문 대소문자와 숫자로 이루어져야 합니다.".to_string(),
        ));
    }
    Ok(())
}

/// Event, team and activity names: letters, digits, Hangul and spaces.
pub fn validate_name(kind: NameKind, name: &str) -> Result<(), AppError> {
    if name.trim().is_empty() || !NAME_PATTERN.is_match(name) {
        return Err(AppError::Validation(kind.invalid_message().to_string()));
    }
    Ok(())
}

pub fn validate_names(kind: NameKind, names: &[String]) -> Result<(), AppError> {
    if names.is_empty() {
        return Err(AppError::Validation("삭제할 항목을 선택해주세요.".to_string()));
    }
    names.iter().try_for_each(|name| validate_name(kind, name))
}

/// Accepts `yyyy/mm/dd` for a real calendar date.
pub fn validate_date(value: &str) -> Result<(), AppError> {
    let invalid = || AppError::Validation("날짜는 yyyy/mm/dd 형식이어야 합니다.".to_string());

    if !DATE_PATTERN.is_match(value) {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| invalid())?;
    Ok(())
}

pub fn created_date_or_today(value: Option<String>) -> Result<String, AppError> {
    match value {
        Some(date) => {
            validate_date(&date)?;
            Ok(date)
        }
        None => Ok(chrono::Utc::now().format(DATE_FORMAT).to_string()),
    }
}

/// `None`, `"none"` and `"없음"` all mean the event was never modified.
pub fn normalize_modified_date(value: Option<String>) -> Result<String, AppError> {
    match value.as_deref().map(str::trim) {
        None | Some(NOT_MODIFIED) | Some(NOT_MODIFIED_KO) => Ok(NOT_MODIFIED.to_string()),
        Some(date) => {
            validate_date(date)?;
            Ok(date.to_string())
        }
    }
}

/// Reads a score sent either as a JSON number or as a numeric string.
pub fn parse_score(value: &serde_json::Value, min: i64, max: i64) -> Result<i64, AppError> {
    let out_of_range = || AppError::Validation(format!("{}부터 {}사이에 있는 숫자를 입력해주세요.", min, max));

    let score = match value {
        serde_json::Value::Number(number) => number.as_i64(),
        serde_json::Value::String(text) => text.trim().parse::<i64>().ok(),
        _ => None,
    }
    .ok_or_else(out_of_range)?;

    if score < min || score > max {
        return Err(out_of_range());
    }
    Ok(score)
}
