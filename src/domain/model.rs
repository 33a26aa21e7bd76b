use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::utils::validation::is_blank;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Ok,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Scope {
    Parameters,
    Connectivity,
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Parameters => write!(f, "PARAMETERS"),
            Scope::Connectivity => write!(f, "CONNECTIVITY"),
        }
    }
}

impl std::str::FromStr for Scope {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "parameters" => Ok(Scope::Parameters),
            "connectivity" => Ok(Scope::Connectivity),
            other => Err(format!("unknown scope: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    MissingParameter,
    UnknownParameter,
    IllegalParameterValue,
    Authentication,
    Generic,
    Exception,
}

/// 標準屬性鍵
pub mod attribute {
    pub const HTTP_CODE: &str = "http.code";
    pub const HTTP_TEXT: &str = "http.text";
    pub const EXCEPTION_KIND: &str = "exception.kind";

    pub const TWITTER_ERROR_CODE: &str = "twitter.error.code";
    pub const TWITTER_STATUS_CODE: &str = "twitter.status.code";
    pub const TWITTER_EXCEPTION_CODE: &str = "twitter.exception.code";
    pub const TWITTER_EXCEPTION_MESSAGE: &str = "twitter.exception.message";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationError {
    pub code: ErrorCode,
    pub description: Option<String>,
    pub parameters: BTreeSet<String>,
    pub details: BTreeMap<String, serde_json::Value>,
}

impl VerificationError {
    pub fn detail(&self, key: &str) -> Option<&serde_json::Value> {
        self.details.get(key)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationResult {
    pub scope: Scope,
    pub status: Status,
    pub errors: Vec<VerificationError>,
    pub verified_at: DateTime<Utc>,
}

impl VerificationResult {
    pub fn is_ok(&self) -> bool {
        self.status == Status::Ok
    }
}

/// 使用者提供的元件參數（名稱 → 字串值）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Parameters(BTreeMap<String, String>);

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// 有值且非空白時才回傳
    pub fn value(&self, name: &str) -> Option<&str> {
        self.get(name).filter(|v| !is_blank(v))
    }

    pub fn is_present(&self, name: &str) -> bool {
        self.value(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn extend(&mut self, other: Parameters) {
        self.0.extend(other.0);
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Parameters {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TwitterUser {
    pub id: u64,
    pub screen_name: String,
    #[serde(default)]
    pub name: String,
}

/// Twitter API 呼叫失敗。沒有 HTTP 狀態碼代表請求根本沒有送達（網路、逾時等）。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct TwitterApiError {
    pub status_code: Option<u16>,
    pub error_code: Option<i32>,
    pub error_message: Option<String>,
    pub message: String,
    pub exception_code: String,
}

/// 失敗種類的短代碼：由狀態碼與錯誤碼雜湊而來，同類失敗得到相同代碼
fn exception_code(kind: &str, status_code: Option<u16>, error_code: Option<i32>) -> String {
    use sha1::{Digest, Sha1};

    let seed = format!(
        "{}:{}:{}",
        kind,
        status_code.map_or(-1, i32::from),
        error_code.unwrap_or(-1)
    );
    let digest = Sha1::digest(seed.as_bytes());
    digest[..4].iter().map(|b| format!("{:02x}", b)).collect()
}

impl TwitterApiError {
    /// 伺服器有回應但拒絕請求
    pub fn from_status(
        status_code: u16,
        reason: Option<&str>,
        error_code: Option<i32>,
        error_message: Option<String>,
    ) -> Self {
        let mut message = match reason {
            Some(reason) => format!("{}:{}", status_code, reason),
            None => status_code.to_string(),
        };
        if let Some(error_message) = &error_message {
            message.push_str(&format!("\nmessage - {}", error_message));
        }
        if let Some(error_code) = error_code {
            message.push_str(&format!("\ncode - {}", error_code));
        }

        Self {
            status_code: Some(status_code),
            error_code,
            error_message,
            message,
            exception_code: exception_code("http", Some(status_code), error_code),
        }
    }

    /// 請求沒有送達或回應無法讀取
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            status_code: None,
            error_code: None,
            error_message: None,
            message: message.into(),
            exception_code: exception_code("transport", None, None),
        }
    }

    pub fn is_invalid_or_expired_token(&self) -> bool {
        self.error_code == Some(INVALID_OR_EXPIRED_TOKEN)
    }
}

/// Twitter 錯誤碼 89: Invalid or expired token
pub const INVALID_OR_EXPIRED_TOKEN: i32 = 89;
