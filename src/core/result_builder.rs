// 結果與錯誤項目的建構器；只要有任何錯誤，build 時狀態就降為 ERROR

use crate::domain::model::{
    attribute, ErrorCode, Parameters, Scope, Status, VerificationError, VerificationResult,
};
use crate::utils::error::VerifierError;
use chrono::Utc;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone)]
pub struct ResultBuilder {
    scope: Scope,
    status: Status,
    errors: Vec<VerificationError>,
}

impl ResultBuilder {
    pub fn with_status_and_scope(status: Status, scope: Scope) -> Self {
        Self {
            scope,
            status,
            errors: Vec::new(),
        }
    }

    /// 加入錯誤；`None` 時不做任何事，方便串接 [`requires_option`]
    #[must_use]
    pub fn error(mut self, error: impl Into<Option<VerificationError>>) -> Self {
        if let Some(error) = error.into() {
            self.errors.push(error);
        }
        self
    }

    #[must_use]
    pub fn errors(mut self, errors: impl IntoIterator<Item = VerificationError>) -> Self {
        self.errors.extend(errors);
        self
    }

    /// 收斂一次檢查的結果：已轉譯的錯誤直接加入，非預期的失敗轉為 EXCEPTION 項目
    #[must_use]
    pub fn outcome(
        self,
        outcome: std::result::Result<Option<VerificationError>, VerifierError>,
    ) -> Self {
        match outcome {
            Ok(error) => self.error(error),
            Err(e) => self.error(ResultErrorBuilder::with_exception(&e).build()),
        }
    }

    pub fn build(self) -> VerificationResult {
        let status = if self.errors.is_empty() {
            self.status
        } else {
            Status::Error
        };

        VerificationResult {
            scope: self.scope,
            status,
            errors: self.errors,
            verified_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResultErrorBuilder {
    code: ErrorCode,
    description: Option<String>,
    parameters: BTreeSet<String>,
    details: BTreeMap<String, Value>,
}

impl ResultErrorBuilder {
    pub fn with_code(code: ErrorCode) -> Self {
        Self {
            code,
            description: None,
            parameters: BTreeSet::new(),
            details: BTreeMap::new(),
        }
    }

    pub fn with_code_and_description(code: ErrorCode, description: impl Into<String>) -> Self {
        Self::with_code(code).description(description)
    }

    /// 4xx 視為認證失敗，其餘（含沒有狀態碼）為一般錯誤
    pub fn with_http_code_and_text(status: Option<u16>, text: impl Into<String>) -> Self {
        let code = match status {
            Some(400..=499) => ErrorCode::Authentication,
            _ => ErrorCode::Generic,
        };
        let text = text.into();
        let builder = Self::with_code_and_description(code, text.clone())
            .detail(attribute::HTTP_TEXT, text);
        match status {
            Some(status) => builder.detail(attribute::HTTP_CODE, status),
            None => builder,
        }
    }

    pub fn with_missing_option(name: &str) -> Self {
        Self::with_code_and_description(ErrorCode::MissingParameter, format!("{} should be set", name))
            .parameter(name)
    }

    pub fn with_unknown_option(name: &str) -> Self {
        Self::with_code_and_description(ErrorCode::UnknownParameter, format!("Unknown option {}", name))
            .parameter(name)
    }

    pub fn with_illegal_option(name: &str, value: &str, reason: &str) -> Self {
        Self::with_code_and_description(
            ErrorCode::IllegalParameterValue,
            format!("Illegal value '{}' for option {}: {}", value, name, reason),
        )
        .parameter(name)
    }

    pub fn with_exception(error: &VerifierError) -> Self {
        Self::with_code_and_description(ErrorCode::Exception, error.to_string())
            .detail(attribute::EXCEPTION_KIND, error.kind())
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn parameter(mut self, name: impl Into<String>) -> Self {
        self.parameters.insert(name.into());
        self
    }

    #[must_use]
    pub fn detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    pub fn build(self) -> VerificationError {
        VerificationError {
            code: self.code,
            description: self.description,
            parameters: self.parameters,
            details: self.details,
        }
    }
}

/// 必填參數缺少（或為空白）時回傳 MISSING_PARAMETER 錯誤
pub fn requires_option(name: &str, parameters: &Parameters) -> Option<VerificationError> {
    if parameters.is_present(name) {
        None
    } else {
        Some(ResultErrorBuilder::with_missing_option(name).build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_without_errors_keeps_status() {
        let params = Parameters::new().with("consumerKey", "ck");
        let result = ResultBuilder::with_status_and_scope(Status::Ok, Scope::Connectivity)
            .error(requires_option("consumerKey", &params))
            .build();

        assert_eq!(result.status, Status::Ok);
        assert_eq!(result.scope, Scope::Connectivity);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_any_error_downgrades_status() {
        let result = ResultBuilder::with_status_and_scope(Status::Ok, Scope::Parameters)
            .error(ResultErrorBuilder::with_code(ErrorCode::Generic).build())
            .build();

        assert_eq!(result.status, Status::Error);
        assert_eq!(result.errors.len(), 1);
    }

    #[test]
    fn test_requires_option() {
        let params = Parameters::new().with("consumerKey", "ck").with("consumerSecret", "  ");

        assert!(requires_option("consumerKey", &params).is_none());

        let missing = requires_option("consumerSecret", &params).unwrap();
        assert_eq!(missing.code, ErrorCode::MissingParameter);
        assert_eq!(missing.description.as_deref(), Some("consumerSecret should be set"));
        assert!(missing.parameters.contains("consumerSecret"));

        assert!(requires_option("accessToken", &params).is_some());
    }

    #[test]
    fn test_http_code_mapping() {
        let unauthorized = ResultErrorBuilder::with_http_code_and_text(Some(401), "nope").build();
        assert_eq!(unauthorized.code, ErrorCode::Authentication);
        assert_eq!(unauthorized.detail(attribute::HTTP_CODE), Some(&Value::from(401)));
        assert_eq!(unauthorized.detail(attribute::HTTP_TEXT), Some(&Value::from("nope")));

        let server = ResultErrorBuilder::with_http_code_and_text(Some(503), "down").build();
        assert_eq!(server.code, ErrorCode::Generic);

        let network = ResultErrorBuilder::with_http_code_and_text(None, "unreachable").build();
        assert_eq!(network.code, ErrorCode::Generic);
        assert!(network.detail(attribute::HTTP_CODE).is_none());
        assert_eq!(network.detail(attribute::HTTP_TEXT), Some(&Value::from("unreachable")));
    }

    #[test]
    fn test_outcome_turns_failures_into_exception_entries() {
        let failure = VerifierError::InvalidConfigValueError {
            field: "httpProxyPort".to_string(),
            value: "x".to_string(),
            reason: "Value must be an integer".to_string(),
        };
        let result = ResultBuilder::with_status_and_scope(Status::Ok, Scope::Connectivity)
            .outcome(Err(failure))
            .build();

        assert_eq!(result.status, Status::Error);
        assert_eq!(result.errors[0].code, ErrorCode::Exception);
        assert_eq!(
            result.errors[0].detail(attribute::EXCEPTION_KIND),
            Some(&Value::from("InvalidConfigValueError"))
        );
        assert!(result.errors[0].parameters.is_empty());
    }
}
