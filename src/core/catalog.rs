use crate::config::twitter::{
    ACCESS_TOKEN, ACCESS_TOKEN_SECRET, CONSUMER_KEY, CONSUMER_SECRET, HTTP_PROXY_HOST,
    HTTP_PROXY_PASSWORD, HTTP_PROXY_PORT, HTTP_PROXY_USER,
};
use crate::core::result_builder::ResultErrorBuilder;
use crate::domain::model::{Parameters, VerificationError};
use crate::utils::error::VerifierError;
use crate::utils::validation::parse_port;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    String,
    Integer,
    /// TCP 連接埠，1..=65535
    Port,
    Boolean,
    Enum(&'static [&'static str]),
}

#[derive(Debug, Clone, Copy)]
pub struct OptionDefinition {
    pub name: &'static str,
    pub kind: OptionKind,
    pub secret: bool,
}

const fn string(name: &'static str, secret: bool) -> OptionDefinition {
    OptionDefinition {
        name,
        kind: OptionKind::String,
        secret,
    }
}

const fn typed(name: &'static str, kind: OptionKind) -> OptionDefinition {
    OptionDefinition {
        name,
        kind,
        secret: false,
    }
}

const TWITTER_OPTIONS: &[OptionDefinition] = &[
    string(ACCESS_TOKEN, true),
    string(ACCESS_TOKEN_SECRET, true),
    string(CONSUMER_KEY, true),
    string(CONSUMER_SECRET, true),
    string(HTTP_PROXY_HOST, false),
    typed(HTTP_PROXY_PORT, OptionKind::Port),
    string(HTTP_PROXY_USER, false),
    string(HTTP_PROXY_PASSWORD, true),
    typed("count", OptionKind::Integer),
    typed("numberOfPages", OptionKind::Integer),
    typed("sinceId", OptionKind::Integer),
    typed("sortById", OptionKind::Boolean),
    typed("filterOld", OptionKind::Boolean),
    typed("type", OptionKind::Enum(&["polling", "direct"])),
    string("lang", false),
    string("user", false),
    string("keywords", false),
];

/// 元件已知選項的目錄，用來找出未知參數與型別錯誤的值
#[derive(Debug, Clone, Copy)]
pub struct ParameterCatalog {
    options: &'static [OptionDefinition],
}

impl ParameterCatalog {
    pub fn twitter() -> Self {
        Self {
            options: TWITTER_OPTIONS,
        }
    }

    pub fn option(&self, name: &str) -> Option<&OptionDefinition> {
        self.options.iter().find(|o| o.name == name)
    }

    pub fn is_secret(&self, name: &str) -> bool {
        self.option(name).map(|o| o.secret).unwrap_or(false)
    }

    /// 逐一檢查參數；空白值交給必填檢查處理
    pub fn validate(&self, parameters: &Parameters) -> Vec<VerificationError> {
        parameters
            .iter()
            .filter_map(|(name, value)| match self.option(name) {
                None => Some(ResultErrorBuilder::with_unknown_option(name).build()),
                Some(_) if value.trim().is_empty() => None,
                Some(option) => check_kind(option, value).map(|reason| {
                    let shown = if option.secret { "***" } else { value };
                    ResultErrorBuilder::with_illegal_option(name, shown, &reason).build()
                }),
            })
            .collect()
    }
}

fn check_kind(option: &OptionDefinition, value: &str) -> Option<String> {
    let value = value.trim();
    match option.kind {
        OptionKind::String => None,
        OptionKind::Integer => value
            .parse::<i64>()
            .err()
            .map(|_| "Value must be an integer".to_string()),
        OptionKind::Port => match parse_port(option.name, value) {
            Ok(_) => None,
            Err(VerifierError::InvalidConfigValueError { reason, .. }) => Some(reason),
            Err(e) => Some(e.to_string()),
        },
        OptionKind::Boolean => match value {
            "true" | "false" => None,
            _ => Some("Value must be true or false".to_string()),
        },
        OptionKind::Enum(allowed) => {
            if allowed.contains(&value) {
                None
            } else {
                Some(format!("Value must be one of: {}", allowed.join(", ")))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::ErrorCode;

    #[test]
    fn test_known_parameters_pass() {
        let params = Parameters::new()
            .with(CONSUMER_KEY, "ck")
            .with(HTTP_PROXY_PORT, "8080")
            .with("sortById", "true")
            .with("type", "polling");

        assert!(ParameterCatalog::twitter().validate(&params).is_empty());
    }

    #[test]
    fn test_unknown_parameter() {
        let params = Parameters::new().with("consumerKey", "ck").with("consumerKye", "typo");
        let errors = ParameterCatalog::twitter().validate(&params);

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, ErrorCode::UnknownParameter);
        assert!(errors[0].parameters.contains("consumerKye"));
    }

    #[test]
    fn test_illegal_values() {
        let params = Parameters::new()
            .with(HTTP_PROXY_PORT, "eighty")
            .with("sortById", "yes")
            .with("type", "streaming");
        let errors = ParameterCatalog::twitter().validate(&params);

        assert_eq!(errors.len(), 3);
        assert!(errors
            .iter()
            .all(|e| e.code == ErrorCode::IllegalParameterValue));
    }

    #[test]
    fn test_proxy_port_out_of_range() {
        let catalog = ParameterCatalog::twitter();

        for port in ["0", "70000", "-1"] {
            let params = Parameters::new().with(HTTP_PROXY_PORT, port);
            let errors = catalog.validate(&params);

            assert_eq!(errors.len(), 1, "port {}", port);
            assert_eq!(errors[0].code, ErrorCode::IllegalParameterValue);
            assert!(errors[0].parameters.contains(HTTP_PROXY_PORT));
        }

        let errors = catalog.validate(&Parameters::new().with(HTTP_PROXY_PORT, "70000"));
        assert_eq!(
            errors[0].description.as_deref(),
            Some("Illegal value '70000' for option httpProxyPort: Value must be between 1 and 65535")
        );

        assert!(catalog
            .validate(&Parameters::new().with(HTTP_PROXY_PORT, "65535"))
            .is_empty());
    }

    #[test]
    fn test_blank_values_are_left_to_required_check() {
        let params = Parameters::new().with(HTTP_PROXY_PORT, "");
        assert!(ParameterCatalog::twitter().validate(&params).is_empty());
    }

    #[test]
    fn test_secret_flag() {
        let catalog = ParameterCatalog::twitter();
        assert!(catalog.is_secret(ACCESS_TOKEN_SECRET));
        assert!(!catalog.is_secret(HTTP_PROXY_HOST));
        assert!(!catalog.is_secret("unknown"));
    }
}
