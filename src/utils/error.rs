use thiserror::Error;

#[derive(Error, Debug)]
pub enum VerifierError {
    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Request signing failed: {message}")]
    SigningError { message: String },
}

impl VerifierError {
    /// 穩定的錯誤種類名稱，寫入 `exception.kind` 屬性
    pub fn kind(&self) -> &'static str {
        match self {
            VerifierError::HttpError(_) => "HttpError",
            VerifierError::IoError(_) => "IoError",
            VerifierError::TomlError(_) => "TomlError",
            VerifierError::UrlError(_) => "UrlError",
            VerifierError::MissingConfigError { .. } => "MissingConfigError",
            VerifierError::InvalidConfigValueError { .. } => "InvalidConfigValueError",
            VerifierError::SigningError { .. } => "SigningError",
        }
    }

    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            VerifierError::IoError(_)
                | VerifierError::TomlError(_)
                | VerifierError::UrlError(_)
                | VerifierError::MissingConfigError { .. }
                | VerifierError::InvalidConfigValueError { .. }
        )
    }

    /// CLI 結束碼：設定錯誤為 2，其餘為 1
    pub fn exit_code(&self) -> i32 {
        if self.is_config_error() {
            2
        } else {
            1
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            VerifierError::HttpError(e) if e.is_timeout() => {
                "The Twitter API did not answer in time".to_string()
            }
            VerifierError::HttpError(_) => "Could not reach the Twitter API".to_string(),
            VerifierError::IoError(e) => format!("Could not read a file: {}", e),
            VerifierError::MissingConfigError { field } => {
                format!("Missing configuration value '{}'", field)
            }
            VerifierError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid configuration value '{}': {}", field, reason)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            VerifierError::HttpError(_) => {
                "Check network access and proxy settings, then try again"
            }
            VerifierError::IoError(_) => "Check that the file exists and is readable",
            VerifierError::TomlError(_) => "Check the configuration file syntax",
            VerifierError::UrlError(_) => "Use an absolute http:// or https:// URL",
            VerifierError::MissingConfigError { .. }
            | VerifierError::InvalidConfigValueError { .. } => {
                "Fix the reported configuration value and run again"
            }
            VerifierError::SigningError { .. } => {
                "Check the consumer and access token secrets"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, VerifierError>;
