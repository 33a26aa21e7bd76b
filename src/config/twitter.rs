use crate::domain::model::Parameters;
use crate::utils::error::{Result, VerifierError};
use crate::utils::validation::parse_port;

pub const CONSUMER_KEY: &str = "consumerKey";
pub const CONSUMER_SECRET: &str = "consumerSecret";
pub const ACCESS_TOKEN: &str = "accessToken";
pub const ACCESS_TOKEN_SECRET: &str = "accessTokenSecret";
pub const HTTP_PROXY_HOST: &str = "httpProxyHost";
pub const HTTP_PROXY_PORT: &str = "httpProxyPort";
pub const HTTP_PROXY_USER: &str = "httpProxyUser";
pub const HTTP_PROXY_PASSWORD: &str = "httpProxyPassword";

const DEFAULT_PROXY_PORT: u16 = 80;

#[derive(Clone, Default, PartialEq, Eq)]
pub struct TwitterConfiguration {
    pub consumer_key: Option<String>,
    pub consumer_secret: Option<String>,
    pub access_token: Option<String>,
    pub access_token_secret: Option<String>,
    pub proxy: Option<ProxySettings>,
}

#[derive(Clone, PartialEq, Eq)]
pub struct ProxySettings {
    pub host: String,
    pub port: u16,
    pub user: Option<String>,
    pub password: Option<String>,
}

impl ProxySettings {
    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

/// OAuth 1.0a 需要的四個值
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub access_token: String,
    pub access_token_secret: String,
}

/// 代理主機只接受主機名稱；允許帶 http:// 或 https:// 前綴，其他協定拒絕
fn proxy_host(value: &str) -> Result<String> {
    let trimmed = value.trim();
    let without_scheme = match trimmed.split_once("://") {
        Some((scheme, rest))
            if scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https") =>
        {
            rest
        }
        Some((scheme, _)) => {
            return Err(VerifierError::InvalidConfigValueError {
                field: HTTP_PROXY_HOST.to_string(),
                value: value.to_string(),
                reason: format!("Unsupported proxy scheme: {}", scheme),
            })
        }
        None => trimmed,
    };

    let host = without_scheme.trim_end_matches('/');
    if host.is_empty() || host.contains('/') {
        return Err(VerifierError::InvalidConfigValueError {
            field: HTTP_PROXY_HOST.to_string(),
            value: value.to_string(),
            reason: "Value must be a host name".to_string(),
        });
    }
    Ok(host.to_string())
}

impl TwitterConfiguration {
    /// 從參數綁定設定；未知的參數會被忽略，由目錄檢查負責回報
    pub fn from_parameters(parameters: &Parameters) -> Result<Self> {
        let owned = |name: &str| parameters.value(name).map(str::to_string);

        let proxy = match parameters.value(HTTP_PROXY_HOST) {
            Some(host) => {
                let port = match parameters.value(HTTP_PROXY_PORT) {
                    Some(port) => parse_port(HTTP_PROXY_PORT, port)?,
                    None => DEFAULT_PROXY_PORT,
                };
                Some(ProxySettings {
                    host: proxy_host(host)?,
                    port,
                    user: owned(HTTP_PROXY_USER),
                    password: owned(HTTP_PROXY_PASSWORD),
                })
            }
            None => {
                if let Some(port) = parameters.value(HTTP_PROXY_PORT) {
                    parse_port(HTTP_PROXY_PORT, port)?;
                }
                None
            }
        };

        Ok(Self {
            consumer_key: owned(CONSUMER_KEY),
            consumer_secret: owned(CONSUMER_SECRET),
            access_token: owned(ACCESS_TOKEN),
            access_token_secret: owned(ACCESS_TOKEN_SECRET),
            proxy,
        })
    }

    pub fn credentials(&self) -> Result<Credentials> {
        fn required(field: &str, value: &Option<String>) -> Result<String> {
            value.clone().ok_or_else(|| VerifierError::MissingConfigError {
                field: field.to_string(),
            })
        }

        Ok(Credentials {
            consumer_key: required(CONSUMER_KEY, &self.consumer_key)?,
            consumer_secret: required(CONSUMER_SECRET, &self.consumer_secret)?,
            access_token: required(ACCESS_TOKEN, &self.access_token)?,
            access_token_secret: required(ACCESS_TOKEN_SECRET, &self.access_token_secret)?,
        })
    }
}

// 秘密值不進日誌
impl std::fmt::Debug for TwitterConfiguration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwitterConfiguration")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &self.consumer_secret.as_ref().map(|_| "***"))
            .field("access_token", &self.access_token)
            .field(
                "access_token_secret",
                &self.access_token_secret.as_ref().map(|_| "***"),
            )
            .field("proxy", &self.proxy)
            .finish()
    }
}

impl std::fmt::Debug for ProxySettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProxySettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("consumer_key", &self.consumer_key)
            .field("access_token", &self.access_token)
            .finish_non_exhaustive()
    }
}
