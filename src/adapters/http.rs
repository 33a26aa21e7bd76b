use crate::adapters::oauth::OAuthSigner;
use crate::config::toml_config::ApiConfig;
use crate::config::twitter::TwitterConfiguration;
use crate::domain::model::{TwitterApiError, TwitterUser};
use crate::domain::ports::{ClientFactory, TwitterClient};
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, USER_AGENT};
use reqwest::{Client, Proxy};
use serde::Deserialize;
use std::time::Duration;
use url::Url;

const VERIFY_CREDENTIALS_PATH: &str = "account/verify_credentials.json";

/// Twitter v1.1 錯誤回應：`{"errors":[{"code":89,"message":"..."}]}`
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    errors: Vec<ErrorEntry>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEntry {
    code: Option<i32>,
    message: Option<String>,
}

fn parse_error_body(body: &str) -> (Option<i32>, Option<String>) {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => match parsed.errors.into_iter().next() {
            Some(entry) => (entry.code, entry.message),
            None => (None, parsed.error),
        },
        Err(_) => (None, None),
    }
}

pub struct HttpTwitterClient {
    client: Client,
    signer: OAuthSigner,
    verify_url: Url,
    user_agent: String,
}

impl HttpTwitterClient {
    pub fn new(configuration: &TwitterConfiguration, api: &ApiConfig) -> Result<Self> {
        let signer = OAuthSigner::new(configuration.credentials()?);

        let mut builder = Client::builder().timeout(Duration::from_secs(api.timeout_seconds));
        if let Some(proxy) = &configuration.proxy {
            tracing::debug!("Routing Twitter API requests through proxy {}", proxy.url());
            let mut http_proxy = Proxy::all(proxy.url())?;
            if let Some(user) = &proxy.user {
                http_proxy = http_proxy.basic_auth(user, proxy.password.as_deref().unwrap_or(""));
            }
            builder = builder.proxy(http_proxy);
        }

        Ok(Self {
            client: builder.build()?,
            signer,
            verify_url: verify_credentials_url(&api.base_url)?,
            user_agent: api.user_agent().to_string(),
        })
    }
}

fn verify_credentials_url(base_url: &str) -> Result<Url> {
    let mut base = Url::parse(base_url)?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    let mut url = base.join(VERIFY_CREDENTIALS_PATH)?;
    url.query_pairs_mut().append_pair("skip_status", "true");
    Ok(url)
}

#[async_trait]
impl TwitterClient for HttpTwitterClient {
    async fn verify_credentials(&self) -> std::result::Result<TwitterUser, TwitterApiError> {
        let authorization = self
            .signer
            .authorization_header("GET", &self.verify_url, &[])
            .map_err(|e| TwitterApiError::transport(e.to_string()))?;

        tracing::debug!("Making API request to: {}", self.verify_url);
        let response = self
            .client
            .get(self.verify_url.clone())
            .header(AUTHORIZATION, authorization)
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await
            .map_err(|e| TwitterApiError::transport(e.to_string()))?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        let body = response
            .text()
            .await
            .map_err(|e| TwitterApiError::transport(e.to_string()))?;

        if status.is_success() {
            return serde_json::from_str::<TwitterUser>(&body).map_err(|e| {
                TwitterApiError::from_status(
                    status.as_u16(),
                    status.canonical_reason(),
                    None,
                    Some(format!("Unexpected response body: {}", e)),
                )
            });
        }

        let (error_code, error_message) = parse_error_body(&body);
        Err(TwitterApiError::from_status(
            status.as_u16(),
            status.canonical_reason(),
            error_code,
            error_message,
        ))
    }
}

#[derive(Debug, Clone, Default)]
pub struct HttpClientFactory {
    api: ApiConfig,
}

impl HttpClientFactory {
    pub fn new(api: ApiConfig) -> Self {
        Self { api }
    }
}

impl ClientFactory for HttpClientFactory {
    fn create(&self, configuration: &TwitterConfiguration) -> Result<Box<dyn TwitterClient>> {
        Ok(Box::new(HttpTwitterClient::new(configuration, &self.api)?))
    }
}
