use crate::adapters::http::HttpClientFactory;
use crate::config::toml_config::ApiConfig;
use crate::config::twitter::{
    TwitterConfiguration, ACCESS_TOKEN, ACCESS_TOKEN_SECRET, CONSUMER_KEY, CONSUMER_SECRET,
};
use crate::core::catalog::ParameterCatalog;
use crate::core::result_builder::{requires_option, ResultBuilder, ResultErrorBuilder};
use crate::domain::model::{
    attribute, Parameters, Scope, Status, TwitterApiError, VerificationError, VerificationResult,
};
use crate::domain::ports::{ClientFactory, ComponentVerifier};
use crate::utils::error::Result;
use async_trait::async_trait;

pub struct TwitterComponentVerifier<F: ClientFactory = HttpClientFactory> {
    factory: F,
    catalog: ParameterCatalog,
}

impl TwitterComponentVerifier<HttpClientFactory> {
    pub fn with_api(api: ApiConfig) -> Self {
        Self::new(HttpClientFactory::new(api))
    }
}

impl<F: ClientFactory> TwitterComponentVerifier<F> {
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            catalog: ParameterCatalog::twitter(),
        }
    }

    /// 參數檢查：必填項目與目錄比對，不會呼叫遠端服務
    pub fn verify_parameters(&self, parameters: &Parameters) -> VerificationResult {
        let builder = ResultBuilder::with_status_and_scope(Status::Ok, Scope::Parameters)
            .error(requires_option(ACCESS_TOKEN, parameters))
            .error(requires_option(ACCESS_TOKEN_SECRET, parameters))
            .error(requires_option(CONSUMER_KEY, parameters))
            .error(requires_option(CONSUMER_SECRET, parameters))
            .errors(self.catalog.validate(parameters));

        let result = builder.build();
        tracing::debug!(
            "Parameter verification finished with {:?} ({} errors)",
            result.status,
            result.errors.len()
        );
        result
    }

    /// 連線檢查：呼叫 verify credentials，任何失敗都轉成結果項目
    pub async fn verify_connectivity(&self, parameters: &Parameters) -> VerificationResult {
        let outcome = self.verify_credentials(parameters).await;

        ResultBuilder::with_status_and_scope(Status::Ok, Scope::Connectivity)
            .outcome(outcome)
            .build()
    }

    async fn verify_credentials(&self, parameters: &Parameters) -> Result<Option<VerificationError>> {
        let configuration = TwitterConfiguration::from_parameters(parameters)?;
        let client = self.factory.create(&configuration)?;

        match client.verify_credentials().await {
            Ok(user) => {
                tracing::info!("✅ Credentials verified for @{}", user.screen_name);
                Ok(None)
            }
            Err(e) => {
                tracing::warn!(
                    "❌ Twitter rejected credentials (status: {:?}, code: {:?})",
                    e.status_code,
                    e.error_code
                );
                Ok(Some(translate_api_error(&e)))
            }
        }
    }
}

/// 將遠端拒絕轉成結果項目；錯誤碼 89 另外標記在 accessToken 上
pub fn translate_api_error(e: &TwitterApiError) -> VerificationError {
    let description = e.error_message.clone().unwrap_or_else(|| e.message.clone());

    let mut builder = ResultErrorBuilder::with_http_code_and_text(e.status_code, description)
        .detail(attribute::TWITTER_EXCEPTION_CODE, e.exception_code.clone())
        .detail(attribute::TWITTER_EXCEPTION_MESSAGE, e.message.clone());

    if let Some(error_code) = e.error_code {
        builder = builder.detail(attribute::TWITTER_ERROR_CODE, error_code);
    }
    if let Some(status_code) = e.status_code {
        builder = builder.detail(attribute::TWITTER_STATUS_CODE, status_code);
    }
    if e.is_invalid_or_expired_token() {
        builder = builder.parameter(ACCESS_TOKEN);
    }

    builder.build()
}

#[async_trait]
impl<F: ClientFactory> ComponentVerifier for TwitterComponentVerifier<F> {
    async fn verify(&self, scope: Scope, parameters: &Parameters) -> VerificationResult {
        tracing::debug!("Verifying twitter component, scope {}", scope);
        match scope {
            Scope::Parameters => self.verify_parameters(parameters),
            Scope::Connectivity => self.verify_connectivity(parameters).await,
        }
    }
}
