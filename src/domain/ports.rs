use crate::config::twitter::TwitterConfiguration;
use crate::domain::model::{Parameters, Scope, TwitterApiError, TwitterUser, VerificationResult};
use crate::utils::error::Result;
use async_trait::async_trait;

/// 可驗證憑證的 Twitter API 用戶端
#[async_trait]
pub trait TwitterClient: Send + Sync {
    async fn verify_credentials(&self) -> std::result::Result<TwitterUser, TwitterApiError>;
}

/// 由綁定好的設定建立用戶端
pub trait ClientFactory: Send + Sync {
    fn create(&self, configuration: &TwitterConfiguration) -> Result<Box<dyn TwitterClient>>;
}

#[async_trait]
pub trait ComponentVerifier: Send + Sync {
    async fn verify(&self, scope: Scope, parameters: &Parameters) -> VerificationResult;
}
