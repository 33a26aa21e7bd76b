pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, ScopeSelection};

pub use adapters::http::{HttpClientFactory, HttpTwitterClient};
pub use config::toml_config::VerifierConfig;
pub use core::verifier::TwitterComponentVerifier;
pub use domain::model::{Parameters, Scope, Status, VerificationError, VerificationResult};
pub use utils::error::{Result, VerifierError};
