pub mod catalog;
pub mod result_builder;
pub mod verifier;

pub use crate::domain::model::{Parameters, Scope, Status, VerificationError, VerificationResult};
pub use crate::domain::ports::{ClientFactory, ComponentVerifier, TwitterClient};
pub use crate::utils::error::Result;
