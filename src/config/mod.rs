#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;
pub mod twitter;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, ScopeSelection};
