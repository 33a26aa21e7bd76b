use crate::config::toml_config::VerifierConfig;
use crate::domain::model::{Parameters, Scope};
use crate::utils::error::{Result, VerifierError};
use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScopeSelection {
    Parameters,
    Connectivity,
    All,
}

impl ScopeSelection {
    pub fn scopes(self) -> Vec<Scope> {
        match self {
            ScopeSelection::Parameters => vec![Scope::Parameters],
            ScopeSelection::Connectivity => vec![Scope::Connectivity],
            ScopeSelection::All => vec![Scope::Parameters, Scope::Connectivity],
        }
    }
}

#[derive(Debug, Clone, Parser)]
#[command(name = "twitter-verifier")]
#[command(about = "Verify Twitter component parameters and credentials")]
pub struct CliConfig {
    #[arg(long, help = "TOML configuration file")]
    pub config: Option<String>,

    #[arg(long, value_enum, default_value = "all")]
    pub scope: ScopeSelection,

    #[arg(long = "param", value_name = "KEY=VALUE", help = "Component parameter, may be repeated")]
    pub params: Vec<String>,

    #[arg(long, help = "Override the API base URL")]
    pub base_url: Option<String>,

    #[arg(long, help = "Override the request timeout")]
    pub timeout_seconds: Option<u64>,

    #[arg(long, help = "Print results as JSON")]
    pub json: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// 合併設定檔與命令列參數，命令列優先
    pub fn resolve(&self) -> Result<VerifierConfig> {
        let mut config = match &self.config {
            Some(path) => VerifierConfig::from_file(path)?,
            None => VerifierConfig::default(),
        };

        if let Some(base_url) = &self.base_url {
            config.api.base_url = base_url.clone();
        }
        if let Some(timeout) = self.timeout_seconds {
            config.api.timeout_seconds = timeout;
        }
        config.parameters.extend(parse_params(&self.params)?);

        Ok(config)
    }
}

fn parse_params(raw: &[String]) -> Result<Parameters> {
    raw.iter()
        .map(|entry| match entry.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => {
                Ok((key.trim().to_string(), value.to_string()))
            }
            _ => Err(VerifierError::InvalidConfigValueError {
                field: "--param".to_string(),
                value: entry.clone(),
                reason: "Expected KEY=VALUE".to_string(),
            }),
        })
        .collect::<Result<Vec<_>>>()
        .map(Parameters::from_iter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_params_override_file() {
        let mut temp_file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(
            &mut temp_file,
            b"[parameters]\nconsumerKey = \"file-key\"\nconsumerSecret = \"file-secret\"\n",
        )
        .unwrap();

        let cli = CliConfig::parse_from([
            "twitter-verifier",
            "--config",
            temp_file.path().to_str().unwrap(),
            "--param",
            "consumerKey=cli-key",
            "--param",
            "accessToken=a=b",
            "--timeout-seconds",
            "5",
        ]);
        let config = cli.resolve().unwrap();

        assert_eq!(config.parameters.get("consumerKey"), Some("cli-key"));
        assert_eq!(config.parameters.get("consumerSecret"), Some("file-secret"));
        assert_eq!(config.parameters.get("accessToken"), Some("a=b"));
        assert_eq!(config.api.timeout_seconds, 5);
        assert_eq!(cli.scope, ScopeSelection::All);
    }

    #[test]
    fn test_malformed_param_rejected() {
        let cli = CliConfig::parse_from(["twitter-verifier", "--param", "novalue"]);
        assert!(cli.resolve().is_err());
    }

    #[test]
    fn test_scope_selection() {
        let cli = CliConfig::parse_from(["twitter-verifier", "--scope", "connectivity"]);
        assert_eq!(cli.scope.scopes(), vec![Scope::Connectivity]);
        assert_eq!(
            ScopeSelection::All.scopes(),
            vec![Scope::Parameters, Scope::Connectivity]
        );
    }
}
