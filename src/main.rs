use clap::Parser;
use twitter_verifier::core::catalog::ParameterCatalog;
use twitter_verifier::domain::ports::ComponentVerifier;
use twitter_verifier::utils::{logger, validation::Validate};
use twitter_verifier::{CliConfig, Scope, TwitterComponentVerifier, VerificationResult};

const EXIT_VERIFICATION_FAILED: i32 = 1;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    };

    // 初始化日誌
    if config.logging.is_json() {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting twitter-verifier");
    tracing::debug!("API settings: {:?}", config.api);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    let verifier = TwitterComponentVerifier::with_api(config.api.clone());
    let mut results = Vec::new();

    for scope in cli.scope.scopes() {
        let result = verifier.verify(scope, &config.parameters).await;
        let failed = !result.is_ok();
        results.push(result);

        if failed && scope == Scope::Parameters {
            tracing::warn!("Skipping remaining checks, parameters are invalid");
            break;
        }
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        for result in &results {
            print_summary(result);
        }
    }

    if results.iter().all(VerificationResult::is_ok) {
        Ok(())
    } else {
        std::process::exit(EXIT_VERIFICATION_FAILED);
    }
}

fn print_summary(result: &VerificationResult) {
    if result.is_ok() {
        println!("✅ {}: OK", result.scope);
        return;
    }

    println!("❌ {}: ERROR", result.scope);
    let catalog = ParameterCatalog::twitter();
    for error in &result.errors {
        let description = error.description.as_deref().unwrap_or("no description");
        println!("   - [{:?}] {}", error.code, description);
        for parameter in &error.parameters {
            let note = if catalog.is_secret(parameter) {
                " (secret)"
            } else {
                ""
            };
            println!("     parameter: {}{}", parameter, note);
        }
        for (key, value) in &error.details {
            println!("     {}: {}", key, value);
        }
    }
}
