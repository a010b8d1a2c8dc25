use clap::Parser;
use domain_verify::app::commands::{self, NOT_VERIFIED_EXIT_CODE};
use domain_verify::utils::{logger, validation::Validate};
use domain_verify::{CliConfig, Command, DomainVerifier, OsEntropy, VerifyError};

fn fail(e: &VerifyError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(commands::exit_code(e));
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    // 設定檔只讀一次；讀取失敗時先用命令列的日誌設定，再回報錯誤
    let file = cli.load_file();
    let (verbose, log_format) = cli.logging(file.as_ref().ok().and_then(Option::as_ref));
    logger::init_cli_logger(verbose, log_format);

    tracing::info!("Starting domain-verify");
    tracing::debug!("CLI config: {:?}", cli);

    let file = match file {
        Ok(file) => file,
        Err(e) => fail(&e),
    };

    // 合併並驗證配置
    let settings = match cli.settings(file.as_ref()) {
        Ok(settings) => settings,
        Err(e) => fail(&e),
    };
    if let Err(e) = settings.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        fail(&e);
    }

    let resolver = match settings.build_resolver() {
        Ok(resolver) => resolver,
        Err(e) => fail(&e),
    };
    let engine = DomainVerifier::new(OsEntropy, resolver).with_match_policy(settings.match_policy);

    match &cli.command {
        Command::Generate { domain } => {
            if let Err(e) = domain_verify::utils::validation::validate_domain("domain", domain) {
                fail(&e);
            }

            let result = match commands::generate(&engine, &settings, domain).await {
                Ok(result) => result,
                Err(e) => fail(&e),
            };
            println!("{}", commands::render_generated(&result, cli.json)?);
        }
        Command::Verify {
            domain,
            expected,
            code,
        } => {
            if let Err(e) = domain_verify::utils::validation::validate_domain("domain", domain) {
                fail(&e);
            }

            let expected = match (expected, code) {
                (Some(expected), _) => expected.clone(),
                (None, Some(code)) => settings.expected_for(code),
                (None, None) => fail(&VerifyError::MissingConfigError {
                    field: "--expected or --code".to_string(),
                }),
            };

            let report = match commands::verify(&engine, &settings, domain, &expected).await {
                Ok(report) => report,
                Err(e) => fail(&e),
            };

            println!("{}", commands::render_report(&report, cli.json)?);
            if !report.verified {
                tracing::info!("TXT record not found on {}", domain);
                std::process::exit(NOT_VERIFIED_EXIT_CODE);
            }
            tracing::info!("✅ {} verified", domain);
        }
    }

    Ok(())
}
