pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::{CliConfig, Command};

pub use adapters::{HickoryTxtResolver, OsEntropy, StaticTxtResolver};
pub use config::{toml_config::TomlConfig, Settings};
pub use crate::core::engine::DomainVerifier;
pub use domain::model::{
    MatchPolicy, TxtRecord, VerificationRequest, VerificationResult, DEFAULT_FORMAT,
};
pub use utils::error::{ResolutionFailure, Result, VerifyError};

/// Generates a code with OS entropy. `format` defaults to [`DEFAULT_FORMAT`].
pub async fn generate_verification_code(
    domain: &str,
    business_name: &str,
    format: Option<&str>,
) -> Result<VerificationResult> {
    let request = VerificationRequest::new(domain)
        .with_business_name(business_name)
        .with_format(format.unwrap_or(DEFAULT_FORMAT));
    crate::core::generator::TokenGenerator::new(OsEntropy).generate(&request)
}

/// One TXT query through the system resolver, segment-level matching.
/// An unusable resolver setup is reported as a `ResolutionError`.
pub async fn verify_domain(domain: &str, verification_string: &str) -> Result<bool> {
    let verifier = DomainVerifier::from_system_conf().map_err(|e| e.for_query(domain))?;
    verifier.verify(domain, verification_string).await
}
