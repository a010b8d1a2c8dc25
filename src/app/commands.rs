use crate::config::Settings;
use crate::core::engine::DomainVerifier;
use crate::domain::model::{MatchPolicy, VerificationResult};
use crate::domain::ports::{EntropySource, TxtResolver};
use crate::utils::error::{ErrorSeverity, ResolutionFailure, Result, VerifyError};
use serde::{Deserialize, Serialize};

pub const NOT_VERIFIED_EXIT_CODE: i32 = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyReport {
    pub domain: String,
    pub expected: String,
    pub match_policy: MatchPolicy,
    pub verified: bool,
}

pub async fn generate<E, R>(
    engine: &DomainVerifier<E, R>,
    settings: &Settings,
    domain: &str,
) -> Result<VerificationResult>
where
    E: EntropySource,
    R: TxtResolver,
{
    tracing::info!("🔑 Generating verification code for {}", domain);
    engine.generate(&settings.request(domain)).await
}

/// 期限是呼叫端加上的，逾時視為 DNS 查詢失敗
pub async fn verify<E, R>(
    engine: &DomainVerifier<E, R>,
    settings: &Settings,
    domain: &str,
    expected: &str,
) -> Result<VerifyReport>
where
    E: EntropySource,
    R: TxtResolver,
{
    tracing::info!("🔍 Checking TXT records for {}", domain);

    let verified = match settings.timeout() {
        Some(deadline) => tokio::time::timeout(deadline, engine.verify(domain, expected))
            .await
            .map_err(|_| {
                VerifyError::resolution(
                    domain,
                    ResolutionFailure::Timeout,
                    format!("no answer within {}s", deadline.as_secs()),
                )
            })??,
        None => engine.verify(domain, expected).await?,
    };

    Ok(VerifyReport {
        domain: domain.to_string(),
        expected: expected.to_string(),
        match_policy: settings.match_policy,
        verified,
    })
}

pub fn render_generated(result: &VerificationResult, json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(result)?);
    }
    Ok(format!(
        "{}\n\nCode: {}\nRecord: {}",
        result.instructions, result.code, result.formatted_string
    ))
}

pub fn render_report(report: &VerifyReport, json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(report)?);
    }
    Ok(if report.verified {
        format!("✅ Verification successful for {}.", report.domain)
    } else {
        format!(
            "❌ Verification failed: no TXT record on {} equals \"{}\".",
            report.domain, report.expected
        )
    })
}

pub fn exit_code(error: &VerifyError) -> i32 {
    match error.severity() {
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{OsEntropy, StaticTxtResolver};
    use crate::domain::model::TxtRecord;
    use async_trait::async_trait;
    use std::time::Duration;

    struct SlowResolver;

    #[async_trait]
    impl TxtResolver for SlowResolver {
        async fn lookup_txt(&self, _domain: &str) -> Result<Vec<TxtRecord>> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(vec![])
        }
    }

    #[tokio::test]
    async fn test_generate_uses_settings_template() {
        let settings = Settings {
            business_name: "acme".to_string(),
            ..Settings::default()
        };
        let engine = DomainVerifier::new(OsEntropy, StaticTxtResolver::new());
        let result = generate(&engine, &settings, "example.com").await.unwrap();

        assert_eq!(result.formatted_string, settings.expected_for(&result.code));
        let text = render_generated(&result, false).unwrap();
        assert!(text.contains(&result.instructions));
    }

    #[tokio::test]
    async fn test_verify_report() {
        let engine = DomainVerifier::new(
            OsEntropy,
            StaticTxtResolver::new().with_records(
                "example.com",
                vec![TxtRecord::from("acme-domain-verification=abc123")],
            ),
        );
        let report = verify(
            &engine,
            &Settings::default(),
            "example.com",
            "acme-domain-verification=abc123",
        )
        .await
        .unwrap();

        assert!(report.verified);
        let json = render_report(&report, true).unwrap();
        let parsed: VerifyReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, report);
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_becomes_timeout_error() {
        let settings = Settings {
            timeout_secs: Some(2),
            ..Settings::default()
        };
        let engine = DomainVerifier::new(OsEntropy, SlowResolver);
        let err = verify(&engine, &settings, "example.com", "x")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            VerifyError::ResolutionError {
                kind: ResolutionFailure::Timeout,
                ..
            }
        ));
        assert_eq!(exit_code(&err), 2);
    }

    #[test]
    fn test_every_error_exits_non_zero() {
        let errors = [
            VerifyError::RngError(rand::Error::new(std::io::Error::other("no entropy"))),
            VerifyError::resolution("example.com", ResolutionFailure::NotFound, "NXDOMAIN"),
            VerifyError::MissingConfigError {
                field: "--expected or --code".to_string(),
            },
            VerifyError::IoError(std::io::Error::other("disk")),
        ];
        let codes: Vec<i32> = errors.iter().map(exit_code).collect();

        assert_eq!(codes, vec![3, 2, 1, 3]);
        assert!(!codes.contains(&0));
        assert!(!codes.contains(&NOT_VERIFIED_EXIT_CODE));
    }
}
