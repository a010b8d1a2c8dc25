use thiserror::Error;

/// DNS 查詢失敗的原因分類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionFailure {
    /// NXDOMAIN
    NotFound,
    /// 網域存在但沒有 TXT 記錄
    NoRecords,
    Timeout,
    Network,
    Other,
}

impl std::fmt::Display for ResolutionFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ResolutionFailure::NotFound => "domain not found",
            ResolutionFailure::NoRecords => "no TXT records",
            ResolutionFailure::Timeout => "timeout",
            ResolutionFailure::Network => "network failure",
            ResolutionFailure::Other => "resolver failure",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum VerifyError {
    #[error("Secure random source unavailable: {0}")]
    RngError(#[from] rand::Error),

    #[error("Failed to resolve DNS TXT records for {domain}: {reason}")]
    ResolutionError {
        domain: String,
        kind: ResolutionFailure,
        reason: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Entropy,
    Dns,
    Configuration,
    Io,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl VerifyError {
    pub fn resolution(domain: &str, kind: ResolutionFailure, reason: impl Into<String>) -> Self {
        VerifyError::ResolutionError {
            domain: domain.to_string(),
            kind,
            reason: reason.into(),
        }
    }

    /// 查詢 `domain` 途中的任何失敗都視為 ResolutionError
    pub fn for_query(self, domain: &str) -> Self {
        match self {
            VerifyError::ResolutionError { .. } => self,
            other => VerifyError::resolution(domain, ResolutionFailure::Other, other.to_string()),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            VerifyError::RngError(_) => ErrorCategory::Entropy,
            VerifyError::ResolutionError { .. } => ErrorCategory::Dns,
            VerifyError::IoError(_) | VerifyError::SerializationError(_) => ErrorCategory::Io,
            VerifyError::ConfigError { .. }
            | VerifyError::InvalidConfigValueError { .. }
            | VerifyError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 沒有安全亂數就不能發出 token
            VerifyError::RngError(_) => ErrorSeverity::Critical,
            // 可以等 DNS 生效後再試
            VerifyError::ResolutionError { .. } => ErrorSeverity::Medium,
            VerifyError::IoError(_) | VerifyError::SerializationError(_) => ErrorSeverity::Critical,
            VerifyError::ConfigError { .. }
            | VerifyError::InvalidConfigValueError { .. }
            | VerifyError::MissingConfigError { .. } => ErrorSeverity::High,
        }
    }

    /// 是否值得呼叫端稍後重試
    pub fn is_retryable(&self) -> bool {
        matches!(self, VerifyError::ResolutionError { .. })
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            VerifyError::RngError(_) => {
                "The operating system's secure random source is unavailable; do not issue tokens until it recovers".to_string()
            }
            VerifyError::ResolutionError { kind, .. } => match kind {
                ResolutionFailure::NotFound => {
                    "Check the domain name for typos; the domain does not exist in DNS".to_string()
                }
                ResolutionFailure::NoRecords => {
                    "Add the TXT record and allow time for DNS propagation, then retry".to_string()
                }
                ResolutionFailure::Timeout | ResolutionFailure::Network => {
                    "Check network connectivity or nameserver settings and retry later".to_string()
                }
                ResolutionFailure::Other => "Retry later or try a different nameserver".to_string(),
            },
            VerifyError::IoError(_) => "Check that the file exists and is readable".to_string(),
            VerifyError::SerializationError(_) => "Retry without --json output".to_string(),
            VerifyError::ConfigError { .. } => {
                "Fix the configuration file or command line arguments".to_string()
            }
            VerifyError::InvalidConfigValueError { field, .. } => {
                format!("Provide a valid value for '{}'", field)
            }
            VerifyError::MissingConfigError { field } => {
                format!("Set '{}' in the configuration file or on the command line", field)
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            VerifyError::RngError(_) => "Could not generate a secure verification code".to_string(),
            VerifyError::ResolutionError { domain, kind, .. } => {
                format!("DNS lookup for {} failed ({})", domain, kind)
            }
            VerifyError::IoError(e) => format!("File access failed: {}", e),
            VerifyError::SerializationError(e) => format!("Could not encode output: {}", e),
            VerifyError::ConfigError { message } => format!("Invalid configuration: {}", message),
            VerifyError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid {}: {}", field, reason)
            }
            VerifyError::MissingConfigError { field } => format!("Missing {}", field),
        }
    }
}

pub type Result<T> = std::result::Result<T, VerifyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_error_is_recoverable() {
        let err = VerifyError::resolution("nonexistent.invalid", ResolutionFailure::NotFound, "NXDOMAIN");
        assert_eq!(err.category(), ErrorCategory::Dns);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert!(err.is_retryable());
        assert!(err.to_string().contains("nonexistent.invalid"));
        assert!(err.user_friendly_message().contains("domain not found"));
    }

    #[test]
    fn test_config_errors_are_not_retryable() {
        let err = VerifyError::ConfigError {
            message: "format must be a string".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(!err.is_retryable());

        let err = VerifyError::MissingConfigError {
            field: "domain".to_string(),
        };
        assert!(err.recovery_suggestion().contains("domain"));
    }

    #[test]
    fn test_resolver_setup_failure_is_a_resolution_error() {
        let err = VerifyError::ConfigError {
            message: "Failed to read system resolver configuration: no nameservers".to_string(),
        }
        .for_query("example.com");

        match &err {
            VerifyError::ResolutionError { domain, kind, reason } => {
                assert_eq!(domain, "example.com");
                assert_eq!(*kind, ResolutionFailure::Other);
                assert!(reason.contains("system resolver configuration"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(err.category(), ErrorCategory::Dns);
    }

    #[test]
    fn test_for_query_keeps_resolution_kind() {
        let err = VerifyError::resolution("example.com", ResolutionFailure::Timeout, "timed out")
            .for_query("example.com");
        assert!(matches!(
            err,
            VerifyError::ResolutionError {
                kind: ResolutionFailure::Timeout,
                ..
            }
        ));
    }
}
