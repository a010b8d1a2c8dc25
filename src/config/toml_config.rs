use crate::domain::model::{MatchPolicy, DEFAULT_FORMAT};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{Result, VerifyError};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub verification: VerificationConfig,
    pub resolver: Option<ResolverConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerificationConfig {
    pub business_name: Option<String>,
    pub format: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResolverConfig {
    #[serde(default)]
    pub nameservers: Vec<String>,
    pub match_policy: Option<MatchPolicy>,
    /// 呼叫端自行加上的查詢期限，函式庫本身沒有 timeout
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    pub format: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(VerifyError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| VerifyError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${BUSINESS_NAME})，未設定的保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| VerifyError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn timeout_seconds(&self) -> Option<u64> {
        self.resolver.as_ref().and_then(|r| r.timeout_seconds)
    }

    pub fn verbose(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.verbose)
            .unwrap_or(false)
    }

    pub fn log_format(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.format.as_deref())
    }
}

impl ConfigProvider for TomlConfig {
    fn business_name(&self) -> &str {
        self.verification.business_name.as_deref().unwrap_or("")
    }

    fn format(&self) -> &str {
        self.verification.format.as_deref().unwrap_or(DEFAULT_FORMAT)
    }

    fn match_policy(&self) -> MatchPolicy {
        self.resolver
            .as_ref()
            .and_then(|r| r.match_policy)
            .unwrap_or_default()
    }

    fn nameservers(&self) -> &[String] {
        self.resolver
            .as_ref()
            .map(|r| r.nameservers.as_slice())
            .unwrap_or(&[])
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        for nameserver in self.nameservers() {
            validation::parse_nameserver("resolver.nameservers", nameserver)?;
        }

        if let Some(timeout) = self.timeout_seconds() {
            validation::validate_range("resolver.timeout_seconds", timeout, 1, 300)?;
        }

        if let Some(format) = self.log_format() {
            format
                .parse::<crate::utils::logger::LogFormat>()
                .map_err(|reason| VerifyError::InvalidConfigValueError {
                    field: "logging.format".to_string(),
                    value: format.to_string(),
                    reason,
                })?;
        }

        Ok(())
    }
}
