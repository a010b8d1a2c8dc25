#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::adapters::HickoryTxtResolver;
use crate::core::template;
use crate::domain::model::{
    MatchPolicy, VerificationRequest, CODE_PLACEHOLDER, DEFAULT_FORMAT,
};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// 合併設定檔與命令列參數之後的最終設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub business_name: String,
    pub format: String,
    pub match_policy: MatchPolicy,
    pub nameservers: Vec<String>,
    pub timeout_secs: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            business_name: String::new(),
            format: DEFAULT_FORMAT.to_string(),
            match_policy: MatchPolicy::default(),
            nameservers: Vec::new(),
            timeout_secs: None,
        }
    }
}

impl Settings {
    pub fn from_provider<C: ConfigProvider>(provider: &C) -> Self {
        Self {
            business_name: provider.business_name().to_string(),
            format: provider.format().to_string(),
            match_policy: provider.match_policy(),
            nameservers: provider.nameservers().to_vec(),
            timeout_secs: None,
        }
    }

    pub fn request(&self, domain: &str) -> VerificationRequest {
        VerificationRequest::new(domain)
            .with_business_name(self.business_name.clone())
            .with_format(self.format.clone())
    }

    /// 用已知的 code 重建預期的 TXT 內容
    pub fn expected_for(&self, code: &str) -> String {
        template::render(&self.format, &self.business_name, code)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// 沒有指定 nameserver 時使用系統設定
    pub fn build_resolver(&self) -> Result<HickoryTxtResolver> {
        if self.nameservers.is_empty() {
            return HickoryTxtResolver::from_system_conf();
        }

        let addrs = self
            .nameservers
            .iter()
            .map(|ns| validation::parse_nameserver("nameserver", ns))
            .collect::<Result<Vec<_>>>()?;
        HickoryTxtResolver::with_nameservers(&addrs)
    }
}

impl ConfigProvider for Settings {
    fn business_name(&self) -> &str {
        &self.business_name
    }

    fn format(&self) -> &str {
        &self.format
    }

    fn match_policy(&self) -> MatchPolicy {
        self.match_policy
    }

    fn nameservers(&self) -> &[String] {
        &self.nameservers
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validation::validate_alphanumeric("business_name", &self.business_name)?;
        validation::validate_non_empty_string("format", &self.format)?;
        validation::validate_placeholder("format", &self.format, CODE_PLACEHOLDER)?;

        for nameserver in &self.nameservers {
            validation::parse_nameserver("nameserver", nameserver)?;
        }

        if let Some(timeout) = self.timeout_secs {
            validation::validate_range("timeout_secs", timeout, 1, 300)?;
        }

        Ok(())
    }
}
