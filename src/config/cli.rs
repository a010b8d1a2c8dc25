use crate::config::toml_config::TomlConfig;
use crate::config::Settings;
use crate::domain::model::MatchPolicy;
use crate::utils::error::Result;
use crate::utils::logger::LogFormat;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "domain-verify")]
#[command(about = "Domain ownership verification via DNS TXT records")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Business name substituted for {{businessName}} (alphanumeric)
    #[arg(long)]
    pub business_name: Option<String>,

    /// Record template with {{businessName}} and {{code}} placeholders
    #[arg(long)]
    pub format: Option<String>,

    /// Nameserver to query instead of the system resolver (ip or ip:port), repeatable
    #[arg(long = "nameserver")]
    pub nameservers: Vec<String>,

    /// segment (default) or record
    #[arg(long)]
    pub match_policy: Option<MatchPolicy>,

    /// Give up on the DNS query after this many seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// compact or json
    #[arg(long)]
    pub log_format: Option<LogFormat>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Generate a verification code and print the DNS instructions
    Generate {
        domain: String,
    },
    /// Check whether the domain publishes the expected TXT record
    Verify {
        domain: String,

        /// Exact TXT value to look for
        #[arg(long, conflicts_with = "code", required_unless_present = "code")]
        expected: Option<String>,

        /// Previously issued code; the value is rebuilt from the template
        #[arg(long)]
        code: Option<String>,
    },
}

impl CliConfig {
    /// 讀取 `--config` 指定的設定檔，只讀一次
    pub fn load_file(&self) -> Result<Option<TomlConfig>> {
        match &self.config {
            Some(path) => TomlConfig::from_file(path).map(Some),
            None => Ok(None),
        }
    }

    /// 設定檔為基礎，命令列參數覆蓋
    pub fn settings(&self, file: Option<&TomlConfig>) -> Result<Settings> {
        let mut settings = match file {
            Some(config) => {
                crate::utils::validation::Validate::validate(config)?;
                let mut settings = Settings::from_provider(config);
                settings.timeout_secs = config.timeout_seconds();
                settings
            }
            None => Settings::default(),
        };

        if let Some(business_name) = &self.business_name {
            settings.business_name = business_name.clone();
        }
        if let Some(format) = &self.format {
            settings.format = format.clone();
        }
        if !self.nameservers.is_empty() {
            settings.nameservers = self.nameservers.clone();
        }
        if let Some(policy) = self.match_policy {
            settings.match_policy = policy;
        }
        if let Some(timeout) = self.timeout_secs {
            settings.timeout_secs = Some(timeout);
        }

        Ok(settings)
    }

    /// 命令列優先。不合法的 logging.format 由 `settings` 的驗證回報
    pub fn logging(&self, file: Option<&TomlConfig>) -> (bool, LogFormat) {
        let verbose = self.verbose || file.map(|c| c.verbose()).unwrap_or(false);
        let format = self
            .log_format
            .or_else(|| file.and_then(|c| c.log_format()?.parse().ok()))
            .unwrap_or_default();
        (verbose, format)
    }
}
