use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_FORMAT: &str = "{{businessName}}-domain-verification={{code}}";
pub const BUSINESS_NAME_PLACEHOLDER: &str = "{{businessName}}";
pub const CODE_PLACEHOLDER: &str = "{{code}}";

/// 產生驗證碼所需的輸入
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationRequest {
    pub domain: String,
    #[serde(default)]
    pub business_name: String,
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    DEFAULT_FORMAT.to_string()
}

impl VerificationRequest {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            business_name: String::new(),
            format: default_format(),
        }
    }

    pub fn with_business_name(mut self, business_name: impl Into<String>) -> Self {
        self.business_name = business_name.into();
        self
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }
}

/// 產生結果。呼叫端負責保存 `formatted_string` 直到 DNS 生效
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResult {
    pub domain: String,
    pub code: String,
    pub formatted_string: String,
    pub instructions: String,
    pub issued_at: DateTime<Utc>,
}

/// One TXT resource record, split into its character-strings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TxtRecord {
    pub segments: Vec<String>,
}

impl TxtRecord {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    pub fn concatenated(&self) -> String {
        self.segments.concat()
    }
}

impl From<&str> for TxtRecord {
    fn from(value: &str) -> Self {
        TxtRecord::new([value])
    }
}

/// How returned TXT records are compared to the expected string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchPolicy {
    /// Each character-string is compared on its own.
    #[default]
    Segment,
    /// Like `Segment`, plus the concatenation of all segments of a record.
    Record,
}

impl std::str::FromStr for MatchPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "segment" => Ok(MatchPolicy::Segment),
            "record" => Ok(MatchPolicy::Record),
            other => Err(format!(
                "unknown match policy '{}', expected segment or record",
                other
            )),
        }
    }
}

impl std::fmt::Display for MatchPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchPolicy::Segment => f.write_str("segment"),
            MatchPolicy::Record => f.write_str("record"),
        }
    }
}
