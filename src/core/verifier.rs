use crate::domain::model::{MatchPolicy, TxtRecord};
use crate::domain::ports::TxtResolver;
use crate::utils::error::Result;

/// Exact, case-sensitive comparison. Under `Segment` a value split across
/// several character-strings never matches.
pub fn matches(records: &[TxtRecord], expected: &str, policy: MatchPolicy) -> bool {
    records.iter().any(|record| {
        record.segments.iter().any(|segment| segment == expected)
            || (policy == MatchPolicy::Record
                && record.segments.len() > 1
                && record.concatenated() == expected)
    })
}

pub struct TxtVerifier<R: TxtResolver> {
    resolver: R,
    policy: MatchPolicy,
}

impl<R: TxtResolver> TxtVerifier<R> {
    pub fn new(resolver: R) -> Self {
        Self {
            resolver,
            policy: MatchPolicy::default(),
        }
    }

    pub fn with_match_policy(mut self, policy: MatchPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// 發出一次 TXT 查詢。查得到但沒有相符記錄時回傳 false，不是錯誤
    pub async fn verify(&self, domain: &str, verification_string: &str) -> Result<bool> {
        tracing::debug!("Querying TXT records for {}", domain);
        let records = self.resolver.lookup_txt(domain).await?;
        tracing::debug!("Received {} TXT records for {}", records.len(), domain);

        Ok(matches(&records, verification_string, self.policy))
    }
}
