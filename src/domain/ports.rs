use crate::domain::model::{MatchPolicy, TxtRecord};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Secure random byte source used for verification codes.
pub trait EntropySource: Send + Sync {
    fn fill(&self, dest: &mut [u8]) -> Result<()>;
}

/// Answers a single TXT query. Implementations must not retry or cache.
#[async_trait]
pub trait TxtResolver: Send + Sync {
    async fn lookup_txt(&self, domain: &str) -> Result<Vec<TxtRecord>>;
}

#[async_trait]
impl<T: TxtResolver + ?Sized> TxtResolver for Arc<T> {
    async fn lookup_txt(&self, domain: &str) -> Result<Vec<TxtRecord>> {
        (**self).lookup_txt(domain).await
    }
}

impl<T: EntropySource + ?Sized> EntropySource for Arc<T> {
    fn fill(&self, dest: &mut [u8]) -> Result<()> {
        (**self).fill(dest)
    }
}

pub trait ConfigProvider: Send + Sync {
    fn business_name(&self) -> &str;
    fn format(&self) -> &str;
    fn match_policy(&self) -> MatchPolicy;
    fn nameservers(&self) -> &[String];
}
