use crate::domain::model::TxtRecord;
use crate::domain::ports::TxtResolver;
use crate::utils::error::{ResolutionFailure, Result, VerifyError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Clone)]
enum Answer {
    Records(Vec<TxtRecord>),
    Failure(ResolutionFailure, String),
}

/// In-memory TXT answers keyed by domain. Unknown domains answer NXDOMAIN.
#[derive(Debug, Default)]
pub struct StaticTxtResolver {
    answers: HashMap<String, Answer>,
    queries: AtomicUsize,
}

impl StaticTxtResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(mut self, domain: &str, records: Vec<TxtRecord>) -> Self {
        self.answers
            .insert(normalize(domain), Answer::Records(records));
        self
    }

    pub fn with_failure(mut self, domain: &str, kind: ResolutionFailure, reason: &str) -> Self {
        self.answers
            .insert(normalize(domain), Answer::Failure(kind, reason.to_string()));
        self
    }

    /// 目前為止收到的查詢次數
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

// DNS 名稱不分大小寫，結尾的點也一樣
fn normalize(domain: &str) -> String {
    domain.trim_end_matches('.').to_ascii_lowercase()
}

#[async_trait]
impl TxtResolver for StaticTxtResolver {
    async fn lookup_txt(&self, domain: &str) -> Result<Vec<TxtRecord>> {
        self.queries.fetch_add(1, Ordering::SeqCst);

        match self.answers.get(&normalize(domain)) {
            Some(Answer::Records(records)) if records.is_empty() => Err(VerifyError::resolution(
                domain,
                ResolutionFailure::NoRecords,
                "no TXT records found",
            )),
            Some(Answer::Records(records)) => Ok(records.clone()),
            Some(Answer::Failure(kind, reason)) => {
                Err(VerifyError::resolution(domain, *kind, reason.clone()))
            }
            None => Err(VerifyError::resolution(
                domain,
                ResolutionFailure::NotFound,
                "NXDOMAIN",
            )),
        }
    }
}
