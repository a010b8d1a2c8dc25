use crate::domain::model::TxtRecord;
use crate::domain::ports::TxtResolver;
use crate::utils::error::{ResolutionFailure, Result, VerifyError};
use async_trait::async_trait;
use hickory_resolver::config::{
    NameServerConfig, NameServerConfigGroup, Protocol, ResolverConfig, ResolverOpts,
};
use hickory_resolver::error::{ResolveError, ResolveErrorKind};
use hickory_resolver::proto::op::ResponseCode;
use hickory_resolver::proto::rr::Name;
use hickory_resolver::TokioAsyncResolver;
use std::net::SocketAddr;

/// TXT lookups through hickory: no cache, no retries, one nameserver at a time.
/// A failed server is followed by the next configured one, like the platform resolver.
pub struct HickoryTxtResolver {
    resolver: TokioAsyncResolver,
}

impl HickoryTxtResolver {
    /// 使用系統的 resolver 設定 (/etc/resolv.conf 等)
    pub fn from_system_conf() -> Result<Self> {
        let (config, opts) = hickory_resolver::system_conf::read_system_conf().map_err(|e| {
            VerifyError::ConfigError {
                message: format!("Failed to read system resolver configuration: {}", e),
            }
        })?;
        Ok(Self::build(config, opts))
    }

    /// UDP 優先，截斷時改用 TCP
    pub fn with_nameservers(nameservers: &[SocketAddr]) -> Result<Self> {
        if nameservers.is_empty() {
            return Err(VerifyError::MissingConfigError {
                field: "resolver.nameservers".to_string(),
            });
        }

        Ok(Self::build(
            nameserver_config(nameservers),
            ResolverOpts::default(),
        ))
    }

    fn build(config: ResolverConfig, mut opts: ResolverOpts) -> Self {
        // attempts 是失敗後的重試次數
        opts.attempts = 0;
        opts.num_concurrent_reqs = 1;
        opts.cache_size = 0;
        Self {
            resolver: TokioAsyncResolver::tokio(config, opts),
        }
    }
}

fn nameserver_config(nameservers: &[SocketAddr]) -> ResolverConfig {
    let mut servers = Vec::with_capacity(nameservers.len() * 2);
    for addr in nameservers {
        servers.push(NameServerConfig::new(*addr, Protocol::Udp));
        servers.push(NameServerConfig::new(*addr, Protocol::Tcp));
    }
    ResolverConfig::from_parts(None, vec![], NameServerConfigGroup::from(servers))
}

// 設成 FQDN，避免 search domain 造成額外查詢
fn query_name(domain: &str) -> Result<Name> {
    let mut name = Name::from_utf8(domain).map_err(|e| {
        VerifyError::resolution(
            domain,
            ResolutionFailure::Other,
            format!("invalid domain name: {}", e),
        )
    })?;
    name.set_fqdn(true);
    Ok(name)
}

fn classify(err: &ResolveError) -> ResolutionFailure {
    match err.kind() {
        ResolveErrorKind::NoRecordsFound { response_code, .. } => match *response_code {
            ResponseCode::NXDomain => ResolutionFailure::NotFound,
            ResponseCode::NoError => ResolutionFailure::NoRecords,
            _ => ResolutionFailure::Other,
        },
        ResolveErrorKind::Timeout => ResolutionFailure::Timeout,
        ResolveErrorKind::Io(_) | ResolveErrorKind::NoConnections => ResolutionFailure::Network,
        _ => ResolutionFailure::Other,
    }
}

#[async_trait]
impl TxtResolver for HickoryTxtResolver {
    async fn lookup_txt(&self, domain: &str) -> Result<Vec<TxtRecord>> {
        let name = query_name(domain)?;

        let lookup = self
            .resolver
            .txt_lookup(name)
            .await
            .map_err(|e| VerifyError::resolution(domain, classify(&e), e.to_string()))?;

        let records = lookup
            .iter()
            .map(|txt| TxtRecord {
                segments: txt
                    .txt_data()
                    .iter()
                    .map(|segment| String::from_utf8_lossy(segment).into_owned())
                    .collect(),
            })
            .collect();

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hickory_resolver::proto::op::{Message, MessageType, OpCode};
    use hickory_resolver::proto::rr::rdata::TXT;
    use hickory_resolver::proto::rr::{RData, Record};
    use hickory_resolver::proto::serialize::binary::BinEncodable;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::net::UdpSocket;

    #[derive(Clone)]
    enum StubReply {
        Silent,
        Txt(Vec<Vec<String>>),
        NxDomain,
    }

    fn answer(query: &Message, reply: &StubReply) -> Option<Vec<u8>> {
        let mut response = Message::new();
        response
            .set_id(query.id())
            .set_message_type(MessageType::Response)
            .set_op_code(OpCode::Query)
            .set_recursion_desired(query.recursion_desired())
            .set_recursion_available(true);
        response.add_queries(query.queries().to_vec());

        match reply {
            StubReply::Silent => return None,
            StubReply::Txt(records) => {
                let name = query.queries()[0].name().clone();
                for segments in records {
                    response.add_answer(Record::from_rdata(
                        name.clone(),
                        300,
                        RData::TXT(TXT::new(segments.clone())),
                    ));
                }
            }
            StubReply::NxDomain => {
                response.set_response_code(ResponseCode::NXDomain);
            }
        }
        response.to_bytes().ok()
    }

    /// 本機 UDP nameserver，計算收到的 datagram 數
    async fn spawn_nameserver(reply: StubReply) -> (SocketAddr, Arc<AtomicUsize>) {
        let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let addr = socket.local_addr().unwrap();
        let received = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&received);

        tokio::spawn(async move {
            let mut buf = [0u8; 4096];
            loop {
                let Ok((len, peer)) = socket.recv_from(&mut buf).await else {
                    break;
                };
                counter.fetch_add(1, Ordering::SeqCst);
                let Ok(query) = Message::from_vec(&buf[..len]) else {
                    continue;
                };
                if let Some(bytes) = answer(&query, &reply) {
                    let _ = socket.send_to(&bytes, peer).await;
                }
            }
        });

        (addr, received)
    }

    fn fast_resolver(nameservers: &[SocketAddr]) -> HickoryTxtResolver {
        let mut opts = ResolverOpts::default();
        opts.timeout = Duration::from_millis(300);
        HickoryTxtResolver::build(nameserver_config(nameservers), opts)
    }

    #[tokio::test]
    async fn test_unanswered_query_is_sent_once() {
        let (addr, received) = spawn_nameserver(StubReply::Silent).await;
        let resolver = fast_resolver(&[addr]);

        let err = resolver.lookup_txt("example.com").await.unwrap_err();
        assert!(matches!(err, VerifyError::ResolutionError { .. }));

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(received.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failover_never_repeats_a_nameserver() {
        let (first, first_received) = spawn_nameserver(StubReply::Silent).await;
        let (second, second_received) = spawn_nameserver(StubReply::Silent).await;
        let resolver = fast_resolver(&[first, second]);

        assert!(resolver.lookup_txt("example.com").await.is_err());

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(first_received.load(Ordering::SeqCst) <= 1);
        assert!(second_received.load(Ordering::SeqCst) <= 1);
    }

    #[tokio::test]
    async fn test_segments_map_onto_txt_record() {
        let (addr, received) = spawn_nameserver(StubReply::Txt(vec![
            vec![
                "acme-domain-".to_string(),
                "verification=abc123".to_string(),
            ],
            vec!["v=spf1 -all".to_string()],
        ]))
        .await;
        let resolver = HickoryTxtResolver::with_nameservers(&[addr]).unwrap();

        let mut records = resolver.lookup_txt("example.com").await.unwrap();
        records.sort_by_key(|r| r.segments.len());

        assert_eq!(
            records,
            vec![
                TxtRecord::new(["v=spf1 -all"]),
                TxtRecord::new(["acme-domain-", "verification=abc123"]),
            ]
        );
        assert_eq!(received.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_nxdomain_is_not_found() {
        let (addr, received) = spawn_nameserver(StubReply::NxDomain).await;
        let resolver = HickoryTxtResolver::with_nameservers(&[addr]).unwrap();

        let err = resolver.lookup_txt("nonexistent.invalid").await.unwrap_err();
        match err {
            VerifyError::ResolutionError { domain, kind, .. } => {
                assert_eq!(domain, "nonexistent.invalid");
                assert_eq!(kind, ResolutionFailure::NotFound);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(received.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_query_name_is_fully_qualified() {
        let name = query_name("example.com").unwrap();
        assert!(name.is_fqdn());
        assert_eq!(name.to_string(), "example.com.");

        let name = query_name("example.com.").unwrap();
        assert_eq!(name.to_string(), "example.com.");
    }

    #[test]
    fn test_classify_timeout() {
        let err = ResolveError::from(ResolveErrorKind::Timeout);
        assert_eq!(classify(&err), ResolutionFailure::Timeout);

        let err = ResolveError::from(ResolveErrorKind::NoConnections);
        assert_eq!(classify(&err), ResolutionFailure::Network);
    }

    #[test]
    fn test_empty_nameserver_list_is_rejected() {
        assert!(matches!(
            HickoryTxtResolver::with_nameservers(&[]),
            Err(VerifyError::MissingConfigError { .. })
        ));
    }
}
