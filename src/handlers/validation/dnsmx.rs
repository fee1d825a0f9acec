use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};
use trust_dns_resolver::{
    TokioAsyncResolver,
    config::{ResolverConfig, ResolverOpts},
    error::{ResolveError, ResolveErrorKind},
    proto::op::ResponseCode,
    system_conf::read_system_conf,
};

/// A single mail-exchanger record for a domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MxRecord {
    pub exchange: String,
    pub preference: u16,
}

impl MxRecord {
    pub fn new(exchange: impl Into<String>, preference: u16) -> Self {
        Self {
            exchange: exchange.into(),
            preference,
        }
    }
}

/// Failure modes of an MX lookup.
///
/// `Timeout` and `Resolution` describe the domain (it could not be resolved
/// in time, or the resolver answered with an error for it). `Unavailable`
/// describes the resolver itself and is surfaced to callers as an
/// operational fault.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MxLookupError {
    #[error("MX lookup timed out")]
    Timeout,
    #[error("MX lookup failed: {0}")]
    Resolution(String),
    #[error("DNS resolver unavailable: {0}")]
    Unavailable(String),
}

/// Capability to query mail-exchanger records for a domain.
///
/// Implementations must answer within `timeout`; an empty `Vec` means the
/// domain exists but publishes no MX records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MxResolver: Send + Sync {
    async fn lookup_mx(
        &self,
        domain: &str,
        timeout: Duration,
    ) -> Result<Vec<MxRecord>, MxLookupError>;
}

/// [`MxResolver`] backed by the trust-dns Tokio resolver.
///
/// Name servers come from the host's resolver configuration
/// (`/etc/resolv.conf` or the platform equivalent), falling back to the
/// trust-dns defaults when it cannot be read. Options are always:
/// - the caller's timeout per request
/// - a single attempt (no retries)
/// - the record cache disabled, so every check issues a fresh query
pub struct TrustDnsMxResolver {
    resolver: TokioAsyncResolver,
}

impl TrustDnsMxResolver {
    pub fn new(timeout: Duration) -> Self {
        let config = match read_system_conf() {
            Ok((config, _)) => config,
            Err(err) => {
                warn!(error = %err, "system resolver configuration unreadable, using defaults");
                ResolverConfig::default()
            }
        };
        Self::with_config(config, timeout)
    }

    pub fn with_config(config: ResolverConfig, timeout: Duration) -> Self {
        Self {
            resolver: TokioAsyncResolver::tokio(config, lookup_opts(timeout)),
        }
    }
}

fn lookup_opts(timeout: Duration) -> ResolverOpts {
    let mut opts = ResolverOpts::default();
    opts.timeout = timeout;
    opts.attempts = 0;
    opts.cache_size = 0;
    opts
}

#[async_trait]
impl MxResolver for TrustDnsMxResolver {
    async fn lookup_mx(
        &self,
        domain: &str,
        timeout: Duration,
    ) -> Result<Vec<MxRecord>, MxLookupError> {
        let lookup = tokio::time::timeout(timeout, self.resolver.mx_lookup(domain))
            .await
            .map_err(|_| MxLookupError::Timeout)?;

        match lookup {
            Ok(records) => Ok(records
                .iter()
                .map(|mx| {
                    MxRecord::new(
                        mx.exchange().to_string().trim_end_matches('.'),
                        mx.preference(),
                    )
                })
                .collect()),
            Err(err) => classify_resolve_error(domain, err),
        }
    }
}

/// Maps a trust-dns error onto the lookup outcome it represents.
///
/// A `NoRecordsFound` answer with `NOERROR` means the name exists without MX
/// records, which is an empty result rather than a failure.
fn classify_resolve_error(
    domain: &str,
    err: ResolveError,
) -> Result<Vec<MxRecord>, MxLookupError> {
    debug!(domain, error = %err, "MX lookup returned an error");

    match err.kind() {
        ResolveErrorKind::NoRecordsFound { response_code, .. }
            if *response_code == ResponseCode::NoError =>
        {
            Ok(Vec::new())
        }
        ResolveErrorKind::Timeout => Err(MxLookupError::Timeout),
        ResolveErrorKind::NoConnections | ResolveErrorKind::Io(_) => {
            Err(MxLookupError::Unavailable(err.to_string()))
        }
        _ => Err(MxLookupError::Resolution(err.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trust_dns_resolver::proto::op::Query;
    use trust_dns_resolver::proto::rr::{Name, RecordType};

    #[test]
    fn test_mx_record_new() {
        let record = MxRecord::new("mail.example.com", 10);
        assert_eq!(record.exchange, "mail.example.com");
        assert_eq!(record.preference, 10);
    }

    #[test]
    fn test_timeout_error_is_classified() {
        let err = ResolveError::from(ResolveErrorKind::Timeout);
        assert_eq!(
            classify_resolve_error("example.com", err),
            Err(MxLookupError::Timeout)
        );
    }

    fn no_records(response_code: ResponseCode) -> ResolveError {
        let name = Name::from_ascii("example.com.").unwrap();
        ResolveError::from(ResolveErrorKind::NoRecordsFound {
            query: Box::new(Query::query(name, RecordType::MX)),
            soa: None,
            negative_ttl: None,
            response_code,
            trusted: true,
        })
    }

    #[test]
    fn test_nodata_answer_is_empty_record_set() {
        assert_eq!(
            classify_resolve_error("example.com", no_records(ResponseCode::NoError)),
            Ok(Vec::new())
        );
    }

    #[test]
    fn test_nxdomain_is_a_resolution_failure() {
        assert!(matches!(
            classify_resolve_error("example.com", no_records(ResponseCode::NXDomain)),
            Err(MxLookupError::Resolution(_))
        ));
        assert!(matches!(
            classify_resolve_error("example.com", no_records(ResponseCode::ServFail)),
            Err(MxLookupError::Resolution(_))
        ));
    }

    #[test]
    fn test_no_connections_means_resolver_unavailable() {
        let err = ResolveError::from(ResolveErrorKind::NoConnections);
        assert!(matches!(
            classify_resolve_error("example.com", err),
            Err(MxLookupError::Unavailable(_))
        ));
    }

    #[test]
    fn test_generic_message_is_a_resolution_failure() {
        let err = ResolveError::from("server failure");
        assert!(matches!(
            classify_resolve_error("example.com", err),
            Err(MxLookupError::Resolution(_))
        ));
    }

    #[test]
    fn test_error_display() {
        assert_eq!(MxLookupError::Timeout.to_string(), "MX lookup timed out");
        assert_eq!(
            MxLookupError::Unavailable("no sockets".into()).to_string(),
            "DNS resolver unavailable: no sockets"
        );
    }

    #[test]
    fn test_lookup_opts_single_uncached_attempt() {
        let opts = lookup_opts(Duration::from_secs(3));
        assert_eq!(opts.timeout, Duration::from_secs(3));
        assert_eq!(opts.attempts, 0);
        assert_eq!(opts.cache_size, 0);
    }

    #[tokio::test]
    async fn test_default_config_resolver_respects_timeout() {
        let resolver =
            TrustDnsMxResolver::with_config(ResolverConfig::default(), Duration::from_millis(1));
        let result = resolver
            .lookup_mx("user-check.invalid", Duration::from_millis(1))
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_trust_dns_resolver_respects_timeout() {
        // `.invalid` never resolves; a near-zero budget must come back as an
        // error rather than hang, whatever the network looks like.
        let resolver = TrustDnsMxResolver::new(Duration::from_millis(1));
        let result = resolver
            .lookup_mx("user-check.invalid", Duration::from_millis(1))
            .await;
        assert!(result.is_err());
    }
}
