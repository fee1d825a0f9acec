use super::disposable::DisposableDomains;
use super::dnsmx::{MxLookupError, MxResolver};
use super::typo::TypoMap;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error};
use utoipa::ToSchema;

/// Why an address was accepted or rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Reason {
    None,
    Disposable,
    Typo,
    NoMxRecords,
    InvalidDomain,
    InvalidSyntax,
}

/// Outcome of one plausibility check.
///
/// `valid` is true exactly when `reason` is [`Reason::None`]; the
/// constructors are the only way to build one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Verdict {
    valid: bool,
    reason: Reason,
    #[serde(skip_serializing_if = "Option::is_none")]
    suggestion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    domain: Option<String>,
}

impl Verdict {
    fn accepted(domain: &str) -> Self {
        Self {
            valid: true,
            reason: Reason::None,
            suggestion: None,
            domain: Some(domain.to_string()),
        }
    }

    fn rejected(reason: Reason) -> Self {
        debug_assert_ne!(reason, Reason::None);
        Self {
            valid: false,
            reason,
            suggestion: None,
            domain: None,
        }
    }

    fn typo(suggestion: String) -> Self {
        Self {
            suggestion: Some(suggestion),
            ..Self::rejected(Reason::Typo)
        }
    }

    /// Verdict for input that fails a caller's coarse shape check before
    /// reaching the checker.
    pub fn invalid_syntax() -> Self {
        Self::rejected(Reason::InvalidSyntax)
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn reason(&self) -> Reason {
        self.reason
    }

    pub fn suggestion(&self) -> Option<&str> {
        self.suggestion.as_deref()
    }

    pub fn domain(&self) -> Option<&str> {
        self.domain.as_deref()
    }
}

/// Operational fault while checking an address, as opposed to a verdict.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CheckError {
    #[error("DNS resolver unavailable: {0}")]
    ResolverUnavailable(String),
}

/// Decides whether an email address can plausibly receive mail.
///
/// Stages run in a fixed order and the first match wins:
/// 1. syntax (an `@` followed by a non-empty domain)
/// 2. disposable-domain block list
/// 3. common-provider typo map
/// 4. one bounded MX lookup
///
/// The tables are immutable after construction, so a single checker can be
/// shared across concurrent requests.
pub struct EmailChecker {
    disposable: DisposableDomains,
    typos: TypoMap,
    resolver: Arc<dyn MxResolver>,
    dns_timeout: Duration,
}

impl EmailChecker {
    pub fn new(resolver: Arc<dyn MxResolver>, dns_timeout: Duration) -> Self {
        Self {
            disposable: DisposableDomains::builtin(),
            typos: TypoMap::builtin(),
            resolver,
            dns_timeout,
        }
    }

    pub fn with_disposable_domains(mut self, disposable: DisposableDomains) -> Self {
        self.disposable = disposable;
        self
    }

    pub async fn check(&self, email: &str) -> Result<Verdict, CheckError> {
        let address = email.trim().to_lowercase();

        let (local, domain) = match address.rsplit_once('@') {
            Some((local, domain)) if !domain.is_empty() => (local, domain),
            _ => return Ok(Verdict::rejected(Reason::InvalidSyntax)),
        };

        if self.disposable.contains(domain) {
            return Ok(Verdict::rejected(Reason::Disposable));
        }

        if let Some(canonical) = self.typos.correct(domain) {
            return Ok(Verdict::typo(format!("{local}@{canonical}")));
        }

        let lookup = tokio::time::timeout(
            self.dns_timeout,
            self.resolver.lookup_mx(domain, self.dns_timeout),
        )
        .await
        .unwrap_or(Err(MxLookupError::Timeout));

        match lookup {
            Ok(records) if records.is_empty() => {
                debug!(domain, "domain publishes no MX records");
                Ok(Verdict::rejected(Reason::NoMxRecords))
            }
            Ok(records) => {
                debug!(domain, records = records.len(), "MX records found");
                Ok(Verdict::accepted(domain))
            }
            Err(MxLookupError::Unavailable(cause)) => {
                error!(domain, %cause, "DNS resolver unavailable");
                Err(CheckError::ResolverUnavailable(cause))
            }
            Err(err) => {
                debug!(domain, error = %err, "domain did not resolve");
                Ok(Verdict::rejected(Reason::InvalidDomain))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::validation::dnsmx::{MockMxResolver, MxRecord};
    use async_trait::async_trait;
    use mockall::predicate::{always, eq};

    const TIMEOUT: Duration = Duration::from_secs(3);

    fn checker_with(resolver: MockMxResolver) -> EmailChecker {
        EmailChecker::new(Arc::new(resolver), TIMEOUT)
    }

    /// Resolver that must never be reached.
    fn untouched_resolver() -> MockMxResolver {
        let mut resolver = MockMxResolver::new();
        resolver.expect_lookup_mx().times(0);
        resolver
    }

    fn resolver_returning(
        domain: &'static str,
        result: Result<Vec<MxRecord>, MxLookupError>,
    ) -> MockMxResolver {
        let mut resolver = MockMxResolver::new();
        resolver
            .expect_lookup_mx()
            .with(eq(domain), always())
            .times(1)
            .returning(move |_, _| result.clone());
        resolver
    }

    struct StalledResolver;

    #[async_trait]
    impl MxResolver for StalledResolver {
        async fn lookup_mx(
            &self,
            _domain: &str,
            _timeout: Duration,
        ) -> Result<Vec<MxRecord>, MxLookupError> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(vec![MxRecord::new("late.example.com", 10)])
        }
    }

    #[test]
    fn test_missing_at_is_invalid_syntax() {
        let checker = checker_with(untouched_resolver());
        for email in ["", "   ", "userexample.com", "user@"] {
            let verdict = tokio_test::block_on(checker.check(email)).unwrap();
            assert!(!verdict.is_valid(), "{email:?}");
            assert_eq!(verdict.reason(), Reason::InvalidSyntax, "{email:?}");
        }
    }

    #[tokio::test]
    async fn test_domain_taken_after_last_at() {
        let checker = checker_with(resolver_returning(
            "example.com",
            Ok(vec![MxRecord::new("mail.example.com", 10)]),
        ));
        let verdict = checker.check("\"a@b\"@example.com").await.unwrap();
        assert!(verdict.is_valid());
        assert_eq!(verdict.domain(), Some("example.com"));
    }

    #[tokio::test]
    async fn test_disposable_domain_skips_dns() {
        let checker = checker_with(untouched_resolver());
        let verdict = checker.check("user@mailinator.com").await.unwrap();
        assert!(!verdict.is_valid());
        assert_eq!(verdict.reason(), Reason::Disposable);
        assert_eq!(verdict.suggestion(), None);
    }

    #[tokio::test]
    async fn test_disposable_match_is_case_insensitive() {
        let checker = checker_with(untouched_resolver());
        let verdict = checker.check("  User@MailInator.COM ").await.unwrap();
        assert_eq!(verdict.reason(), Reason::Disposable);
    }

    #[tokio::test]
    async fn test_typo_suggests_canonical_domain() {
        let checker = checker_with(untouched_resolver());
        let verdict = checker.check("user@gmai.com").await.unwrap();
        assert!(!verdict.is_valid());
        assert_eq!(verdict.reason(), Reason::Typo);
        assert_eq!(verdict.suggestion(), Some("user@gmail.com"));
    }

    #[tokio::test]
    async fn test_disposable_checked_before_typo() {
        // A block-listed domain that is also registered as a typo variant
        // must still be reported as disposable.
        let checker = checker_with(untouched_resolver())
            .with_disposable_domains(DisposableDomains::builtin().extend(["gmai.com"]));
        let verdict = checker.check("user@gmai.com").await.unwrap();
        assert_eq!(verdict.reason(), Reason::Disposable);
    }

    #[tokio::test]
    async fn test_no_mx_records() {
        let checker = checker_with(resolver_returning("example.org", Ok(vec![])));
        let verdict = checker.check("user@example.org").await.unwrap();
        assert!(!verdict.is_valid());
        assert_eq!(verdict.reason(), Reason::NoMxRecords);
        assert_eq!(verdict.domain(), None);
    }

    #[tokio::test]
    async fn test_resolution_failure_is_invalid_domain() {
        let checker = checker_with(resolver_returning(
            "nonexistent.invalid",
            Err(MxLookupError::Resolution("NXDOMAIN".into())),
        ));
        let verdict = checker.check("user@nonexistent.invalid").await.unwrap();
        assert!(!verdict.is_valid());
        assert_eq!(verdict.reason(), Reason::InvalidDomain);
    }

    #[tokio::test]
    async fn test_resolver_timeout_is_invalid_domain() {
        let checker = checker_with(resolver_returning(
            "slow.example",
            Err(MxLookupError::Timeout),
        ));
        let verdict = checker.check("user@slow.example").await.unwrap();
        assert_eq!(verdict.reason(), Reason::InvalidDomain);
    }

    #[tokio::test]
    async fn test_stalled_resolver_is_cut_off() {
        let checker = EmailChecker::new(Arc::new(StalledResolver), Duration::from_millis(50));
        let verdict = checker.check("user@example.com").await.unwrap();
        assert_eq!(verdict.reason(), Reason::InvalidDomain);
    }

    #[tokio::test]
    async fn test_valid_with_mx_records() {
        let checker = checker_with(resolver_returning(
            "example.com",
            Ok(vec![MxRecord::new("mail.example.com", 10)]),
        ));
        let verdict = checker.check("user@example.com").await.unwrap();
        assert!(verdict.is_valid());
        assert_eq!(verdict.reason(), Reason::None);
        assert_eq!(verdict.domain(), Some("example.com"));
        assert_eq!(verdict.suggestion(), None);
    }

    #[tokio::test]
    async fn test_unavailable_resolver_is_an_error() {
        let checker = checker_with(resolver_returning(
            "example.com",
            Err(MxLookupError::Unavailable("no connections".into())),
        ));
        let result = checker.check("user@example.com").await;
        assert_eq!(
            result,
            Err(CheckError::ResolverUnavailable("no connections".into()))
        );
    }

    #[tokio::test]
    async fn test_repeated_checks_are_identical() {
        let mut resolver = MockMxResolver::new();
        resolver
            .expect_lookup_mx()
            .times(2)
            .returning(|_, _| Ok(vec![MxRecord::new("mx1.example.net", 5)]));
        let checker = checker_with(resolver);

        let first = checker.check("someone@example.net").await.unwrap();
        let second = checker.check("someone@example.net").await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_concurrent_checks_are_independent() {
        let mut resolver = MockMxResolver::new();
        resolver
            .expect_lookup_mx()
            .returning(|domain, _| match domain {
                "good.example" => Ok(vec![MxRecord::new("mx.good.example", 10)]),
                "empty.example" => Ok(vec![]),
                _ => Err(MxLookupError::Resolution("SERVFAIL".into())),
            });
        let checker = checker_with(resolver);

        let emails = [
            "a@good.example",
            "b@empty.example",
            "c@broken.example",
            "d@yopmail.com",
            "e@hotmial.com",
        ];
        let verdicts =
            futures::future::join_all(emails.iter().map(|email| checker.check(email))).await;
        let reasons: Vec<Reason> = verdicts
            .into_iter()
            .map(|v| v.unwrap().reason())
            .collect();

        assert_eq!(
            reasons,
            vec![
                Reason::None,
                Reason::NoMxRecords,
                Reason::InvalidDomain,
                Reason::Disposable,
                Reason::Typo,
            ]
        );
    }

    #[test]
    fn test_verdict_serialization() {
        let json = serde_json::to_value(Verdict::typo("user@gmail.com".into())).unwrap();
        assert_eq!(json["valid"], false);
        assert_eq!(json["reason"], "typo");
        assert_eq!(json["suggestion"], "user@gmail.com");
        assert!(json.get("domain").is_none());

        let json = serde_json::to_value(Verdict::rejected(Reason::NoMxRecords)).unwrap();
        assert_eq!(json["reason"], "no-mx-records");

        let json = serde_json::to_value(Verdict::accepted("example.com")).unwrap();
        assert_eq!(json["valid"], true);
        assert_eq!(json["reason"], "none");
        assert_eq!(json["domain"], "example.com");
    }
}
