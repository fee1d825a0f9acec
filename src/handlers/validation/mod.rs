/// Block list of disposable (throwaway) mailbox domains.
///
/// # Example
/// ```
/// use portfolio_backend::handlers::validation::disposable::DisposableDomains;
///
/// let list = DisposableDomains::builtin().extend(["burner.example"]);
/// assert!(list.contains("mailinator.com"));
/// assert!(list.contains("burner.example"));
/// ```
pub mod disposable;

/// Mail-exchanger lookups behind the [`dnsmx::MxResolver`] capability.
pub mod dnsmx;

/// Email plausibility checker combining syntax, block list, typo map and
/// DNS MX checks into a single [`plausibility::Verdict`].
///
/// # Example
/// ```no_run
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// use portfolio_backend::handlers::validation::dnsmx::TrustDnsMxResolver;
/// use portfolio_backend::handlers::validation::plausibility::EmailChecker;
/// use std::{sync::Arc, time::Duration};
///
/// let timeout = Duration::from_secs(3);
/// let checker = EmailChecker::new(Arc::new(TrustDnsMxResolver::new(timeout)), timeout);
/// let verdict = checker.check("user@gmai.com").await?;
/// assert_eq!(verdict.suggestion(), Some("user@gmail.com"));
/// # Ok(())
/// # }
/// ```
pub mod plausibility;

/// Corrections for common misspellings of the big mail providers.
pub mod typo;
