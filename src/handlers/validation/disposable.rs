use std::collections::HashSet;

/// Domains of well-known throwaway mailbox providers.
const BUILTIN_DISPOSABLE_DOMAINS: &[&str] = &[
    "0-00.usa.cc",
    "10minutemail.com",
    "20minutemail.com",
    "discard.email",
    "dispostable.com",
    "fakeinbox.com",
    "getairmail.com",
    "getnada.com",
    "guerrillamail.com",
    "guerrillamail.net",
    "mailcatch.com",
    "maildrop.cc",
    "mailinator.com",
    "mailnesia.com",
    "mintemail.com",
    "mohmal.com",
    "sharklasers.com",
    "spamgourmet.com",
    "temp-mail.org",
    "tempmail.com",
    "tempr.email",
    "throwawaymail.com",
    "trashmail.com",
    "yopmail.com",
];

/// Block list of disposable email domains.
///
/// Built once at startup (built-in list plus any configured extras) and only
/// read afterwards. Lookups expect an already lower-cased domain.
#[derive(Debug, Clone)]
pub struct DisposableDomains {
    domains: HashSet<String>,
}

impl DisposableDomains {
    pub fn builtin() -> Self {
        Self {
            domains: BUILTIN_DISPOSABLE_DOMAINS
                .iter()
                .map(|d| d.to_string())
                .collect(),
        }
    }

    /// Adds extra domains, normalising case and skipping blank entries.
    pub fn extend<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.domains.extend(
            extra
                .into_iter()
                .map(|d| d.as_ref().trim().to_lowercase())
                .filter(|d| !d.is_empty()),
        );
        self
    }

    pub fn contains(&self, domain: &str) -> bool {
        self.domains.contains(domain)
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}

impl Default for DisposableDomains {
    fn default() -> Self {
        Self::builtin()
    }
}
