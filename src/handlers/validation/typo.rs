use std::collections::HashMap;

/// Frequently mistyped variants of the big consumer mail providers.
const COMMON_DOMAIN_TYPOS: &[(&str, &[&str])] = &[
    (
        "gmail.com",
        &[
            "gmai.com",
            "gmial.com",
            "gmal.com",
            "gmaill.com",
            "gamil.com",
            "gnail.com",
            "gmail.co",
            "gmail.con",
            "gmail.cm",
        ],
    ),
    (
        "yahoo.com",
        &["yaho.com", "yahooo.com", "yhoo.com", "yahoo.co", "yahoo.con"],
    ),
    (
        "hotmail.com",
        &[
            "hotmial.com",
            "hotmal.com",
            "hotmai.com",
            "hotmil.com",
            "hotmail.co",
            "hotmail.con",
        ],
    ),
    (
        "outlook.com",
        &["outlok.com", "outloo.com", "outlook.co", "outlook.con"],
    ),
    ("icloud.com", &["iclod.com", "icloud.co", "icoud.com"]),
];

/// Reverse index from a misspelled domain to its canonical spelling.
#[derive(Debug, Clone)]
pub struct TypoMap {
    corrections: HashMap<String, String>,
}

impl TypoMap {
    pub fn builtin() -> Self {
        let corrections = COMMON_DOMAIN_TYPOS
            .iter()
            .flat_map(|(canonical, variants)| {
                variants
                    .iter()
                    .map(move |variant| (variant.to_string(), canonical.to_string()))
            })
            .collect();

        Self { corrections }
    }

    /// Returns the canonical domain when `domain` is a known misspelling.
    pub fn correct(&self, domain: &str) -> Option<&str> {
        self.corrections.get(domain).map(String::as_str)
    }
}

impl Default for TypoMap {
    fn default() -> Self {
        Self::builtin()
    }
}
