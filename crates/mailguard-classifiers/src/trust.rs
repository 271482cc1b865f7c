//! Trust-pattern filter
//!
//! A small allow-list of boilerplate that widely-seen legitimate bulk mail
//! carries (sender organization names, postal addresses, notification
//! disclaimers). Any match forces a safe verdict upstream of the
//! classifier. This is a precision guard against false positives, not a
//! security control: it performs no sender authentication and a forged mail
//! quoting the boilerplate will pass it.

use mailguard_core::{Error, Result};
use regex::RegexSetBuilder;

/// Boilerplate seen in legitimate notification mail
const DEFAULT_TRUST_PATTERNS: &[&str] = &[
    "Google LLC",
    "1600 Amphitheatre Parkway",
    "You received this email to let you know about important changes",
];

pub struct TrustFilter {
    patterns: regex::RegexSet,
}

impl TrustFilter {
    /// Create a filter with the built-in pattern set
    pub fn new() -> Result<Self> {
        Self::with_patterns::<&str>(&[])
    }

    /// Create a filter with extra patterns on top of the built-in set.
    ///
    /// Patterns are matched as case-insensitive literal substrings.
    pub fn with_patterns<S: AsRef<str>>(extra: &[S]) -> Result<Self> {
        let escaped: Vec<String> = DEFAULT_TRUST_PATTERNS
            .iter()
            .copied()
            .chain(extra.iter().map(|s| s.as_ref()))
            .map(regex::escape)
            .collect();

        let patterns = RegexSetBuilder::new(&escaped)
            .case_insensitive(true)
            .build()
            .map_err(|e| Error::config(format!("Failed to build trust pattern set: {e}")))?;

        Ok(Self { patterns })
    }

    /// Whether the text contains any trusted boilerplate pattern
    pub fn is_trusted(&self, text: &str) -> bool {
        self.patterns.is_match(text)
    }
}
