//! URL decomposition and public-suffix-aware host splitting.
//!
//! This module breaks a URL string into the parts feature extraction
//! works with: scheme, hostname, path, and the Public Suffix List based
//! split of the hostname into subdomain, registrable-domain label, and
//! suffix (TLD). A string the `url` crate rejects degrades to empty
//! parts rather than failing, since lexical features over the raw
//! string are still meaningful for malformed input.

use std::net::Ipv4Addr;

use url::Url;

/// Decomposed view of a URL.
///
/// The PSL split follows the usual convention: for
/// `https://mail.google.co.uk/inbox`, `subdomain` is `mail`, `domain` is
/// `google`, and `suffix` is `co.uk`. Hosts without a listed suffix
/// (IP literals, bare labels) leave `domain` and `suffix` empty.
///
/// # Example
///
/// ```rust
/// use hamus_core::host::UrlParts;
///
/// let parts = UrlParts::parse("https://mail.google.co.uk/inbox?x=1");
/// assert_eq!(parts.hostname, "mail.google.co.uk");
/// assert_eq!(parts.subdomain, "mail");
/// assert_eq!(parts.domain, "google");
/// assert_eq!(parts.suffix, "co.uk");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlParts {
    /// URL scheme (`http`, `https`, ...), empty when the URL did not parse.
    pub scheme: String,
    /// Hostname without port or userinfo, empty when absent.
    pub hostname: String,
    /// Path component, empty when absent.
    pub path: String,
    /// Registrable-domain label (`google` in `mail.google.co.uk`).
    pub domain: String,
    /// Labels left of the registrable domain (`mail` in `mail.google.co.uk`).
    pub subdomain: String,
    /// Public suffix (`co.uk` in `mail.google.co.uk`).
    pub suffix: String,
}

impl UrlParts {
    /// Decomposes a URL string.
    ///
    /// Never fails: unparseable input yields a `UrlParts` with every
    /// field empty, and a host without a registrable domain yields empty
    /// `domain`/`subdomain`/`suffix`.
    pub fn parse(url: &str) -> Self {
        let parsed = match Url::parse(url) {
            Ok(u) => u,
            Err(_) => return Self::default(),
        };

        let hostname = parsed.host_str().unwrap_or("").to_string();

        // IP literals have no registrable domain; the PSL default rule
        // would otherwise treat the last octet as an unknown suffix.
        let (subdomain, domain, suffix) = if hostname.parse::<Ipv4Addr>().is_ok() {
            (String::new(), String::new(), String::new())
        } else {
            split_host(&hostname)
        };

        Self {
            scheme: parsed.scheme().to_string(),
            path: parsed.path().to_string(),
            hostname,
            domain,
            subdomain,
            suffix,
        }
    }

    /// Whether the hostname is an IPv4 dotted-quad literal.
    ///
    /// `192.168.1.1` is an IP; ordinary hostnames are not. Partial dotted
    /// forms such as `192.168.1` are normalized to a full address by URL
    /// parsing before this test runs, so they also count.
    pub fn is_ipv4_literal(&self) -> bool {
        self.hostname.parse::<Ipv4Addr>().is_ok()
    }

    /// The registrable domain (`google.co.uk` for `mail.google.co.uk`),
    /// or an empty string when the host has none.
    pub fn registrable_domain(&self) -> String {
        match (self.domain.is_empty(), self.suffix.is_empty()) {
            (false, false) => format!("{}.{}", self.domain, self.suffix),
            (false, true) => self.domain.clone(),
            _ => String::new(),
        }
    }
}

/// Splits a hostname into (subdomain, registrable label, suffix) using the
/// Public Suffix List.
fn split_host(hostname: &str) -> (String, String, String) {
    let Some(suffix) = psl::suffix_str(hostname) else {
        return (String::new(), String::new(), String::new());
    };
    let Some(registrable) = psl::domain_str(hostname) else {
        return (String::new(), String::new(), suffix.to_string());
    };

    // The registrable domain is "<label>.<suffix>"; everything left of it
    // in the hostname is the subdomain.
    let label = registrable
        .strip_suffix(suffix)
        .map(|s| s.trim_end_matches('.'))
        .unwrap_or(registrable);

    let subdomain = hostname
        .strip_suffix(registrable)
        .map(|s| s.trim_end_matches('.'))
        .unwrap_or("");

    (subdomain.to_string(), label.to_string(), suffix.to_string())
}
