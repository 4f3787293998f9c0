//! Feature extraction API.
//!
//! This module assembles the fixed 20-entry feature vector a pretrained
//! phishing classifier consumes. The main entry point is
//! [`FeatureExtractor`], configured through [`ExtractorConfig`]; the
//! [`extract_features`] convenience function covers the default case.
//!
//! Extraction never fails. Lexical and host features are pure string
//! work; the content and reputation features each degrade to a
//! documented sentinel when their network call fails or the matching
//! credential is absent.
//!
//! # Example
//!
//! ```no_run
//! use hamus_core::features::{ExtractorConfig, FeatureExtractor};
//!
//! # async fn run() {
//! let config = ExtractorConfig::builder()
//!     .page_rank_key("opr-token")
//!     .timeout(5)
//!     .build();
//! let features = FeatureExtractor::with_config(config)
//!     .extract("https://example.com/login")
//!     .await;
//! assert_eq!(features.as_f32_vec().len(), 20);
//! # }
//! ```

use serde::Serialize;

use crate::content::{PageSignals, page_signals};
use crate::fetch::FetchConfig;
use crate::host::UrlParts;
use crate::lexical;
use crate::reputation::{LOOKUP_UNAVAILABLE, LookupConfig, domain_age, page_rank, search_index};

/// Number of entries in the feature vector.
pub const FEATURE_COUNT: usize = 20;

/// The fixed feature vector extracted from a URL.
///
/// Field order here mirrors the training-time vector layout; use
/// [`UrlFeatures::as_f32_vec`] to flatten in that order and
/// [`UrlFeatures::feature_names`] for the matching labels. The layout is
/// a contract with the consuming model, not a free design choice.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UrlFeatures {
    /// Search-engine indexing status: 0 indexed, 1 not indexed,
    /// -1 lookup blocked or failed.
    pub search_index: f32,
    /// Page-rank score of the registrable domain; 0 unranked,
    /// -1 lookup failed or no key configured.
    pub page_rank: f32,
    /// Occurrences of "www" in the lowercased URL.
    pub nb_www: f32,
    /// Ratio of digits to total characters in the URL.
    pub ratio_digits_url: f32,
    /// 1 when the registrable-domain label appears in the page title.
    pub domain_in_title: f32,
    /// Number of `<a>` elements on the fetched page.
    pub nb_hyperlinks: f32,
    /// 1 when the URL contains an `@`.
    pub at_symbol: f32,
    /// Age of the registrable domain in days; -2 no creation date,
    /// -1 lookup failed or no key configured.
    pub domain_age: f32,
    /// 1 when the hostname is an IPv4 literal.
    pub ip_literal: f32,
    /// Occurrences of `?` in the URL.
    pub nb_qm: f32,
    /// Character length of the URL.
    pub length_url: f32,
    /// Share of page hyperlinks pointing back at the URL's host.
    pub ratio_internal_hyperlinks: f32,
    /// Occurrences of `/` in the URL.
    pub nb_slash: f32,
    /// Character length of the hostname.
    pub length_hostname: f32,
    /// Occurrences of `=` in the URL.
    pub nb_eq: f32,
    /// Ratio of digits to total characters in the hostname.
    pub ratio_digits_host: f32,
    /// Length of the shortest hostname label (split on `.` and `-`).
    pub shortest_word_host: f32,
    /// 1 when the hostname contains a hyphen.
    pub prefix_suffix: f32,
    /// Length of the longest alphanumeric token in the path.
    pub longest_word_path: f32,
    /// 1 when the public suffix appears inside the subdomain.
    pub tld_in_subdomain: f32,
}

impl UrlFeatures {
    /// Flattens the features into the training-time order.
    pub fn as_f32_vec(&self) -> Vec<f32> {
        vec![
            self.search_index,
            self.page_rank,
            self.nb_www,
            self.ratio_digits_url,
            self.domain_in_title,
            self.nb_hyperlinks,
            self.at_symbol,
            self.domain_age,
            self.ip_literal,
            self.nb_qm,
            self.length_url,
            self.ratio_internal_hyperlinks,
            self.nb_slash,
            self.length_hostname,
            self.nb_eq,
            self.ratio_digits_host,
            self.shortest_word_host,
            self.prefix_suffix,
            self.longest_word_path,
            self.tld_in_subdomain,
        ]
    }

    /// Labels matching [`UrlFeatures::as_f32_vec`] position by position.
    pub fn feature_names() -> [&'static str; FEATURE_COUNT] {
        [
            "search_index",
            "page_rank",
            "nb_www",
            "ratio_digits_url",
            "domain_in_title",
            "nb_hyperlinks",
            "at_symbol",
            "domain_age",
            "ip_literal",
            "nb_qm",
            "length_url",
            "ratio_internal_hyperlinks",
            "nb_slash",
            "length_hostname",
            "nb_eq",
            "ratio_digits_host",
            "shortest_word_host",
            "prefix_suffix",
            "longest_word_path",
            "tld_in_subdomain",
        ]
    }
}

/// API credentials for the keyed reputation lookups.
///
/// A missing key skips its lookup entirely; the corresponding feature
/// stays at the unavailable sentinel. Keys are always supplied by the
/// caller, never embedded.
#[derive(Debug, Clone, Default)]
pub struct ApiKeys {
    /// Open PageRank style API token.
    pub page_rank: Option<String>,
    /// WHOIS-data service API token.
    pub whois: Option<String>,
}

/// Configuration for feature extraction.
///
/// # Example
///
/// ```rust
/// use hamus_core::features::ExtractorConfig;
///
/// let config = ExtractorConfig::builder()
///     .whois_key("whois-token")
///     .timeout(10)
///     .offline(false)
///     .build();
/// assert_eq!(config.fetch.timeout, 10);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ExtractorConfig {
    /// Credentials for the keyed lookups.
    pub keys: ApiKeys,
    /// Page fetch settings (content-derived features).
    pub fetch: FetchConfig,
    /// Reputation lookup settings.
    pub lookup: LookupConfig,
    /// Skip all network work, leaving sentinels and zeros.
    pub offline: bool,
}

impl ExtractorConfig {
    /// Creates a new builder for ExtractorConfig.
    pub fn builder() -> ExtractorConfigBuilder {
        ExtractorConfigBuilder::new()
    }
}

/// Builder for ExtractorConfig.
///
/// Provides a fluent API for configuring extraction.
pub struct ExtractorConfigBuilder {
    config: ExtractorConfig,
}

impl ExtractorConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self { config: ExtractorConfig::default() }
    }

    /// Sets the page-rank API token.
    pub fn page_rank_key(mut self, value: impl Into<String>) -> Self {
        self.config.keys.page_rank = Some(value.into());
        self
    }

    /// Sets the WHOIS API token.
    pub fn whois_key(mut self, value: impl Into<String>) -> Self {
        self.config.keys.whois = Some(value.into());
        self
    }

    /// Sets the page fetch timeout in seconds.
    pub fn timeout(mut self, value: u64) -> Self {
        self.config.fetch.timeout = value;
        self
    }

    /// Sets the reputation lookup timeout in seconds.
    pub fn lookup_timeout(mut self, value: u64) -> Self {
        self.config.lookup.timeout = value;
        self
    }

    /// Sets the User-Agent for the page fetch.
    pub fn user_agent(mut self, value: impl Into<String>) -> Self {
        self.config.fetch.user_agent = value.into();
        self
    }

    /// Sets whether to skip all network work.
    pub fn offline(mut self, value: bool) -> Self {
        self.config.offline = value;
        self
    }

    /// Builds the config.
    pub fn build(self) -> ExtractorConfig {
        self.config
    }
}

impl Default for ExtractorConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Extracts the feature vector a phishing classifier consumes.
pub struct FeatureExtractor {
    config: ExtractorConfig,
}

impl FeatureExtractor {
    /// Creates an extractor with default settings and no API keys.
    pub fn new() -> Self {
        Self { config: ExtractorConfig::default() }
    }

    /// Creates an extractor with a custom configuration.
    pub fn with_config(config: ExtractorConfig) -> Self {
        Self { config }
    }

    /// Extracts all features for a URL.
    ///
    /// Never fails: every fallible sub-computation degrades to its
    /// documented sentinel. The page fetch and the three reputation
    /// lookups are independent and run concurrently.
    pub async fn extract(&self, url: &str) -> UrlFeatures {
        let parts = UrlParts::parse(url);

        let (signals, search, rank, age) = if self.config.offline {
            (
                PageSignals::default(),
                LOOKUP_UNAVAILABLE,
                LOOKUP_UNAVAILABLE,
                LOOKUP_UNAVAILABLE,
            )
        } else {
            self.gather_remote(url, &parts).await
        };

        UrlFeatures {
            search_index: search,
            page_rank: rank,
            nb_www: lexical::count_www(url) as f32,
            ratio_digits_url: lexical::digit_ratio(url),
            domain_in_title: f32::from(signals.domain_in_title),
            nb_hyperlinks: signals.hyperlink_count as f32,
            at_symbol: f32::from(url.contains('@')),
            domain_age: age,
            ip_literal: f32::from(parts.is_ipv4_literal()),
            nb_qm: lexical::count_char(url, '?') as f32,
            length_url: lexical::char_length(url) as f32,
            ratio_internal_hyperlinks: signals.internal_link_ratio,
            nb_slash: lexical::count_char(url, '/') as f32,
            length_hostname: lexical::char_length(&parts.hostname) as f32,
            nb_eq: lexical::count_char(url, '=') as f32,
            ratio_digits_host: lexical::digit_ratio(&parts.hostname),
            shortest_word_host: lexical::shortest_host_label(&parts.hostname) as f32,
            prefix_suffix: f32::from(parts.hostname.contains('-')),
            longest_word_path: lexical::longest_path_token(&parts.path) as f32,
            tld_in_subdomain: f32::from(lexical::tld_in_subdomain(&parts.suffix, &parts.subdomain)),
        }
    }

    /// Runs the page fetch and the reputation lookups concurrently.
    async fn gather_remote(&self, url: &str, parts: &UrlParts) -> (PageSignals, f32, f32, f32) {
        let registrable = parts.registrable_domain();

        let rank = async {
            match &self.config.keys.page_rank {
                Some(key) if !registrable.is_empty() => page_rank(key, &registrable, &self.config.lookup).await,
                _ => LOOKUP_UNAVAILABLE,
            }
        };

        let age = async {
            match &self.config.keys.whois {
                Some(key) if !registrable.is_empty() => domain_age(key, &registrable, &self.config.lookup).await,
                _ => LOOKUP_UNAVAILABLE,
            }
        };

        tokio::join!(
            page_signals(url, parts, &self.config.fetch),
            search_index(url, &self.config.lookup),
            rank,
            age,
        )
    }
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience function: extract with default settings and no API keys.
///
/// Reputation features that need a credential stay at their unavailable
/// sentinel.
pub async fn extract_features(url: &str) -> UrlFeatures {
    FeatureExtractor::new().extract(url).await
}
