//! Content-derived page signals.
//!
//! Three of the feature vector's entries come from the target page
//! itself: whether the registrable-domain label appears in the page
//! title, how many hyperlinks the page carries, and what share of those
//! hyperlinks point back at the same host. They are computed from a
//! single bounded GET of the page; any network or parse failure
//! collapses all three to their zero defaults.

use crate::fetch::{FetchConfig, fetch_url};
use crate::host::UrlParts;
use crate::parse::Document;

/// Signals read from the fetched page.
///
/// The default value (all zeros) doubles as the degraded result when the
/// page cannot be fetched or parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PageSignals {
    /// Whether the registrable-domain label appears in the `<title>`,
    /// case-insensitively.
    pub domain_in_title: bool,
    /// Number of `<a>` elements on the page, with or without `href`.
    pub hyperlink_count: usize,
    /// Share of hyperlinks whose `href` contains the hostname; 0 when the
    /// page has no hyperlinks.
    pub internal_link_ratio: f32,
}

impl PageSignals {
    /// Computes page signals from an already-parsed document.
    ///
    /// `domain` is the registrable-domain label (`example` for
    /// `www.example.com`); `hostname` is the full host the internal-link
    /// test matches against. Empty inputs never match.
    pub fn from_document(doc: &Document, domain: &str, hostname: &str) -> Self {
        let domain_in_title = if domain.is_empty() {
            false
        } else {
            doc.title()
                .map(|title| title.to_lowercase().contains(&domain.to_lowercase()))
                .unwrap_or(false)
        };

        let anchors = doc.select("a").unwrap_or_default();
        let hyperlink_count = anchors.len();

        // A link is "internal" when its href mentions the page's own host.
        // Relative hrefs do not, and count as external.
        let internal = if hostname.is_empty() {
            0
        } else {
            anchors
                .iter()
                .filter(|a| a.attr("href").is_some_and(|href| href.contains(hostname)))
                .count()
        };

        let internal_link_ratio = if hyperlink_count > 0 {
            internal as f32 / hyperlink_count as f32
        } else {
            0.0
        };

        Self { domain_in_title, hyperlink_count, internal_link_ratio }
    }
}

/// Fetches the page and computes its signals.
///
/// Never fails: fetch or parse errors yield `PageSignals::default()`.
pub async fn page_signals(url: &str, parts: &UrlParts, config: &FetchConfig) -> PageSignals {
    let Ok(html) = fetch_url(url, config).await else {
        return PageSignals::default();
    };
    let Ok(doc) = Document::parse(&html) else {
        return PageSignals::default();
    };

    PageSignals::from_document(&doc, &parts.domain, &parts.hostname)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE_HTML: &str = r#"
        <!DOCTYPE html>
        <html lang="en">
        <head><title>Example Bank - Sign in</title></head>
        <body>
            <a href="https://www.example.com/help">Help</a>
            <a href="https://www.example.com/about">About</a>
            <a href="https://cdn.other.net/asset">Asset</a>
            <a href="/relative">Relative</a>
        </body>
        </html>
    "#;

    #[test]
    fn test_signals_from_document() {
        let doc = Document::parse(PAGE_HTML).unwrap();
        let signals = PageSignals::from_document(&doc, "example", "www.example.com");

        assert!(signals.domain_in_title);
        assert_eq!(signals.hyperlink_count, 4);
        assert_eq!(signals.internal_link_ratio, 0.5);
    }

    #[test]
    fn test_domain_not_in_title() {
        let doc = Document::parse(PAGE_HTML).unwrap();
        let signals = PageSignals::from_document(&doc, "paypal", "www.paypal.com");

        assert!(!signals.domain_in_title);
        assert_eq!(signals.hyperlink_count, 4);
        assert_eq!(signals.internal_link_ratio, 0.0);
    }

    #[test]
    fn test_title_match_is_case_insensitive() {
        let doc = Document::parse("<html><head><title>EXAMPLE portal</title></head><body></body></html>").unwrap();
        let signals = PageSignals::from_document(&doc, "example", "example.com");

        assert!(signals.domain_in_title);
    }

    #[test]
    fn test_no_hyperlinks_yields_zero_ratio() {
        let doc = Document::parse("<html><body><p>Nothing to click</p></body></html>").unwrap();
        let signals = PageSignals::from_document(&doc, "example", "example.com");

        assert_eq!(signals.hyperlink_count, 0);
        assert_eq!(signals.internal_link_ratio, 0.0);
    }

    #[test]
    fn test_empty_domain_never_matches() {
        let doc = Document::parse(PAGE_HTML).unwrap();
        let signals = PageSignals::from_document(&doc, "", "");

        assert!(!signals.domain_in_title);
        assert_eq!(signals.internal_link_ratio, 0.0);
    }

    #[test]
    fn test_fetch_failure_degrades_to_default() {
        let parts = UrlParts::parse("http://127.0.0.1:9/login");
        let config = FetchConfig::default();

        let signals = std::thread::spawn(move || {
            tokio::runtime::Runtime::new()
                .unwrap()
                .block_on(page_signals("http://127.0.0.1:9/login", &parts, &config))
        })
        .join()
        .unwrap();

        assert_eq!(signals, PageSignals::default());
    }
}
