//! External reputation lookups.
//!
//! Three of the feature vector's entries come from third-party services:
//! a search-engine indexing check, an Open PageRank style rank lookup,
//! and a WHOIS-based domain age. Each lookup is independently
//! fault-tolerant and returns a documented sentinel instead of an error;
//! the keyed lookups are skipped entirely when no credential is
//! configured (see the `features` module).
//!
//! Sentinel codes:
//!
//! | lookup       | value                                         |
//! |--------------|-----------------------------------------------|
//! | search index | 0 indexed, 1 not indexed, -1 blocked/failed   |
//! | page rank    | rank integer, 0 unranked, -1 failed/no key    |
//! | domain age   | days, -2 no creation date, -1 failed/no key   |

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::parse::Document;

/// Rank or age lookup failed, or no credential was supplied.
pub const LOOKUP_UNAVAILABLE: f32 = -1.0;
/// The registration record exists but carries no creation date.
pub const AGE_UNRECORDED: f32 = -2.0;
/// The URL is present in the search engine's index.
pub const INDEXED: f32 = 0.0;
/// The URL is absent from the search engine's index.
pub const NOT_INDEXED: f32 = 1.0;

const PAGE_RANK_ENDPOINT: &str = "https://openpagerank.com/api/v1.0/getPageRank";
const WHOIS_ENDPOINT: &str = "https://www.whoisxmlapi.com/whoisserver/WhoisService";
const SEARCH_ENDPOINT: &str = "https://www.google.com/search";

/// Configuration for reputation lookups.
///
/// Lookups tolerate a longer timeout than the page fetch since they hit
/// well-provisioned APIs rather than an arbitrary host.
#[derive(Debug, Clone)]
pub struct LookupConfig {
    /// Per-request timeout in seconds.
    pub timeout: u64,
    /// User-Agent sent to the search engine; API endpoints ignore it.
    pub user_agent: String,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            timeout: 10,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) \
                         Chrome/120.0 Safari/537.36"
                .to_string(),
        }
    }
}

fn lookup_client(config: &LookupConfig) -> Option<Client> {
    Client::builder()
        .timeout(Duration::from_secs(config.timeout))
        .build()
        .ok()
}

#[derive(Debug, Deserialize)]
struct PageRankResponse {
    response: Vec<PageRankEntry>,
}

#[derive(Debug, Deserialize)]
struct PageRankEntry {
    page_rank_integer: Option<f64>,
}

/// Looks up the Open PageRank score of a domain.
///
/// Returns the rank integer, 0 when the service knows the domain but has
/// no rank for it, and [`LOOKUP_UNAVAILABLE`] on any request or decode
/// failure.
pub async fn page_rank(key: &str, domain: &str, config: &LookupConfig) -> f32 {
    let Some(client) = lookup_client(config) else {
        return LOOKUP_UNAVAILABLE;
    };

    let response = client
        .get(PAGE_RANK_ENDPOINT)
        .header("API-OPR", key)
        .query(&[("domains[0]", domain)])
        .send()
        .await;

    let Ok(response) = response else {
        return LOOKUP_UNAVAILABLE;
    };
    let Ok(body) = response.json::<PageRankResponse>().await else {
        return LOOKUP_UNAVAILABLE;
    };

    match body.response.first().and_then(|entry| entry.page_rank_integer) {
        Some(rank) if rank != 0.0 => rank as f32,
        Some(_) => 0.0,
        None => 0.0,
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WhoisResponse {
    whois_record: Option<WhoisRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WhoisRecord {
    created_date: Option<String>,
    registry_data: Option<RegistryData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegistryData {
    created_date: Option<String>,
}

/// Looks up the age of a domain in days from its WHOIS creation date.
///
/// The record-level creation date takes priority; the registry-level one
/// is the fallback when the record's is missing or empty. Returns
/// [`AGE_UNRECORDED`] when neither is present or the date does not parse
/// as RFC 3339, and [`LOOKUP_UNAVAILABLE`] on any request or decode
/// failure.
pub async fn domain_age(key: &str, domain: &str, config: &LookupConfig) -> f32 {
    let Some(client) = lookup_client(config) else {
        return LOOKUP_UNAVAILABLE;
    };

    let response = client
        .get(WHOIS_ENDPOINT)
        .query(&[("apiKey", key), ("domainName", domain), ("outputFormat", "JSON")])
        .send()
        .await;

    let Ok(response) = response else {
        return LOOKUP_UNAVAILABLE;
    };
    let Ok(body) = response.json::<WhoisResponse>().await else {
        return LOOKUP_UNAVAILABLE;
    };

    let Some(record) = body.whois_record else {
        return AGE_UNRECORDED;
    };

    match creation_date(record).as_deref().and_then(days_since) {
        Some(days) => days,
        None => AGE_UNRECORDED,
    }
}

/// Picks the creation date out of a WHOIS record.
///
/// The record-level date wins unless it is missing or empty, in which
/// case the registry-level date stands in.
fn creation_date(record: WhoisRecord) -> Option<String> {
    record
        .created_date
        .filter(|date| !date.is_empty())
        .or_else(|| record.registry_data.and_then(|data| data.created_date))
}

/// Days elapsed since an RFC 3339 timestamp; `None` when it does not parse.
fn days_since(date: &str) -> Option<f32> {
    let created = OffsetDateTime::parse(date, &Rfc3339).ok()?;
    let elapsed = OffsetDateTime::now_utc() - created;
    Some(elapsed.whole_days() as f32)
}

/// Checks whether a URL is present in the search engine's index.
///
/// Issues a `site:<url>` query against the results endpoint and inspects
/// the returned markup. Returns [`INDEXED`], [`NOT_INDEXED`], or
/// [`LOOKUP_UNAVAILABLE`] when the engine blocks the request or the
/// request itself fails.
pub async fn search_index(url: &str, config: &LookupConfig) -> f32 {
    let Some(client) = lookup_client(config) else {
        return LOOKUP_UNAVAILABLE;
    };

    let query = format!("site:{}", url);
    let response = client
        .get(SEARCH_ENDPOINT)
        .header("User-Agent", &config.user_agent)
        .query(&[("q", query.as_str())])
        .send()
        .await;

    let Ok(response) = response else {
        return LOOKUP_UNAVAILABLE;
    };
    let Ok(body) = response.text().await else {
        return LOOKUP_UNAVAILABLE;
    };

    parse_search_results(&body)
}

/// Classifies a search results page.
///
/// Split out from [`search_index`] so the markup handling is testable
/// without network access.
fn parse_search_results(html: &str) -> f32 {
    if html.contains("Our systems have detected unusual traffic") {
        return LOOKUP_UNAVAILABLE;
    }

    let Ok(doc) = Document::parse(html) else {
        return NOT_INDEXED;
    };

    // The organic results container carries id "rso"; a result inside it
    // is an anchor with an href.
    match doc.select("#rso a[href]") {
        Ok(anchors) if !anchors.is_empty() => INDEXED,
        _ => NOT_INDEXED,
    }
}
