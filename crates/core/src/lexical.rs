//! Pure string features over the URL and its parts.
//!
//! Everything in this module is a deterministic function of its input
//! with no failure mode: counts are exact substring-occurrence counts,
//! ratios are 0 when the denominator is 0, and word-length features
//! default to 0 when the split produces nothing.

use regex::Regex;

/// Counts non-overlapping occurrences of `www` in the lowercased URL.
///
/// `http://www.www.example.com` counts 2; `wwww` counts 1.
pub fn count_www(url: &str) -> usize {
    url.to_lowercase().matches("www").count()
}

/// Counts occurrences of a single character.
pub fn count_char(s: &str, ch: char) -> usize {
    s.chars().filter(|c| *c == ch).count()
}

/// Ratio of ASCII digits to total characters; 0 for the empty string.
pub fn digit_ratio(s: &str) -> f32 {
    let total = s.chars().count();
    if total == 0 {
        return 0.0;
    }
    let digits = s.chars().filter(|c| c.is_ascii_digit()).count();
    digits as f32 / total as f32
}

/// Character length of a string.
pub fn char_length(s: &str) -> usize {
    s.chars().count()
}

/// Length of the shortest hostname label, splitting on `.` and `-`.
///
/// Returns 0 when the hostname has no non-empty labels.
pub fn shortest_host_label(hostname: &str) -> usize {
    hostname
        .split(['.', '-'])
        .filter(|part| !part.is_empty())
        .map(|part| part.chars().count())
        .min()
        .unwrap_or(0)
}

/// Length of the longest alphanumeric token in the path.
///
/// Tokens are maximal runs of alphanumeric characters; everything else
/// (slashes, dots, underscores, percent signs) separates them. Returns 0
/// for an empty or token-free path.
pub fn longest_path_token(path: &str) -> usize {
    let token = Regex::new(r"[0-9A-Za-z]+").unwrap();
    token
        .find_iter(path)
        .map(|m| m.as_str().chars().count())
        .max()
        .unwrap_or(0)
}

/// Whether the public suffix appears inside the subdomain.
///
/// `com` inside `com-secure` (as in `com-secure.example.net`) is the
/// classic impersonation pattern this flags. Empty parts never match.
pub fn tld_in_subdomain(suffix: &str, subdomain: &str) -> bool {
    !suffix.is_empty() && !subdomain.is_empty() && subdomain.contains(suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("http://www.example.com", 1)]
    #[case("http://www.www.example.com", 2)]
    #[case("http://example.com/wwww", 1)]
    #[case("http://WWW.example.com", 1)]
    #[case("http://example.com", 0)]
    fn test_count_www(#[case] url: &str, #[case] expected: usize) {
        assert_eq!(count_www(url), expected);
    }

    #[rstest]
    #[case("http://example.com/a/b/c", '/', 5)]
    #[case("http://example.com/?a=1&b=2", '=', 2)]
    #[case("http://example.com/??", '?', 2)]
    #[case("http://example.com", '@', 0)]
    fn test_count_char(#[case] s: &str, #[case] ch: char, #[case] expected: usize) {
        assert_eq!(count_char(s, ch), expected);
    }

    #[test]
    fn test_digit_ratio() {
        assert_eq!(digit_ratio("abcd1234"), 0.5);
        assert_eq!(digit_ratio("abcd"), 0.0);
        assert_eq!(digit_ratio("1234"), 1.0);
        assert_eq!(digit_ratio(""), 0.0);
    }

    #[rstest]
    #[case("www.example.com", 3)]
    #[case("my-bank.example.com", 2)]
    #[case("a.example.com", 1)]
    #[case("", 0)]
    #[case("...", 0)]
    fn test_shortest_host_label(#[case] hostname: &str, #[case] expected: usize) {
        assert_eq!(shortest_host_label(hostname), expected);
    }

    #[rstest]
    #[case("/account/verify-login", 7)]
    #[case("/a/bb/ccc", 3)]
    #[case("/under_score", 5)]
    #[case("/", 0)]
    #[case("", 0)]
    fn test_longest_path_token(#[case] path: &str, #[case] expected: usize) {
        assert_eq!(longest_path_token(path), expected);
    }

    #[test]
    fn test_tld_in_subdomain() {
        assert!(tld_in_subdomain("com", "com-secure"));
        assert!(tld_in_subdomain("com", "paypal.com.login"));
        assert!(!tld_in_subdomain("com", "www"));
        assert!(!tld_in_subdomain("", ""));
        assert!(!tld_in_subdomain("com", ""));
    }
}
