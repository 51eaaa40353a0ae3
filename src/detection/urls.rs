use regex::Regex;
use std::sync::OnceLock;

fn url_regex() -> &'static Regex {
    static URL_REGEX: OnceLock<Regex> = OnceLock::new();
    URL_REGEX.get_or_init(|| {
        Regex::new(r"(?i)(?:https?://|www\.)\S+").expect("URL pattern is a valid regex")
    })
}

/// URL-looking substrings of the raw text, in order of appearance.
pub fn find_urls(text: &str) -> Vec<&str> {
    url_regex().find_iter(text).map(|m| m.as_str()).collect()
}

/// Whether `token` contains anything that looks like a URL.
pub fn looks_like_url(token: &str) -> bool {
    url_regex().is_match(token)
}

/// Host part of a matched URL: scheme and `www.` removed, cut at the first `/`,
/// lower-cased.
pub fn extract_host(url: &str) -> String {
    let lower = url.to_lowercase();
    let without_scheme = lower
        .strip_prefix("https://")
        .or_else(|| lower.strip_prefix("http://"))
        .unwrap_or(&lower);
    let without_www = without_scheme
        .strip_prefix("www.")
        .unwrap_or(without_scheme);

    without_www
        .split('/')
        .next()
        .unwrap_or_default()
        .to_string()
}

/// A host is trusted when any allowlisted domain occurs inside it.
pub fn is_trusted_host<S: AsRef<str>>(host: &str, trusted_domains: &[S]) -> bool {
    let host = host.to_lowercase();
    trusted_domains
        .iter()
        .map(AsRef::<str>::as_ref)
        .any(|domain| !domain.is_empty() && host.contains(&domain.to_lowercase()))
}

/// URLs in the raw text whose host is not on the allowlist.
///
/// Repeated identical URLs are reported once per occurrence.
pub fn detect_urls<S: AsRef<str>>(text: &str, trusted_domains: &[S]) -> Vec<String> {
    find_urls(text)
        .into_iter()
        .filter(|url| {
            let host = extract_host(url);
            let trusted = is_trusted_host(&host, trusted_domains);
            if trusted {
                log::debug!("Skipping trusted url {} (host {})", url, host);
            }
            !trusted
        })
        .map(str::to_string)
        .collect()
}
