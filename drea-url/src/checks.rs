// Per-constraint URL checks
//
// Every check receives the lower-cased URL.

use crate::constraints::Length;
use once_cell::sync::Lazy;
use regex::Regex;

/// Permissive scheme + authority pattern every URL must match first
pub static BASE_URL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[a-zA-Z][a-zA-Z0-9+.-]*:(?://)?[^\s$.?#].[^\s]*\b").unwrap()
});

static FRAGMENT_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"#([^\s?#]+)").unwrap());

static QUERY_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\?([^#\s]+)").unwrap());

static PORT_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r":([0-9]+)(?:/|$)").unwrap());

static DOMAIN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b([a-zA-Z0-9.-]+\.[a-zA-Z]{2,63}|[0-9]{1,3}(?:\.[0-9]{1,3}){3})\b").unwrap()
});

static PATH_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.-]*://[^/?#]+(/[^?#]*)?").unwrap());

static REPEATED_SLASHES: Lazy<Regex> = Lazy::new(|| Regex::new(r"/{2,}").unwrap());

/// Scheme (text before the first `:`) is one of `protocols`
pub fn check_protocol(url: &str, protocols: &[String]) -> bool {
    let scheme = url.split(':').next().unwrap_or_default();
    protocols.iter().any(|p| p.to_lowercase() == scheme)
}

/// A fragment is optional; when present it must be allowed
pub fn check_fragment(url: &str, allowed: bool) -> bool {
    allowed || !FRAGMENT_REGEX.is_match(url)
}

/// A query is optional; when present it must be allowed
pub fn check_query(url: &str, allowed: bool) -> bool {
    allowed || !QUERY_REGEX.is_match(url)
}

/// A port must be present and, unless `ports` is empty, listed
pub fn check_port(url: &str, ports: &[String]) -> bool {
    match PORT_REGEX.captures(url) {
        None => false,
        Some(_) if ports.is_empty() => true,
        Some(caps) => ports.iter().any(|p| p == &caps[1]),
    }
}

/// The first domain or IPv4 literal is one of `domains`; an empty list
/// accepts anything
pub fn check_domain(url: &str, domains: &[String]) -> bool {
    if domains.is_empty() {
        return true;
    }

    match DOMAIN_REGEX.captures(url) {
        Some(caps) => {
            let host = &caps[1];
            domains.iter().any(|d| d.to_lowercase() == host)
        }
        None => false,
    }
}

/// Length in characters, exclusive of the bounds
pub fn check_length(url: &str, length: &Length) -> bool {
    let len = url.chars().count() as f64;
    match *length {
        Length::Above(min) => len > min,
        Length::Between(min, max) => len > min && len < max,
    }
}

/// With `allowed == false`, a path is only accepted when it collapses to `/`
pub fn check_path(url: &str, allowed: bool) -> bool {
    if allowed {
        return true;
    }

    match PATH_REGEX.captures(url).and_then(|caps| caps.get(1)) {
        Some(path) => REPEATED_SLASHES.replace_all(path.as_str(), "/") == "/",
        None => true,
    }
}
