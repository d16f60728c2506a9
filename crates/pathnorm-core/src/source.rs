//! Where the raw URL comes from, and how the path is cut out of it.

use url::Url;

/// Anything that can hand the normalizer a raw request URL.
pub trait UrlSource {
    fn raw_url(&self) -> &str;
}

impl UrlSource for str {
    fn raw_url(&self) -> &str {
        self
    }
}

impl UrlSource for String {
    fn raw_url(&self) -> &str {
        self
    }
}

/// The URL fields of an incoming request.
///
/// Routers rewrite `url` as a request travels down the middleware chain;
/// `original_url` keeps what the client actually sent and wins when it is
/// present and non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestInfo {
    pub original_url: Option<String>,
    pub url: String,
}

impl RequestInfo {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            original_url: None,
            url: url.into(),
        }
    }

    pub fn with_original_url(mut self, original_url: impl Into<String>) -> Self {
        self.original_url = Some(original_url.into());
        self
    }
}

impl UrlSource for RequestInfo {
    fn raw_url(&self) -> &str {
        self.original_url
            .as_deref()
            .filter(|u| !u.is_empty())
            .unwrap_or(&self.url)
    }
}

/// Return the path component of `raw`, without query string or fragment.
///
/// The path is sliced out of the input verbatim: dot segments and
/// non-ASCII characters are kept, so `https://host/a/../b?c` and `/a/../b?c`
/// yield the same label. `Url::parse` only decides whether `raw` carries a
/// `scheme://authority` prefix to skip.
pub fn extract_path(raw: &str) -> String {
    let rest = match after_scheme(raw) {
        Some(after) => match after.strip_prefix("//") {
            Some(authority) => {
                let start = authority.find(['/', '?', '#']).unwrap_or(authority.len());
                let path = cut_query(&authority[start..]);
                return if path.is_empty() { "/".to_string() } else { path.to_string() };
            }
            None => after,
        },
        None => raw,
    };
    cut_query(rest).to_string()
}

/// The text after `scheme:` when `raw` is an absolute, hierarchical URL.
fn after_scheme(raw: &str) -> Option<&str> {
    let url = Url::parse(raw).ok().filter(|u| !u.cannot_be_a_base())?;
    let scheme = url.scheme();
    raw.get(..scheme.len())
        .filter(|s| s.eq_ignore_ascii_case(scheme))?;
    raw[scheme.len()..].strip_prefix(':')
}

fn cut_query(s: &str) -> &str {
    let end = s.find(['?', '#']).unwrap_or(s.len());
    &s[..end]
}
