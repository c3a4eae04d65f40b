use std::fmt;

use crawler::request::Request;
use reqwest::Url;

/// Key under which an image is cached.
///
/// Only the request URL participates. The URL is normalized so that
/// spellings the server cannot tell apart share one entry: scheme and host
/// are lowercased, default ports are dropped and the fragment is removed.
/// URLs that fail to parse are keyed by their trimmed text.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn from_url(url: &str) -> Self {
        let url = url.trim();

        match Url::parse(url) {
            Ok(mut parsed) => {
                parsed.set_fragment(None);
                Self(parsed.into())
            }
            Err(_) => Self(url.to_string()),
        }
    }

    pub fn from_request(request: &Request) -> Self {
        Self::from_url(request.url())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&Request> for CacheKey {
    fn from(request: &Request) -> Self {
        Self::from_request(request)
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
