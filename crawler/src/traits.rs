use reqwest::header::HeaderMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HttpMethod {
    #[default]
    GET,
    POST,
}

/// How a request wants previously cached responses to be treated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CachePolicy {
    #[default]
    UseProtocolCachePolicy,
    /// Always go to the network, cached data must not satisfy this request
    ReloadIgnoringCacheData,
}

impl CachePolicy {
    pub fn allows_cached_data(&self) -> bool {
        match self {
            CachePolicy::UseProtocolCachePolicy => true,
            CachePolicy::ReloadIgnoringCacheData => false,
        }
    }
}

pub struct CrawlerResponse {
    pub raw_bytes: Vec<u8>,
    pub headers: HeaderMap,
}
