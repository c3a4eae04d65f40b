use crate::traits::{CachePolicy, HttpMethod};

#[derive(Debug, Clone, Default)]
pub struct Request {
    pub(crate) method: HttpMethod,
    pub(crate) url: String,
    pub(crate) body: Option<String>,
    pub(crate) headers: Option<Vec<(String, String)>>,
    pub(crate) cache_policy: CachePolicy,
}

pub struct RequestBuilder {
    request: Request,
}

impl Request {
    pub fn builder() -> RequestBuilder {
        RequestBuilder::new()
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn cache_policy(&self) -> CachePolicy {
        self.cache_policy
    }
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self {
            request: Request::default(),
        }
    }

    pub fn set_method(mut self, method: HttpMethod) -> Self {
        self.request.method = method;

        self
    }

    pub fn set_url(mut self, url: impl Into<String>) -> Self {
        self.request.url = url.into();

        self
    }

    pub fn set_body(mut self, body: String) -> Self {
        self.request.body = Some(body);

        self
    }

    pub fn set_headers(mut self, headers: &[(String, String)]) -> Self {
        self.request.headers = Some(headers.to_vec());

        self
    }

    pub fn set_cache_policy(mut self, cache_policy: CachePolicy) -> Self {
        self.request.cache_policy = cache_policy;

        self
    }

    pub fn build(self) -> Request {
        self.request
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults_to_cacheable_get() {
        let request = Request::builder()
            .set_url("https://example.com/a.png")
            .build();

        assert_eq!(request.url(), "https://example.com/a.png");
        assert_eq!(request.method(), HttpMethod::GET);
        assert_eq!(request.cache_policy(), CachePolicy::UseProtocolCachePolicy);
        assert!(request.body.is_none());
        assert!(request.headers.is_none());
    }

    #[test]
    fn builder_sets_every_field() {
        let headers = vec![("accept".to_string(), "image/*".to_string())];
        let request = RequestBuilder::new()
            .set_method(HttpMethod::POST)
            .set_url("https://example.com/render")
            .set_body("{}".into())
            .set_headers(&headers)
            .set_cache_policy(CachePolicy::ReloadIgnoringCacheData)
            .build();

        assert_eq!(request.method(), HttpMethod::POST);
        assert_eq!(request.body.as_deref(), Some("{}"));
        assert_eq!(request.headers, Some(headers));
        assert!(!request.cache_policy().allows_cached_data());
    }
}
