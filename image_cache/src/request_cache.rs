use std::sync::Arc;

use common::image_cache::CachedImageObject;
use crawler::request::Request;
use reqwest::header::HeaderValue;
use tracing::{debug, warn};

use crate::{
    config::ImageCacheConfig, errors::ImageCacheError, key::CacheKey, memory_cache::MemoryCache,
    traits::CacheMethod,
};

/// Request-keyed image cache over an eviction-capable store.
///
/// Any entry may be evicted by the store at any time, so a `lookup` miss only
/// means the caller has to fetch the image again.
pub struct RequestImageCache<S = MemoryCache> {
    store: S,
}

impl RequestImageCache<MemoryCache> {
    pub fn new(config: &ImageCacheConfig) -> Self {
        Self::with_store(MemoryCache::from_config(config))
    }
}

impl Default for RequestImageCache<MemoryCache> {
    fn default() -> Self {
        Self::new(&ImageCacheConfig::default())
    }
}

impl<S: CacheMethod> RequestImageCache<S> {
    pub fn with_store(store: S) -> Self {
        Self { store }
    }

    /// Returns the image cached for `request`, if still present.
    ///
    /// Requests whose cache policy ignores cached data always miss.
    pub fn lookup(&self, request: &Request) -> Option<Arc<CachedImageObject>> {
        if !request.cache_policy().allows_cached_data() {
            debug!("Skipping cache for {}", request.url());
            return None;
        }

        self.store.get_item(&CacheKey::from_request(request))
    }

    /// Caches `image_data` under the key derived from `request`, replacing
    /// any previous entry.
    ///
    /// Payloads that are not a recognized image format are rejected and leave
    /// the cache untouched.
    pub fn store(
        &self,
        image_data: Vec<u8>,
        request: &Request,
    ) -> Result<Arc<CachedImageObject>, ImageCacheError> {
        let cache_key = CacheKey::from_request(request);

        let image = match Self::recognize_image(image_data) {
            Ok(image) => Arc::new(image),
            Err(err) => {
                warn!("Refusing to cache {}: {}", cache_key, err);
                return Err(err);
            }
        };

        self.store.insert_item(cache_key, image.clone());

        Ok(image)
    }

    pub fn clear(&self) {
        self.store.clear();
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn total_cost(&self) -> usize {
        self.store.total_cost()
    }

    fn recognize_image(image_data: Vec<u8>) -> Result<CachedImageObject, ImageCacheError> {
        let format = image::guess_format(&image_data)
            .map_err(|_| ImageCacheError::UnrecognizedImageFormat(image_data.len()))?;

        Ok(CachedImageObject::new(
            HeaderValue::from_static(format.to_mime_type()),
            image_data,
        ))
    }
}

#[cfg(test)]
mod tests {
    use crawler::traits::CachePolicy;

    use super::*;

    const PNG: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";
    const GIF: &[u8] = b"GIF89a\x01\0\x01\0";

    fn new_cache() -> RequestImageCache {
        RequestImageCache::default()
    }

    fn request(url: &str) -> Request {
        Request::builder().set_url(url).build()
    }

    #[test]
    fn lookup_before_store_is_absent() {
        let cache = new_cache();

        assert!(cache.lookup(&request("https://example.com/a.png")).is_none());
    }

    #[test]
    fn store_then_lookup_returns_payload() {
        let cache = new_cache();
        let r = request("https://example.com/a.png");

        cache.store(PNG.to_vec(), &r).unwrap();

        let image = cache.lookup(&r).unwrap();
        assert_eq!(image.image, PNG);
        assert_eq!(image.mime_type, "image/png");
    }

    #[test]
    fn equal_keys_share_an_entry() {
        let cache = new_cache();

        cache
            .store(PNG.to_vec(), &request("https://example.com/a.png"))
            .unwrap();

        let image = cache.lookup(&request("https://EXAMPLE.com/a.png")).unwrap();
        assert_eq!(image.image, PNG);
    }

    #[test]
    fn distinct_keys_do_not_collide() {
        let cache = new_cache();
        let first = request("https://example.com/a.png");
        let second = request("https://example.com/b.gif");

        cache.store(PNG.to_vec(), &first).unwrap();
        cache.store(GIF.to_vec(), &second).unwrap();

        assert_eq!(cache.lookup(&first).unwrap().image, PNG);
        assert_eq!(cache.lookup(&second).unwrap().image, GIF);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn second_store_overwrites() {
        let cache = new_cache();
        let r = request("https://example.com/a");

        cache.store(PNG.to_vec(), &r).unwrap();
        cache.store(GIF.to_vec(), &r).unwrap();

        let image = cache.lookup(&r).unwrap();
        assert_eq!(image.image, GIF);
        assert_eq!(image.mime_type, "image/gif");
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn unrecognized_payload_is_rejected() {
        let cache = new_cache();
        let r = request("https://example.com/a.png");

        cache.store(PNG.to_vec(), &r).unwrap();
        let result = cache.store(b"<html></html>".to_vec(), &r);

        assert!(matches!(
            result,
            Err(ImageCacheError::UnrecognizedImageFormat(13))
        ));
        assert_eq!(cache.lookup(&r).unwrap().image, PNG);
    }

    #[test]
    fn reload_policy_bypasses_lookup() {
        let cache = new_cache();
        let reload = Request::builder()
            .set_url("https://example.com/a.png")
            .set_cache_policy(CachePolicy::ReloadIgnoringCacheData)
            .build();

        cache.store(PNG.to_vec(), &reload).unwrap();

        assert!(cache.lookup(&reload).is_none());
        assert!(cache.lookup(&request("https://example.com/a.png")).is_some());
    }

    #[test]
    fn clear_empties_the_cache() {
        let cache = new_cache();
        let r = request("https://example.com/a.png");

        cache.store(PNG.to_vec(), &r).unwrap();
        assert_eq!(cache.total_cost(), PNG.len());

        cache.clear();

        assert!(cache.is_empty());
        assert!(cache.lookup(&r).is_none());
    }
}
