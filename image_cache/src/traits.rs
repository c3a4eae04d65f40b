use std::sync::Arc;

use common::image_cache::CachedImageObject;

use crate::key::CacheKey;

/// Eviction-capable key-value container backing a `RequestImageCache`.
///
/// Implementations decide when entries disappear; callers must treat any
/// entry as possibly evicted between an insert and a later get.
pub trait CacheMethod: Send + Sync {
    fn get_item(&self, cache_key: &CacheKey) -> Option<Arc<CachedImageObject>>;
    fn insert_item(&self, cache_key: CacheKey, image: Arc<CachedImageObject>);
    fn clear(&self);
    fn len(&self) -> usize;
    fn total_cost(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
