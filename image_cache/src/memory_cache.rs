use std::{
    num::NonZeroUsize,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use common::image_cache::CachedImageObject;
use lru::LruCache;
use tracing::debug;

use crate::{config::ImageCacheConfig, key::CacheKey, traits::CacheMethod};

struct Entries {
    images: LruCache<CacheKey, Arc<CachedImageObject>>,
    total_cost: usize,
}

/// LRU store bounded by entry count and total byte cost.
pub struct MemoryCache {
    // LruCache reorders on get, so reads need the lock too
    entries: Mutex<Entries>,
    total_cost_limit: usize,
}

impl MemoryCache {
    pub fn new(count_limit: usize, total_cost_limit: usize) -> Self {
        let capacity = NonZeroUsize::new(count_limit).unwrap_or(NonZeroUsize::MIN);

        Self {
            entries: Mutex::new(Entries {
                images: LruCache::new(capacity),
                total_cost: 0,
            }),
            total_cost_limit,
        }
    }

    pub fn from_config(config: &ImageCacheConfig) -> Self {
        Self::new(config.count_limit, config.total_cost_limit)
    }

    pub fn count_limit(&self) -> usize {
        self.lock().images.cap().get()
    }

    pub fn total_cost_limit(&self) -> usize {
        self.total_cost_limit
    }

    fn lock(&self) -> MutexGuard<'_, Entries> {
        // entries stay consistent even if a holder panicked
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl CacheMethod for MemoryCache {
    fn get_item(&self, cache_key: &CacheKey) -> Option<Arc<CachedImageObject>> {
        self.lock().images.get(cache_key).cloned()
    }

    fn insert_item(&self, cache_key: CacheKey, image: Arc<CachedImageObject>) {
        let cost = image.cost();
        let mut entries = self.lock();

        if let Some(previous) = entries.images.pop(&cache_key) {
            entries.total_cost -= previous.cost();
        }

        if cost > self.total_cost_limit {
            debug!(
                "Not retaining {} ({} bytes exceeds limit of {})",
                cache_key, cost, self.total_cost_limit
            );
            return;
        }

        while entries.total_cost + cost > self.total_cost_limit {
            let Some((evicted_key, evicted)) = entries.images.pop_lru() else {
                break;
            };

            debug!("Evicting {} to make room for {}", evicted_key, cache_key);
            entries.total_cost -= evicted.cost();
        }

        if let Some((evicted_key, evicted)) = entries.images.push(cache_key, image) {
            debug!("Evicting {} over count limit", evicted_key);
            entries.total_cost -= evicted.cost();
        }

        entries.total_cost += cost;
    }

    fn clear(&self) {
        let mut entries = self.lock();

        entries.images.clear();
        entries.total_cost = 0;
    }

    fn len(&self) -> usize {
        self.lock().images.len()
    }

    fn total_cost(&self) -> usize {
        self.lock().total_cost
    }
}
