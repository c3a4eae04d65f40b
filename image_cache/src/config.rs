use clap::Args;

pub const DEFAULT_COUNT_LIMIT: usize = 256;
pub const DEFAULT_TOTAL_COST_LIMIT: usize = 64 * 1024 * 1024;

/// Limits handed to the memory store, the store owns eviction
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ImageCacheConfig {
    /// Maximum number of cached images
    #[arg(long, env = "IMAGE_CACHE_COUNT_LIMIT", default_value_t = DEFAULT_COUNT_LIMIT)]
    pub count_limit: usize,

    /// Maximum total size in bytes of all cached images
    #[arg(long, env = "IMAGE_CACHE_TOTAL_COST_LIMIT", default_value_t = DEFAULT_TOTAL_COST_LIMIT)]
    pub total_cost_limit: usize,
}

impl Default for ImageCacheConfig {
    fn default() -> Self {
        Self {
            count_limit: DEFAULT_COUNT_LIMIT,
            total_cost_limit: DEFAULT_TOTAL_COST_LIMIT,
        }
    }
}
