use std::sync::Arc;

use common::image_cache::CachedImageObject;
use crawler::{errors::CrawlerError, request::Request, unprotected::UnprotectedCrawler};
use metrics::{Metrics, put_metric};
use tracing::debug;

use crate::{errors::ImageCacheError, request_cache::RequestImageCache};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSource {
    Memory,
    Network,
}

pub struct FetchedImage {
    pub image: Arc<CachedImageObject>,
    pub source: ImageSource,
}

/// Serves images from a `RequestImageCache`, downloading them on a miss.
#[derive(Clone)]
pub struct ImageCache {
    cache: Arc<RequestImageCache>,
    crawler: UnprotectedCrawler,
}

impl ImageCache {
    pub fn new(cache: Arc<RequestImageCache>) -> Self {
        Self {
            cache,
            crawler: UnprotectedCrawler::new(),
        }
    }

    pub fn cache(&self) -> &RequestImageCache {
        &self.cache
    }

    async fn download_image(&self, request: Request) -> Result<Vec<u8>, CrawlerError> {
        let response = self.crawler.make_web_request(request).await?;

        Ok(response.raw_bytes)
    }

    pub async fn get_image(&self, request: Request) -> Result<FetchedImage, ImageCacheError> {
        if let Some(image) = self.cache.lookup(&request) {
            debug!("Memory cache hit for {}", request.url());
            put_metric!(Metrics::ImageCacheHit, 1);

            return Ok(FetchedImage {
                image,
                source: ImageSource::Memory,
            });
        }

        debug!("Memory cache miss, downloading {}", request.url());
        put_metric!(Metrics::ImageCacheMiss, 1);

        let downloaded_image = self.download_image(request.clone()).await?;

        let image = match self.cache.store(downloaded_image, &request) {
            Ok(image) => image,
            Err(err) => {
                put_metric!(Metrics::ImageCacheRejected, 1);
                return Err(err);
            }
        };

        let mime_type = image.mime_type.to_str().unwrap_or_default().to_string();
        put_metric!(Metrics::ImageCacheStore, 1, "mime_type" => mime_type);

        Ok(FetchedImage {
            image,
            source: ImageSource::Network,
        })
    }
}
