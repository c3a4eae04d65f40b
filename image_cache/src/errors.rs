use crawler::errors::CrawlerError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImageCacheError {
    #[error("Payload of {0} bytes is not a recognized image format")]
    UnrecognizedImageFormat(usize),
    #[error("Failed to download image")]
    DownloadFailed(#[from] CrawlerError),
}
