mod cache;
pub mod config;
pub mod errors;
pub mod key;
pub mod memory_cache;
mod request_cache;
pub mod traits;

pub use cache::{FetchedImage, ImageCache, ImageSource};
pub use request_cache::RequestImageCache;
