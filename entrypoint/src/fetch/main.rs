use std::sync::Arc;

use clap::Parser;
use crawler::{request::Request, traits::CachePolicy};
use image_cache::{ImageCache, RequestImageCache, config::ImageCacheConfig};
use mimalloc::MiMalloc;
use tracing::{info, warn};
use utils::logger::configure_logger;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[command(about = "Fetch images through the in-memory request cache")]
struct Cli {
    /// Image URLs, repeat a URL to have it served from memory
    #[arg(required = true)]
    urls: Vec<String>,

    /// Ignore cached data and download every URL
    #[arg(long)]
    reload: bool,

    #[command(flatten)]
    cache: ImageCacheConfig,
}

#[tokio::main]
async fn main() {
    configure_logger();

    let cli = Cli::parse();

    let cache_policy = if cli.reload {
        CachePolicy::ReloadIgnoringCacheData
    } else {
        CachePolicy::UseProtocolCachePolicy
    };

    let images = ImageCache::new(Arc::new(RequestImageCache::new(&cli.cache)));

    for url in cli.urls {
        let request = Request::builder()
            .set_url(url.clone())
            .set_cache_policy(cache_policy)
            .build();

        match images.get_image(request).await {
            Ok(fetched) => info!(
                "{} from {:?}: {:?}, {} bytes",
                url,
                fetched.source,
                fetched.image.mime_type,
                fetched.image.cost()
            ),
            Err(err) => warn!("{}: {}", url, err),
        }
    }

    info!(
        "{} images cached, {} bytes",
        images.cache().len(),
        images.cache().total_cost()
    );

    metrics::shutdown();
}
