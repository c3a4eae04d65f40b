mod routes;
mod service_layers;

use std::sync::Arc;

use axum::{Router, http::HeaderValue, routing::get};
use clap::Parser;
use image_cache::{ImageCache, RequestImageCache, config::ImageCacheConfig};
use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tracing::info;
use utils::logger::configure_logger;

use crate::{routes::image::image_handler, service_layers::build_service_layers};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[command(about = "Serve images through the in-memory request cache")]
struct Cli {
    #[arg(long, env = "API_HOST", default_value = "0.0.0.0")]
    host: String,

    #[arg(long, env = "API_PORT", default_value_t = 8080)]
    port: u16,

    /// Origin allowed by CORS, any origin when unset
    #[arg(long, env = "API_ALLOWED_ORIGIN")]
    allowed_origin: Option<HeaderValue>,

    #[command(flatten)]
    cache: ImageCacheConfig,
}

pub(crate) struct ServerState {
    images: ImageCache,
}

fn build_router(state: Arc<ServerState>, allowed_origin: Option<HeaderValue>) -> Router {
    Router::new()
        .route("/image", get(image_handler))
        .layer(build_service_layers(allowed_origin))
        .with_state(state)
}

#[tokio::main]
async fn main() {
    configure_logger();

    let cli = Cli::parse();

    let state = Arc::new(ServerState {
        images: ImageCache::new(Arc::new(RequestImageCache::new(&cli.cache))),
    });

    let app = build_router(state, cli.allowed_origin);

    let address = format!("{}:{}", cli.host, cli.port);
    let listener = TcpListener::bind(&address)
        .await
        .expect("Failed to bind API listener");

    info!("Serving images on {}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
        .expect("API server failed");

    metrics::shutdown();
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{Body, to_bytes},
        http::{Request as HttpRequest, StatusCode, header},
    };
    use crawler::request::Request;
    use tower::ServiceExt;

    use super::*;

    const PNG: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

    fn router_with_cached_png(url: &str) -> Router {
        let images = ImageCache::new(Arc::new(RequestImageCache::default()));
        images
            .cache()
            .store(PNG.to_vec(), &Request::builder().set_url(url).build())
            .unwrap();

        build_router(Arc::new(ServerState { images }), None)
    }

    #[tokio::test]
    async fn serves_cached_image_with_content_type() {
        let app = router_with_cached_png("https://example.com/a.png");

        let response = app
            .oneshot(
                HttpRequest::builder()
                    .uri("/image?url=https%3A%2F%2Fexample.com%2Fa.png")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], PNG);
    }

    #[tokio::test]
    async fn rejects_missing_url() {
        let app = router_with_cached_png("https://example.com/a.png");

        let response = app
            .oneshot(
                HttpRequest::builder()
                    .uri("/image?id=1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
