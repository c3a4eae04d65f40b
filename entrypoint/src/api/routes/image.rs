use std::sync::Arc;

use crate::{ServerState, routes::error_message_erasure::ApiError};

use axum::body::Body;
use axum::debug_handler;
use axum::extract::Query;
use axum::{extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::WithRejection;
use crawler::{request::Request, traits::CachePolicy};
use reqwest::header;
use serde::Deserialize;
use tracing::debug;

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct Payload {
    url: String,
    #[serde(default)]
    reload: bool,
}

#[debug_handler]
pub(crate) async fn image_handler(
    State(state): State<Arc<ServerState>>,
    WithRejection(Query(query), _): WithRejection<Query<Payload>, ApiError>,
) -> Result<impl IntoResponse, StatusCode> {
    let cache_policy = if query.reload {
        CachePolicy::ReloadIgnoringCacheData
    } else {
        CachePolicy::UseProtocolCachePolicy
    };

    let request = Request::builder()
        .set_url(query.url)
        .set_cache_policy(cache_policy)
        .build();

    let fetched = match state.images.get_image(request).await {
        Ok(fetched) => fetched,
        Err(err) => {
            debug!("Image unavailable: {}", err);
            return Ok(StatusCode::NOT_FOUND.into_response());
        }
    };

    let headers = [(header::CONTENT_TYPE, fetched.image.mime_type.clone())];

    let body = Body::from(fetched.image.image.clone());

    Ok((headers, body).into_response())
}
