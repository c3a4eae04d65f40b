use axum::http::{HeaderValue, Method};
use tower::{
    ServiceBuilder,
    layer::util::{Identity, Stack},
};
use tower_http::cors::{AllowOrigin, CorsLayer};

pub(crate) fn build_service_layers(
    allowed_origin: Option<HeaderValue>,
) -> ServiceBuilder<Stack<CorsLayer, Identity>> {
    let allow_origin = match allowed_origin {
        Some(origin) => AllowOrigin::exact(origin),
        None => AllowOrigin::any(),
    };

    let cors_layer = CorsLayer::new()
        .allow_methods([Method::GET])
        .allow_origin(allow_origin);

    ServiceBuilder::new().layer(cors_layer)
}
