use axum::{
    http::{HeaderName, HeaderValue, Method},
    middleware,
    routing::get,
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::AppState;
use crate::middleware::{make_span_with_request_id, request_id_middleware, request_id::REQUEST_ID_HEADER};

/// Creates the proxy router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.cors_origin);

    Router::new()
        .route("/health", get(handlers::health_check))
        // Query-string form used by the original browser client
        .route("/api/movies", get(handlers::legacy_proxy))
        .nest("/api/v1", api_routes())
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(cors),
        )
}

/// Typed routes under /api/v1, one per upstream operation
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/:media_type/popular", get(handlers::popular))
        .route("/:media_type/search", get(handlers::search))
        .route("/:media_type/:id", get(handlers::details))
        .route("/:media_type/:id/credits", get(handlers::credits))
        .route("/:media_type/:id/recommendations", get(handlers::recommendations))
        .route("/:media_type/:id/watch/providers", get(handlers::watch_providers))
}

fn cors_layer(origin: &str) -> CorsLayer {
    let allow_origin = if origin == "*" {
        AllowOrigin::any()
    } else {
        match HeaderValue::from_str(origin) {
            Ok(value) => AllowOrigin::exact(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                AllowOrigin::list(Vec::<HeaderValue>::new())
            }
        }
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET])
        .allow_headers(Any)
        .expose_headers([HeaderName::from_static(REQUEST_ID_HEADER)])
}
