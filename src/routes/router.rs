//! Router Configuration
//!
//! Combines the API routes with the ambient layers that every request
//! passes through. Layer order (outermost first):
//!
//! 1. Request-id stamping and propagation (`x-request-id`, UUID v4)
//! 2. CORS
//! 3. Trace span per request (structured completion record)
//! 4. Error translation boundary
//! 5. Panic catching (panics surface as `INTERNAL_ERROR`)
//!
//! Unmatched requests fall through to the `ROUTE_NOT_FOUND` handler.

use axum::{body::Body, http::header, http::HeaderValue, http::Method, middleware, Router};
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::middleware::request_id::REQUEST_ID_HEADER;
use crate::middleware::{handle_panic, route_not_found, translate_errors};
use crate::routes::api_routes::configure_api_routes;
use crate::server::state::AppState;

fn make_span(request: &axum::http::Request<Body>) -> tracing::Span {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");
    tracing::info_span!(
        "http_request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id = %request_id,
    )
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    if config.environment.is_development() {
        return CorsLayer::very_permissive();
    }
    match config.cors_origin.parse::<HeaderValue>() {
        Ok(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::PATCH,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
            .allow_credentials(true),
        Err(_) => {
            tracing::warn!("CORS_ORIGIN is not a valid header value; cross-origin requests will be denied");
            CorsLayer::new()
        }
    }
}

/// Create the axum router with all routes and ambient layers configured.
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        .merge(configure_api_routes(&state))
        .fallback(route_not_found)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(PropagateRequestIdLayer::x_request_id())
                // CORS sits just inside the trace span: tower-http's `CorsLayer`
                // requires its inner service's response body to implement
                // `Default`, which `TraceLayer`'s body wrapper does not, so CORS
                // cannot wrap the trace layer directly. It still wraps the error
                // and panic layers, so error responses keep their CORS headers.
                .layer(TraceLayer::new_for_http().make_span_with(make_span))
                .layer(cors)
                .layer(middleware::from_fn_with_state(
                    state.clone(),
                    translate_errors,
                ))
                .layer(CatchPanicLayer::custom(handle_panic)),
        )
        .with_state(state)
}
