//! Router construction and cross-cutting layers.

use axum::{
    extract::Request,
    http::{header::CONTENT_TYPE, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::web::error::panic_response;
use crate::web::handlers::{
    clear_data, get_data, health, home, line_webhook, not_found, test_form, test_user_id,
    AppState,
};

/// Build the relay router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home).fallback(not_found))
        .route("/line-webhook", post(line_webhook).fallback(not_found))
        .route("/test-userid", post(test_user_id).fallback(not_found))
        .route("/data", get(get_data).delete(clear_data).fallback(not_found))
        .route("/health", get(health).fallback(not_found))
        .route("/test-form", get(test_form).fallback(not_found))
        .fallback(not_found)
        .layer(middleware::from_fn(short_circuit_options))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
}

/// Answer any OPTIONS request with an empty 200.
async fn short_circuit_options(request: Request, next: Next) -> Response {
    if request.method() == Method::OPTIONS {
        return StatusCode::OK.into_response();
    }
    next.run(request).await
}
