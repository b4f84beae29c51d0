use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, header};
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::{FileLoader, LlmClient};
use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    compare_handler, debug_azure_handler, health_handler, index_handler, test_azure_handler,
    upload_handler, validate_documents_handler,
};
use crate::presentation::state::AppState;

const MULTIPART_OVERHEAD_BYTES: u64 = 1024 * 1024;

/// Room for two maximum-size documents plus form overhead, so a single oversized
/// file still reaches validation and gets a precise error.
pub fn request_body_limit(max_upload_bytes: u64) -> usize {
    let limit = max_upload_bytes
        .saturating_mul(2)
        .saturating_add(MULTIPART_OVERHEAD_BYTES);
    usize::try_from(limit).unwrap_or(usize::MAX)
}

pub fn create_router<F, L>(state: AppState<F, L>) -> Router
where
    F: FileLoader + 'static,
    L: LlmClient + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let body_limit = request_body_limit(state.comparison_service.policy().max_bytes());

    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/compare", post(compare_handler::<F, L>))
        .route(
            "/validate-documents",
            post(validate_documents_handler::<F, L>),
        )
        .route("/upload", post(upload_handler::<F, L>))
        .route("/test_azure", get(test_azure_handler::<F, L>))
        .route("/test-azure", get(test_azure_handler::<F, L>))
        .route("/debug_azure", get(debug_azure_handler::<F, L>))
        .route("/debug-azure", get(debug_azure_handler::<F, L>))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_XSS_PROTECTION,
            HeaderValue::from_static("1; mode=block"),
        ))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
