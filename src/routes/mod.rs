pub mod catalog;
pub mod common;

pub use catalog::catalog_routes;
pub use common::common_routes;

use crate::state::AppState;
use axum::Router;
use std::time::Duration;
use tower_http::{limit::RequestBodyLimitLayer, timeout::TimeoutLayer, trace::TraceLayer};

const BODY_LIMIT_BYTES: usize = 1024 * 1024;

/// Full application router: ops endpoints at the root, the catalog under
/// `/api`, with request tracing, a per-request timeout, and a body cap.
pub fn build_app(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .nest("/api", catalog_routes(state))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(request_timeout))
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
}
