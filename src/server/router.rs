use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use crate::server::handlers;
use crate::server::state::AppState;

/// Single GET route. The method router answers any other method on the
/// route with 405 Method Not Allowed.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/rss", get(handlers::serve_feed))
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}
