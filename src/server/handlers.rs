use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;

use crate::server::state::AppState;
use crate::utils::error::SieveError;

/// GET handler: fetch the upstream feed, drop excluded authors, serve the
/// rendered document. Every request is a fresh upstream fetch.
pub async fn serve_feed(State(state): State<AppState>) -> Result<impl IntoResponse, SieveError> {
    let rendered = state.engine.run().await?;
    Ok((
        [(header::CONTENT_TYPE, rendered.content_type)],
        rendered.body,
    ))
}
