use axum::routing::{delete, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::state::AppState;
use crate::api;

/// Build the complete axum Router with all API routes.
///
/// The chat path is method-dispatched the way the widget expects: POST
/// for turns, GET for health, DELETE for session clearing, with OPTIONS
/// preflight answered by the CORS layer.
pub fn build(state: AppState) -> Router {
    Router::new()
        .route(
            "/v1/chat/completions",
            post(api::chat::handler)
                .get(api::health::handler)
                .delete(api::session::clear_handler),
        )
        .route("/v1/video/conversations", post(api::video::create_handler))
        .route(
            "/v1/video/conversations/:id",
            delete(api::video::end_handler),
        )
        .route("/v1/verify", post(api::verify::handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
