use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers::{
    create_short_url_handler, health_handler, redirect_handler, stats_handler,
    update_url_handler,
};
use crate::state::AppState;

pub struct App {}

impl App {
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/health", get(health_handler))
            .route("/create-short-url", post(create_short_url_handler))
            .route("/qrcode/{short_code}", get(redirect_handler))
            .route("/update-url", post(update_url_handler))
            .route("/stats/{short_code}", get(stats_handler))
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }
}
