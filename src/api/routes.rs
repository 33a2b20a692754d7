//! Router setup and shared state.
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::api::handlers;
use crate::gemini::GenerativeService;
use crate::workflow::{BackgroundRemovalWorkflow, SocialPostWorkflow, ThumbnailWorkflow};

pub struct AppState {
    pub thumbnail: ThumbnailWorkflow,
    pub social_post: SocialPostWorkflow,
    pub background: BackgroundRemovalWorkflow,
}

impl AppState {
    pub fn new(service: Arc<dyn GenerativeService>) -> Self {
        AppState {
            thumbnail: ThumbnailWorkflow::new(service.clone()),
            social_post: SocialPostWorkflow::new(service.clone()),
            background: BackgroundRemovalWorkflow::new(service),
        }
    }
}

pub fn router(state: Arc<AppState>, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/pages", get(handlers::list_pages))
        .route("/pages/:slug", get(handlers::get_page))
        .route("/options", get(handlers::options_pickers))
        .route("/options/:name", get(handlers::options_values))
        .route("/thumbnail/prompt", post(handlers::thumbnail_prompt))
        .route("/thumbnail", post(handlers::thumbnail))
        .route("/social_post", post(handlers::social_post))
        .route("/background_removal", post(handlers::background_removal))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
