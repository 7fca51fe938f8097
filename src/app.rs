use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue},
    routing::{get, post},
    Router,
};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower::ServiceBuilder;
use tower_http::{
    limit::RequestBodyLimitLayer,
    services::ServeDir,
    set_header::SetResponseHeaderLayer,
};
use crate::config::MatchingConfig;
use crate::handlers;
use crate::services::DescriptorStore;

const ALLOWED_HEADERS: &str = "Origin, X-Requested-With, Content-Type, Accept";

/// Shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DescriptorStore>,
    pub matching: MatchingConfig,
    /// Held across load-modify-save so concurrent enroll and delete
    /// requests do not overwrite each other's changes.
    pub write_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(store: Arc<dyn DescriptorStore>, matching: MatchingConfig) -> Self {
        Self {
            store,
            matching,
            write_lock: Arc::new(Mutex::new(())),
        }
    }
}

pub fn build_router(state: AppState, static_dir: &Path, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/enroll", post(handlers::enroll))
        .route("/match", post(handlers::match_descriptor))
        .route("/delete", post(handlers::delete_user))
        .route("/users", get(handlers::list_users))

        // Anything else is a static asset
        .fallback_service(ServeDir::new(static_dir))

        .layer(
            ServiceBuilder::new()
                .layer(SetResponseHeaderLayer::overriding(
                    header::ACCESS_CONTROL_ALLOW_ORIGIN,
                    HeaderValue::from_static("*"),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    header::ACCESS_CONTROL_ALLOW_HEADERS,
                    HeaderValue::from_static(ALLOWED_HEADERS),
                ))
                .layer(DefaultBodyLimit::disable())
                .layer(RequestBodyLimitLayer::new(max_body_bytes)),
        )
        .with_state(state)
}
