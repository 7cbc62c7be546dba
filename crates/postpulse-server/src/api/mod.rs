mod artifacts;

use axum::{
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use postpulse_store::ArtifactStore;
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use crate::middleware::request_id;

#[derive(Clone)]
pub struct AppState {
    pub store: ArtifactStore,
}

/// JSON payload returned by every failing endpoint.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// A failed request. Artifact endpoints only fail when their artifact
/// cannot be served, so every error maps to a 500.
#[derive(Debug)]
pub struct ApiError {
    message: String,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody {
                error: self.message,
            }),
        )
            .into_response()
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-request-id"),
        ])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/activity", get(artifacts::get_daily_activity))
        .route("/api/engagement", get(artifacts::get_daily_engagement))
        .route("/api/terms", get(artifacts::get_most_common_terms))
        .layer(
            ServiceBuilder::new()
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

/// Basic route to confirm the backend is running.
async fn index() -> &'static str {
    "Analytics Backend is running!"
}
