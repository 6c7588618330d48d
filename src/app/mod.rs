pub mod page;
pub mod routes;
pub mod server;

use crate::core::engine::PredictionEngine;
use crate::core::Regressor;
use crate::utils::error::AppError;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use page::PageView;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Shared across handlers; the engine (and the model inside it) is read-only.
pub struct AppState<R: Regressor> {
    pub engine: Arc<PredictionEngine<R>>,
}

impl<R: Regressor> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            engine: Arc::clone(&self.engine),
        }
    }
}

pub fn build_router<R: Regressor + 'static>(engine: Arc<PredictionEngine<R>>) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/predict", post(routes::predict::<R>))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { engine })
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = if self.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            tracing::error!("Request failed: {}", self);
            StatusCode::INTERNAL_SERVER_ERROR
        };

        let page = page::render_index(&PageView::with_error(self.user_friendly_message()));
        (status, Html(page)).into_response()
    }
}
