//! HTTP handlers

use crate::app::page::{self, PageView};
use crate::app::AppState;
use crate::core::Regressor;
use crate::utils::error::AppError;
use axum::extract::rejection::FormRejection;
use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use std::collections::HashMap;

pub async fn index() -> Html<String> {
    Html(page::render_index(&PageView::default()))
}

pub async fn predict<R: Regressor + 'static>(
    State(state): State<AppState<R>>,
    form: Result<Form<HashMap<String, String>>, FormRejection>,
) -> Response {
    let Form(fields) = match form {
        Ok(form) => form,
        Err(rejection) => {
            tracing::warn!("Rejected /predict body: {}", rejection.body_text());
            return AppError::MalformedRequestError {
                message: rejection.body_text(),
            }
            .into_response();
        }
    };

    match state.engine.predict_form(&fields) {
        Ok(prediction) => {
            tracing::info!("✅ Prediction served: {}", prediction.formatted());
            Html(page::render_index(&PageView::with_prediction(&fields, &prediction))).into_response()
        }
        Err(AppError::ValidationError { issues }) => {
            tracing::warn!(
                "❌ Form rejected: {}",
                issues.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
            );
            (
                StatusCode::BAD_REQUEST,
                Html(page::render_index(&PageView::with_issues(&fields, &issues))),
            )
                .into_response()
        }
        Err(e) if e.is_client_error() => {
            tracing::warn!("❌ Prediction refused: {}", e);
            (
                StatusCode::BAD_REQUEST,
                Html(page::render_index(&PageView::with_message(
                    &fields,
                    e.user_friendly_message(),
                ))),
            )
                .into_response()
        }
        Err(e) => e.into_response(),
    }
}
