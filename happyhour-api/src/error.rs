use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use happyhour_core::SourceError;
use serde_json::json;

#[derive(Debug)]
pub enum AppError {
    /// The upstream sheet could not be read while proxying it
    FetchFailed(SourceError),
    /// A refresh could not reach the upstream sheet
    UpstreamError(SourceError),
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::FetchFailed(err) => {
                tracing::error!("Error fetching sheet: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Failed to fetch deals", "message": err.to_string() }),
                )
            }
            AppError::UpstreamError(err) => {
                tracing::error!("Upstream sheet error: {}", err);
                (
                    StatusCode::BAD_GATEWAY,
                    json!({ "error": "Failed to refresh deals", "message": err.to_string() }),
                )
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
        };

        (status, Json(body)).into_response()
    }
}
