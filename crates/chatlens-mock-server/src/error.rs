use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MockError {
    #[error("{0}")]
    Validation(String),

    #[error("No messages found. Upload messages first.")]
    NoMessages,

    #[error("{0}")]
    AnalysisUnavailable(String),
}

impl IntoResponse for MockError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            MockError::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, self.to_string()),
            MockError::NoMessages => (StatusCode::BAD_REQUEST, self.to_string()),
            MockError::AnalysisUnavailable(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, self.to_string())
            }
        };

        let body = serde_json::json!({
            "detail": detail,
        });

        (status, axum::Json(body)).into_response()
    }
}
