use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use crate::errors::{AppError, MatchError};

// Errors render as `{ ok: false, error }` so clients can treat every
// failure the same way.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Persistence(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::Match(err) => convert_match_error(err),
        };

        (status, Json(json!({ "ok": false, "error": error }))).into_response()
    }
}

fn convert_match_error(err: MatchError) -> (StatusCode, String) {
    match err {
        MatchError::DimensionMismatch { .. } => {
            (StatusCode::BAD_REQUEST, "dimension_mismatch".to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn render(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn not_found_renders_404_body() {
        let (status, body) = render(AppError::NotFound("User not found".into())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "ok": false, "error": "User not found" }));
    }

    #[tokio::test]
    async fn dimension_mismatch_renders_400() {
        let err = MatchError::DimensionMismatch {
            username: "alice".into(),
            expected: 3,
            found: 2,
        };
        let (status, body) = render(err.into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "dimension_mismatch");
    }
}
