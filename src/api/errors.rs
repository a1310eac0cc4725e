use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::LexiconError;

/// Error returned by API handlers
///
/// Renders as `{"detail": "..."}` with the mapped status code.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "detail": self.detail }));
        (self.status, body).into_response()
    }
}

impl From<LexiconError> for ApiError {
    fn from(err: LexiconError) -> Self {
        match err {
            LexiconError::ArticleNotFound(_) => Self::new(StatusCode::NOT_FOUND, err.to_string()),
            LexiconError::InvalidParameter(_) => {
                Self::new(StatusCode::UNPROCESSABLE_ENTITY, err.to_string())
            }
            other => {
                tracing::error!("Request failed: {}", other);
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("An error occurred: {}", other),
                )
            }
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, rejection.body_text())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SourceError;

    #[test]
    fn test_status_mapping() {
        let not_found: ApiError = LexiconError::ArticleNotFound("X".to_string()).into();
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let invalid: ApiError = LexiconError::InvalidParameter("bad".to_string()).into();
        assert_eq!(invalid.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let source: ApiError = LexiconError::Source(SourceError::Status {
            id: "X".to_string(),
            status: 502,
        })
        .into();
        assert_eq!(source.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(source.detail.starts_with("An error occurred"));
    }
}
