use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::application::access::AccessError;

/// Route-boundary error taxonomy. Responses carry the
/// `{ok, statusCode, message}` envelope, except `NotFound`, which shares
/// its body with the unmatched-route fallback.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Unauthenticated(String),
    #[error("No permission found")]
    Forbidden,
    #[error("Resource not found")]
    NotFound,
    #[error("{0}")]
    Validation(String),
    /// Credential-store failure while authenticating.
    #[error("{0}")]
    Internal(anyhow::Error),
    /// Uncaught service/repository error surfacing at the route boundary.
    /// These report 409 with the raw message; the status is load-bearing
    /// for existing clients.
    #[error("{0}")]
    Conflict(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if matches!(self, ApiError::NotFound) {
            return not_found_response();
        }
        let body = json!({
            "ok": false,
            "statusCode": status.as_u16(),
            "message": self.to_string(),
        });
        (status, Json(body)).into_response()
    }
}

/// Shared by `ApiError::NotFound` and the router fallback.
pub fn not_found_response() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "statusCode": 404,
            "message": "Resource not found",
        })),
    )
        .into_response()
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Conflict(err.to_string())
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        ApiError::Conflict(err.to_string())
    }
}

impl From<AccessError> for ApiError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::Unauthenticated => {
                ApiError::Unauthenticated("Authentication failed!".into())
            }
            AccessError::Forbidden => ApiError::Forbidden,
            AccessError::Store(e) => ApiError::Internal(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(resp: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn envelope_carries_status_and_message() {
        let resp = ApiError::Unauthenticated("Authentication failed!".into()).into_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(resp).await;
        assert_eq!(
            body,
            serde_json::json!({
                "ok": false,
                "statusCode": 401,
                "message": "Authentication failed!",
            })
        );
    }

    #[tokio::test]
    async fn uncaught_errors_default_to_conflict() {
        let err: ApiError = anyhow::anyhow!("connection reset").into();
        let resp = err.into_response();
        assert_eq!(resp.status(), StatusCode::CONFLICT);
        let body = body_json(resp).await;
        assert_eq!(body["statusCode"], 409);
        assert_eq!(body["message"], "connection reset");
    }

    #[tokio::test]
    async fn not_found_uses_the_fallback_body() {
        let resp = ApiError::NotFound.into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body = body_json(resp).await;
        assert_eq!(
            body,
            serde_json::json!({
                "statusCode": 404,
                "message": "Resource not found",
            })
        );
    }

    #[tokio::test]
    async fn store_failures_during_auth_are_internal() {
        let err: ApiError = AccessError::Store(anyhow::anyhow!("pool exhausted")).into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
