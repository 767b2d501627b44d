//! Response types and error handling for API endpoints
//!
//! Every failure leaves through [`ApiError`], whose `IntoResponse` writes the
//! `{success, statusCode, message}` body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use blog_common::{AppError, ErrorResponse};
use blog_core::DomainError;
use blog_service::ServiceError;
use thiserror::Error;
use tracing::error;

/// API error type for consistent error responses
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    App(#[from] AppError),

    #[error("{0}")]
    Service(#[from] ServiceError),

    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("{0}")]
    InvalidPath(String),

    #[error("{0}")]
    InvalidQuery(String),

    #[error("{0}")]
    InvalidBody(String),

    #[error("Route not found")]
    RouteNotFound,
}

impl ApiError {
    /// Get HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        let code = match self {
            Self::App(e) => e.status_code(),
            Self::Service(e) => e.status_code(),
            Self::Domain(e) => {
                if e.is_not_found() {
                    404
                } else if e.is_validation() || e.is_conflict() {
                    400
                } else {
                    500
                }
            }
            Self::InvalidPath(_) | Self::InvalidQuery(_) | Self::InvalidBody(_) => 400,
            Self::RouteNotFound => 404,
        };
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get error code for logs
    #[must_use]
    pub fn error_code(&self) -> &str {
        match self {
            Self::App(e) => e.error_code(),
            Self::Service(e) => e.error_code(),
            Self::Domain(e) => e.code(),
            Self::InvalidPath(_) => "INVALID_PATH_PARAMETER",
            Self::InvalidQuery(_) => "INVALID_QUERY_PARAMETER",
            Self::InvalidBody(_) => "INVALID_BODY",
            Self::RouteNotFound => "ROUTE_NOT_FOUND",
        }
    }

    /// Create an invalid path error
    pub fn invalid_path(msg: impl Into<String>) -> Self {
        Self::InvalidPath(msg.into())
    }

    /// Create an invalid query error
    pub fn invalid_query(msg: impl Into<String>) -> Self {
        Self::InvalidQuery(msg.into())
    }

    /// Create an invalid body error
    pub fn invalid_body(msg: impl Into<String>) -> Self {
        Self::InvalidBody(msg.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Log server errors; the client only sees the generic message
        if status.is_server_error() {
            error!(error = ?self, code = self.error_code(), "Server error occurred");
        }

        let body = ErrorResponse::new(status.as_u16(), self.to_string());
        (status, Json(body)).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

/// Created response (201) with JSON body
pub struct Created<T>(pub T);

impl<T: IntoResponse> IntoResponse for Created<T> {
    fn into_response(self) -> Response {
        let mut response = self.0.into_response();
        *response.status_mut() = StatusCode::CREATED;
        response
    }
}

/// Plain JSON string body used for confirmations (`"User has been deleted"`)
pub struct Confirmation(pub &'static str);

impl IntoResponse for Confirmation {
    fn into_response(self) -> Response {
        Json(self.0).into_response()
    }
}

/// Uniform 404 for unknown API routes
pub async fn route_not_found() -> ApiError {
    ApiError::RouteNotFound
}

#[cfg(test)]
mod tests {
    use super::*;
    use blog_core::Id;

    #[test]
    fn test_api_error_status_codes() {
        assert_eq!(
            ApiError::App(AppError::MissingAuth).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::invalid_path("bad id").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Domain(DomainError::PostNotFound(Id::new(1))).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Service(ServiceError::forbidden("no")).status_code(),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn test_api_error_codes() {
        assert_eq!(ApiError::invalid_query("x").error_code(), "INVALID_QUERY_PARAMETER");
        assert_eq!(ApiError::RouteNotFound.error_code(), "ROUTE_NOT_FOUND");
    }

    #[test]
    fn test_server_error_message_is_masked() {
        let response = ApiError::Domain(DomainError::DatabaseError("connection reset".into()))
            .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
