//! Error taxonomy shared across all server crates
//!
//! Every failure that leaves a request handler is an [`ApiError`]. The
//! [`ErrorKind`] of an error fixes its HTTP status and machine code; the
//! message and the optional structured details are free-form.

use serde::Serialize;
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::fmt;
use thiserror::Error;

/// Message shown to callers in place of the real one for unexpected failures
pub const GENERIC_ERROR_MESSAGE: &str = "An unexpected error occurred";

/// Machine-readable error codes used in error envelopes
pub mod error_codes {
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const AUTHENTICATION_ERROR: &str = "AUTHENTICATION_ERROR";
    pub const AUTHORIZATION_ERROR: &str = "AUTHORIZATION_ERROR";
    pub const NOT_FOUND_ERROR: &str = "NOT_FOUND_ERROR";
    pub const CONFLICT_ERROR: &str = "CONFLICT_ERROR";
    pub const GONE_ERROR: &str = "GONE_ERROR";
    pub const RATE_LIMIT_ERROR: &str = "RATE_LIMIT_ERROR";
    pub const DATABASE_ERROR: &str = "DATABASE_ERROR";
    pub const EXTERNAL_SERVICE_ERROR: &str = "EXTERNAL_SERVICE_ERROR";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
    pub const ROUTE_NOT_FOUND: &str = "ROUTE_NOT_FOUND";
    pub const SERVICE_UNAVAILABLE: &str = "SERVICE_UNAVAILABLE";
    pub const METHOD_NOT_ALLOWED: &str = "METHOD_NOT_ALLOWED";
    pub const NOT_ACCEPTABLE: &str = "NOT_ACCEPTABLE";
    pub const REQUEST_TIMEOUT: &str = "REQUEST_TIMEOUT";
    pub const PAYLOAD_TOO_LARGE: &str = "PAYLOAD_TOO_LARGE";
    pub const UNSUPPORTED_MEDIA_TYPE: &str = "UNSUPPORTED_MEDIA_TYPE";
}

/// Closed set of error kinds understood by clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    Validation,
    Authentication,
    Authorization,
    NotFound,
    Conflict,
    Gone,
    RateLimited,
    Database,
    ExternalService,
    /// Catch-all for failures nothing else recognizes
    Internal,
}

impl ErrorKind {
    /// Every kind, in taxonomy order
    pub const ALL: [ErrorKind; 10] = [
        ErrorKind::Validation,
        ErrorKind::Authentication,
        ErrorKind::Authorization,
        ErrorKind::NotFound,
        ErrorKind::Conflict,
        ErrorKind::Gone,
        ErrorKind::RateLimited,
        ErrorKind::Database,
        ErrorKind::ExternalService,
        ErrorKind::Internal,
    ];

    /// HTTP status fixed for this kind
    pub const fn status(self) -> u16 {
        match self {
            ErrorKind::Validation => 400,
            ErrorKind::Authentication => 401,
            ErrorKind::Authorization => 403,
            ErrorKind::NotFound => 404,
            ErrorKind::Conflict => 409,
            ErrorKind::Gone => 410,
            ErrorKind::RateLimited => 429,
            ErrorKind::Database => 500,
            ErrorKind::ExternalService => 502,
            ErrorKind::Internal => 500,
        }
    }

    /// Machine code fixed for this kind
    pub const fn code(self) -> &'static str {
        match self {
            ErrorKind::Validation => error_codes::VALIDATION_ERROR,
            ErrorKind::Authentication => error_codes::AUTHENTICATION_ERROR,
            ErrorKind::Authorization => error_codes::AUTHORIZATION_ERROR,
            ErrorKind::NotFound => error_codes::NOT_FOUND_ERROR,
            ErrorKind::Conflict => error_codes::CONFLICT_ERROR,
            ErrorKind::Gone => error_codes::GONE_ERROR,
            ErrorKind::RateLimited => error_codes::RATE_LIMIT_ERROR,
            ErrorKind::Database => error_codes::DATABASE_ERROR,
            ErrorKind::ExternalService => error_codes::EXTERNAL_SERVICE_ERROR,
            ErrorKind::Internal => error_codes::INTERNAL_ERROR,
        }
    }

    /// Message used when a caller does not supply one
    pub const fn default_message(self) -> &'static str {
        match self {
            ErrorKind::Validation => "Validation failed",
            ErrorKind::Authentication => "Authentication required",
            ErrorKind::Authorization => "You do not have permission to perform this action",
            ErrorKind::NotFound => "Resource not found",
            ErrorKind::Conflict => "Resource already exists",
            ErrorKind::Gone => "Resource is no longer available",
            ErrorKind::RateLimited => "Too many requests, please try again later",
            ErrorKind::Database => "Database operation failed",
            ErrorKind::ExternalService => "External service error",
            ErrorKind::Internal => GENERIC_ERROR_MESSAGE,
        }
    }

    /// Map an HTTP-like status reported by a collaborator onto the taxonomy
    pub fn from_status(status: u16) -> Self {
        match status {
            400 | 422 => ErrorKind::Validation,
            401 => ErrorKind::Authentication,
            403 => ErrorKind::Authorization,
            404 => ErrorKind::NotFound,
            409 => ErrorKind::Conflict,
            410 => ErrorKind::Gone,
            429 => ErrorKind::RateLimited,
            502..=504 => ErrorKind::ExternalService,
            400..=499 => ErrorKind::Validation,
            _ => ErrorKind::Internal,
        }
    }

    pub const fn is_server_error(self) -> bool {
        self.status() >= 500
    }
}

fn framework_code(status: u16) -> Option<&'static str> {
    match status {
        405 => Some(error_codes::METHOD_NOT_ALLOWED),
        406 => Some(error_codes::NOT_ACCEPTABLE),
        408 => Some(error_codes::REQUEST_TIMEOUT),
        413 => Some(error_codes::PAYLOAD_TOO_LARGE),
        415 => Some(error_codes::UNSUPPORTED_MEDIA_TYPE),
        _ => None,
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Validation => "Validation",
            ErrorKind::Authentication => "Authentication",
            ErrorKind::Authorization => "Authorization",
            ErrorKind::NotFound => "NotFound",
            ErrorKind::Conflict => "Conflict",
            ErrorKind::Gone => "Gone",
            ErrorKind::RateLimited => "RateLimited",
            ErrorKind::Database => "Database",
            ErrorKind::ExternalService => "ExternalService",
            ErrorKind::Internal => "Internal",
        };
        f.write_str(name)
    }
}

/// Normalized API error carried from inner logic to the terminal error handler
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ApiError {
    kind: ErrorKind,
    code: Cow<'static, str>,
    message: String,
    details: Option<Value>,
    is_operational: bool,
    /// Original failure text, kept for logs and never shown in production
    cause: Option<String>,
}

impl ApiError {
    /// Create an operational error of the given kind
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            code: Cow::Borrowed(kind.code()),
            message: message.into(),
            details: None,
            is_operational: true,
            cause: None,
        }
    }

    /// Create an error carrying the kind's default message
    pub fn of_kind(kind: ErrorKind) -> Self {
        Self::new(kind, kind.default_message())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authentication, message)
    }

    pub fn authorization(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authorization, message)
    }

    /// `resource` names what was looked up, e.g. `"Post"` yields "Post not found"
    pub fn not_found(resource: impl fmt::Display) -> Self {
        Self::new(ErrorKind::NotFound, format!("{} not found", resource))
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    pub fn gone(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Gone, message)
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RateLimited, message)
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    /// Failure reported by (or while talking to) a third-party provider
    pub fn external_service(service: &str, message: impl fmt::Display) -> Self {
        Self::new(ErrorKind::ExternalService, format!("{}: {}", service, message))
            .with_detail("service", service)
    }

    /// Expected internal failure whose message is safe to show
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Unrecognized failure; the caller only ever sees the generic message
    pub fn unexpected(cause: impl Into<String>) -> Self {
        Self {
            is_operational: false,
            cause: Some(cause.into()),
            ..Self::new(ErrorKind::Internal, GENERIC_ERROR_MESSAGE)
        }
    }

    /// Fallback for requests that matched no route
    pub fn route_not_found(method: &str, path: &str) -> Self {
        Self {
            code: Cow::Borrowed(error_codes::ROUTE_NOT_FOUND),
            ..Self::new(
                ErrorKind::NotFound,
                format!("Route {} {} not found", method, path),
            )
        }
        .with_detail("method", method)
        .with_detail("path", path)
    }

    /// Failure produced by the HTTP framework rather than by application code
    ///
    /// The kind still fixes the response status. Statuses the taxonomy folds
    /// into a broader kind keep a specific code, and the original status is
    /// always reported in `details.httpStatus`.
    pub fn from_http_status(status: u16, message: impl Into<String>) -> Self {
        let kind = ErrorKind::from_status(status);
        let error = if kind == ErrorKind::Internal {
            Self::unexpected(message)
        } else {
            Self::new(kind, message)
        };
        let error = match framework_code(status) {
            Some(code) => Self {
                code: Cow::Borrowed(code),
                ..error
            },
            None => error,
        };
        error.with_detail("httpStatus", status)
    }

    /// Replace the structured details
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Add a single entry to the details object
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        let Ok(value) = serde_json::to_value(value) else {
            return self;
        };
        match self.details.as_mut() {
            Some(Value::Object(map)) => {
                map.insert(key.into(), value);
            }
            Some(other) => {
                let mut map = Map::new();
                map.insert("value".to_string(), other.take());
                map.insert(key.into(), value);
                self.details = Some(Value::Object(map));
            }
            None => {
                let mut map = Map::new();
                map.insert(key.into(), value);
                self.details = Some(Value::Object(map));
            }
        }
        self
    }

    /// Attach the original failure text for logging
    pub fn with_cause(mut self, cause: impl Into<String>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn status(&self) -> u16 {
        self.kind.status()
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    pub fn is_operational(&self) -> bool {
        self.is_operational
    }

    pub fn cause(&self) -> Option<&str> {
        self.cause.as_deref()
    }
}

/// Result type with ApiError as error
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(feature = "actix")]
mod actix_support {
    use actix_web::{http::StatusCode, HttpResponse, ResponseError};

    use super::ApiError;
    use crate::types::response::{ApiResponse, Disclosure};

    impl ResponseError for ApiError {
        fn status_code(&self) -> StatusCode {
            StatusCode::from_u16(self.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
        }

        /// Production-safe rendering; the terminal middleware re-renders
        /// with request context and the configured disclosure policy.
        fn error_response(&self) -> HttpResponse {
            HttpResponse::build(self.status_code())
                .json(ApiResponse::<()>::from_error(self, Disclosure::Safe))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_status_and_code_table() {
        let expected = [
            (ErrorKind::Validation, 400, "VALIDATION_ERROR"),
            (ErrorKind::Authentication, 401, "AUTHENTICATION_ERROR"),
            (ErrorKind::Authorization, 403, "AUTHORIZATION_ERROR"),
            (ErrorKind::NotFound, 404, "NOT_FOUND_ERROR"),
            (ErrorKind::Conflict, 409, "CONFLICT_ERROR"),
            (ErrorKind::Gone, 410, "GONE_ERROR"),
            (ErrorKind::RateLimited, 429, "RATE_LIMIT_ERROR"),
            (ErrorKind::Database, 500, "DATABASE_ERROR"),
            (ErrorKind::ExternalService, 502, "EXTERNAL_SERVICE_ERROR"),
            (ErrorKind::Internal, 500, "INTERNAL_ERROR"),
        ];
        for (kind, status, code) in expected {
            let error = ApiError::of_kind(kind);
            assert_eq!(error.status(), status, "{kind}");
            assert_eq!(error.code(), code, "{kind}");
        }
    }

    #[test]
    fn test_factories_are_operational() {
        for kind in ErrorKind::ALL {
            assert!(ApiError::of_kind(kind).is_operational());
        }
        assert!(ApiError::internal("queue offline").is_operational());
    }

    #[test]
    fn test_unexpected_hides_message() {
        let error = ApiError::unexpected("null pointer in feed ranking");
        assert!(!error.is_operational());
        assert_eq!(error.kind(), ErrorKind::Internal);
        assert_eq!(error.message(), GENERIC_ERROR_MESSAGE);
        assert_eq!(error.cause(), Some("null pointer in feed ranking"));
    }

    #[test]
    fn test_not_found_message() {
        assert_eq!(ApiError::not_found("Record").message(), "Record not found");
    }

    #[test]
    fn test_route_not_found_overrides_code() {
        let error = ApiError::route_not_found("GET", "/nope");
        assert_eq!(error.status(), 404);
        assert_eq!(error.code(), "ROUTE_NOT_FOUND");
        assert_eq!(error.message(), "Route GET /nope not found");
        assert_eq!(error.details().unwrap()["path"], "/nope");
    }

    #[test]
    fn test_framework_status_keeps_specific_code() {
        let error = ApiError::from_http_status(405, "Method Not Allowed");
        assert_eq!(error.kind(), ErrorKind::Validation);
        assert_eq!(error.status(), 400);
        assert_eq!(error.code(), "METHOD_NOT_ALLOWED");
        assert_eq!(error.details().unwrap()["httpStatus"], 405);

        let error = ApiError::from_http_status(413, "Payload Too Large");
        assert_eq!(error.code(), "PAYLOAD_TOO_LARGE");

        let error = ApiError::from_http_status(404, "Not Found");
        assert_eq!(error.code(), "NOT_FOUND_ERROR");
        assert!(error.is_operational());
    }

    #[test]
    fn test_framework_server_error_is_unexpected() {
        let error = ApiError::from_http_status(500, "Internal Server Error");
        assert!(!error.is_operational());
        assert_eq!(error.code(), "INTERNAL_ERROR");
        assert_eq!(error.message(), GENERIC_ERROR_MESSAGE);
    }

    #[test]
    fn test_with_detail_accumulates() {
        let error = ApiError::conflict("username already exists")
            .with_detail("field", "username")
            .with_detail("constraint", "uq_users_username");
        assert_eq!(
            error.details(),
            Some(&json!({"field": "username", "constraint": "uq_users_username"}))
        );
    }

    #[test]
    fn test_with_detail_wraps_non_object_details() {
        let error = ApiError::validation("bad").with_details(json!(["a"])).with_detail("b", 1);
        assert_eq!(error.details(), Some(&json!({"value": ["a"], "b": 1})));
    }

    #[test]
    fn test_from_status() {
        assert_eq!(ErrorKind::from_status(401), ErrorKind::Authentication);
        assert_eq!(ErrorKind::from_status(403), ErrorKind::Authorization);
        assert_eq!(ErrorKind::from_status(418), ErrorKind::Validation);
        assert_eq!(ErrorKind::from_status(503), ErrorKind::ExternalService);
        assert_eq!(ErrorKind::from_status(500), ErrorKind::Internal);
        assert_eq!(ErrorKind::from_status(200), ErrorKind::Internal);
    }

    #[test]
    fn test_display_uses_message() {
        let error = ApiError::gone("Post has expired");
        assert_eq!(error.to_string(), "Post has expired");
    }
}
