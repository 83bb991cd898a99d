//! API response envelope and health check types
//!
//! Every JSON body produced by the API is an [`ApiResponse`]. A success
//! envelope carries `message` and `data` (plus `pagination` for lists); a
//! failure envelope carries `error`. The fields are private so the only way
//! to obtain an envelope is through the constructors below, which never set
//! both `data` and `error`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use super::pagination::PaginationMeta;
use crate::errors::{error_codes, ApiError, GENERIC_ERROR_MESSAGE};

/// Standard API response wrapper
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pagination: Option<PaginationMeta>,

    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorBody>,

    /// Time the envelope was built
    timestamp: DateTime<Utc>,
}

/// Error section of a failure envelope
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub message: String,
    pub code: String,
    pub status_code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    /// Development only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

/// How much of an error may be shown to the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disclosure {
    /// Everything, including the original cause (development)
    Full,
    /// Operational errors verbatim, unexpected ones replaced by a generic message
    Safe,
}

impl<T> ApiResponse<T> {
    /// Create a successful response
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
            pagination: None,
            error: None,
            timestamp: Utc::now(),
        }
    }

    /// Create an error response
    pub fn failure(
        message: impl Into<String>,
        status_code: u16,
        code: impl Into<String>,
        details: Option<Value>,
    ) -> Self {
        Self::from_body(ErrorBody {
            message: message.into(),
            code: code.into(),
            status_code,
            details,
            stack: None,
        })
    }

    /// Render a taxonomy error according to the disclosure policy
    pub fn from_error(error: &ApiError, disclosure: Disclosure) -> Self {
        let body = match disclosure {
            Disclosure::Full => ErrorBody {
                message: error.message().to_string(),
                code: error.code().to_string(),
                status_code: error.status(),
                details: error.details().cloned(),
                stack: error.cause().map(str::to_string),
            },
            Disclosure::Safe if error.is_operational() => ErrorBody {
                message: error.message().to_string(),
                code: error.code().to_string(),
                status_code: error.status(),
                details: error.details().cloned(),
                stack: None,
            },
            Disclosure::Safe => ErrorBody {
                message: GENERIC_ERROR_MESSAGE.to_string(),
                code: error_codes::INTERNAL_ERROR.to_string(),
                status_code: error.status(),
                details: None,
                stack: None,
            },
        };
        Self::from_body(body)
    }

    fn from_body(body: ErrorBody) -> Self {
        Self {
            success: false,
            message: None,
            data: None,
            pagination: None,
            error: Some(body),
            timestamp: Utc::now(),
        }
    }

    /// Check if the response is successful
    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn error(&self) -> Option<&ErrorBody> {
        self.error.as_ref()
    }

    pub fn pagination(&self) -> Option<&PaginationMeta> {
        self.pagination.as_ref()
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Extract the data, consuming the response
    pub fn into_data(self) -> Option<T> {
        self.data
    }

    /// Map the data to a different type
    pub fn map<U, F>(self, f: F) -> ApiResponse<U>
    where
        F: FnOnce(T) -> U,
    {
        ApiResponse {
            success: self.success,
            message: self.message,
            data: self.data.map(f),
            pagination: self.pagination,
            error: self.error,
            timestamp: self.timestamp,
        }
    }
}

impl<T> ApiResponse<Vec<T>> {
    /// Create a successful list response with pagination metadata
    pub fn paginated(items: Vec<T>, message: impl Into<String>, pagination: &PaginationMeta) -> Self {
        Self {
            pagination: Some(*pagination),
            ..Self::success(items, message)
        }
    }
}

/// Health status enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

/// Individual service health
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceHealth {
    pub status: HealthStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time_ms: Option<u64>,
}

impl ServiceHealth {
    pub fn healthy() -> Self {
        Self {
            status: HealthStatus::Healthy,
            message: None,
            response_time_ms: None,
        }
    }

    pub fn unhealthy(message: impl Into<String>) -> Self {
        Self {
            status: HealthStatus::Unhealthy,
            message: Some(message.into()),
            response_time_ms: None,
        }
    }

    pub fn degraded(message: impl Into<String>) -> Self {
        Self {
            status: HealthStatus::Degraded,
            message: Some(message.into()),
            response_time_ms: None,
        }
    }

    pub fn with_response_time(mut self, millis: u64) -> Self {
        self.response_time_ms = Some(millis);
        self
    }
}

/// Health check response aggregated from named sub-checks
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    pub status: HealthStatus,
    pub services: BTreeMap<String, ServiceHealth>,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthReport {
    /// Healthy only when every check is healthy; any unhealthy check wins over degraded
    pub fn from_checks<I>(version: impl Into<String>, checks: I) -> Self
    where
        I: IntoIterator<Item = (String, ServiceHealth)>,
    {
        let services: BTreeMap<String, ServiceHealth> = checks.into_iter().collect();
        let status = if services.values().any(|s| s.status == HealthStatus::Unhealthy) {
            HealthStatus::Unhealthy
        } else if services.values().any(|s| s.status == HealthStatus::Degraded) {
            HealthStatus::Degraded
        } else {
            HealthStatus::Healthy
        };

        Self {
            status,
            services,
            timestamp: Utc::now(),
            version: version.into(),
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == HealthStatus::Healthy
    }

    /// 200 when healthy, 503 otherwise
    pub fn http_status(&self) -> u16 {
        if self.is_healthy() {
            200
        } else {
            503
        }
    }
}
