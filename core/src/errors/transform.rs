//! Translation of arbitrary failures into the API error taxonomy.
//!
//! [`classify`] walks [`RULES`] top to bottom and returns the first match.
//! The last rule matches everything, so classification is total.

use pz_shared::errors::{ApiError, ErrorKind};
use pz_shared::validation::FieldError;
use serde_json::json;
use std::error::Error as StdError;
use validator::{ValidationErrors, ValidationErrorsKind};

use super::provider::{IdentityError, MediaHostError};
use super::storage::{StorageError, StorageErrorCode};

/// A rule recognizes one family of failures and maps it to an [`ApiError`]
pub type RuleFn = fn(&anyhow::Error) -> Option<ApiError>;

#[derive(Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub apply: RuleFn,
}

/// Ordered classification rules; earlier rules win
pub const RULES: &[Rule] = &[
    Rule { name: "passthrough", apply: passthrough },
    Rule { name: "unique_violation", apply: unique_violation },
    Rule { name: "record_not_found", apply: record_not_found },
    Rule { name: "foreign_key_violation", apply: foreign_key_violation },
    Rule { name: "storage_failure", apply: storage_failure },
    Rule { name: "identity_provider", apply: identity_provider },
    Rule { name: "media_host", apply: media_host },
    Rule { name: "request_validation", apply: request_validation },
    Rule { name: "unexpected", apply: unexpected },
];

/// Classify any failure; never fails and never panics
pub fn classify(error: &anyhow::Error) -> ApiError {
    RULES
        .iter()
        .find_map(|rule| (rule.apply)(error))
        .unwrap_or_else(|| ApiError::unexpected(format!("{error:#}")))
}

/// Find a typed error anywhere in the chain, including context layers
fn find<T>(error: &anyhow::Error) -> Option<&T>
where
    T: StdError + Send + Sync + 'static,
{
    error
        .downcast_ref::<T>()
        .or_else(|| error.chain().find_map(|cause| cause.downcast_ref::<T>()))
}

fn storage_with_code<'a>(error: &'a anyhow::Error, code: &StorageErrorCode) -> Option<&'a StorageError> {
    find::<StorageError>(error).filter(|storage| &storage.code == code)
}

fn passthrough(error: &anyhow::Error) -> Option<ApiError> {
    find::<ApiError>(error).cloned()
}

fn unique_violation(error: &anyhow::Error) -> Option<ApiError> {
    let storage = storage_with_code(error, &StorageErrorCode::UniqueViolation)?;
    let field = storage.field();

    let mut mapped = ApiError::conflict(format!("{field} already exists")).with_detail("field", field);
    if let Some(constraint) = &storage.constraint {
        mapped = mapped.with_detail("constraint", constraint);
    }
    Some(mapped.with_cause(storage.to_string()))
}

fn record_not_found(error: &anyhow::Error) -> Option<ApiError> {
    let storage = storage_with_code(error, &StorageErrorCode::RecordNotFound)?;
    Some(ApiError::not_found("Record").with_cause(storage.to_string()))
}

fn foreign_key_violation(error: &anyhow::Error) -> Option<ApiError> {
    let storage = storage_with_code(error, &StorageErrorCode::ForeignKeyViolation)?;
    let field = storage.field();
    Some(
        ApiError::validation(format!("Invalid reference: {field}"))
            .with_detail("field", field)
            .with_cause(storage.to_string()),
    )
}

fn storage_failure(error: &anyhow::Error) -> Option<ApiError> {
    let storage = find::<StorageError>(error)?;
    let message = match &storage.code {
        StorageErrorCode::ValueOutOfRange => "Value out of range for column",
        StorageErrorCode::TableMissing => "Database table does not exist",
        StorageErrorCode::ColumnMissing => "Database column does not exist",
        StorageErrorCode::PoolTimeout => "Database connection timed out",
        StorageErrorCode::Unknown(code) => {
            tracing::warn!(code = %code, "unrecognized storage error code");
            return None;
        }
        _ => return None,
    };
    Some(ApiError::database(message).with_cause(storage.to_string()))
}

fn identity_provider(error: &anyhow::Error) -> Option<ApiError> {
    let identity = find::<IdentityError>(error)?;
    let mapped = match identity.status {
        Some(401) => ApiError::authentication(identity.message.clone()),
        Some(403) => ApiError::authorization(identity.message.clone()),
        Some(status) => ApiError::new(ErrorKind::from_status(status), identity.message.clone()),
        None => ApiError::external_service("identity provider", &identity.message),
    };
    Some(mapped.with_cause(identity.to_string()))
}

fn media_host(error: &anyhow::Error) -> Option<ApiError> {
    let media = find::<MediaHostError>(error)?;
    let mapped = match media.http_code {
        Some(400) => ApiError::validation(media.message.clone()),
        Some(401) => ApiError::new(ErrorKind::ExternalService, "Media host authentication failed")
            .with_detail("service", "media host"),
        Some(413) => ApiError::validation("File too large"),
        Some(code) => ApiError::external_service("media host", &media.message).with_detail("httpCode", code),
        None => ApiError::external_service("media host", &media.message),
    };
    Some(mapped.with_cause(media.to_string()))
}

fn request_validation(error: &anyhow::Error) -> Option<ApiError> {
    let errors = find::<ValidationErrors>(error)?;
    let mut fields = Vec::new();
    flatten_validation_errors(errors, "", &mut fields);
    fields.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.message.cmp(&b.message)));

    Some(ApiError::validation("Validation failed").with_details(json!({ "errors": fields })))
}

fn unexpected(error: &anyhow::Error) -> Option<ApiError> {
    Some(ApiError::unexpected(format!("{error:#}")))
}

/// Nested struct and list errors become dotted paths (`address.city`, `tags.0`)
fn flatten_validation_errors(errors: &ValidationErrors, prefix: &str, out: &mut Vec<FieldError>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };

        match kind {
            ValidationErrorsKind::Field(failures) => {
                for failure in failures {
                    let message = failure
                        .message
                        .as_ref()
                        .map(|message| message.to_string())
                        .unwrap_or_else(|| format!("{path} failed {} validation", failure.code));
                    out.push(FieldError::new(path.clone(), message));
                }
            }
            ValidationErrorsKind::Struct(inner) => flatten_validation_errors(inner, &path, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    flatten_validation_errors(inner, &format!("{path}.{index}"), out);
                }
            }
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(error: StorageError) -> Self {
        classify(&anyhow::Error::new(error))
    }
}

impl From<IdentityError> for ApiError {
    fn from(error: IdentityError) -> Self {
        classify(&anyhow::Error::new(error))
    }
}

impl From<MediaHostError> for ApiError {
    fn from(error: MediaHostError) -> Self {
        classify(&anyhow::Error::new(error))
    }
}
