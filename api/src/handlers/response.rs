//! Success envelope helpers for route handlers

use actix_web::{http::StatusCode, HttpResponse};
use pz_shared::types::{ApiResponse, Page};
use serde::Serialize;

/// Serialize an envelope with the given status
pub fn respond<T: Serialize>(status: StatusCode, envelope: ApiResponse<T>) -> HttpResponse {
    HttpResponse::build(status).json(envelope)
}

/// 200 with `data`
pub fn ok<T: Serialize>(data: T, message: &str) -> HttpResponse {
    respond(StatusCode::OK, ApiResponse::success(data, message))
}

/// 201 with `data`
pub fn created<T: Serialize>(data: T, message: &str) -> HttpResponse {
    respond(StatusCode::CREATED, ApiResponse::success(data, message))
}

/// 200 with the page items as `data` and its metadata as `pagination`
pub fn paginated<T: Serialize>(page: Page<T>, message: &str) -> HttpResponse {
    respond(
        StatusCode::OK,
        ApiResponse::paginated(page.items, message, &page.meta),
    )
}
