//! Async boundary around route handlers
//!
//! Every handler body runs inside [`guard`], so whatever goes wrong in it
//! (a returned error of any type or a panic) leaves the handler as an
//! [`ApiError`] for the terminal error middleware to render.

use futures_util::FutureExt;
use pz_core::errors::classify;
use pz_shared::ApiError;
use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use validator::Validate;

/// Run a handler body, classifying its error and capturing panics
pub async fn guard<F, T, E>(future: F) -> Result<T, ApiError>
where
    F: Future<Output = Result<T, E>>,
    E: Into<anyhow::Error>,
{
    match AssertUnwindSafe(future).catch_unwind().await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(error)) => Err(classify(&error.into())),
        Err(panic) => {
            let message = panic_message(panic.as_ref());
            log::error!("Handler panicked: {}", message);
            Err(ApiError::unexpected(format!("panic: {message}")))
        }
    }
}

/// Run the DTO's declared validations
pub fn validated<T: Validate>(dto: T) -> Result<T, ApiError> {
    match dto.validate() {
        Ok(()) => Ok(dto),
        Err(errors) => Err(classify(&anyhow::Error::new(errors))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
