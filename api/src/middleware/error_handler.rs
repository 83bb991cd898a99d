//! Terminal error middleware
//!
//! Wraps the whole application. Any response that carries an error (a
//! handler `Err`, an extractor failure, an inner middleware `Err`) is turned
//! into an [`ApiError`], logged once with request context and re-rendered as
//! a failure envelope under the configured disclosure policy. Bare error
//! statuses produced by the framework itself (a resource's 405, for one) get
//! the same envelope.

use actix_web::{
    body::{EitherBody, MessageBody},
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::{
        header::{HeaderMap, CONTENT_TYPE, USER_AGENT},
        StatusCode,
    },
    Error, HttpMessage, HttpRequest, HttpResponse,
};
use chrono::Utc;
use futures_util::future::LocalBoxFuture;
use pz_shared::config::Environment;
use pz_shared::types::{ApiResponse, Disclosure};
use pz_shared::ApiError;
use serde_json::{json, Value};
use std::future::{ready, Ready};
use std::rc::Rc;

use super::auth::AuthContext;

/// Middleware rendering every failure as a standard error envelope
#[derive(Debug, Clone, Copy)]
pub struct ErrorHandler {
    disclosure: Disclosure,
}

impl ErrorHandler {
    /// Full disclosure in development, safe everywhere else
    pub fn new(environment: Environment) -> Self {
        let disclosure = if environment.exposes_error_details() {
            Disclosure::Full
        } else {
            Disclosure::Safe
        };
        Self { disclosure }
    }
}

impl<S, B> Transform<S, ServiceRequest> for ErrorHandler
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = ErrorHandlerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ErrorHandlerMiddleware {
            service: Rc::new(service),
            disclosure: self.disclosure,
        }))
    }
}

pub struct ErrorHandlerMiddleware<S> {
    service: Rc<S>,
    disclosure: Disclosure,
}

impl<S, B> Service<ServiceRequest> for ErrorHandlerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let disclosure = self.disclosure;
        // Owned copies only: the router needs sole ownership of the request
        let before = RequestContext::capture(req.request());

        Box::pin(async move {
            match service.call(req).await {
                Ok(res) => {
                    let Some(error) = failure_of(&res) else {
                        return Ok(res.map_into_left_body());
                    };
                    log_failure(&RequestContext::capture(res.request()), &error);
                    let (req, _) = res.into_parts();
                    Ok(ServiceResponse::new(req, render(&error, disclosure)).map_into_right_body())
                }
                // Nothing left to attach a response to; actix renders the
                // error through `ApiError::error_response`
                Err(err) => {
                    let error = to_api_error(&err);
                    log_failure(&before, &error);
                    Err(error.into())
                }
            }
        })
    }
}

/// Error carried by a response, or synthesized for a bare error status
///
/// Framework responses such as a resource's 405 carry no error object and an
/// empty body. Responses that already hold a JSON body are left alone.
fn failure_of<B>(res: &ServiceResponse<B>) -> Option<ApiError> {
    let response = res.response();
    if let Some(error) = response.error() {
        return Some(to_api_error(error));
    }

    let status = response.status();
    if !(status.is_client_error() || status.is_server_error()) || has_json_body(response.headers()) {
        return None;
    }
    let reason = status.canonical_reason().unwrap_or("Request failed");
    Some(ApiError::from_http_status(status.as_u16(), reason))
}

fn has_json_body(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/json"))
}

/// Recover the taxonomy error, or map a framework error by its status
pub fn to_api_error(error: &Error) -> ApiError {
    if let Some(api_error) = error.as_error::<ApiError>() {
        return api_error.clone();
    }

    let status = error.as_response_error().status_code().as_u16();
    ApiError::from_http_status(status, error.to_string())
}

/// Failure envelope for `error` with its fixed status
pub fn render(error: &ApiError, disclosure: Disclosure) -> HttpResponse {
    let status = StatusCode::from_u16(error.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    HttpResponse::build(status).json(ApiResponse::<()>::from_error(error, disclosure))
}

/// Request facts logged with a failure
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    pub method: String,
    pub path: String,
    pub ip: Option<String>,
    pub user_agent: Option<String>,
    /// Set once the auth middleware has run
    pub user_id: Option<String>,
}

impl RequestContext {
    pub fn capture(req: &HttpRequest) -> Self {
        Self {
            method: req.method().to_string(),
            path: req.path().to_string(),
            ip: req.connection_info().realip_remote_addr().map(str::to_string),
            user_agent: req
                .headers()
                .get(USER_AGENT)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string),
            user_id: req.extensions().get::<AuthContext>().map(|auth| auth.user_id.clone()),
        }
    }
}

/// Structured log line describing a failed request
pub fn failure_record(context: &RequestContext, error: &ApiError) -> Value {
    json!({
        "timestamp": Utc::now().to_rfc3339(),
        "method": context.method,
        "path": context.path,
        "ip": context.ip,
        "userAgent": context.user_agent,
        "userId": context.user_id,
        "kind": error.kind().to_string(),
        "code": error.code(),
        "status": error.status(),
        "message": error.message(),
        "stack": error.cause(),
    })
}

fn log_failure(context: &RequestContext, error: &ApiError) {
    let record = failure_record(context, error);
    if error.status() >= 500 {
        log::error!("{}", record);
    } else {
        log::warn!("{}", record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{error::ErrorBadRequest, test, web, App};
    use pz_shared::ErrorKind;

    async fn failing() -> Result<HttpResponse, ApiError> {
        Err(ApiError::unexpected("connection reset by peer"))
    }

    async fn conflict() -> Result<HttpResponse, ApiError> {
        Err(ApiError::conflict("username already exists").with_detail("field", "username"))
    }

    #[::core::prelude::v1::test]
    fn test_to_api_error_downcasts() {
        let error: Error = ApiError::gone("Post has expired").into();
        let api_error = to_api_error(&error);
        assert_eq!(api_error.kind(), ErrorKind::Gone);
        assert_eq!(api_error.message(), "Post has expired");
    }

    #[::core::prelude::v1::test]
    fn test_to_api_error_maps_framework_status() {
        let api_error = to_api_error(&ErrorBadRequest("bad header"));
        assert_eq!(api_error.kind(), ErrorKind::Validation);
        assert_eq!(api_error.message(), "bad header");
    }

    #[::core::prelude::v1::test]
    fn test_failure_record_fields() {
        let req = test::TestRequest::post()
            .uri("/api/v1/posts/1/reactions")
            .insert_header((USER_AGENT, "plaza-ios/2.1"))
            .to_http_request();
        req.extensions_mut().insert(AuthContext {
            user_id: "user_1".into(),
            session_id: None,
        });

        let record = failure_record(&RequestContext::capture(&req), &ApiError::not_found("Post"));
        assert_eq!(record["method"], "POST");
        assert_eq!(record["path"], "/api/v1/posts/1/reactions");
        assert_eq!(record["userAgent"], "plaza-ios/2.1");
        assert_eq!(record["userId"], "user_1");
        assert_eq!(record["kind"], "NotFound");
        assert_eq!(record["status"], 404);
    }

    #[actix_web::test]
    async fn test_production_hides_unexpected_errors() {
        let app = test::init_service(
            App::new()
                .wrap(ErrorHandler::new(Environment::Production))
                .route("/boom", web::get().to(failing)),
        )
        .await;

        let req = test::TestRequest::get().uri("/boom").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["message"], "An unexpected error occurred");
        assert_eq!(body["error"]["code"], "INTERNAL_ERROR");
        assert!(body["error"].get("stack").is_none());
    }

    #[actix_web::test]
    async fn test_development_shows_stack() {
        let app = test::init_service(
            App::new()
                .wrap(ErrorHandler::new(Environment::Development))
                .route("/boom", web::get().to(failing)),
        )
        .await;

        let req = test::TestRequest::get().uri("/boom").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["error"]["stack"], "connection reset by peer");
    }

    #[actix_web::test]
    async fn test_operational_errors_keep_details_in_production() {
        let app = test::init_service(
            App::new()
                .wrap(ErrorHandler::new(Environment::Production))
                .route("/conflict", web::post().to(conflict)),
        )
        .await;

        let req = test::TestRequest::post().uri("/conflict").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["message"], "username already exists");
        assert_eq!(body["error"]["details"]["field"], "username");
    }

    #[actix_web::test]
    async fn test_success_is_untouched() {
        let app = test::init_service(
            App::new()
                .wrap(ErrorHandler::new(Environment::Production))
                .route("/ok", web::get().to(|| async { HttpResponse::Ok().body("fine") })),
        )
        .await;

        let req = test::TestRequest::get().uri("/ok").to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, "fine");
    }

    #[actix_web::test]
    async fn test_bare_method_not_allowed_gets_envelope() {
        let app = test::init_service(
            App::new()
                .wrap(ErrorHandler::new(Environment::Production))
                .service(web::resource("/items").route(web::get().to(HttpResponse::Ok))),
        )
        .await;

        let req = test::TestRequest::put().uri("/items").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "METHOD_NOT_ALLOWED");
        assert_eq!(body["error"]["message"], "Method Not Allowed");
        assert_eq!(body["error"]["details"]["httpStatus"], 405);
    }

    #[actix_web::test]
    async fn test_json_error_status_is_untouched() {
        let app = test::init_service(
            App::new().wrap(ErrorHandler::new(Environment::Production)).route(
                "/health",
                web::get().to(|| async {
                    HttpResponse::ServiceUnavailable().json(json!({ "status": "unhealthy" }))
                }),
            ),
        )
        .await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "status": "unhealthy" }));
    }

    #[::core::prelude::v1::test]
    fn test_capture_without_auth_or_agent() {
        let req = test::TestRequest::delete().uri("/api/v1/devices/t1").to_http_request();
        let context = RequestContext::capture(&req);
        assert_eq!(context.method, "DELETE");
        assert_eq!(context.path, "/api/v1/devices/t1");
        assert_eq!(context.user_agent, None);
        assert_eq!(context.user_id, None);
    }
}
