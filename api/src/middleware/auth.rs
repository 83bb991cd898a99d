//! Clerk session authentication middleware for protecting API endpoints.
//!
//! The middleware extracts the session JWT from the Authorization header,
//! verifies it against the configured RS256 public key and injects an
//! [`AuthContext`] into the request extensions.

use actix_web::{
    body::{EitherBody, MessageBody},
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    Error, FromRequest, HttpMessage, HttpRequest,
};
use futures_util::future::LocalBoxFuture;
use jsonwebtoken::{decode, errors::ErrorKind as JwtErrorKind, Algorithm, DecodingKey, Validation};
use pz_core::errors::{classify, IdentityError};
use pz_shared::config::IdentityConfig;
use pz_shared::ApiError;
use serde::Deserialize;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};

/// Authenticated caller, injected into requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    /// Identity provider user id (`sub` claim)
    pub user_id: String,
    /// Session id (`sid` claim), when the token carries one
    pub session_id: Option<String>,
}

/// Claims read from a Clerk session token
#[derive(Debug, Deserialize)]
struct SessionClaims {
    sub: String,
    #[serde(default)]
    sid: Option<String>,
}

/// Verifies session tokens issued by the identity provider
#[derive(Clone)]
pub struct SessionVerifier {
    key: Option<Arc<DecodingKey>>,
    validation: Validation,
}

impl SessionVerifier {
    /// Build from configuration; without a key every token is rejected
    pub fn from_config(config: &IdentityConfig) -> Result<Self, jsonwebtoken::errors::Error> {
        let key = match config.jwt_public_key.as_deref() {
            Some(pem) => Some(Arc::new(DecodingKey::from_rsa_pem(pem.as_bytes())?)),
            None => None,
        };

        let mut validation = Validation::new(Algorithm::RS256);
        validation.leeway = config.leeway;
        validation.set_required_spec_claims(&["exp", "sub"]);
        if let Some(issuer) = config.issuer.as_deref() {
            validation.set_issuer(&[issuer]);
        }

        Ok(Self { key, validation })
    }

    pub fn is_configured(&self) -> bool {
        self.key.is_some()
    }

    pub fn verify(&self, token: &str) -> Result<AuthContext, IdentityError> {
        let key = self
            .key
            .as_deref()
            .ok_or_else(|| IdentityError::unauthenticated("Session verification is not configured"))?;

        let data = decode::<SessionClaims>(token, key, &self.validation).map_err(|e| match e.kind() {
            JwtErrorKind::ExpiredSignature => IdentityError::unauthenticated("Session token has expired"),
            JwtErrorKind::InvalidIssuer => IdentityError::unauthenticated("Session token issuer is not trusted"),
            _ => IdentityError::unauthenticated(format!("Invalid session token: {e}")),
        })?;

        Ok(AuthContext {
            user_id: data.claims.sub,
            session_id: data.claims.sid,
        })
    }
}

/// Session authentication middleware factory
pub struct ClerkAuth {
    verifier: SessionVerifier,
}

impl ClerkAuth {
    pub fn new(verifier: SessionVerifier) -> Self {
        Self { verifier }
    }
}

impl<S, B> Transform<S, ServiceRequest> for ClerkAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = ClerkAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ClerkAuthMiddleware {
            service: Rc::new(service),
            verifier: self.verifier.clone(),
        }))
    }
}

/// Session authentication middleware service
pub struct ClerkAuthMiddleware<S> {
    service: Rc<S>,
    verifier: SessionVerifier,
}

impl<S, B> Service<ServiceRequest> for ClerkAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let verifier = self.verifier.clone();

        Box::pin(async move {
            let verified = extract_bearer_token(&req)
                .ok_or_else(|| ApiError::authentication("Missing or invalid Authorization header"))
                .and_then(|token| verifier.verify(&token).map_err(|e| classify(&anyhow::Error::new(e))));

            // Rejections travel as responses with the error attached, so the
            // outer error middleware still owns the request when rendering
            match verified {
                Ok(context) => {
                    req.extensions_mut().insert(context);
                    service.call(req).await.map(ServiceResponse::map_into_left_body)
                }
                Err(error) => Ok(req.error_response(error).map_into_right_body()),
            }
        })
    }
}

/// Extracts Bearer token from Authorization header
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|s| s.to_string())
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| ApiError::authentication("Authentication required"));

        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_bearer_token() {
        use actix_web::test;

        let req = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer test_token_123"))
            .to_srv_request();

        assert_eq!(extract_bearer_token(&req), Some("test_token_123".to_string()));

        let req_no_bearer = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "test_token_123"))
            .to_srv_request();

        assert_eq!(extract_bearer_token(&req_no_bearer), None);

        let req_blank = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer   "))
            .to_srv_request();

        assert_eq!(extract_bearer_token(&req_blank), None);

        let req_no_header = test::TestRequest::default().to_srv_request();
        assert_eq!(extract_bearer_token(&req_no_header), None);
    }

    #[test]
    fn test_unconfigured_verifier_rejects() {
        let verifier = SessionVerifier::from_config(&IdentityConfig::default()).unwrap();
        assert!(!verifier.is_configured());

        let error = verifier.verify("a.b.c").unwrap_err();
        assert_eq!(error.status, Some(401));
    }

    #[test]
    fn test_invalid_pem_is_rejected() {
        let config = IdentityConfig::default().with_public_key("not a pem");
        assert!(SessionVerifier::from_config(&config).is_err());
    }

    #[actix_web::test]
    async fn test_rejection_is_a_response_with_error_attached() {
        use actix_web::{http::StatusCode, test, web, App, HttpResponse};

        let verifier = SessionVerifier::from_config(&IdentityConfig::default()).unwrap();
        let app = test::init_service(
            App::new().service(
                web::scope("/api/v1")
                    .wrap(ClerkAuth::new(verifier))
                    .route("/me", web::get().to(HttpResponse::Ok)),
            ),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/v1/me").to_request();
        let resp = test::try_call_service(&app, req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let error = resp.response().error().unwrap();
        let api_error = error.as_error::<ApiError>().unwrap();
        assert_eq!(api_error.message(), "Missing or invalid Authorization header");
    }
}
