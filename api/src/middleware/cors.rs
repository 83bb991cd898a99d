//! CORS middleware configuration for cross-origin requests.
//!
//! Development allows any origin; every other environment only allows the
//! origins listed in `ALLOWED_ORIGINS`.

use actix_cors::Cors;
use actix_web::http::{header, Method};
use pz_shared::config::{CorsConfig, Environment};

/// Creates a CORS middleware instance configured for the given environment.
pub fn create_cors(config: &CorsConfig, environment: Environment) -> Cors {
    if environment.is_development() || config.allows_any_origin() {
        create_development_cors(config)
    } else {
        create_production_cors(config)
    }
}

fn allowed_methods() -> Vec<Method> {
    vec![
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::PATCH,
        Method::OPTIONS,
    ]
}

fn create_development_cors(config: &CorsConfig) -> Cors {
    log::info!("Configuring CORS for development environment");

    let cors = Cors::default()
        .allow_any_origin()
        .allowed_methods(allowed_methods())
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ORIGIN,
            header::USER_AGENT,
            header::CACHE_CONTROL,
            header::HeaderName::from_static("x-requested-with"),
        ])
        .max_age(config.max_age);

    if config.allow_credentials {
        cors.supports_credentials()
    } else {
        cors
    }
}

fn create_production_cors(config: &CorsConfig) -> Cors {
    log::info!("Configuring CORS for production environment");

    let mut cors = Cors::default()
        .allowed_methods(allowed_methods())
        .allowed_headers(vec![header::AUTHORIZATION, header::ACCEPT, header::CONTENT_TYPE])
        .max_age(config.max_age);

    for origin in &config.allowed_origins {
        log::info!("Adding allowed origin: {}", origin);
        cors = cors.allowed_origin(origin);
    }

    if config.allow_credentials {
        cors = cors.supports_credentials();
    }

    cors
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, web, App, HttpResponse};

    fn production_config() -> CorsConfig {
        CorsConfig {
            allowed_origins: vec!["https://plaza.example".to_string()],
            ..CorsConfig::default()
        }
    }

    #[actix_web::test]
    async fn test_production_allows_listed_origin() {
        let app = test::init_service(
            App::new()
                .wrap(create_cors(&production_config(), Environment::Production))
                .route("/", web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/")
            .insert_header((header::ORIGIN, "https://plaza.example"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "https://plaza.example"
        );
    }

    #[actix_web::test]
    async fn test_production_omits_unlisted_origin() {
        let app = test::init_service(
            App::new()
                .wrap(create_cors(&production_config(), Environment::Production))
                .route("/", web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/")
            .insert_header((header::ORIGIN, "https://evil.example"))
            .to_request();
        if let Ok(resp) = test::try_call_service(&app, req).await {
            assert!(resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
        }
    }

    #[actix_web::test]
    async fn test_development_echoes_any_origin() {
        let app = test::init_service(
            App::new()
                .wrap(create_cors(&CorsConfig::development(), Environment::Development))
                .route("/", web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/")
            .insert_header((header::ORIGIN, "http://localhost:3000"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert!(resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_some());
    }
}
