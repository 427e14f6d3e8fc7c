// src/routes.rs

use std::any::Any;

use axum::{
    Router,
    body::Body,
    http::{HeaderValue, Method, Response, header},
    response::IntoResponse,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    error::AppError,
    handlers::{diagnostics, home, quiz},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Registers the descriptor, diagnostics and quiz endpoints.
/// * Applies global middleware (Trace, CORS, panic capture).
/// * Injects global state (question source and config).
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(allowed_origins(&state.config.cors_origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    let api_routes = Router::new()
        .route("/test-connection", get(diagnostics::test_connection))
        .route("/get-questions", post(quiz::get_questions))
        .route("/validate-answers", post(quiz::validate_answers));

    Router::new()
        .route("/", get(home::describe))
        .nest("/api", api_routes)
        .fallback(route_not_found)
        // Global Middleware (applied from outside in)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(CatchPanicLayer::custom(panic_response)),
        )
        .with_state(state)
}

/// Any origin unless specific origins are configured.
fn allowed_origins(origins: &[String]) -> AllowOrigin {
    if origins.is_empty() {
        return AllowOrigin::any();
    }

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    AllowOrigin::list(parsed)
}

async fn route_not_found() -> AppError {
    AppError::NotFound("Route not found".to_string())
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response<Body> {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "handler panicked".to_string()
    };

    AppError::InternalServerError(detail).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::Config, sources::StaticSource};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn app(config: Config) -> Router {
        create_router(AppState::new(StaticSource::new(Vec::new()), config))
    }

    #[tokio::test]
    async fn unknown_route_is_json_404() {
        let response = app(Config::default())
            .oneshot(Request::get("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );
    }

    #[tokio::test]
    async fn configured_origin_is_echoed() {
        let config = Config {
            cors_origins: vec!["http://quiz.test".to_string()],
            ..Config::default()
        };
        let response = app(config)
            .oneshot(
                Request::get("/")
                    .header(header::ORIGIN, "http://quiz.test")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "http://quiz.test"
        );
    }

    #[tokio::test]
    async fn any_origin_by_default() {
        let response = app(Config::default())
            .oneshot(
                Request::get("/")
                    .header(header::ORIGIN, "http://elsewhere.test")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }

    #[test]
    fn panic_payload_becomes_500() {
        let response = panic_response(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
