//! Router configuration module - RESTful v1 API
//!
//! Customer routes, health check and the OpenAPI document, wrapped in the
//! shared middleware stack.

use axum::{middleware::from_fn, routing::get, Router};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::app_state::AppState;
use crate::error::ApiError;
use crate::handlers::{customers, health, v1_customers_routes};
use crate::middleware::request_logger_middleware;
use crate::models::{CustomerDto, CustomerListDto};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(title = "Customer API", version = "1.0.0"),
    paths(
        customers::list_customers,
        customers::get_customer,
        customers::create_customer,
        customers::update_customer,
        customers::patch_customer,
        customers::delete_customer,
        health::health_check,
    ),
    components(schemas(CustomerDto, CustomerListDto, health::HealthStatus)),
    tags(
        (name = "customers", description = "Customer CRUD endpoints"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;

/// Build the application router.
pub fn build_router(app_state: AppState) -> Router {
    let request_timeout = Duration::from_secs(app_state.config.request_timeout);

    Router::new()
        .route("/health", get(health::health_check))
        .merge(v1_customers_routes())
        .merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", ApiDoc::openapi()))
        .fallback(|| async { ApiError::not_found("Route") })
        .layer(
            ServiceBuilder::new()
                .layer(from_fn(request_logger_middleware))
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::with_status_code(
                    axum::http::StatusCode::REQUEST_TIMEOUT,
                    request_timeout,
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(app_state)
}
