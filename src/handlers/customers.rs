//! Customer controller
//!
//! Maps the customer routes onto `CustomerService` calls. Errors bubble up as
//! `ApiError`, whose `IntoResponse` impl does the status translation
//! (`ResourceNotFound` -> 404).

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::get,
    Json, Router,
};
use tracing::info;

use super::extractors::ValidatedId;
use super::response::{Created, EmptyOk};
use crate::constants::api::{API_URL_V1, CUSTOMERS_ROOT, CUSTOMER_BY_ID};
use crate::error::{ApiError, Result};
use crate::models::{CustomerDto, CustomerListDto};
use crate::AppState;

/// Build V1 customer routes, with and without the trailing slash on the collection
pub fn v1_customers_routes() -> Router<AppState> {
    Router::new()
        .route(API_URL_V1, get(list_customers).post(create_customer))
        .route(CUSTOMERS_ROOT, get(list_customers).post(create_customer))
        .route(
            CUSTOMER_BY_ID,
            get(get_customer)
                .put(update_customer)
                .patch(patch_customer)
                .delete(delete_customer),
        )
}

/// List all customers
#[utoipa::path(
    get,
    path = "/api/v1/customers/",
    responses(
        (status = 200, description = "All stored customers", body = CustomerListDto)
    ),
    tag = "customers"
)]
pub async fn list_customers(State(state): State<AppState>) -> Result<Json<CustomerListDto>> {
    let customers = state.customer_service.all_customers().await?;
    info!("Returning {} customers", customers.len());
    Ok(Json(customers))
}

/// Fetch one customer
#[utoipa::path(
    get,
    path = "/api/v1/customers/{id}",
    params(("id" = i64, Path, description = "Customer identifier")),
    responses(
        (status = 200, description = "Customer found", body = CustomerDto),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "No customer with this id")
    ),
    tag = "customers"
)]
pub async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CustomerDto>> {
    let id = ValidatedId::parse(&id)?;
    let customer = state.customer_service.customer_by_id(id).await?;
    Ok(Json(customer))
}

/// Create a customer
#[utoipa::path(
    post,
    path = "/api/v1/customers/",
    request_body = CustomerDto,
    responses(
        (status = 201, description = "Customer created", body = CustomerDto),
        (status = 400, description = "Missing or invalid fields")
    ),
    tag = "customers"
)]
pub async fn create_customer(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CustomerDto>, JsonRejection>,
) -> Result<Created<CustomerDto>> {
    let Json(dto) = payload.map_err(ApiError::from)?;
    let created = state.customer_service.create_new_customer(dto).await?;
    Ok(Created(created))
}

/// Replace a customer
#[utoipa::path(
    put,
    path = "/api/v1/customers/{id}",
    params(("id" = i64, Path, description = "Customer identifier")),
    request_body = CustomerDto,
    responses(
        (status = 200, description = "Customer replaced", body = CustomerDto),
        (status = 400, description = "Missing or invalid fields"),
        (status = 404, description = "No customer with this id")
    ),
    tag = "customers"
)]
pub async fn update_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<CustomerDto>, JsonRejection>,
) -> Result<Json<CustomerDto>> {
    let id = ValidatedId::parse(&id)?;
    let Json(dto) = payload.map_err(ApiError::from)?;
    let saved = state.customer_service.save_customer_by_dto(id, dto).await?;
    Ok(Json(saved))
}

/// Partially update a customer
#[utoipa::path(
    patch,
    path = "/api/v1/customers/{id}",
    params(("id" = i64, Path, description = "Customer identifier")),
    request_body = CustomerDto,
    responses(
        (status = 200, description = "Customer after the merge", body = CustomerDto),
        (status = 404, description = "No customer with this id")
    ),
    tag = "customers"
)]
pub async fn patch_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<CustomerDto>, JsonRejection>,
) -> Result<Json<CustomerDto>> {
    let id = ValidatedId::parse(&id)?;
    let Json(dto) = payload.map_err(ApiError::from)?;
    let patched = state.customer_service.patch_customer(id, dto).await?;
    Ok(Json(patched))
}

/// Delete a customer
#[utoipa::path(
    delete,
    path = "/api/v1/customers/{id}",
    params(("id" = i64, Path, description = "Customer identifier")),
    responses(
        (status = 200, description = "Customer deleted"),
        (status = 404, description = "No customer with this id")
    ),
    tag = "customers"
)]
pub async fn delete_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<EmptyOk> {
    let id = ValidatedId::parse(&id)?;
    state.customer_service.delete_customer(id).await?;
    Ok(EmptyOk)
}
