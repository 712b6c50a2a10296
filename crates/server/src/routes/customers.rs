use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use models::customer;
use service::customer::domain::{RegistrationRequest, UpdateRequest};

use crate::errors::ApiError;
use crate::routes::AppState;

#[utoipa::path(
    get, path = "/api/v1/customers", tag = "customers",
    responses(
        (status = 200, description = "List OK"),
        (status = 500, description = "List Failed")
    )
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<customer::Model>>, ApiError> {
    let customers = state.customers.list().await?;
    info!(count = customers.len(), "list customers");
    Ok(Json(customers))
}

#[utoipa::path(
    get, path = "/api/v1/customers/{id}", tag = "customers",
    params(("id" = i64, Path, description = "Customer id")),
    responses(
        (status = 200, description = "OK"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<customer::Model>, ApiError> {
    let found = state.customers.get(id).await?;
    Ok(Json(found))
}

#[utoipa::path(
    post, path = "/api/v1/customers", tag = "customers",
    request_body = crate::openapi::RegistrationRequestDoc,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Validation Error"),
        (status = 409, description = "Conflict")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegistrationRequest>,
) -> Result<(StatusCode, Json<customer::Model>), ApiError> {
    let created = state.customers.register(input).await?;
    info!(id = created.id, email = %created.email, "registered customer");
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put, path = "/api/v1/customers/{id}", tag = "customers",
    params(("id" = i64, Path, description = "Customer id")),
    request_body = crate::openapi::UpdateRequestDoc,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateRequest>,
) -> Result<Json<customer::Model>, ApiError> {
    let updated = state.customers.update(id, input).await?;
    info!(id = updated.id, "updated customer");
    Ok(Json(updated))
}

#[utoipa::path(
    delete, path = "/api/v1/customers/{id}", tag = "customers",
    params(("id" = i64, Path, description = "Customer id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.customers.delete(id).await?;
    info!(id, "deleted customer");
    Ok(StatusCode::NO_CONTENT)
}
