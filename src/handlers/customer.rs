//! Customer CRUD handlers: list, read, create, update, delete.
//! Writes stage a single change on a fresh persistence context and save it before responding.

use crate::error::AppError;
use crate::model::Customer;
use crate::response::{created, success_ok};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};

pub const CUSTOMER_NOT_FOUND: &str = "Customer not found.";
pub const COULD_NOT_FIND_CUSTOMER: &str = "Couldn't find customer.";

/// Lists all registered customers.
#[utoipa::path(
    get,
    path = "/customers",
    tag = "customers",
    responses(
        (status = 200, description = "All customers in insertion order", body = Vec<Customer>),
        (status = 500, description = "Store failure", body = String, content_type = "text/plain")
    )
)]
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let customers = state.context().list_all().await?;
    Ok(success_ok(customers))
}

/// Finds one customer by id.
#[utoipa::path(
    get,
    path = "/customers/{id}",
    tag = "customers",
    params(("id" = i32, Path, description = "Customer id")),
    responses(
        (status = 200, description = "The customer", body = Customer),
        (status = 400, description = "Customer not found (404 in strict mode)", body = String, content_type = "text/plain"),
        (status = 500, description = "Store failure", body = String, content_type = "text/plain")
    )
)]
pub async fn read(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let customer = state
        .context()
        .find_by_id(id)
        .await?
        .ok_or_else(|| state.not_found(CUSTOMER_NOT_FOUND))?;
    Ok(success_ok(customer))
}

/// Creates a customer with a caller-chosen id. Committed before responding.
#[utoipa::path(
    post,
    path = "/customers",
    tag = "customers",
    request_body = Customer,
    responses(
        (status = 201, description = "Customer created", body = Customer,
            headers(("Location" = String, description = "Path of the new customer"))),
        (status = 500, description = "Insert failed, e.g. duplicate id", body = String, content_type = "text/plain")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    Json(customer): Json<Customer>,
) -> Result<impl IntoResponse, AppError> {
    let mut ctx = state.context();
    ctx.add(customer.clone());
    ctx.save().await?;
    tracing::info!(id = customer.id, "customer created");
    Ok(created(format!("/customers/{}", customer.id), customer))
}

/// Overwrites name, email and phone of an existing customer; returns all customers.
#[utoipa::path(
    put,
    path = "/customers",
    tag = "customers",
    request_body = Customer,
    responses(
        (status = 200, description = "All customers after the update", body = Vec<Customer>),
        (status = 400, description = "Couldn't find customer (404 in strict mode)", body = String, content_type = "text/plain"),
        (status = 500, description = "Update failed", body = String, content_type = "text/plain")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Json(incoming): Json<Customer>,
) -> Result<impl IntoResponse, AppError> {
    let mut ctx = state.context();
    let mut customer = ctx
        .find_by_id(incoming.id)
        .await?
        .ok_or_else(|| state.not_found(COULD_NOT_FIND_CUSTOMER))?;
    customer.overwrite_from(&incoming);
    ctx.update(customer);
    ctx.save().await?;
    tracing::info!(id = incoming.id, "customer updated");
    Ok(success_ok(ctx.list_all().await?))
}

/// Deletes one customer; returns the remaining customers.
#[utoipa::path(
    delete,
    path = "/customers/{id}",
    tag = "customers",
    params(("id" = i32, Path, description = "Customer id")),
    responses(
        (status = 200, description = "Remaining customers", body = Vec<Customer>),
        (status = 400, description = "Couldn't find customer (404 in strict mode)", body = String, content_type = "text/plain"),
        (status = 500, description = "Delete failed", body = String, content_type = "text/plain")
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let mut ctx = state.context();
    let customer = ctx
        .find_by_id(id)
        .await?
        .ok_or_else(|| state.not_found(COULD_NOT_FIND_CUSTOMER))?;
    ctx.remove(&customer);
    ctx.save().await?;
    tracing::info!(id, "customer deleted");
    Ok(success_ok(ctx.list_all().await?))
}
