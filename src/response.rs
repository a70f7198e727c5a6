//! Response helpers: bare JSON bodies, plus `Location` for created records.

use axum::{
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Serialize;

pub fn success_ok<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::OK, Json(data))
}

pub fn created<T: Serialize>(location: String, data: T) -> impl IntoResponse {
    (StatusCode::CREATED, [(header::LOCATION, location)], Json(data))
}
