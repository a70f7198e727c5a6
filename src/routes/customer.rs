//! Customer CRUD routes. `/customers` is canonical; `/customer` is kept as an
//! alias for clients built against the singular paths.

use crate::handlers::customer::{create, delete as delete_handler, list, read, update};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn customer_routes(state: AppState) -> Router {
    Router::new()
        .route("/customers", get(list).post(create).put(update))
        .route("/customers/:id", get(read).delete(delete_handler))
        .route("/customer", get(list).post(create).put(update))
        .route("/customer/:id", get(read).delete(delete_handler))
        .with_state(state)
}
