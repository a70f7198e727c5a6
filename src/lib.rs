//! Customer API: CRUD REST backend over a single Customers table.

pub mod error;
pub mod handlers;
pub mod model;
pub mod openapi;
pub mod response;
pub mod routes;
pub mod settings;
pub mod state;
pub mod store;

pub use error::{AppError, ConfigError, StoreError};
pub use model::Customer;
pub use routes::{app, common_routes, customer_routes};
pub use settings::{Settings, StoreKind};
pub use state::AppState;
pub use store::{CustomerContext, CustomerStore, MemoryCustomerStore, PgCustomerStore};
