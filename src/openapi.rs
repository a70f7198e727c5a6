//! OpenAPI document for the customer routes.

use crate::handlers::customer;
use crate::model::Customer;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Customer API",
        description = "CRUD over customer records. Every `/customers` route is also served under the \
                       deprecated singular alias `/customer` (`/customer/{id}` for single records) with identical behavior."
    ),
    paths(customer::list, customer::read, customer::create, customer::update, customer::delete),
    components(schemas(Customer)),
    tags((name = "customers", description = "Customer records"))
)]
pub struct ApiDoc;
