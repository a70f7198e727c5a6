//! Shared application state for all routes.

use crate::error::AppError;
use crate::settings::Settings;
use crate::store::{CustomerContext, CustomerStore};
use axum::http::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CustomerStore>,
    /// 400 by default for compatibility with existing clients; 404 in strict mode.
    pub not_found_status: StatusCode,
}

impl AppState {
    pub fn new(store: Arc<dyn CustomerStore>, settings: &Settings) -> Self {
        let not_found_status = if settings.strict_not_found {
            StatusCode::NOT_FOUND
        } else {
            StatusCode::BAD_REQUEST
        };
        AppState {
            store,
            not_found_status,
        }
    }

    /// Fresh persistence context for one request.
    pub fn context(&self) -> CustomerContext {
        CustomerContext::new(self.store.clone())
    }

    pub fn not_found(&self, message: &'static str) -> AppError {
        AppError::NotFound {
            message,
            status: self.not_found_status,
        }
    }
}
