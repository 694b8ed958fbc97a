//! # HTTP API module
//!
//! The API exposes the [AccountService](crate::service::AccountService)
//! operations as JSON over HTTP:
//!
//! | Method | Path             | Success                  |
//! |--------|------------------|--------------------------|
//! | POST   | `/accounts`      | 201 + created account    |
//! | GET    | `/accounts`      | 200 + list of accounts   |
//! | GET    | `/accounts/:id`  | 200 + account            |
//! | PUT    | `/accounts/:id`  | 200 + updated account    |
//! | DELETE | `/accounts/:id`  | 204                      |
//!
//! Errors are rendered by [ApiError].

mod error;
mod handlers;

use axum::{
    routing::{get, post},
    Router,
};

pub use error::*;
pub use handlers::*;

/// Build the application router on top of the given service.
pub fn router(service: SharedService) -> Router {
    Router::new()
        .route("/accounts", get(list_accounts).post(create_account))
        .route("/accounts/", post(create_account))
        .route(
            "/accounts/:id",
            get(get_account).put(update_account).delete(delete_account),
        )
        .with_state(service)
}
