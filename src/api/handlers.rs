//! Account HTTP handlers.
//!
//! Handlers only translate requests into [AccountService] calls and results
//! into responses. The service locks its storage and may perform blocking IOs
//! (SQLite), so every call runs on the blocking thread pool.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use log::debug;

use super::ApiError;
use crate::model::{Account, AccountId};
use crate::service::AccountService;

/// The state shared by all the handlers.
pub type SharedService = Arc<AccountService>;

/// Run the given service call on the blocking thread pool.
async fn call_service<T, F>(service: &SharedService, call: F) -> Result<T, ApiError>
where
    F: FnOnce(&AccountService) -> crate::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let service = Arc::clone(service);
    let result = tokio::task::spawn_blocking(move || call(&service)).await?;

    Ok(result?)
}

/// POST /accounts - Create an account. An identifier sent in the body is
/// ignored, the storage assigns a new one.
pub async fn create_account(
    State(service): State<SharedService>,
    payload: Result<Json<Account>, JsonRejection>,
) -> Result<(StatusCode, Json<Account>), ApiError> {
    let Json(account) = payload?;
    let account = call_service(&service, move |service| {
        service.create(Account { id: None, ..account })
    })
    .await?;
    debug!("Account id={:?} created.", account.id);

    Ok((StatusCode::CREATED, Json(account)))
}

/// GET /accounts - List all the accounts.
pub async fn list_accounts(
    State(service): State<SharedService>,
) -> Result<Json<Vec<Account>>, ApiError> {
    let accounts = call_service(&service, |service| service.get_all()).await?;

    Ok(Json(accounts))
}

/// GET /accounts/:id - Get one account.
pub async fn get_account(
    State(service): State<SharedService>,
    path: Result<Path<AccountId>, PathRejection>,
) -> Result<Json<Account>, ApiError> {
    let Path(id) = path?;

    call_service(&service, move |service| service.get_by_id(id))
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound(id))
}

/// PUT /accounts/:id - Replace the name, document and phone of an account.
pub async fn update_account(
    State(service): State<SharedService>,
    path: Result<Path<AccountId>, PathRejection>,
    payload: Result<Json<Account>, JsonRejection>,
) -> Result<Json<Account>, ApiError> {
    let Path(id) = path?;
    let Json(account) = payload?;

    call_service(&service, move |service| service.update(id, account))
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound(id))
}

/// DELETE /accounts/:id - Delete an account.
pub async fn delete_account(
    State(service): State<SharedService>,
    path: Result<Path<AccountId>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = path?;
    call_service(&service, move |service| service.delete(id)).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use crate::adapter::InMemoryAccountStorage;

    use super::*;

    fn service() -> SharedService {
        Arc::new(AccountService::new(InMemoryAccountStorage::default()))
    }

    #[tokio::test]
    async fn test_call_service_returns_the_result() {
        let service = service();
        let account = call_service(&service, |service| {
            service.create(Account::new("Teste", "12345678910", "41912345678"))
        })
        .await
        .unwrap();

        assert_eq!(account.id, Some(1));
        assert_eq!(service.get_by_id(1).unwrap(), Some(account));
    }

    #[tokio::test]
    async fn test_call_service_maps_service_errors() {
        let error = call_service(&service(), |service| service.delete(3))
            .await
            .unwrap_err();

        assert!(matches!(error, ApiError::NotFound(3)));
    }

    #[tokio::test]
    async fn test_call_service_panic_is_internal_error() {
        let error = call_service(&service(), |_| -> crate::Result<()> {
            panic!("storage exploded")
        })
        .await
        .unwrap_err();

        assert!(matches!(error, ApiError::Internal(_)));
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
