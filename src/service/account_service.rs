use std::sync::RwLock;

use anyhow::anyhow;
use log::debug;

use crate::adapter::AccountStorage;
use crate::model::{validate, Account, AccountId};
use crate::Result;

/// Account service related errors.
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    /// No account exists with the given identifier.
    #[error("Id not found {0}")]
    NotFound(AccountId),
}

/// The [AccountService] is responsible for the lifecycle of the accounts. It
/// validates the accounts before they are written and checks they exist
/// before they are updated or deleted.
///
/// This service is shared amongst all the HTTP requests hence multiple
/// threads, it is stored in an `Arc` so its internal state uses interior
/// mutability. Each storage call is atomic but a sequence of calls is not:
/// an account may be deleted between the lookup and the write of an update.
pub struct AccountService {
    /// The storage is protected by a read-write lock so reads can happen
    /// concurrently while writes are exclusive.
    store: RwLock<Box<dyn AccountStorage + Sync + Send>>,
}

impl AccountService {
    /// Create a new account service on top of the given storage.
    pub fn new(storage: impl AccountStorage + Sync + Send + 'static) -> Self {
        Self {
            store: RwLock::new(Box::new(storage)),
        }
    }

    /// Validate and store the given account. An account without identifier
    /// gets one from the storage.
    ///
    /// ```
    /// use bank_accounts::adapter::InMemoryAccountStorage;
    /// use bank_accounts::model::{Account, ValidationError};
    /// use bank_accounts::service::AccountService;
    ///
    /// let service = AccountService::new(InMemoryAccountStorage::default());
    /// let account = service
    ///     .create(Account::new("Teste", "12345678910", "41912345678"))
    ///     .unwrap();
    ///
    /// assert_eq!(account.id, Some(1));
    ///
    /// let error = service
    ///     .create(Account::new("joao", "12345678910", "41912345678"))
    ///     .unwrap_err();
    ///
    /// assert_eq!(
    ///     error.downcast_ref::<ValidationError>(),
    ///     Some(&ValidationError::NameTooShort)
    /// );
    /// ```
    pub fn create(&self, account: Account) -> Result<Account> {
        validate(&account)?;
        debug!("Storing account id={:?}.", account.id);

        // prefer to panic if the lock is poisoned ↓.
        self.store.write().unwrap().store_account(account)
    }

    /// Get all the accounts, ordered the way the storage returns them.
    pub fn get_all(&self) -> Result<Vec<Account>> {
        self.store.read().unwrap().get_accounts()
    }

    /// Get the account for the given identifier, `None` if it does not exist.
    ///
    /// ```
    /// use bank_accounts::adapter::InMemoryAccountStorage;
    /// use bank_accounts::model::Account;
    /// use bank_accounts::service::AccountService;
    ///
    /// let service = AccountService::new(InMemoryAccountStorage::default());
    ///
    /// // If the account does not exist, None is returned.
    /// assert!(service.get_by_id(1).unwrap().is_none());
    ///
    /// let created = service
    ///     .create(Account::new("Teste", "12345678910", "41912345678"))
    ///     .unwrap();
    ///
    /// assert_eq!(service.get_by_id(1).unwrap(), Some(created));
    /// ```
    pub fn get_by_id(&self, id: AccountId) -> Result<Option<Account>> {
        // If the lock returns an error, it means that a thread panicked while
        // holding the lock so this thread should panic as well.
        self.store.read().unwrap().get_account(&id)
    }

    /// Replace the name, document and phone of the account with the given
    /// identifier by those of `account`, then validate and store it like
    /// [AccountService::create] does. The identifier carried by `account` is
    /// ignored.
    ///
    /// Updating an account that does not exist is a no-op returning `None`,
    /// it is not an error (unlike [AccountService::delete]).
    ///
    /// ```
    /// use bank_accounts::adapter::InMemoryAccountStorage;
    /// use bank_accounts::model::Account;
    /// use bank_accounts::service::AccountService;
    ///
    /// let service = AccountService::new(InMemoryAccountStorage::default());
    /// let changes = Account::new("Alfredo", "12345678910", "41912345678");
    ///
    /// assert!(service.update(1, changes.clone()).unwrap().is_none());
    ///
    /// let _ = service
    ///     .create(Account::new("Teste", "12345678910", "41912345678"))
    ///     .unwrap();
    /// let updated = service.update(1, changes).unwrap().unwrap();
    ///
    /// assert_eq!(updated.id, Some(1));
    /// assert_eq!(updated.name, "Alfredo");
    /// ```
    pub fn update(&self, id: AccountId, account: Account) -> Result<Option<Account>> {
        let Some(existing) = self.get_by_id(id)? else {
            debug!("Account id={id} not found, nothing to update.");
            return Ok(None);
        };

        self.create(existing.with_changes(&account)).map(Some)
    }

    /// Delete the account with the given identifier.
    /// Fails with [AccountError::NotFound] if the account does not exist.
    pub fn delete(&self, id: AccountId) -> Result<()> {
        if self.get_by_id(id)?.is_none() {
            return Err(anyhow!(AccountError::NotFound(id)));
        }
        debug!("Deleting account id={id}.");

        self.store.write().unwrap().delete_account(&id)
    }
}
