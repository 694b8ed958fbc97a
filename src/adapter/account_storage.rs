use std::collections::BTreeMap;

use crate::model::{Account, AccountId};
use crate::Result;

/// Account storage trait.
///
/// This trait defines the operations that can be performed on an account
/// storage. It must raise an error only if the operation cannot be performed
/// by the underlying storage (IO errors, database errors). Missing accounts
/// are not errors at this level.
pub trait AccountStorage {
    /// Get an account by its identifier.
    fn get_account(&self, id: &AccountId) -> Result<Option<Account>>;

    /// Get all the accounts ordered by identifier.
    fn get_accounts(&self) -> Result<Vec<Account>>;

    /// Add or update an account.
    /// An account without identifier is inserted with a new identifier, an
    /// account with an identifier is inserted or replaced under this
    /// identifier. The stored account is returned.
    fn store_account(&mut self, account: Account) -> Result<Account>;

    /// Remove an account. Removing an unknown account does nothing.
    fn delete_account(&mut self, id: &AccountId) -> Result<()>;
}

/// A simple in-memory account storage.
/// Identifiers start at 1 and are never reused, even after a deletion.
#[derive(Debug, Default)]
pub struct InMemoryAccountStorage {
    accounts: BTreeMap<AccountId, Account>,
    last_id: AccountId,
}

impl AccountStorage for InMemoryAccountStorage {
    fn get_account(&self, id: &AccountId) -> Result<Option<Account>> {
        Ok(self.accounts.get(id).cloned())
    }

    fn get_accounts(&self) -> Result<Vec<Account>> {
        Ok(self.accounts.values().cloned().collect())
    }

    fn store_account(&mut self, mut account: Account) -> Result<Account> {
        let id = match account.id {
            Some(id) => {
                self.last_id = self.last_id.max(id);
                id
            }
            None => {
                self.last_id += 1;
                self.last_id
            }
        };
        account.id = Some(id);
        self.accounts.insert(id, account.clone());

        Ok(account)
    }

    fn delete_account(&mut self, id: &AccountId) -> Result<()> {
        self.accounts.remove(id);

        Ok(())
    }
}
