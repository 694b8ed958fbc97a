use std::{path::Path, sync::Mutex};

use anyhow::{anyhow, Context};
use log::debug;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::AccountStorage;
use crate::model::{Account, AccountId};
use crate::Result;

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS account (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    document TEXT NOT NULL,
    phone TEXT NOT NULL
)";

/// Account storage backed by a single SQLite table.
///
/// The connection is kept behind a mutex since a SQLite connection cannot be
/// shared between threads.
pub struct SqliteAccountStorage {
    connection: Mutex<Connection>,
}

impl SqliteAccountStorage {
    /// Open (or create) the database file at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Opening SQLite database '{}'.", path.display());
        let connection = Connection::open(path)
            .with_context(|| format!("Could not open database '{}'.", path.display()))?;

        Self::from_connection(connection)
    }

    /// Create a storage in a transient in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(connection: Connection) -> Result<Self> {
        connection
            .execute_batch(SCHEMA)
            .context("Could not create the account table.")?;

        Ok(Self {
            connection: Mutex::new(connection),
        })
    }

    fn with_connection<T>(&self, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let connection = self
            .connection
            .lock()
            .map_err(|e| anyhow!("Database connection lock poisoned: {e}"))?;

        f(&connection)
    }
}

fn account_from_row(row: &Row<'_>) -> rusqlite::Result<Account> {
    Ok(Account {
        id: row.get(0)?,
        name: row.get(1)?,
        document: row.get(2)?,
        phone: row.get(3)?,
    })
}

impl AccountStorage for SqliteAccountStorage {
    fn get_account(&self, id: &AccountId) -> Result<Option<Account>> {
        self.with_connection(|connection| {
            let account = connection
                .query_row(
                    "SELECT id, name, document, phone FROM account WHERE id = ?1",
                    params![id],
                    account_from_row,
                )
                .optional()?;

            Ok(account)
        })
    }

    fn get_accounts(&self) -> Result<Vec<Account>> {
        self.with_connection(|connection| {
            let mut statement =
                connection.prepare("SELECT id, name, document, phone FROM account ORDER BY id")?;
            let accounts = statement
                .query_map([], account_from_row)?
                .collect::<rusqlite::Result<Vec<Account>>>()?;

            Ok(accounts)
        })
    }

    fn store_account(&mut self, mut account: Account) -> Result<Account> {
        self.with_connection(|connection| {
            match account.id {
                Some(id) => {
                    connection.execute(
                        "INSERT OR REPLACE INTO account (id, name, document, phone)
                         VALUES (?1, ?2, ?3, ?4)",
                        params![id, account.name, account.document, account.phone],
                    )?;
                }
                None => {
                    connection.execute(
                        "INSERT INTO account (name, document, phone) VALUES (?1, ?2, ?3)",
                        params![account.name, account.document, account.phone],
                    )?;
                    account.id = Some(connection.last_insert_rowid());
                }
            }

            Ok(account)
        })
    }

    fn delete_account(&mut self, id: &AccountId) -> Result<()> {
        self.with_connection(|connection| {
            connection.execute("DELETE FROM account WHERE id = ?1", params![id])?;

            Ok(())
        })
    }
}

#[cfg(test)]
mod sqlite_storage_tests {
    use super::*;

    fn new_account() -> Account {
        Account::new("Teste", "12345678910", "41912345678")
    }

    #[test]
    fn test_store_and_get_account() {
        let mut storage = SqliteAccountStorage::open_in_memory().unwrap();
        let account = storage.store_account(new_account()).unwrap();

        assert_eq!(account.id, Some(1));
        assert_eq!(storage.get_account(&1).unwrap(), Some(account));
    }

    #[test]
    fn test_get_account_not_exists() {
        let storage = SqliteAccountStorage::open_in_memory().unwrap();

        assert_eq!(storage.get_account(&1).unwrap(), None);
    }

    #[test]
    fn test_store_existing_account_overwrites() {
        let mut storage = SqliteAccountStorage::open_in_memory().unwrap();
        let account = storage.store_account(new_account()).unwrap();
        let changed = Account {
            name: "Alfredo".to_string(),
            ..account
        };
        storage.store_account(changed.clone()).unwrap();

        assert_eq!(storage.get_accounts().unwrap(), vec![changed]);
    }

    #[test]
    fn test_get_accounts_ordered_by_id() {
        let mut storage = SqliteAccountStorage::open_in_memory().unwrap();
        let first = storage.store_account(new_account()).unwrap();
        let second = storage
            .store_account(Account::new("Alfredo", "10987654321", ""))
            .unwrap();

        assert_eq!(storage.get_accounts().unwrap(), vec![first, second]);
    }

    #[test]
    fn test_delete_account() {
        let mut storage = SqliteAccountStorage::open_in_memory().unwrap();
        let account = storage.store_account(new_account()).unwrap();
        storage.delete_account(&1).unwrap();

        assert_eq!(storage.get_account(&1).unwrap(), None);

        // Deleting twice is not an error
        storage.delete_account(&1).unwrap();

        // Identifiers are not reused
        let other = storage.store_account(new_account()).unwrap();
        assert_ne!(other.id, account.id);
    }

    #[test]
    fn test_accounts_survive_reopening() {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join("accounts.db");
        let account = SqliteAccountStorage::open(&path)
            .unwrap()
            .store_account(new_account())
            .unwrap();
        let storage = SqliteAccountStorage::open(&path).unwrap();

        assert_eq!(storage.get_account(&1).unwrap(), Some(account));
    }
}
