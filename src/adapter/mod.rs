//! The adapter module holds the implementation of tools required by the services.
//! The different adapters perform operations that involve IOs like reading or
//! writing to databases (more generally, the outside world).

mod account_storage;
mod sqlite_storage;

pub use account_storage::*;
pub use sqlite_storage::*;
