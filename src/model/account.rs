use serde::{Deserialize, Serialize};

/// The account identifier type alias.
pub type AccountId = i64;

/// A bank customer account.
///
/// The identifier is absent until the account is stored for the first time,
/// the storage assigns it. The other fields are only checked when the account
/// is written (see [crate::model::validate]), an `Account` value itself may
/// hold any content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// The account identifier, `None` until the account is persisted.
    #[serde(default)]
    pub id: Option<AccountId>,

    /// The customer name.
    pub name: String,

    /// The customer document number.
    pub document: String,

    /// The customer phone number, free text.
    pub phone: String,
}

impl Account {
    /// Creates a new account that has not been persisted yet.
    pub fn new(
        name: impl Into<String>,
        document: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            document: document.into(),
            phone: phone.into(),
        }
    }

    /// Returns a copy of this account where the name, document and phone are
    /// taken from `changes`. The identifier of `self` is kept, the one of
    /// `changes` is ignored.
    ///
    /// ```
    /// use bank_accounts::model::Account;
    ///
    /// let existing = Account {
    ///     id: Some(3),
    ///     ..Account::new("Teste", "12345678910", "41912345678")
    /// };
    /// let changes = Account {
    ///     id: Some(42),
    ///     ..Account::new("Alfredo", "10987654321", "41987654321")
    /// };
    /// let updated = existing.with_changes(&changes);
    ///
    /// assert_eq!(updated.id, Some(3));
    /// assert_eq!(updated.name, "Alfredo");
    /// assert_eq!(updated.document, "10987654321");
    /// assert_eq!(updated.phone, "41987654321");
    /// ```
    pub fn with_changes(&self, changes: &Account) -> Self {
        Self {
            id: self.id,
            name: changes.name.clone(),
            document: changes.document.clone(),
            phone: changes.phone.clone(),
        }
    }
}
