use thiserror::Error;

use super::Account;

/// Minimal number of characters of an account name.
pub const NAME_MIN_LENGTH: usize = 5;

/// Exact number of characters of an account document.
pub const DOCUMENT_LENGTH: usize = 11;

/// The error type for account validation. The messages are part of the API
/// responses and must not change.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The name is empty. Whitespaces are characters like any other.
    #[error("[name] cannot be blank")]
    BlankName,

    /// The name is shorter than [NAME_MIN_LENGTH].
    #[error("[name] needs have at least 5 characters")]
    NameTooShort,

    /// The document is empty.
    #[error("[document] cannot be blank")]
    BlankDocument,

    /// The document is not exactly [DOCUMENT_LENGTH] characters long. The
    /// message is the same whether it is too short or too long.
    #[error("[document] needs have at least 11 characters")]
    InvalidDocumentLength,
}

/// Checks the account before it is written. The checks are performed in the
/// following order and the first failing one is returned: empty name, name
/// length, empty document, document length. The phone is not checked.
///
/// Lengths are counted in UTF-16 code units, so a character outside of the
/// basic multilingual plane (an emoji for instance) counts as two.
///
/// ```
/// use bank_accounts::model::{validate, Account, ValidationError};
///
/// assert!(validate(&Account::new("Teste", "12345678910", "")).is_ok());
///
/// let error = validate(&Account::new("joao", "", "")).unwrap_err();
/// assert_eq!(error, ValidationError::NameTooShort);
/// assert_eq!(error.to_string(), "[name] needs have at least 5 characters");
/// ```
pub fn validate(account: &Account) -> Result<(), ValidationError> {
    if account.name.is_empty() {
        return Err(ValidationError::BlankName);
    }
    if text_length(&account.name) < NAME_MIN_LENGTH {
        return Err(ValidationError::NameTooShort);
    }
    if account.document.is_empty() {
        return Err(ValidationError::BlankDocument);
    }
    if text_length(&account.document) != DOCUMENT_LENGTH {
        return Err(ValidationError::InvalidDocumentLength);
    }

    Ok(())
}

fn text_length(value: &str) -> usize {
    value.encode_utf16().count()
}
