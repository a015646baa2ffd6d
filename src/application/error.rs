use thiserror::Error;

use crate::domain::{AccountError, AccountId, Cents, DocumentError, FailureKind};
use crate::storage::StorageError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    #[error("Invalid amount: {0} cents (must be positive)")]
    InvalidAmount(Cents),

    #[error("Initial balance cannot be negative: {0} cents")]
    NegativeInitialBalance(Cents),

    #[error("Balance of account {0} would overflow")]
    BalanceOverflow(AccountId),
}

impl LedgerError {
    pub(crate) fn from_account(account: AccountId, error: AccountError) -> Self {
        match error {
            AccountError::InvalidAmount(amount) => LedgerError::InvalidAmount(amount),
            AccountError::BalanceOverflow => LedgerError::BalanceOverflow(account),
        }
    }

    /// The failure kind recorded in the transaction log for this error.
    pub fn failure_kind(&self) -> FailureKind {
        match self {
            LedgerError::AccountNotFound(_) => FailureKind::AccountNotFound,
            LedgerError::InvalidAmount(_) | LedgerError::NegativeInitialBalance(_) => {
                FailureKind::InvalidAmount
            }
            LedgerError::BalanceOverflow(_) => FailureKind::BalanceOverflow,
        }
    }
}

/// Attach the account an [`AccountError`] happened on.
pub(crate) trait AccountResultExt<T> {
    fn on_account(self, account: AccountId) -> Result<T, LedgerError>;
}

impl<T> AccountResultExt<T> for Result<T, AccountError> {
    fn on_account(self, account: AccountId) -> Result<T, LedgerError> {
        self.map_err(|e| LedgerError::from_account(account, e))
    }
}

#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("Document title cannot be empty")]
    EmptyTitle,

    #[error("Document title cannot be used as a file name: {0}")]
    InvalidTitle(String),

    #[error("Document already exists: {0}")]
    DuplicateTitle(String),

    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    #[error("Malformed document at {path}: {source}")]
    Malformed {
        path: String,
        #[source]
        source: DocumentError,
    },

    #[error(transparent)]
    Storage(#[from] StorageError),
}
