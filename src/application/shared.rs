use std::sync::Arc;

use parking_lot::RwLock;

use crate::domain::{AccountId, Cents, Transaction};

use super::{BalanceEntry, Ledger, LedgerError};

/// Cloneable, thread-safe handle to one [`Ledger`].
///
/// Queries share a read lock. Every mutating call holds the write lock for
/// its whole duration, so a transfer's debit, credit and log entry form a
/// single critical section and no reader ever sees funds in flight.
#[derive(Debug, Clone, Default)]
pub struct SharedLedger {
    inner: Arc<RwLock<Ledger>>,
}

impl From<Ledger> for SharedLedger {
    fn from(ledger: Ledger) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ledger)),
        }
    }
}

impl SharedLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_account(&self, initial_balance: Cents) -> Result<AccountId, LedgerError> {
        self.inner.write().create_account(initial_balance)
    }

    pub fn balance(&self, id: AccountId) -> Result<Cents, LedgerError> {
        self.inner.read().balance(id)
    }

    pub fn deposit(&self, id: AccountId, amount: Cents) -> Result<(), LedgerError> {
        self.inner.write().deposit(id, amount)
    }

    pub fn withdraw(&self, id: AccountId, amount: Cents) -> Result<bool, LedgerError> {
        self.inner.write().withdraw(id, amount)
    }

    pub fn transfer(
        &self,
        source: AccountId,
        target: AccountId,
        amount: Cents,
    ) -> Result<bool, LedgerError> {
        self.inner.write().transfer(source, target, amount)
    }

    pub fn total_balance(&self) -> i128 {
        self.inner.read().total_balance()
    }

    pub fn balances(&self) -> Vec<BalanceEntry> {
        self.inner.read().balances()
    }

    pub fn transaction_history(&self) -> Vec<Transaction> {
        self.inner.read().transaction_history()
    }

    pub fn account_transactions(&self, id: AccountId) -> Vec<Transaction> {
        self.inner.read().account_transactions(id)
    }

    /// Run `f` against the ledger under the read lock.
    pub fn read<R>(&self, f: impl FnOnce(&Ledger) -> R) -> R {
        f(&self.inner.read())
    }
}
