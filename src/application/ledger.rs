use std::collections::HashMap;

use tracing::{debug, warn};

use crate::domain::{
    Account, AccountId, Cents, FailureKind, Outcome, Transaction, TransactionKind,
};

use super::error::AccountResultExt;
use super::{LedgerError, TransactionManager};

/// The bank: owns every account and logs every attempted operation.
///
/// Accounts live in an arena (`accounts`) indexed by identifier, so callers
/// only ever hold identifiers or short-lived borrows. Every mutating
/// operation takes `&mut self`, which makes the two steps of a transfer
/// invisible to any other reader.
#[derive(Debug, Default)]
pub struct Ledger {
    accounts: Vec<Account>,
    index: HashMap<AccountId, usize>,
    last_account_number: u64,
    transactions: TransactionManager,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================
    // Account operations
    // ========================

    /// Open an account with the given initial balance.
    ///
    /// A negative initial balance is rejected and does not consume an
    /// identifier. Opening an account is not a transaction and is not logged.
    pub fn create_account(&mut self, initial_balance: Cents) -> Result<AccountId, LedgerError> {
        if initial_balance < 0 {
            return Err(LedgerError::NegativeInitialBalance(initial_balance));
        }

        Ok(self.insert_account(initial_balance))
    }

    /// Open an account with a zero balance.
    pub fn open_account(&mut self) -> AccountId {
        self.insert_account(0)
    }

    fn insert_account(&mut self, initial_balance: Cents) -> AccountId {
        self.last_account_number += 1;
        let id = AccountId::new(self.last_account_number);
        self.index.insert(id, self.accounts.len());
        self.accounts.push(Account::new(id, initial_balance));

        debug!(account = %id, initial_balance, "account created");
        id
    }

    pub fn get_account(&self, id: AccountId) -> Result<&Account, LedgerError> {
        self.slot(id).map(|slot| &self.accounts[slot])
    }

    pub fn balance(&self, id: AccountId) -> Result<Cents, LedgerError> {
        self.get_account(id).map(Account::balance)
    }

    /// All accounts in creation order.
    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.iter()
    }

    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }

    /// Sum of every balance. Widened so that many large balances cannot overflow.
    pub fn total_balance(&self) -> i128 {
        self.accounts.iter().map(|a| i128::from(a.balance())).sum()
    }

    fn slot(&self, id: AccountId) -> Result<usize, LedgerError> {
        self.index
            .get(&id)
            .copied()
            .ok_or(LedgerError::AccountNotFound(id))
    }

    // ========================
    // Balance operations
    // ========================

    /// Deposit `amount` into `id`. Every call is logged, including rejected ones.
    pub fn deposit(&mut self, id: AccountId, amount: Cents) -> Result<(), LedgerError> {
        let result = self.apply_deposit(id, amount);
        self.log(
            TransactionKind::Deposit,
            id,
            None,
            amount,
            outcome_of(result.as_ref().map(|_| true)),
        );
        result
    }

    /// Withdraw `amount` from `id`.
    ///
    /// Returns `Ok(false)` when the balance is insufficient; that case is
    /// logged as a failed withdrawal but is not an error.
    pub fn withdraw(&mut self, id: AccountId, amount: Cents) -> Result<bool, LedgerError> {
        let result = self.apply_withdraw(id, amount);
        self.log(
            TransactionKind::Withdrawal,
            id,
            None,
            amount,
            outcome_of(result.as_ref().copied()),
        );
        result
    }

    /// Move `amount` from `source` to `target`.
    ///
    /// Both accounts are resolved before any balance changes. The source is
    /// debited first; if it lacks funds the target is never touched and
    /// `Ok(false)` is returned. If crediting the target fails, the debit is
    /// rolled back. Exactly one transfer entry is logged per call.
    pub fn transfer(
        &mut self,
        source: AccountId,
        target: AccountId,
        amount: Cents,
    ) -> Result<bool, LedgerError> {
        let result = self.apply_transfer(source, target, amount);
        self.log(
            TransactionKind::Transfer,
            source,
            Some(target),
            amount,
            outcome_of(result.as_ref().copied()),
        );
        result
    }

    fn apply_deposit(&mut self, id: AccountId, amount: Cents) -> Result<(), LedgerError> {
        let slot = self.slot(id)?;
        self.accounts[slot].deposit(amount).on_account(id)
    }

    fn apply_withdraw(&mut self, id: AccountId, amount: Cents) -> Result<bool, LedgerError> {
        let slot = self.slot(id)?;
        self.accounts[slot].withdraw(amount).on_account(id)
    }

    fn apply_transfer(
        &mut self,
        source: AccountId,
        target: AccountId,
        amount: Cents,
    ) -> Result<bool, LedgerError> {
        let source_slot = self.slot(source)?;
        let target_slot = self.slot(target)?;

        if !self.accounts[source_slot].withdraw(amount).on_account(source)? {
            return Ok(false);
        }

        if let Err(error) = self.accounts[target_slot].deposit(amount) {
            // The source held `amount` a moment ago, so crediting it back fits.
            self.accounts[source_slot]
                .deposit(amount)
                .on_account(source)?;
            return Err(LedgerError::from_account(target, error));
        }

        Ok(true)
    }

    fn log(
        &mut self,
        kind: TransactionKind,
        account: AccountId,
        counterparty: Option<AccountId>,
        amount: Cents,
        outcome: Outcome,
    ) {
        let txn = self
            .transactions
            .record(account, kind, amount, outcome, counterparty);

        match outcome {
            Outcome::Succeeded => debug!(
                %txn,
                %kind,
                %account,
                counterparty = ?counterparty,
                amount,
                "operation succeeded"
            ),
            Outcome::Failed(reason) => warn!(
                %txn,
                %kind,
                %account,
                counterparty = ?counterparty,
                amount,
                %reason,
                "operation rejected"
            ),
        }
    }

    // ========================
    // History queries
    // ========================

    /// Snapshot of the whole transaction log.
    pub fn transaction_history(&self) -> Vec<Transaction> {
        self.transactions.history()
    }

    /// Log entries involving `id` as source or target, in log order.
    pub fn account_transactions(&self, id: AccountId) -> Vec<Transaction> {
        self.transactions.account_history(id)
    }

    pub fn transactions(&self) -> &TransactionManager {
        &self.transactions
    }
}

fn outcome_of(result: Result<bool, &LedgerError>) -> Outcome {
    match result {
        Ok(true) => Outcome::Succeeded,
        Ok(false) => Outcome::Failed(FailureKind::InsufficientFunds),
        Err(error) => Outcome::Failed(error.failure_kind()),
    }
}
