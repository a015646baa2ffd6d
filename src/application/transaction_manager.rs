use chrono::Utc;

use crate::domain::{AccountId, Cents, Outcome, Transaction, TransactionId, TransactionKind};

/// Append-only log of every attempted ledger operation.
#[derive(Debug)]
pub struct TransactionManager {
    transactions: Vec<Transaction>,
    next_id: u64,
}

impl Default for TransactionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionManager {
    pub fn new() -> Self {
        Self {
            transactions: Vec::new(),
            next_id: 1,
        }
    }

    /// Hand out a fresh identifier. Identifiers are never reused, even when
    /// the caller never records an entry with them.
    pub fn next_id(&mut self) -> TransactionId {
        let id = TransactionId::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// Append one entry to the log and return its identifier.
    pub fn record(
        &mut self,
        source: AccountId,
        kind: TransactionKind,
        amount: Cents,
        outcome: Outcome,
        target: Option<AccountId>,
    ) -> TransactionId {
        let id = self.next_id();
        self.transactions.push(Transaction {
            id,
            source,
            target,
            kind,
            amount,
            outcome,
            recorded_at: Utc::now(),
        });
        id
    }

    /// Snapshot of the whole log in recording order.
    pub fn history(&self) -> Vec<Transaction> {
        self.transactions.clone()
    }

    /// Entries where `account` is the source or the target, in log order.
    pub fn account_history(&self, account: AccountId) -> Vec<Transaction> {
        self.transactions
            .iter()
            .filter(|t| t.involves(account))
            .cloned()
            .collect()
    }

    /// Borrow the log without copying it.
    pub fn entries(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}
