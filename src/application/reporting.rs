use serde::{Deserialize, Serialize};

use crate::domain::{AccountId, Cents, TransactionKind};

use super::Ledger;

/// Balance of one account together with how many log entries touch it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceEntry {
    pub account: AccountId,
    pub balance: Cents,
    pub transaction_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivitySummary {
    pub total_entries: usize,
    pub kinds: Vec<KindActivity>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindActivity {
    pub kind: TransactionKind,
    pub succeeded: usize,
    pub failed: usize,
    /// Sum of the amounts of successful entries
    pub volume: Cents,
}

impl ActivitySummary {
    pub fn for_kind(&self, kind: TransactionKind) -> Option<&KindActivity> {
        self.kinds.iter().find(|k| k.kind == kind)
    }

    pub fn failed(&self) -> usize {
        self.kinds.iter().map(|k| k.failed).sum()
    }
}

impl Ledger {
    /// One entry per account, in creation order.
    pub fn balances(&self) -> Vec<BalanceEntry> {
        let log = self.transactions().entries();
        self.accounts()
            .map(|account| BalanceEntry {
                account: account.id(),
                balance: account.balance(),
                transaction_count: log.iter().filter(|t| t.involves(account.id())).count(),
            })
            .collect()
    }

    /// Success and failure counts per transaction kind.
    pub fn activity(&self) -> ActivitySummary {
        let log = self.transactions().entries();
        let kinds = TransactionKind::ALL
            .iter()
            .map(|&kind| {
                let mut activity = KindActivity {
                    kind,
                    succeeded: 0,
                    failed: 0,
                    volume: 0,
                };
                for txn in log.iter().filter(|t| t.kind == kind) {
                    if txn.succeeded() {
                        activity.succeeded += 1;
                        activity.volume = activity.volume.saturating_add(txn.amount);
                    } else {
                        activity.failed += 1;
                    }
                }
                activity
            })
            .collect();

        ActivitySummary {
            total_entries: log.len(),
            kinds,
        }
    }
}
