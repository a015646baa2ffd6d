// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use ledgerlab::application::{Ledger, Library};
use ledgerlab::domain::{AccountId, Document};
use ledgerlab::storage::{FileStore, MemoryStore};

/// Test fixture: a ledger with a funded source account and an empty target
pub struct TwoAccounts {
    pub ledger: Ledger,
    pub source: AccountId,
    pub target: AccountId,
}

impl TwoAccounts {
    pub fn new(source_balance: i64) -> Result<Self> {
        let mut ledger = Ledger::new();
        let source = ledger.create_account(source_balance)?;
        let target = ledger.open_account();
        Ok(Self {
            ledger,
            source,
            target,
        })
    }

    pub fn balances(&self) -> Result<(i64, i64)> {
        Ok((
            self.ledger.balance(self.source)?,
            self.ledger.balance(self.target)?,
        ))
    }
}

/// Helper to build a document with all fields set
pub fn document(title: &str, author: &str, content: &str) -> Document {
    Document::new(title).with_author(author).with_content(content)
}

/// Helper to create a library over an in-memory store rooted at "library"
pub fn memory_library() -> Library<MemoryStore> {
    Library::new(MemoryStore::new(), "library")
}

/// Helper to read a raw file from any store
pub fn raw<S: FileStore>(store: &S, path: &str) -> Result<String> {
    Ok(store.load(path)?)
}
