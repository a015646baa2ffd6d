use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Cents;

/// Identifier of an account, rendered as `ACC<n>`.
///
/// Identifiers are handed out by the ledger from a per-instance counter
/// starting at 1 and are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct AccountId(u64);

impl AccountId {
    const PREFIX: &'static str = "ACC";

    pub fn new(n: u64) -> Self {
        Self(n)
    }

    pub fn number(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Self::PREFIX, self.0)
    }
}

impl FromStr for AccountId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .strip_prefix(Self::PREFIX)
            .and_then(|n| n.parse().ok())
            .map(AccountId)
            .ok_or_else(|| ParseIdError(s.to_string()))
    }
}

impl From<AccountId> for String {
    fn from(id: AccountId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for AccountId {
    type Error = ParseIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid identifier: '{0}'")]
pub struct ParseIdError(pub String);

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountError {
    #[error("amount must be positive, got {0} cents")]
    InvalidAmount(Cents),

    #[error("balance would overflow")]
    BalanceOverflow,
}

/// A bank account. The balance never goes below zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Account {
    id: AccountId,
    balance: Cents,
}

impl Account {
    /// Create an account. The ledger validates `initial_balance` before
    /// calling this.
    pub fn new(id: AccountId, initial_balance: Cents) -> Self {
        Self {
            id,
            balance: initial_balance,
        }
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn balance(&self) -> Cents {
        self.balance
    }

    pub fn deposit(&mut self, amount: Cents) -> Result<(), AccountError> {
        if amount <= 0 {
            return Err(AccountError::InvalidAmount(amount));
        }
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(AccountError::BalanceOverflow)?;
        Ok(())
    }

    /// Withdraw `amount`. Returns `Ok(false)` without touching the balance
    /// when funds are insufficient.
    pub fn withdraw(&mut self, amount: Cents) -> Result<bool, AccountError> {
        if amount <= 0 {
            return Err(AccountError::InvalidAmount(amount));
        }
        if self.balance < amount {
            return Ok(false);
        }
        self.balance -= amount;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(balance: Cents) -> Account {
        Account::new(AccountId::new(123), balance)
    }

    #[test]
    fn test_new_account_keeps_id_and_balance() {
        let account = account(10000);
        assert_eq!(account.balance(), 10000);
        assert_eq!(account.id().to_string(), "ACC123");
    }

    #[test]
    fn test_deposit_valid_amount() {
        let mut account = account(0);
        account.deposit(5000).unwrap();
        assert_eq!(account.balance(), 5000);
    }

    #[test]
    fn test_deposit_rejects_non_positive_amount() {
        let mut account = account(0);
        assert_eq!(account.deposit(-5000), Err(AccountError::InvalidAmount(-5000)));
        assert_eq!(account.deposit(0), Err(AccountError::InvalidAmount(0)));
        assert_eq!(account.balance(), 0);
    }

    #[test]
    fn test_deposit_overflow_leaves_balance() {
        let mut account = account(i64::MAX - 1);
        assert_eq!(account.deposit(2), Err(AccountError::BalanceOverflow));
        assert_eq!(account.balance(), i64::MAX - 1);
    }

    #[test]
    fn test_withdraw_with_sufficient_funds() {
        let mut account = account(10000);
        assert_eq!(account.withdraw(5000), Ok(true));
        assert_eq!(account.balance(), 5000);
    }

    #[test]
    fn test_withdraw_entire_balance() {
        let mut account = account(10000);
        assert_eq!(account.withdraw(10000), Ok(true));
        assert_eq!(account.balance(), 0);
    }

    #[test]
    fn test_withdraw_with_insufficient_funds() {
        let mut account = account(3000);
        assert_eq!(account.withdraw(5000), Ok(false));
        assert_eq!(account.balance(), 3000);
    }

    #[test]
    fn test_withdraw_rejects_non_positive_amount() {
        let mut account = account(10000);
        assert_eq!(account.withdraw(-5000), Err(AccountError::InvalidAmount(-5000)));
        assert_eq!(account.balance(), 10000);
    }

    #[test]
    fn test_account_id_parse() {
        assert_eq!("ACC42".parse::<AccountId>(), Ok(AccountId::new(42)));
        assert!("42".parse::<AccountId>().is_err());
        assert!("ACC".parse::<AccountId>().is_err());
        assert!("TXN1".parse::<AccountId>().is_err());
    }
}
