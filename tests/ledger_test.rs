mod common;

use anyhow::Result;
use common::TwoAccounts;
use ledgerlab::application::{Ledger, LedgerError};
use ledgerlab::domain::{AccountId, FailureKind, TransactionKind};

#[test]
fn test_create_account_and_deposit() -> Result<()> {
    let mut ledger = Ledger::new();
    let account = ledger.create_account(100000)?;

    ledger.deposit(account, 50000)?;

    assert_eq!(ledger.balance(account)?, 150000);

    let transactions = ledger.account_transactions(account);
    assert_eq!(transactions.len(), 1);
    assert_eq!(transactions[0].source, account);
    assert_eq!(transactions[0].kind, TransactionKind::Deposit);
    assert_eq!(transactions[0].amount, 50000);
    assert!(transactions[0].succeeded());

    Ok(())
}

#[test]
fn test_withdraw_then_overdraw() -> Result<()> {
    let mut ledger = Ledger::new();
    let account = ledger.create_account(10000)?;

    assert!(ledger.withdraw(account, 5000)?);
    assert_eq!(ledger.balance(account)?, 5000);

    // Insufficient funds is a plain `false`, not an error
    assert!(!ledger.withdraw(account, 10000)?);
    assert_eq!(ledger.balance(account)?, 5000);

    let transactions = ledger.account_transactions(account);
    assert_eq!(transactions.len(), 2);
    assert!(transactions
        .iter()
        .all(|t| t.kind == TransactionKind::Withdrawal));
    assert!(transactions[0].succeeded());
    assert_eq!(
        transactions[1].failure(),
        Some(FailureKind::InsufficientFunds)
    );

    Ok(())
}

#[test]
fn test_transfer_between_accounts() -> Result<()> {
    let mut setup = TwoAccounts::new(100000)?;

    assert!(setup.ledger.transfer(setup.source, setup.target, 50000)?);
    assert_eq!(setup.balances()?, (50000, 50000));

    let transactions = setup.ledger.transaction_history();
    assert_eq!(transactions.len(), 1);
    assert_eq!(transactions[0].kind, TransactionKind::Transfer);
    assert_eq!(transactions[0].source, setup.source);
    assert_eq!(transactions[0].target, Some(setup.target));
    assert_eq!(transactions[0].amount, 50000);
    assert!(transactions[0].succeeded());

    Ok(())
}

#[test]
fn test_transfer_with_insufficient_funds_leaves_target_untouched() -> Result<()> {
    let mut setup = TwoAccounts::new(10000)?;

    assert!(!setup.ledger.transfer(setup.source, setup.target, 50000)?);
    assert_eq!(setup.balances()?, (10000, 0));

    let transactions = setup.ledger.transaction_history();
    assert_eq!(transactions.len(), 1);
    assert_eq!(transactions[0].kind, TransactionKind::Transfer);
    assert_eq!(
        transactions[0].failure(),
        Some(FailureKind::InsufficientFunds)
    );

    Ok(())
}

#[test]
fn test_negative_deposit_is_rejected_and_logged() -> Result<()> {
    let mut ledger = Ledger::new();
    let account = ledger.create_account(10000)?;

    assert_eq!(
        ledger.deposit(account, -5000),
        Err(LedgerError::InvalidAmount(-5000))
    );
    assert_eq!(ledger.balance(account)?, 10000);

    let transactions = ledger.transaction_history();
    assert_eq!(transactions.len(), 1);
    assert_eq!(transactions[0].amount, -5000);
    assert_eq!(transactions[0].failure(), Some(FailureKind::InvalidAmount));

    Ok(())
}

#[test]
fn test_get_unregistered_account() {
    let ledger = Ledger::new();
    let missing = AccountId::new(1);

    assert_eq!(
        ledger.get_account(missing).map(|a| a.id()),
        Err(LedgerError::AccountNotFound(missing))
    );
}

#[test]
fn test_operations_on_unknown_accounts_are_logged() -> Result<()> {
    let mut setup = TwoAccounts::new(10000)?;
    let ghost = AccountId::new(99);

    assert_eq!(
        setup.ledger.deposit(ghost, 100),
        Err(LedgerError::AccountNotFound(ghost))
    );
    assert_eq!(
        setup.ledger.withdraw(ghost, 100),
        Err(LedgerError::AccountNotFound(ghost))
    );
    assert_eq!(
        setup.ledger.transfer(setup.source, ghost, 100),
        Err(LedgerError::AccountNotFound(ghost))
    );

    // The failed transfer resolved the target before debiting the source
    assert_eq!(setup.balances()?, (10000, 0));

    let history = setup.ledger.transaction_history();
    assert_eq!(history.len(), 3);
    assert!(history
        .iter()
        .all(|t| t.failure() == Some(FailureKind::AccountNotFound)));

    // Lookups of an unknown id still find the entries that named it
    assert_eq!(setup.ledger.account_transactions(ghost).len(), 3);

    Ok(())
}

#[test]
fn test_invalid_transfer_amount_leaves_balances() -> Result<()> {
    let mut setup = TwoAccounts::new(10000)?;

    assert_eq!(
        setup.ledger.transfer(setup.source, setup.target, 0),
        Err(LedgerError::InvalidAmount(0))
    );
    assert_eq!(setup.balances()?, (10000, 0));
    assert_eq!(
        setup.ledger.transaction_history()[0].failure(),
        Some(FailureKind::InvalidAmount)
    );

    Ok(())
}

#[test]
fn test_account_history_in_order() -> Result<()> {
    let mut ledger = Ledger::new();
    let account = ledger.create_account(100000)?;

    ledger.deposit(account, 50000)?;
    ledger.withdraw(account, 20000)?;
    ledger.withdraw(account, 200000)?; // Intentional failure

    let transactions = ledger.account_transactions(account);
    assert_eq!(transactions.len(), 3);

    assert_eq!(transactions[0].kind, TransactionKind::Deposit);
    assert!(transactions[0].succeeded());
    assert_eq!(transactions[1].kind, TransactionKind::Withdrawal);
    assert!(transactions[1].succeeded());
    assert_eq!(transactions[2].kind, TransactionKind::Withdrawal);
    assert!(!transactions[2].succeeded());

    assert_eq!(ledger.balance(account)?, 130000);

    Ok(())
}

#[test]
fn test_history_snapshot_is_not_affected_by_later_operations() -> Result<()> {
    let mut setup = TwoAccounts::new(10000)?;
    setup.ledger.deposit(setup.source, 100)?;

    let snapshot = setup.ledger.transaction_history();
    setup.ledger.transfer(setup.source, setup.target, 100)?;

    assert_eq!(snapshot.len(), 1);
    assert_eq!(setup.ledger.transaction_history().len(), 2);

    Ok(())
}

#[test]
fn test_scenario_alice_and_bob() -> Result<()> {
    let mut ledger = Ledger::new();
    let alice = ledger.create_account(100000)?;
    let bob = ledger.open_account();

    ledger.deposit(bob, 50000)?;
    assert!(ledger.transfer(alice, bob, 30000)?);
    assert!(!ledger.withdraw(bob, 100000)?);

    assert_eq!(ledger.balance(alice)?, 70000);
    assert_eq!(ledger.balance(bob)?, 80000);

    let bob_history = ledger.account_transactions(bob);
    let kinds: Vec<_> = bob_history.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TransactionKind::Deposit,
            TransactionKind::Transfer,
            TransactionKind::Withdrawal
        ]
    );

    // Alice only sees the transfer
    assert_eq!(ledger.account_transactions(alice).len(), 1);
    assert_eq!(ledger.total_balance(), 150000);

    Ok(())
}
