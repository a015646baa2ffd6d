use anyhow::Result;
use std::io::Read;
use thiserror::Error;

use crate::application::{Ledger, LedgerError};
use crate::domain::{parse_cents, AccountId, Cents, ParseCentsError, ParseIdError};

/// One row of a replay script
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Open { initial_balance: Cents },
    Deposit { account: AccountId, amount: Cents },
    Withdraw { account: AccountId, amount: Cents },
    Transfer { source: AccountId, target: AccountId, amount: Cents },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReplayError {
    #[error("CSV parse error: {0}")]
    Csv(String),

    #[error("unknown operation '{0}'")]
    UnknownOperation(String),

    #[error("missing field '{0}'")]
    MissingField(&'static str),

    #[error(transparent)]
    InvalidAccount(#[from] ParseIdError),

    #[error("invalid amount '{value}': {source}")]
    InvalidAmount {
        value: String,
        #[source]
        source: ParseCentsError,
    },

    #[error("insufficient funds")]
    InsufficientFunds,

    #[error(transparent)]
    Rejected(#[from] LedgerError),
}

/// Problem with a single script line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineError {
    pub line: usize,
    pub error: ReplayError,
}

/// Result of replaying a script
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplayReport {
    /// Rows that ran and succeeded
    pub applied: usize,
    /// Rows the ledger ran but rejected (these are in the transaction log)
    pub rejected: usize,
    pub errors: Vec<LineError>,
}

impl Operation {
    /// Parse one row given as `operation,account,target,amount`.
    pub fn parse(operation: &str, account: &str, target: &str, amount: &str) -> Result<Self, ReplayError> {
        match operation.trim().to_lowercase().as_str() {
            "open" => Ok(Operation::Open {
                initial_balance: if amount.trim().is_empty() {
                    0
                } else {
                    parse_amount(amount)?
                },
            }),
            "deposit" => Ok(Operation::Deposit {
                account: parse_account(account, "account")?,
                amount: parse_required_amount(amount)?,
            }),
            "withdraw" => Ok(Operation::Withdraw {
                account: parse_account(account, "account")?,
                amount: parse_required_amount(amount)?,
            }),
            "transfer" => Ok(Operation::Transfer {
                source: parse_account(account, "account")?,
                target: parse_account(target, "target")?,
                amount: parse_required_amount(amount)?,
            }),
            other => Err(ReplayError::UnknownOperation(other.to_string())),
        }
    }

    /// Run this operation against `ledger`.
    pub fn apply(&self, ledger: &mut Ledger) -> Result<(), ReplayError> {
        let completed = match *self {
            Operation::Open { initial_balance } => {
                ledger.create_account(initial_balance)?;
                true
            }
            Operation::Deposit { account, amount } => {
                ledger.deposit(account, amount)?;
                true
            }
            Operation::Withdraw { account, amount } => ledger.withdraw(account, amount)?,
            Operation::Transfer {
                source,
                target,
                amount,
            } => ledger.transfer(source, target, amount)?,
        };

        if completed {
            Ok(())
        } else {
            Err(ReplayError::InsufficientFunds)
        }
    }
}

fn parse_account(value: &str, field: &'static str) -> Result<AccountId, ReplayError> {
    if value.trim().is_empty() {
        return Err(ReplayError::MissingField(field));
    }
    Ok(value.parse()?)
}

fn parse_required_amount(value: &str) -> Result<Cents, ReplayError> {
    if value.trim().is_empty() {
        return Err(ReplayError::MissingField("amount"));
    }
    parse_amount(value)
}

fn parse_amount(value: &str) -> Result<Cents, ReplayError> {
    parse_cents(value).map_err(|source| ReplayError::InvalidAmount {
        value: value.to_string(),
        source,
    })
}

/// Replay a CSV script with header `operation,account,target,amount`.
///
/// Rows are applied in order. Unparseable rows are skipped without touching
/// the ledger; rows the ledger rejects are still logged by the ledger.
pub fn replay<R: Read>(ledger: &mut Ledger, reader: R) -> Result<ReplayReport> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let mut report = ReplayReport::default();

    for result in csv_reader.records() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                report.errors.push(LineError {
                    line: line_of(e.position()),
                    error: ReplayError::Csv(e.to_string()),
                });
                continue;
            }
        };
        let line = line_of(record.position());

        let field = |i: usize| record.get(i).unwrap_or("");
        let operation = match Operation::parse(field(0), field(1), field(2), field(3)) {
            Ok(op) => op,
            Err(error) => {
                report.errors.push(LineError { line, error });
                continue;
            }
        };

        match operation.apply(ledger) {
            Ok(()) => report.applied += 1,
            Err(error) => {
                report.rejected += 1;
                report.errors.push(LineError { line, error });
            }
        }
    }

    tracing::info!(
        applied = report.applied,
        rejected = report.rejected,
        errors = report.errors.len(),
        "script replayed"
    );
    Ok(report)
}

/// Line a record starts on. Quoted fields may span several lines.
fn line_of(position: Option<&csv::Position>) -> usize {
    position.map_or(0, |p| p.line() as usize)
}
