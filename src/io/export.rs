use anyhow::Result;
use std::io::Write;

use crate::application::Ledger;
use crate::domain::format_cents;

/// Exporter for writing ledger history and balances as reports
pub struct Exporter<'a> {
    ledger: &'a Ledger,
}

impl<'a> Exporter<'a> {
    pub fn new(ledger: &'a Ledger) -> Self {
        Self { ledger }
    }

    /// Export the transaction log to CSV format
    pub fn export_history_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record([
            "id",
            "kind",
            "source",
            "target",
            "amount",
            "status",
            "failure",
            "recorded_at",
        ])?;

        let entries = self.ledger.transactions().entries();
        for txn in entries {
            csv_writer.write_record(&[
                txn.id.to_string(),
                txn.kind.to_string(),
                txn.source.to_string(),
                txn.target.map(|id| id.to_string()).unwrap_or_default(),
                format_cents(txn.amount),
                if txn.succeeded() { "succeeded" } else { "failed" }.to_string(),
                txn.failure().map(|f| f.to_string()).unwrap_or_default(),
                txn.recorded_at.to_rfc3339(),
            ])?;
        }

        csv_writer.flush()?;
        Ok(entries.len())
    }

    /// Export the transaction log as a pretty-printed JSON array
    pub fn export_history_json<W: Write>(&self, mut writer: W) -> Result<usize> {
        let entries = self.ledger.transactions().entries();
        serde_json::to_writer_pretty(&mut writer, entries)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(entries.len())
    }

    /// Export account balances to CSV format
    pub fn export_balances_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(["account", "balance", "transactions"])?;

        let balances = self.ledger.balances();
        for entry in &balances {
            csv_writer.write_record(&[
                entry.account.to_string(),
                format_cents(entry.balance),
                entry.transaction_count.to_string(),
            ])?;
        }

        csv_writer.flush()?;
        Ok(balances.len())
    }
}
