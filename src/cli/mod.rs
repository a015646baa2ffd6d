use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs::File;
use std::io::{stdout, Write};
use std::path::PathBuf;

use crate::application::{Ledger, Library};
use crate::domain::{format_cents, AccountId, Document, Transaction, TransactionKind};
use crate::io::{replay, Exporter};
use crate::storage::DiskStore;

mod logging;

pub use logging::{init_logging, LogFormat};

/// ledgerlab - a banking ledger and document library demo
#[derive(Parser)]
#[command(name = "ledgerlab")]
#[command(about = "A small banking ledger and document library used to contrast unit and integration tests")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the scripted banking scenario and print the results
    Demo,

    /// Apply a CSV script of ledger operations to a fresh ledger
    Replay {
        /// Script file with header `operation,account,target,amount`
        script: PathBuf,

        /// Output format for the resulting history
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Document library commands
    #[command(subcommand)]
    Doc(DocCommands),
}

#[derive(Subcommand)]
pub enum DocCommands {
    /// Save a new document into the library directory
    Save {
        /// Document title (must be unique)
        #[arg(long)]
        title: String,

        #[arg(long, default_value = "")]
        author: String,

        #[arg(long, default_value = "")]
        content: String,

        /// Library directory
        #[arg(long, default_value = "library")]
        dir: PathBuf,
    },

    /// Print a document stored in the library directory
    Show {
        title: String,

        /// Library directory
        #[arg(long, default_value = "library")]
        dir: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Balances and history as aligned tables
    Table,
    /// Transaction history as CSV
    Csv,
    /// Transaction history as JSON
    Json,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Demo => run_demo_command()?,

            Commands::Replay {
                script,
                format,
                output,
            } => run_replay_command(&script, format, output.as_deref())?,

            Commands::Doc(doc_cmd) => run_doc_command(doc_cmd)?,
        }
        Ok(())
    }
}

fn run_demo_command() -> Result<()> {
    let mut ledger = Ledger::new();

    println!("1. Opening accounts");
    let alice = ledger.create_account(100000)?;
    let bob = ledger.open_account();
    println!("   Alice: {} (balance {})", alice, format_cents(ledger.balance(alice)?));
    println!("   Bob:   {} (balance {})", bob, format_cents(ledger.balance(bob)?));

    println!("\n2. Bob deposits 500.00");
    ledger.deposit(bob, 50000)?;
    println!("   Bob's balance: {}", format_cents(ledger.balance(bob)?));

    println!("\n3. Alice transfers 300.00 to Bob");
    ledger.transfer(alice, bob, 30000)?;
    println!("   Alice's balance: {}", format_cents(ledger.balance(alice)?));
    println!("   Bob's balance:   {}", format_cents(ledger.balance(bob)?));

    println!("\n4. Bob tries to withdraw 1000.00");
    let withdrawn = ledger.withdraw(bob, 100000)?;
    println!(
        "   Withdrawal {}; Bob's balance: {}",
        if withdrawn { "succeeded" } else { "refused" },
        format_cents(ledger.balance(bob)?)
    );

    println!("\n5. Bob's transaction history");
    for txn in ledger.account_transactions(bob) {
        println!("   {}", describe_for(&txn, bob));
    }

    println!();
    write_balances_table(&mut stdout(), &ledger)?;
    Ok(())
}

/// One-line description of `txn` from the point of view of `account`.
fn describe_for(txn: &Transaction, account: AccountId) -> String {
    let status = match txn.failure() {
        None => "succeeded".to_string(),
        Some(reason) => format!("failed ({})", reason),
    };
    let mut line = format!(
        "{} {:<10} {:>10} {}",
        txn.id,
        txn.kind.as_str(),
        format_cents(txn.amount),
        status
    );
    if txn.kind == TransactionKind::Transfer {
        match txn.target {
            Some(target) if txn.source == account => line.push_str(&format!(", to {}", target)),
            _ => line.push_str(&format!(", from {}", txn.source)),
        }
    }
    line
}

fn run_replay_command(
    script: &std::path::Path,
    format: OutputFormat,
    output: Option<&std::path::Path>,
) -> Result<()> {
    let file = File::open(script)
        .with_context(|| format!("Failed to open script: {}", script.display()))?;

    let mut ledger = Ledger::new();
    let report = replay(&mut ledger, file)?;

    eprintln!(
        "Applied {} operation(s), {} rejected",
        report.applied, report.rejected
    );
    for line_error in &report.errors {
        eprintln!("  line {}: {}", line_error.line, line_error.error);
    }

    let mut writer: Box<dyn Write> = match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            Box::new(file)
        }
        None => Box::new(stdout()),
    };

    let exporter = Exporter::new(&ledger);
    match format {
        OutputFormat::Table => {
            write_balances_table(&mut writer, &ledger)?;
            writeln!(writer)?;
            write_history_table(&mut writer, &ledger.transaction_history())?;
        }
        OutputFormat::Csv => {
            exporter.export_history_csv(&mut writer)?;
        }
        OutputFormat::Json => {
            exporter.export_history_json(&mut writer)?;
        }
    }
    writer.flush()?;
    Ok(())
}

fn write_balances_table<W: Write>(writer: &mut W, ledger: &Ledger) -> Result<()> {
    let balances = ledger.balances();
    if balances.is_empty() {
        writeln!(writer, "No accounts.")?;
        return Ok(());
    }

    writeln!(writer, "{:<10} {:>14} {:>6}", "ACCOUNT", "BALANCE", "TXNS")?;
    writeln!(writer, "{}", "-".repeat(32))?;
    for entry in balances {
        writeln!(
            writer,
            "{:<10} {:>14} {:>6}",
            entry.account.to_string(),
            format_cents(entry.balance),
            entry.transaction_count
        )?;
    }
    Ok(())
}

fn write_history_table<W: Write>(writer: &mut W, history: &[Transaction]) -> Result<()> {
    if history.is_empty() {
        writeln!(writer, "No transactions.")?;
        return Ok(());
    }

    writeln!(
        writer,
        "{:<8} {:<10} {:<8} {:<8} {:>12} STATUS",
        "ID", "KIND", "SOURCE", "TARGET", "AMOUNT"
    )?;
    writeln!(writer, "{}", "-".repeat(66))?;
    for txn in history {
        let status = match txn.failure() {
            None => "ok".to_string(),
            Some(reason) => reason.to_string(),
        };
        writeln!(
            writer,
            "{:<8} {:<10} {:<8} {:<8} {:>12} {}",
            txn.id.to_string(),
            txn.kind.as_str(),
            txn.source.to_string(),
            txn.target.map(|t| t.to_string()).unwrap_or_default(),
            format_cents(txn.amount),
            status
        )?;
    }
    Ok(())
}

fn run_doc_command(cmd: DocCommands) -> Result<()> {
    match cmd {
        DocCommands::Save {
            title,
            author,
            content,
            dir,
        } => {
            let mut library = Library::new(DiskStore::new(&dir), "");
            let document = Document::new(title).with_author(author).with_content(content);
            let path = library.add_document(document)?;
            println!("Saved document: {}", dir.join(path).display());
        }

        DocCommands::Show { title, dir } => {
            let mut library = Library::new(DiskStore::new(&dir), "");
            let document = library
                .load_document(&title)
                .with_context(|| format!("Failed to load '{}' from {}", title, dir.display()))?;
            println!("Title:  {}", document.title);
            println!("Author: {}", document.author);
            println!();
            println!("{}", document.content);
        }
    }
    Ok(())
}
