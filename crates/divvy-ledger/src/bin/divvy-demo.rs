//! # divvy Demo
//!
//! Replays a four-person trip through the ledger and prints the resulting
//! balances, who owes whom, and the settlement.
//!
//! ## Usage
//! ```bash
//! cargo run -p divvy-ledger --bin divvy-demo
//!
//! # Machine-readable output
//! cargo run -p divvy-ledger --bin divvy-demo -- --json
//!
//! # Explicit config file, verbose logging
//! RUST_LOG=divvy_ledger=debug cargo run -p divvy-ledger --bin divvy-demo -- --config ./ledger.toml
//! ```
//!
//! ## Scenario
//! ```text
//! 1. Jitu pays 2000.00 for dinner, split equally among all four
//! 2. Jitu pays 1400.00 for tickets: Navin 500.00, Yogi 900.00
//! 3. Mandal pays 1200.00 for the hotel: 40% / 20% / 20% / 20%
//! ```

use std::env;
use std::path::PathBuf;

use divvy_core::{Money, Percentage, SplitPolicy, Transfer};
use divvy_ledger::{AppliedExpense, Ledger, LedgerConfig, ParticipantBalance, Statement};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Serialize)]
struct Report {
    expenses: Vec<AppliedExpense>,
    balances: Vec<ParticipantBalance>,
    statements: Vec<Statement>,
    settlement: Vec<Transfer>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let mut json = false;
    let mut config_path: Option<PathBuf> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--json" | "-j" => json = true,
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("divvy Demo");
                println!();
                println!("Usage: divvy-demo [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -j, --json           Print the report as JSON");
                println!("  -c, --config <PATH>  Ledger config file (default: platform config dir)");
                println!("  -h, --help           Show this help message");
                return Ok(());
            }
            other => eprintln!("Ignoring unknown argument: {}", other),
        }
        i += 1;
    }

    let config = LedgerConfig::load_or_default(config_path);
    let symbol = config.currency_symbol().to_string();
    let ledger = Ledger::new(config);

    let jitu = ledger.register_participant("Jitu")?.id;
    let navin = ledger.register_participant("Navin")?.id;
    let yogi = ledger.register_participant("Yogi")?.id;
    let mandal = ledger.register_participant("Mandal")?.id;
    let everyone = vec![jitu, navin, yogi, mandal];

    let dinner = ledger
        .create_expense(jitu, everyone.clone(), Money::from_major(2000), SplitPolicy::Equal)?
        .with_description("Dinner");

    let tickets = ledger
        .create_expense(
            jitu,
            vec![navin, yogi],
            Money::from_major(1400),
            SplitPolicy::Exact(vec![Money::from_major(500), Money::from_major(900)]),
        )?
        .with_description("Tickets");

    let hotel = ledger
        .create_expense(
            mandal,
            everyone,
            Money::from_major(1200),
            SplitPolicy::Percent(vec![
                Percentage::from_whole(40),
                Percentage::from_whole(20),
                Percentage::from_whole(20),
                Percentage::from_whole(20),
            ]),
        )?
        .with_description("Hotel");

    let mut expenses = Vec::new();
    for expense in [&dinner, &tickets, &hotel] {
        expenses.push(ledger.apply_expense(expense)?);
    }

    let report = Report {
        expenses,
        balances: ledger.balances(),
        statements: ledger.statements(),
        settlement: ledger.settle(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Expenses");
    println!("========");
    for expense in [&dinner, &tickets, &hotel] {
        println!(
            "  {} {:<8} {}{} paid by {}, split {}",
            expense.id(),
            expense.description().unwrap_or("-"),
            symbol,
            expense.total(),
            name_of(&ledger, expense.payer()),
            expense.kind()
        );
    }

    println!();
    println!("Balances");
    println!("========");
    for balance in &report.balances {
        println!("  {}", balance.describe(&symbol));
    }

    println!();
    println!("Who owes whom");
    println!("=============");
    for statement in &report.statements {
        println!("  {}", statement.describe(&symbol));
    }

    println!();
    println!("Settlement");
    println!("==========");
    if report.settlement.is_empty() {
        println!("  Nothing to settle");
    }
    for transfer in &report.settlement {
        println!(
            "  {} pays {}{} to {}",
            name_of(&ledger, transfer.from),
            symbol,
            transfer.amount,
            name_of(&ledger, transfer.to)
        );
    }

    Ok(())
}

fn name_of(ledger: &Ledger, id: divvy_core::ParticipantId) -> String {
    ledger
        .lookup(id)
        .map(|participant| participant.name)
        .unwrap_or_else(|| id.to_string())
}
