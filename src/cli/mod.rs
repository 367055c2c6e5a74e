use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::application::HouseholdService;
use crate::domain::{format_cents, format_cents_f64, parse_cents, SettlementReport, Verdict};

/// Divisio - Shared Household Expense Ledger
#[derive(Parser)]
#[command(name = "divisio")]
#[command(about = "A shared household expense ledger with fair-split settlement")]
#[command(version)]
pub struct Cli {
    /// Database file path
    #[arg(short, long, default_value = "household.db")]
    pub database: String,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new household ledger
    Init {
        /// Comma-separated participant names (e.g. "Ana,Bruno,Carla")
        #[arg(short, long)]
        participants: String,
    },

    /// Record a new expense
    Add {
        /// Amount paid (e.g. "50.00" or "50")
        amount: String,

        /// Who paid
        #[arg(short, long)]
        payer: String,

        /// What the money was spent on (e.g. "rent", "groceries")
        #[arg(long)]
        description: String,

        /// Date of the expense (ISO 8601 format: YYYY-MM-DD, defaults to now)
        #[arg(long)]
        date: Option<String>,
    },

    /// List recorded expenses
    List {
        /// Show only the most recent N expenses
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Compute the settlement: total, fair share, who owes whom
    Settle {
        /// Tolerance for treating a balance as settled (e.g. "0.01")
        #[arg(long)]
        epsilon: Option<String>,

        /// Output format: table, json
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// List household participants
    Participants,

    /// Export data to CSV or JSON
    Export {
        /// What to export: expenses, full
        export_type: String,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Delete every recorded expense (end-of-month reset)
    Clear,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Init { participants } => {
                let names: Vec<String> = participants.split(',').map(String::from).collect();
                let service = HouseholdService::init(&self.database, &names).await?;

                let configured = service.participants().await?;
                println!(
                    "Initialized household ledger: {} ({} participants)",
                    self.database,
                    configured.len()
                );
                for participant in configured {
                    println!("  - {}", participant.name);
                }
            }

            Commands::Add {
                amount,
                payer,
                description,
                date,
            } => {
                let service = HouseholdService::connect(&self.database).await?;
                let amount_cents =
                    parse_cents(&amount).context("Invalid amount format. Use '50.00' or '50'")?;

                let recorded_at = date
                    .as_deref()
                    .map(parse_date)
                    .transpose()
                    .context("Invalid date format. Use YYYY-MM-DD")?;

                let record = service
                    .add_expense(&payer, &description, amount_cents, recorded_at)
                    .await?;

                if self.verbose {
                    eprintln!("[add] stored expense {}", record.id);
                }
                println!(
                    "Recorded expense: {} paid by {} ({})",
                    format_cents(record.amount_cents),
                    record.payer,
                    record.description
                );
            }

            Commands::List { limit } => {
                let service = HouseholdService::connect(&self.database).await?;
                let expenses = service.list_expenses().await?;

                if expenses.is_empty() {
                    println!("No expenses recorded. Use `add` to start logging.");
                } else {
                    let skip = match limit {
                        Some(n) if n < expenses.len() => expenses.len() - n,
                        _ => 0,
                    };

                    println!("{:<12} {:<15} {:>10} DESCRIPTION", "DATE", "PAYER", "AMOUNT");
                    println!("{}", "-".repeat(60));
                    for expense in expenses.iter().skip(skip) {
                        println!(
                            "{:<12} {:<15} {:>10} {}",
                            expense.recorded_at.format("%Y-%m-%d"),
                            truncate(&expense.payer, 15),
                            format_cents(expense.amount_cents),
                            truncate(&expense.description, 30)
                        );
                    }
                }
            }

            Commands::Settle { epsilon, format } => {
                let service = HouseholdService::connect(&self.database).await?;

                let epsilon_cents = epsilon
                    .map(|e| parse_cents(&e))
                    .transpose()
                    .context("Invalid epsilon format. Use '0.01'")?
                    .map(|cents| cents as f64);

                let report = service.settle(epsilon_cents).await?;

                if self.verbose {
                    eprintln!(
                        "[settle] {} entries, tolerance {} cents",
                        report.entries.len(),
                        report.epsilon_cents
                    );
                }

                match format.as_str() {
                    "json" => println!("{}", serde_json::to_string_pretty(&report)?),
                    _ => print_settlement_table(&report),
                }
            }

            Commands::Participants => {
                let service = HouseholdService::connect(&self.database).await?;
                let participants = service.participants().await?;

                println!("Household participants:");
                for participant in participants {
                    println!("  - {}", participant.name);
                }
            }

            Commands::Export {
                export_type,
                output,
            } => {
                let service = HouseholdService::connect(&self.database).await?;
                run_export_command(&service, &export_type, output.as_deref()).await?;
            }

            Commands::Clear => {
                let service = HouseholdService::connect(&self.database).await?;
                let removed = service.clear_expenses().await?;
                println!("Cleared {} expense(s). The ledger is empty.", removed);
            }
        }

        Ok(())
    }
}

fn print_settlement_table(report: &SettlementReport) {
    println!("Household Settlement");
    println!("Total spent: {}", format_cents(report.total_cents));
    println!(
        "Fair share:  {} ({} participants)",
        format_cents_f64(report.fair_share_cents),
        report.entries.len()
    );
    println!();
    println!(
        "{:<20} {:>10} {:>10} {:<10}",
        "PARTICIPANT", "PAID", "BALANCE", "VERDICT"
    );
    println!("{}", "-".repeat(54));

    for entry in &report.entries {
        println!(
            "{:<20} {:>10} {:>10} {:<10}",
            truncate(&entry.participant, 20),
            format_cents(entry.paid_cents),
            format_cents_f64(entry.balance_cents),
            entry.verdict
        );
    }

    println!();
    for entry in &report.entries {
        match entry.verdict {
            Verdict::Receives => println!(
                "{} receives {} (paid over the fair share)",
                entry.participant,
                format_cents_f64(entry.balance_cents)
            ),
            Verdict::Owes => println!(
                "{} owes {}",
                entry.participant,
                format_cents_f64(entry.balance_cents.abs())
            ),
            Verdict::Settled => println!("{} is settled", entry.participant),
        }
    }
}

async fn run_export_command(
    service: &HouseholdService,
    export_type: &str,
    output: Option<&str>,
) -> Result<()> {
    use crate::io::Exporter;
    use std::fs::File;
    use std::io::{stdout, Write};

    let exporter = Exporter::new(service);

    let writer: Box<dyn Write> = match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path))?;
            Box::new(file)
        }
        None => Box::new(stdout()),
    };

    match export_type {
        "expenses" => {
            let count = exporter.export_expenses_csv(writer).await?;
            if output.is_some() {
                eprintln!("Exported {} expenses", count);
            }
        }
        "full" => {
            let snapshot = exporter.export_full_json(writer).await?;
            if output.is_some() {
                eprintln!(
                    "Exported full ledger: {} participants, {} expenses",
                    snapshot.participants.len(),
                    snapshot.expenses.len()
                );
            }
        }
        _ => {
            anyhow::bail!(
                "Invalid export type '{}'. Valid types: expenses, full",
                export_type
            );
        }
    }

    Ok(())
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len - 3])
    }
}

fn parse_date(date_str: &str) -> Result<chrono::DateTime<chrono::Utc>> {
    use chrono::NaiveDate;

    let naive_date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .context("Date must be in YYYY-MM-DD format")?;

    let naive_datetime = naive_date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| anyhow::anyhow!("Invalid date"))?;

    Ok(chrono::DateTime::from_naive_utc_and_offset(
        naive_datetime,
        chrono::Utc,
    ))
}
