use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::application::HouseholdService;
use crate::domain::{ExpenseRecord, Participant};

/// Ledger snapshot for full export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub version: String,
    pub exported_at: DateTime<Utc>,
    pub participants: Vec<Participant>,
    pub expenses: Vec<ExpenseRecord>,
}

/// Exporter for converting ledger data to interchange formats
pub struct Exporter<'a> {
    service: &'a HouseholdService,
}

impl<'a> Exporter<'a> {
    pub fn new(service: &'a HouseholdService) -> Self {
        Self { service }
    }

    /// Export the expense table to CSV, one row per record in insertion
    /// order. Returns the number of rows written.
    pub async fn export_expenses_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let expenses = self.service.list_expenses().await?;
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(["id", "recorded_at", "payer", "description", "amount_cents"])?;

        let mut count = 0;
        for expense in &expenses {
            csv_writer.write_record([
                expense.id.to_string(),
                expense.recorded_at.to_rfc3339(),
                expense.payer.clone(),
                expense.description.clone(),
                expense.amount_cents.to_string(),
            ])?;
            count += 1;
        }

        csv_writer.flush()?;
        Ok(count)
    }

    /// Export the full ledger as a JSON snapshot.
    pub async fn export_full_json<W: Write>(&self, mut writer: W) -> Result<LedgerSnapshot> {
        let participants = self.service.participants().await?;
        let expenses = self.service.list_expenses().await?;

        let snapshot = LedgerSnapshot {
            version: env!("CARGO_PKG_VERSION").to_string(),
            exported_at: Utc::now(),
            participants,
            expenses,
        };

        let json = serde_json::to_string_pretty(&snapshot)?;
        writer.write_all(json.as_bytes())?;
        writer.flush()?;

        Ok(snapshot)
    }
}
