use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Cents;

pub type ExpenseId = Uuid;

/// A single expense paid by one household member on behalf of everyone.
/// Records are immutable - the only way to undo one is to clear the whole
/// ledger at the end of the month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub id: ExpenseId,
    /// When the expense was recorded (or backdated to, if the caller
    /// supplied an explicit date)
    pub recorded_at: DateTime<Utc>,
    /// Name of the participant who paid
    pub payer: String,
    /// What the money was spent on
    pub description: String,
    /// Amount in cents (always positive)
    pub amount_cents: Cents,
}

impl ExpenseRecord {
    /// Create a new expense record. The caller is responsible for having
    /// validated the payer and description; the amount is asserted here as
    /// a last line of defense.
    pub fn new(
        payer: impl Into<String>,
        description: impl Into<String>,
        amount_cents: Cents,
        recorded_at: DateTime<Utc>,
    ) -> Self {
        assert!(amount_cents > 0, "Expense amount must be positive");
        Self {
            id: Uuid::new_v4(),
            recorded_at,
            payer: payer.into(),
            description: description.into(),
            amount_cents,
        }
    }
}
