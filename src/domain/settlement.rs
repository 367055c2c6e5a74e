use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{Cents, ExpenseRecord, Participant};

/// Default verdict tolerance: one cent (0.01 currency units).
/// Balances within this distance of zero are reported as settled instead of
/// surfacing floating-point noise as a debt.
pub const DEFAULT_EPSILON_CENTS: f64 = 1.0;

/// How a participant stands relative to their fair share.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    /// Paid more than the fair share, gets money back
    Receives,
    /// Paid less than the fair share, owes the difference
    Owes,
    /// Within tolerance of zero
    Settled,
}

impl Verdict {
    /// Classify a net balance against an absolute tolerance.
    /// The boundary is inclusive: a balance of exactly `epsilon_cents`
    /// counts as settled.
    pub fn classify(balance_cents: f64, epsilon_cents: f64) -> Self {
        if balance_cents > epsilon_cents {
            Verdict::Receives
        } else if balance_cents < -epsilon_cents {
            Verdict::Owes
        } else {
            Verdict::Settled
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Receives => "receives",
            Verdict::Owes => "owes",
            Verdict::Settled => "settled",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One participant's line in a settlement report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementEntry {
    pub participant: String,
    /// Total this participant paid (exactly 0 for participants who paid
    /// nothing - never a missing entry)
    pub paid_cents: Cents,
    /// `paid - fair_share`; positive means overpaid
    pub balance_cents: f64,
    pub verdict: Verdict,
}

/// The computed summary of totals, fair share, and per-participant
/// balances. Derived, never persisted - recomputed from the current record
/// set every time it is needed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementReport {
    pub total_cents: Cents,
    /// `total / participant_count`; fractional when the total does not
    /// divide evenly
    pub fair_share_cents: f64,
    /// The tolerance the verdicts were classified with
    pub epsilon_cents: f64,
    /// One entry per participant, in configured household order
    pub entries: Vec<SettlementEntry>,
}

impl SettlementReport {
    /// Look up a participant's entry by name.
    pub fn entry(&self, participant: &str) -> Option<&SettlementEntry> {
        self.entries.iter().find(|e| e.participant == participant)
    }
}

/// Compute the equal-split settlement for a set of expense records.
///
/// Pure and deterministic: the report is a function of the inputs alone,
/// and the inputs are never mutated. Every participant gets an entry even
/// if they paid nothing. The sum of all balances is zero within
/// floating-point tolerance - overpayments exactly offset debts.
pub fn compute_settlement(
    records: &[ExpenseRecord],
    participants: &[Participant],
    epsilon_cents: f64,
) -> Result<SettlementReport, SettlementError> {
    if participants.is_empty() {
        return Err(SettlementError::NoParticipants);
    }

    let mut paid: HashMap<&str, Cents> = participants
        .iter()
        .map(|p| (p.name.as_str(), 0))
        .collect();

    let mut total: Cents = 0;
    for record in records {
        match paid.get_mut(record.payer.as_str()) {
            Some(sum) => *sum += record.amount_cents,
            // Store validation should have rejected this record; failing
            // loudly beats attributing money to an unknown bucket.
            None => {
                return Err(SettlementError::UnknownPayer {
                    payer: record.payer.clone(),
                });
            }
        }
        total += record.amount_cents;
    }

    let fair_share = total as f64 / participants.len() as f64;

    let entries = participants
        .iter()
        .map(|p| {
            let paid_cents = paid[p.name.as_str()];
            let balance_cents = paid_cents as f64 - fair_share;
            SettlementEntry {
                participant: p.name.clone(),
                paid_cents,
                balance_cents,
                verdict: Verdict::classify(balance_cents, epsilon_cents),
            }
        })
        .collect();

    Ok(SettlementReport {
        total_cents: total,
        fair_share_cents: fair_share,
        epsilon_cents,
        entries,
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettlementError {
    /// The participant set is empty; a fair share cannot be computed
    NoParticipants,
    /// A record names a payer outside the participant set
    UnknownPayer { payer: String },
}

impl std::fmt::Display for SettlementError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettlementError::NoParticipants => {
                write!(f, "Cannot settle: the participant set is empty")
            }
            SettlementError::UnknownPayer { payer } => {
                write!(f, "Payer '{}' is not a member of the participant set", payer)
            }
        }
    }
}

impl std::error::Error for SettlementError {}
