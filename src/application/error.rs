use thiserror::Error;

use crate::domain::SettlementError;

#[derive(Error, Debug)]
pub enum AppError {
    // Validation failures: the offending submission is rejected and never
    // stored.
    #[error("Expense description must not be empty")]
    EmptyDescription,

    #[error("Expense amount must be positive")]
    NonPositiveAmount,

    #[error("Unknown payer '{0}': not a member of this household")]
    UnknownPayer(String),

    #[error("Participant names must not be empty")]
    EmptyParticipantName,

    #[error("Duplicate participant: {0}")]
    DuplicateParticipant(String),

    // Configuration failures: fatal to the call, never silently defaulted.
    #[error("A household needs at least one participant")]
    NoParticipants,

    #[error("Household is not configured yet (run `init` first)")]
    HouseholdNotConfigured,

    // Data-integrity bug upstream: a stored record references a payer
    // outside the household. Store validation was bypassed.
    #[error("Ledger integrity violation: stored expense attributed to '{0}', who is not a household member")]
    UnattributedExpense(String),

    #[error("Database error: {0}")]
    Database(#[from] anyhow::Error),
}

impl From<SettlementError> for AppError {
    fn from(err: SettlementError) -> Self {
        match err {
            SettlementError::NoParticipants => AppError::NoParticipants,
            SettlementError::UnknownPayer { payer } => AppError::UnattributedExpense(payer),
        }
    }
}
