use chrono::{DateTime, Utc};

use crate::domain::{
    compute_settlement, Cents, ExpenseRecord, Participant, SettlementReport,
    DEFAULT_EPSILON_CENTS,
};
use crate::storage::Repository;

use super::AppError;

/// Application service providing high-level operations for the household
/// ledger. This is the primary interface for any client (CLI, API, TUI).
#[derive(Debug)]
pub struct HouseholdService {
    repo: Repository,
}

impl HouseholdService {
    /// Create a new household service with the given repository.
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    /// Initialize a new database at the given path and seed the fixed
    /// participant set. Participants are configured exactly once.
    pub async fn init(database_path: &str, participant_names: &[String]) -> Result<Self, AppError> {
        let participants = build_household(participant_names)?;

        let db_url = format!("sqlite:{}?mode=rwc", database_path);
        let repo = Repository::init(&db_url).await?;
        repo.save_participants(&participants).await?;

        Ok(Self::new(repo))
    }

    /// Connect to an existing database.
    pub async fn connect(database_path: &str) -> Result<Self, AppError> {
        let db_url = format!("sqlite:{}", database_path);
        let repo = Repository::connect(&db_url).await?;
        Ok(Self::new(repo))
    }

    /// The configured participant set, in household order.
    pub async fn participants(&self) -> Result<Vec<Participant>, AppError> {
        let participants = self.repo.list_participants().await?;
        if participants.is_empty() {
            return Err(AppError::HouseholdNotConfigured);
        }
        Ok(participants)
    }

    /// Validate and append a new expense. The record id and timestamp are
    /// assigned here; an invalid submission is rejected before anything
    /// touches storage.
    pub async fn add_expense(
        &self,
        payer: &str,
        description: &str,
        amount_cents: Cents,
        recorded_at: Option<DateTime<Utc>>,
    ) -> Result<ExpenseRecord, AppError> {
        let description = description.trim();
        if description.is_empty() {
            return Err(AppError::EmptyDescription);
        }
        if amount_cents <= 0 {
            return Err(AppError::NonPositiveAmount);
        }

        let participants = self.participants().await?;
        if !participants.iter().any(|p| p.name == payer) {
            return Err(AppError::UnknownPayer(payer.to_string()));
        }

        let record = ExpenseRecord::new(
            payer,
            description,
            amount_cents,
            recorded_at.unwrap_or_else(Utc::now),
        );
        self.repo.save_expense(&record).await?;

        Ok(record)
    }

    /// All expenses in insertion order. Empty vec for a fresh or cleared
    /// ledger, never an error.
    pub async fn list_expenses(&self) -> Result<Vec<ExpenseRecord>, AppError> {
        Ok(self.repo.list_expenses().await?)
    }

    /// Recompute the settlement report from a fresh read of the ledger.
    pub async fn settle(&self, epsilon_cents: Option<f64>) -> Result<SettlementReport, AppError> {
        let participants = self.participants().await?;
        let records = self.repo.list_expenses().await?;

        let report = compute_settlement(
            &records,
            &participants,
            epsilon_cents.unwrap_or(DEFAULT_EPSILON_CENTS),
        )?;
        Ok(report)
    }

    /// Destroy all expenses (end-of-month reset). Irreversible, whole-ledger
    /// scope. Returns how many records were removed; clearing an empty
    /// ledger is a no-op.
    pub async fn clear_expenses(&self) -> Result<u64, AppError> {
        Ok(self.repo.clear_expenses().await?)
    }
}

/// Validate raw participant names into the household set: trimmed,
/// non-empty, unique, at least one.
fn build_household(names: &[String]) -> Result<Vec<Participant>, AppError> {
    let mut participants: Vec<Participant> = Vec::new();
    for raw in names {
        let name = raw.trim();
        if name.is_empty() {
            return Err(AppError::EmptyParticipantName);
        }
        if participants.iter().any(|p| p.name == name) {
            return Err(AppError::DuplicateParticipant(name.to_string()));
        }
        participants.push(Participant::new(name));
    }
    if participants.is_empty() {
        return Err(AppError::NoParticipants);
    }
    Ok(participants)
}
