use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::domain::{ExpenseRecord, Participant};

use super::MIGRATION_001_INITIAL;

/// Repository for persisting and querying the participant set and the
/// expense ledger.
#[derive(Debug)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Create a new repository with the given SQLite connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect to a SQLite database at the given path.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = SqlitePool::connect(database_url)
            .await
            .context("Failed to connect to database")?;
        Ok(Self::new(pool))
    }

    /// Run database migrations.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(MIGRATION_001_INITIAL)
            .execute(&self.pool)
            .await
            .context("Failed to run migration 001")?;
        Ok(())
    }

    /// Initialize a new database (connect + migrate).
    pub async fn init(database_url: &str) -> Result<Self> {
        let repo = Self::connect(database_url).await?;
        repo.migrate().await?;
        Ok(repo)
    }

    // ========================
    // Participant operations
    // ========================

    /// Persist the household participant set with explicit positions so the
    /// configured ordering is stable across reads.
    pub async fn save_participants(&self, participants: &[Participant]) -> Result<()> {
        for (position, participant) in participants.iter().enumerate() {
            sqlx::query("INSERT INTO participants (name, position) VALUES (?, ?)")
                .bind(&participant.name)
                .bind(position as i64)
                .execute(&self.pool)
                .await
                .context("Failed to save participant")?;
        }
        Ok(())
    }

    /// List all participants in configured order.
    pub async fn list_participants(&self) -> Result<Vec<Participant>> {
        let rows = sqlx::query("SELECT name FROM participants ORDER BY position")
            .fetch_all(&self.pool)
            .await
            .context("Failed to list participants")?;

        Ok(rows
            .iter()
            .map(|row| Participant::new(row.get::<String, _>("name")))
            .collect())
    }

    // ========================
    // Expense operations
    // ========================

    /// Durably append a new expense record.
    pub async fn save_expense(&self, expense: &ExpenseRecord) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO expenses (id, recorded_at, payer, description, amount_cents)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(expense.id.to_string())
        .bind(expense.recorded_at.to_rfc3339())
        .bind(&expense.payer)
        .bind(&expense.description)
        .bind(expense.amount_cents)
        .execute(&self.pool)
        .await
        .context("Failed to save expense")?;

        Ok(())
    }

    /// List all expenses in insertion order. A store that has never been
    /// written to (or has been cleared) yields an empty vec.
    pub async fn list_expenses(&self) -> Result<Vec<ExpenseRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT id, recorded_at, payer, description, amount_cents
            FROM expenses
            ORDER BY position
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list expenses")?;

        rows.iter().map(Self::row_to_expense).collect()
    }

    /// Count stored expenses.
    pub async fn count_expenses(&self) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM expenses")
            .fetch_one(&self.pool)
            .await
            .context("Failed to count expenses")?;
        Ok(row.get("count"))
    }

    /// Delete every expense. Idempotent: clearing an empty ledger removes
    /// zero rows and is not an error. Returns the number of rows removed.
    pub async fn clear_expenses(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM expenses")
            .execute(&self.pool)
            .await
            .context("Failed to clear expenses")?;
        Ok(result.rows_affected())
    }

    fn row_to_expense(row: &sqlx::sqlite::SqliteRow) -> Result<ExpenseRecord> {
        let id_str: String = row.get("id");
        let recorded_at_str: String = row.get("recorded_at");

        Ok(ExpenseRecord {
            id: Uuid::parse_str(&id_str).context("Invalid expense ID")?,
            recorded_at: DateTime::parse_from_rfc3339(&recorded_at_str)
                .context("Invalid recorded_at timestamp")?
                .with_timezone(&Utc),
            payer: row.get("payer"),
            description: row.get("description"),
            amount_cents: row.get("amount_cents"),
        })
    }
}
