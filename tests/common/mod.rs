// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use divisio::application::HouseholdService;
use tempfile::TempDir;

/// Helper to create a test service with a temporary database and the given
/// household
pub async fn test_service(participants: &[&str]) -> Result<(HouseholdService, TempDir)> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("test.db");
    let names: Vec<String> = participants.iter().map(|s| s.to_string()).collect();
    let service = HouseholdService::init(db_path.to_str().unwrap(), &names).await?;
    Ok((service, temp_dir))
}

/// Helper to parse a date string into DateTime<Utc>
pub fn parse_date(date_str: &str) -> DateTime<Utc> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        .and_utc()
}
