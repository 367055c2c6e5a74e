mod common;

use anyhow::Result;
use common::test_service;
use divisio::io::Exporter;

#[tokio::test]
async fn test_export_expenses_csv() -> Result<()> {
    let (service, _temp) = test_service(&["Ana", "Bruno"]).await?;

    service.add_expense("Ana", "rent", 90000, None).await?;
    service.add_expense("Bruno", "groceries", 4550, None).await?;

    let exporter = Exporter::new(&service);
    let mut buffer: Vec<u8> = Vec::new();
    let count = exporter.export_expenses_csv(&mut buffer).await?;
    assert_eq!(count, 2);

    let output = String::from_utf8(buffer)?;
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 3); // header + 2 rows
    assert_eq!(lines[0], "id,recorded_at,payer,description,amount_cents");
    assert!(lines[1].contains("Ana"));
    assert!(lines[1].contains("rent"));
    assert!(lines[1].ends_with("90000"));
    assert!(lines[2].contains("Bruno"));
    assert!(lines[2].ends_with("4550"));

    Ok(())
}

#[tokio::test]
async fn test_export_empty_ledger_csv_has_header_only() -> Result<()> {
    let (service, _temp) = test_service(&["Ana"]).await?;

    let exporter = Exporter::new(&service);
    let mut buffer: Vec<u8> = Vec::new();
    let count = exporter.export_expenses_csv(&mut buffer).await?;
    assert_eq!(count, 0);

    let output = String::from_utf8(buffer)?;
    assert_eq!(output.lines().count(), 1);

    Ok(())
}

#[tokio::test]
async fn test_export_full_json() -> Result<()> {
    let (service, _temp) = test_service(&["Ana", "Bruno", "Carla"]).await?;

    service.add_expense("Ana", "rent", 90000, None).await?;

    let exporter = Exporter::new(&service);
    let mut buffer: Vec<u8> = Vec::new();
    let snapshot = exporter.export_full_json(&mut buffer).await?;

    assert_eq!(snapshot.participants.len(), 3);
    assert_eq!(snapshot.expenses.len(), 1);

    // The written JSON round-trips
    let parsed: serde_json::Value = serde_json::from_slice(&buffer)?;
    assert_eq!(parsed["participants"].as_array().unwrap().len(), 3);
    assert_eq!(parsed["expenses"].as_array().unwrap().len(), 1);
    assert_eq!(parsed["expenses"][0]["payer"], "Ana");
    assert_eq!(parsed["expenses"][0]["amount_cents"], 90000);

    Ok(())
}
