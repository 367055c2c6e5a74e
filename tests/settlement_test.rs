mod common;

use anyhow::Result;
use common::test_service;
use divisio::domain::Verdict;

#[tokio::test]
async fn test_settle_concrete_scenario() -> Result<()> {
    let (service, _temp) = test_service(&["A", "B", "C"]).await?;

    // A pays 90.00, B and C pay nothing
    service.add_expense("A", "rent", 9000, None).await?;

    let report = service.settle(None).await?;

    assert_eq!(report.total_cents, 9000);
    assert_eq!(report.fair_share_cents, 3000.0);

    let a = report.entry("A").unwrap();
    assert_eq!(a.paid_cents, 9000);
    assert_eq!(a.balance_cents, 6000.0);
    assert_eq!(a.verdict, Verdict::Receives);

    let b = report.entry("B").unwrap();
    assert_eq!(b.paid_cents, 0);
    assert_eq!(b.balance_cents, -3000.0);
    assert_eq!(b.verdict, Verdict::Owes);

    let c = report.entry("C").unwrap();
    assert_eq!(c.balance_cents, -3000.0);
    assert_eq!(c.verdict, Verdict::Owes);

    Ok(())
}

#[tokio::test]
async fn test_settle_everyone_paid_equally() -> Result<()> {
    let (service, _temp) = test_service(&["A", "B"]).await?;

    service.add_expense("A", "rent", 5000, None).await?;
    service.add_expense("B", "groceries", 5000, None).await?;

    let report = service.settle(None).await?;

    for entry in &report.entries {
        assert_eq!(entry.balance_cents, 0.0);
        assert_eq!(entry.verdict, Verdict::Settled);
    }

    Ok(())
}

#[tokio::test]
async fn test_settle_balances_sum_to_zero() -> Result<()> {
    let (service, _temp) = test_service(&["Ana", "Bruno", "Carla"]).await?;

    // Amounts chosen so the fair share is fractional
    service.add_expense("Ana", "rent", 100003, None).await?;
    service.add_expense("Bruno", "groceries", 1234, None).await?;
    service.add_expense("Carla", "utilities", 55, None).await?;

    let report = service.settle(None).await?;

    let sum: f64 = report.entries.iter().map(|e| e.balance_cents).sum();
    assert!(
        sum.abs() < 1e-9,
        "All balances must sum to zero (closed system), got {}",
        sum
    );

    Ok(())
}

#[tokio::test]
async fn test_settle_is_recomputed_from_current_ledger() -> Result<()> {
    let (service, _temp) = test_service(&["A", "B"]).await?;

    service.add_expense("A", "rent", 10000, None).await?;
    let before = service.settle(None).await?;
    assert_eq!(before.entry("A").unwrap().verdict, Verdict::Receives);

    // B evens things out; the next report reflects the new ledger state
    service.add_expense("B", "groceries", 10000, None).await?;
    let after = service.settle(None).await?;
    assert_eq!(after.entry("A").unwrap().verdict, Verdict::Settled);
    assert_eq!(after.entry("B").unwrap().verdict, Verdict::Settled);

    Ok(())
}

#[tokio::test]
async fn test_settle_empty_ledger() -> Result<()> {
    let (service, _temp) = test_service(&["A", "B", "C"]).await?;

    let report = service.settle(None).await?;

    assert_eq!(report.total_cents, 0);
    assert_eq!(report.fair_share_cents, 0.0);
    assert_eq!(report.entries.len(), 3);
    for entry in &report.entries {
        assert_eq!(entry.paid_cents, 0);
        assert_eq!(entry.balance_cents, 0.0);
        assert_eq!(entry.verdict, Verdict::Settled);
    }

    Ok(())
}

#[tokio::test]
async fn test_clear_then_settle() -> Result<()> {
    let (service, _temp) = test_service(&["A", "B"]).await?;

    service.add_expense("A", "rent", 90000, None).await?;
    service.add_expense("B", "groceries", 12345, None).await?;
    service.clear_expenses().await?;

    assert!(service.list_expenses().await?.is_empty());

    let report = service.settle(None).await?;
    assert_eq!(report.total_cents, 0);
    for entry in &report.entries {
        assert_eq!(entry.balance_cents, 0.0);
        assert_eq!(entry.verdict, Verdict::Settled);
    }

    Ok(())
}

#[tokio::test]
async fn test_settle_with_custom_epsilon() -> Result<()> {
    let (service, _temp) = test_service(&["A", "B"]).await?;

    // A pays 0.02: balances are +0.01 / -0.01, exactly on the default
    // tolerance boundary (inclusive -> settled)
    service.add_expense("A", "stamp", 2, None).await?;

    let default = service.settle(None).await?;
    assert_eq!(default.entry("A").unwrap().verdict, Verdict::Settled);
    assert_eq!(default.entry("B").unwrap().verdict, Verdict::Settled);

    // With a zero tolerance the same penny imbalance is reported
    let strict = service.settle(Some(0.0)).await?;
    assert_eq!(strict.entry("A").unwrap().verdict, Verdict::Receives);
    assert_eq!(strict.entry("B").unwrap().verdict, Verdict::Owes);

    Ok(())
}
