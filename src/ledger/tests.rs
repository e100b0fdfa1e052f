#![allow(clippy::unwrap_used)]

use super::*;
use crate::store::MemStore;

fn empty_ledger() -> Ledger {
    Ledger::load(Box::new(MemStore::new())).unwrap()
}

/// Ledger plus a handle to its backing store, for reload tests.
fn ledger_with_store() -> (Ledger, MemStore) {
    let store = MemStore::new();
    let ledger = Ledger::load(Box::new(store.clone())).unwrap();
    (ledger, store)
}

fn add_scenario(ledger: &mut Ledger) {
    ledger.add("Coffee", "4.50", "Food", "2024-01-05").unwrap();
    ledger.add("Bus", "2.00", "Transport", "2024-01-10").unwrap();
}

// ── add ───────────────────────────────────────────────────────

#[test]
fn test_add_appends_in_order() {
    let mut ledger = empty_ledger();
    add_scenario(&mut ledger);

    let expenses = ledger.expenses();
    assert_eq!(expenses.len(), 2);
    assert_eq!(expenses[0].description, "Coffee");
    assert_eq!(expenses[1].description, "Bus");
}

#[test]
fn test_add_returns_stored_expense() {
    let mut ledger = empty_ledger();
    let exp = ledger.add("Coffee", "4.50", "Food", "2024-01-05").unwrap();
    assert_eq!(exp.amount, 4.5);
    assert_eq!(exp.category, "Food");
    assert_eq!(exp.id, ledger.expenses()[0].id);
}

#[test]
fn test_add_ids_are_unique() {
    let mut ledger = empty_ledger();
    for i in 0..50 {
        ledger
            .add(&format!("e{i}"), "1.00", "Misc", "2024-01-01")
            .unwrap();
    }
    let mut ids: Vec<i64> = ledger.expenses().iter().map(|e| e.id).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 50);
}

#[test]
fn test_add_non_numeric_amount_stores_nan() {
    let mut ledger = empty_ledger();
    let exp = ledger.add("Mystery", "abc", "Misc", "2024-01-01").unwrap();
    assert!(exp.amount.is_nan());
    // Not rejected: the record is in the ledger
    assert_eq!(ledger.expenses().len(), 1);
}

#[test]
fn test_add_accepts_empty_description_and_negative_amount() {
    let mut ledger = empty_ledger();
    let exp = ledger.add("", "-3.00", "Misc", "2024-01-01").unwrap();
    assert_eq!(exp.description, "");
    assert_eq!(exp.amount, -3.0);
}

// ── remove ────────────────────────────────────────────────────

#[test]
fn test_remove_deletes_matching_expense() {
    let mut ledger = empty_ledger();
    add_scenario(&mut ledger);
    let id = ledger.expenses()[0].id;

    ledger.remove(id).unwrap();
    assert_eq!(ledger.expenses().len(), 1);
    assert_eq!(ledger.expenses()[0].description, "Bus");
}

#[test]
fn test_remove_is_idempotent() {
    let mut ledger = empty_ledger();
    add_scenario(&mut ledger);
    let id = ledger.expenses()[0].id;

    ledger.remove(id).unwrap();
    let after_first: Vec<i64> = ledger.expenses().iter().map(|e| e.id).collect();
    ledger.remove(id).unwrap();
    let after_second: Vec<i64> = ledger.expenses().iter().map(|e| e.id).collect();
    assert_eq!(after_first, after_second);
}

#[test]
fn test_remove_unknown_id_is_noop() {
    let mut ledger = empty_ledger();
    add_scenario(&mut ledger);
    ledger.remove(42).unwrap();
    assert_eq!(ledger.expenses().len(), 2);
}

// ── totals and aggregates ─────────────────────────────────────

#[test]
fn test_total_spent_scenario() {
    let mut ledger = empty_ledger();
    add_scenario(&mut ledger);
    assert_eq!(ledger.total_spent(), 6.5);
}

#[test]
fn test_total_spent_empty_ledger() {
    assert_eq!(empty_ledger().total_spent(), 0.0);
}

#[test]
fn test_nan_amount_poisons_total() {
    let mut ledger = empty_ledger();
    add_scenario(&mut ledger);
    ledger.add("Mystery", "oops", "Misc", "2024-01-11").unwrap();
    assert!(ledger.total_spent().is_nan());
}

#[test]
fn test_by_category_scenario() {
    let mut ledger = empty_ledger();
    add_scenario(&mut ledger);
    assert_eq!(
        ledger.by_category(),
        vec![("Food".to_string(), 4.5), ("Transport".to_string(), 2.0)]
    );
}

#[test]
fn test_by_category_accumulates_in_first_seen_order() {
    let mut ledger = empty_ledger();
    ledger.add("a", "1.00", "B", "2024-01-01").unwrap();
    ledger.add("b", "2.00", "A", "2024-01-02").unwrap();
    ledger.add("c", "3.00", "B", "2024-01-03").unwrap();

    assert_eq!(
        ledger.by_category(),
        vec![("B".to_string(), 4.0), ("A".to_string(), 2.0)]
    );
}

#[test]
fn test_by_category_sums_to_total() {
    let mut ledger = empty_ledger();
    add_scenario(&mut ledger);
    ledger.add("Rent", "800.00", "Housing", "2024-02-01").unwrap();

    let sum: f64 = ledger.by_category().iter().map(|(_, v)| v).sum();
    assert_eq!(sum, ledger.total_spent());
}

#[test]
fn test_by_month_scenario() {
    let mut ledger = empty_ledger();
    add_scenario(&mut ledger);
    assert_eq!(ledger.by_month(), vec![("Jan 2024".to_string(), 6.5)]);
}

#[test]
fn test_by_month_splits_across_months() {
    let mut ledger = empty_ledger();
    add_scenario(&mut ledger);
    ledger.add("Rent", "800.00", "Housing", "2024-02-01").unwrap();

    assert_eq!(
        ledger.by_month(),
        vec![
            ("Jan 2024".to_string(), 6.5),
            ("Feb 2024".to_string(), 800.0)
        ]
    );
}

#[test]
fn test_invalid_date_buckets_together() {
    let mut ledger = empty_ledger();
    ledger.add("a", "1.00", "Misc", "garbage").unwrap();
    ledger.add("b", "2.00", "Misc", "01/05/2024").unwrap();

    assert_eq!(ledger.by_month(), vec![("Invalid Date".to_string(), 3.0)]);
}

// ── goal ──────────────────────────────────────────────────────

#[test]
fn test_goal_status_scenario() {
    let mut ledger = empty_ledger();
    ledger.set_goal("5.00").unwrap();
    add_scenario(&mut ledger);

    let status = ledger.goal_status();
    assert_eq!(status.goal, 5.0);
    assert_eq!(status.total, 6.5);
    assert_eq!(status.remaining, -1.5);
    assert!(status.exceeded);
}

#[test]
fn test_set_goal_non_numeric_means_no_goal() {
    let mut ledger = empty_ledger();
    ledger.set_goal("lots").unwrap();
    assert_eq!(ledger.monthly_goal(), 0.0);
}

#[test]
fn test_set_goal_non_finite_means_no_goal() {
    let mut ledger = empty_ledger();
    ledger.set_goal("NaN").unwrap();
    assert_eq!(ledger.monthly_goal(), 0.0);

    ledger.set_goal("inf").unwrap();
    assert_eq!(ledger.monthly_goal(), 0.0);

    ledger.set_goal("-inf").unwrap();
    assert_eq!(ledger.monthly_goal(), 0.0);
}

#[test]
fn test_zero_goal_clears_exceeded() {
    let mut ledger = empty_ledger();
    ledger.set_goal("5.00").unwrap();
    add_scenario(&mut ledger);
    assert!(ledger.goal_status().exceeded);

    ledger.set_goal("0").unwrap();
    assert!(!ledger.goal_status().exceeded);
}

// ── persistence ───────────────────────────────────────────────

#[test]
fn test_reload_reproduces_state_exactly() {
    let (mut ledger, store) = ledger_with_store();
    ledger.set_goal("500").unwrap();
    add_scenario(&mut ledger);
    ledger.add("Mystery", "oops", "Misc", "bad-date").unwrap();
    let id = ledger.expenses()[0].id;
    ledger.remove(id).unwrap();

    let reloaded = Ledger::load(Box::new(store)).unwrap();
    assert_eq!(reloaded.monthly_goal(), 500.0);
    assert_eq!(reloaded.expenses().len(), ledger.expenses().len());
    for (a, b) in reloaded.expenses().iter().zip(ledger.expenses()) {
        assert_eq!(a.id, b.id);
        assert_eq!(a.description, b.description);
        assert_eq!(a.category, b.category);
        assert_eq!(a.date, b.date);
        assert!(a.amount == b.amount || (a.amount.is_nan() && b.amount.is_nan()));
    }
}

#[test]
fn test_every_mutation_persists() {
    let (mut ledger, store) = ledger_with_store();

    ledger.add("Coffee", "4.50", "Food", "2024-01-05").unwrap();
    assert_eq!(store.load().unwrap().expenses.len(), 1);

    ledger.set_goal("100").unwrap();
    assert_eq!(store.load().unwrap().monthly_goal, 100.0);

    let id = ledger.expenses()[0].id;
    ledger.remove(id).unwrap();
    assert!(store.load().unwrap().expenses.is_empty());
}
