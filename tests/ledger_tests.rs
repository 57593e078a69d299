//! Alert ledger retention and ordering.

use edgewatch::domain::{AlertLedger, Ledger};
use edgewatch::testkit::domain::alert;
use rust_decimal::Decimal;

#[test]
fn length_is_min_of_inserts_and_capacity() {
    for (inserts, capacity) in [(0usize, 5usize), (3, 5), (5, 5), (12, 5), (60, 50)] {
        let mut ledger = Ledger::new(capacity);
        for i in 0..inserts {
            ledger.record(i);
        }
        assert_eq!(ledger.len(), inserts.min(capacity));
    }
}

#[test]
fn entries_are_newest_first_and_oldest_evicted() {
    let mut ledger = Ledger::new(3);
    for i in 1..=5 {
        ledger.record(i);
    }
    assert_eq!(ledger.to_vec(), vec![5, 4, 3]);
    assert_eq!(ledger.latest(), Some(&5));
}

#[test]
fn push_is_persistent_style() {
    let ledger = Ledger::new(2).push("a").push("b").push("c");
    assert_eq!(ledger.to_vec(), vec!["c", "b"]);
    assert_eq!(ledger.capacity(), 2);
}

#[test]
fn alert_ledger_keeps_fifty_alerts() {
    let mut ledger = AlertLedger::new(50);
    for i in 0..75 {
        ledger.record(alert(&format!("m{i}"), Decimal::from(i)));
    }
    assert_eq!(ledger.len(), 50);
    let newest = ledger.latest().unwrap();
    assert_eq!(newest.market_id.as_str(), "m74");
    let oldest = ledger.all().last().unwrap();
    assert_eq!(oldest.market_id.as_str(), "m25");
}

#[test]
fn duplicates_are_not_merged() {
    let mut ledger = AlertLedger::new(10);
    let a = alert("m", Decimal::ONE);
    ledger.record(a.clone());
    ledger.record(a);
    assert_eq!(ledger.len(), 2);
}
