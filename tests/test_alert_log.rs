mod common;

use alertdesk::application::alert_log::AlertLog;
use alertdesk::domain::values::action::Action;
use chrono::{Duration, Utc};
use common::{make_record, make_record_at};

#[test]
fn test_ingest_prepends_newest_first() {
    let mut log = AlertLog::new(10);
    log.ingest(make_record("TCS", Action::Buy, 100.0, 30));
    log.ingest(make_record("INFY", Action::Sell, 1500.0, 0));

    let snapshot = log.snapshot();
    assert_eq!(snapshot[0].symbol, "INFY");
    assert_eq!(snapshot[1].symbol, "TCS");
}

#[test]
fn test_redelivered_id_replaces_in_place() {
    let ts = Utc::now();
    let mut log = AlertLog::new(10);
    log.ingest(make_record_at("TCS", Action::Buy, 100.0, ts));
    log.ingest(make_record("INFY", Action::Sell, 1500.0, 0));

    // Same symbol+timestamp, updated price
    log.ingest(make_record_at("TCS", Action::Buy, 101.5, ts));

    let snapshot = log.snapshot();
    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot[1].symbol, "TCS");
    assert_eq!(snapshot[1].price, 101.5);
}

#[test]
fn test_capacity_evicts_oldest() {
    let mut log = AlertLog::new(3);
    for i in 0..5 {
        log.ingest(make_record(&format!("SYM{i}"), Action::Buy, 100.0, 60 - i));
    }
    let snapshot = log.snapshot();
    assert_eq!(snapshot.len(), 3);
    assert_eq!(snapshot[0].symbol, "SYM4");
    assert_eq!(snapshot[2].symbol, "SYM2");
}

#[test]
fn test_ingest_never_resorts() {
    // A late-arriving record with an older timestamp still lands in front
    let mut log = AlertLog::new(10);
    log.ingest(make_record("TCS", Action::Buy, 100.0, 0));
    log.ingest(make_record("INFY", Action::Sell, 1500.0, 120));

    let snapshot = log.snapshot();
    assert_eq!(snapshot[0].symbol, "INFY");
    assert!(snapshot[0].timestamp < snapshot[1].timestamp);
}

#[test]
fn test_bulk_load_sorts_and_truncates() {
    let now = Utc::now();
    let mut log = AlertLog::new(2);
    log.bulk_load(vec![
        make_record_at("A", Action::Buy, 1.0, now - Duration::hours(2)),
        make_record_at("B", Action::Buy, 1.0, now),
        make_record_at("C", Action::Buy, 1.0, now - Duration::hours(1)),
    ]);

    let snapshot = log.snapshot();
    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot[0].symbol, "B");
    assert_eq!(snapshot[1].symbol, "C");
}

#[test]
fn test_bulk_load_replaces_previous_contents() {
    let mut log = AlertLog::new(10);
    log.ingest(make_record("OLD", Action::Buy, 1.0, 0));
    log.bulk_load(vec![make_record("NEW", Action::Sell, 2.0, 0)]);

    let snapshot = log.snapshot();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].symbol, "NEW");
}

#[test]
fn test_zero_capacity_clamps_to_one() {
    let mut log = AlertLog::new(0);
    log.ingest(make_record("TCS", Action::Buy, 100.0, 0));
    assert_eq!(log.len(), 1);
    assert_eq!(log.capacity(), 1);
}
