//! Tracing events captured by the log buffer layer.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing_subscriber::layer::SubscriberExt;

use edgewatch::application::log_buffer::{LogBuffer, LogLevel};
use edgewatch::infrastructure::log_layer::LogBufferLayer;

#[test]
fn events_land_newest_first_with_fields() {
    let buffer = LogBuffer::new(10);
    let subscriber = tracing_subscriber::registry().with(LogBufferLayer::new(buffer.clone()));

    tracing::subscriber::with_default(subscriber, || {
        tracing::info!("Market refresh complete");
        tracing::warn!(size = 90000, "Large order");
    });

    let entries = buffer.entries();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].level, LogLevel::Warn);
    assert!(entries[0].message.starts_with("Large order"));
    assert!(entries[0].message.contains("size=90000"));
    assert_eq!(entries[1].level, LogLevel::Info);
    assert!(entries[0].id > entries[1].id);
}

#[test]
fn subscribers_see_every_record_until_dropped() {
    let buffer = LogBuffer::new(3);
    let snapshots = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&snapshots);

    let subscription = buffer.subscribe(move |entries| sink.lock().push(entries.len()));
    buffer.record(LogLevel::Info, "test", "one");
    buffer.record(LogLevel::Error, "test", "two");
    drop(subscription);
    buffer.record(LogLevel::Info, "test", "three");

    assert_eq!(*snapshots.lock(), vec![0, 1, 2]);
    assert_eq!(buffer.len(), 3);
}

#[test]
fn capacity_bounds_history() {
    let buffer = LogBuffer::new(2);
    for i in 0..5 {
        buffer.record(LogLevel::Debug, "test", format!("line {i}"));
    }
    let messages: Vec<_> = buffer.entries().into_iter().map(|e| e.message).collect();
    assert_eq!(messages, vec!["line 4", "line 3"]);
}
