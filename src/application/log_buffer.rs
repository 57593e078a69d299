//! Bounded, observable in-process log history.
//!
//! `LogBuffer` is a shared handle. The tracing layer in
//! `infrastructure::log_layer` writes into it, and display surfaces
//! subscribe to it.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;

use super::observer::{Observers, Subscription};
use crate::domain::Ledger;

/// Default number of retained entries.
pub const DEFAULT_LOG_CAPACITY: usize = 200;

/// Log severity as shown to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl From<tracing::Level> for LogLevel {
    fn from(level: tracing::Level) -> Self {
        match level {
            tracing::Level::ERROR => Self::Error,
            tracing::Level::WARN => Self::Warn,
            tracing::Level::INFO => Self::Info,
            _ => Self::Debug,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    pub id: u64,
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub module: String,
    pub message: String,
}

struct Inner {
    entries: RwLock<Ledger<LogEntry>>,
    next_id: AtomicU64,
    observers: Observers<Vec<LogEntry>>,
}

/// Shared handle to the log history.
#[derive(Clone)]
pub struct LogBuffer {
    inner: Arc<Inner>,
}

impl Default for LogBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_CAPACITY)
    }
}

impl fmt::Debug for LogBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogBuffer")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish()
    }
}

impl LogBuffer {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(Inner {
                entries: RwLock::new(Ledger::new(capacity)),
                next_id: AtomicU64::new(0),
                observers: Observers::new(),
            }),
        }
    }

    /// Append a line and notify subscribers with the new history.
    pub fn record(
        &self,
        level: LogLevel,
        module: impl Into<String>,
        message: impl Into<String>,
    ) -> LogEntry {
        let entry = LogEntry {
            id: self.inner.next_id.fetch_add(1, Ordering::Relaxed),
            timestamp: Utc::now(),
            level,
            module: module.into(),
            message: message.into(),
        };

        let snapshot = {
            let mut entries = self.inner.entries.write();
            entries.record(entry.clone());
            entries.to_vec()
        };
        self.inner.observers.notify(&snapshot);
        entry
    }

    /// Current history, newest first.
    #[must_use]
    pub fn entries(&self) -> Vec<LogEntry> {
        self.inner.entries.read().to_vec()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.entries.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.inner.entries.read().capacity()
    }

    /// Subscribe to history changes.
    ///
    /// `callback` runs once immediately with the current history, then
    /// after every [`record`](Self::record).
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&Vec<LogEntry>) + Send + Sync + 'static,
    {
        callback(&self.entries());
        self.inner.observers.subscribe(callback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[test]
    fn record_is_newest_first_and_bounded() {
        let buffer = LogBuffer::new(3);
        for i in 0..5 {
            buffer.record(LogLevel::Info, "test", format!("line {i}"));
        }
        let messages: Vec<_> = buffer.entries().into_iter().map(|e| e.message).collect();
        assert_eq!(messages, vec!["line 4", "line 3", "line 2"]);
        assert_eq!(buffer.len(), 3);
    }

    #[test]
    fn ids_are_monotonic() {
        let buffer = LogBuffer::default();
        let a = buffer.record(LogLevel::Info, "m", "a");
        let b = buffer.record(LogLevel::Warn, "m", "b");
        assert!(b.id > a.id);
    }

    #[test]
    fn subscribe_fires_immediately_then_on_record() {
        let buffer = LogBuffer::new(10);
        buffer.record(LogLevel::Info, "m", "before");

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let sub = buffer.subscribe(move |entries| sink.lock().push(entries.len()));

        buffer.record(LogLevel::Error, "m", "after");
        assert_eq!(*seen.lock(), vec![1, 2]);

        drop(sub);
        buffer.record(LogLevel::Info, "m", "ignored");
        assert_eq!(*seen.lock(), vec![1, 2]);
    }

    #[test]
    fn level_from_tracing() {
        assert_eq!(LogLevel::from(tracing::Level::TRACE), LogLevel::Debug);
        assert_eq!(LogLevel::from(tracing::Level::WARN), LogLevel::Warn);
        assert_eq!(LogLevel::Error.to_string(), "ERROR");
    }
}
