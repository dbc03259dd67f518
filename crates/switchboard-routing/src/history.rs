//! Process-wide routing history.
//!
//! The history is the only shared mutable state in the routing core. Each
//! successful dispatch appends exactly one entry under a mutex. A capacity
//! turns the log into a ring buffer that evicts the oldest entries; the
//! running total counts every append regardless of eviction.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::classifier::RoutingContext;
use crate::selector::SelectionMode;

/// One routed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingHistoryEntry {
    timestamp: OffsetDateTime,
    command: String,
    handler: String,
    integrations: Vec<String>,
    context: RoutingContext,
    selection: SelectionMode,
}

impl RoutingHistoryEntry {
    /// Creates an entry stamped with the current UTC time.
    #[must_use]
    pub fn now(
        command: impl Into<String>,
        handler: impl Into<String>,
        integrations: Vec<String>,
        context: RoutingContext,
        selection: SelectionMode,
    ) -> Self {
        Self {
            timestamp: OffsetDateTime::now_utc(),
            command: command.into(),
            handler: handler.into(),
            integrations,
            context,
            selection,
        }
    }

    /// UTC time the request was routed.
    #[must_use]
    pub const fn timestamp(&self) -> OffsetDateTime {
        self.timestamp
    }

    /// Timestamp formatted as RFC 3339.
    #[must_use]
    pub fn timestamp_rfc3339(&self) -> String {
        self.timestamp
            .format(&Rfc3339)
            .unwrap_or_else(|_| self.timestamp.unix_timestamp().to_string())
    }

    /// Routed command name.
    #[must_use]
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Chosen handler name.
    #[must_use]
    pub fn handler(&self) -> &str {
        &self.handler
    }

    /// Routed integrations.
    #[must_use]
    pub fn integrations(&self) -> &[String] {
        &self.integrations
    }

    /// Classified request context.
    #[must_use]
    pub const fn context(&self) -> &RoutingContext {
        &self.context
    }

    /// How the handler was chosen.
    #[must_use]
    pub const fn selection(&self) -> SelectionMode {
        self.selection
    }
}

#[derive(Debug, Default)]
struct HistoryState {
    entries: VecDeque<RoutingHistoryEntry>,
    total: u64,
}

/// Thread-safe, append-only routing log.
#[derive(Debug, Default)]
pub struct RoutingHistory {
    state: Mutex<HistoryState>,
    capacity: Option<usize>,
}

impl RoutingHistory {
    /// Creates a history that keeps every entry.
    #[must_use]
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Creates a history retaining at most `capacity` entries.
    ///
    /// `None` or `Some(0)` keeps every entry.
    #[must_use]
    pub fn with_capacity(capacity: Option<usize>) -> Self {
        Self {
            state: Mutex::default(),
            capacity: capacity.filter(|limit| *limit > 0),
        }
    }

    /// Appends one entry, evicting the oldest when at capacity.
    pub fn record(&self, entry: RoutingHistoryEntry) {
        let mut state = self.lock();
        if let Some(limit) = self.capacity {
            while state.entries.len() >= limit {
                state.entries.pop_front();
            }
        }
        state.entries.push_back(entry);
        state.total = state.total.saturating_add(1);
    }

    /// Number of retained entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    /// Returns `true` when nothing has been retained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }

    /// Number of entries ever recorded, including evicted ones.
    #[must_use]
    pub fn total_recorded(&self) -> u64 {
        self.lock().total
    }

    /// Retention limit, `None` when unbounded.
    #[must_use]
    pub const fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Copies the `limit` most recent entries, oldest first.
    #[must_use]
    pub fn recent(&self, limit: usize) -> Vec<RoutingHistoryEntry> {
        let state = self.lock();
        let skip = state.entries.len().saturating_sub(limit);
        state.entries.iter().skip(skip).cloned().collect()
    }

    /// Copies every retained entry, oldest first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<RoutingHistoryEntry> {
        self.lock().entries.iter().cloned().collect()
    }

    // Appends never leave the state half-written, so a poisoned lock is safe
    // to reuse.
    fn lock(&self) -> MutexGuard<'_, HistoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
