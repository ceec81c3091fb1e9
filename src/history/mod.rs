//! Undo/redo history of surface snapshots

use serde::{Deserialize, Serialize};
use tracing::debug;

/// A stored copy of the full surface markup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    content: String,
    /// Timestamp for merge windows (milliseconds)
    recorded_at: u64,
}

impl Snapshot {
    fn new(content: String, recorded_at: u64) -> Self {
        Self {
            content,
            recorded_at,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Bound and coalescing rules for [`History`].
///
/// The default keeps every record: no cap, no deduplication, no merging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HistoryPolicy {
    /// Maximum stored snapshots; the oldest are evicted first
    pub max_entries: Option<usize>,
    /// Skip a record whose content equals the current snapshot
    pub coalesce_identical: bool,
    /// Replace the last snapshot when records arrive within this window (ms)
    pub merge_window_ms: Option<u64>,
}

/// Linear, truncating snapshot log
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<Snapshot>,
    /// Position of the live snapshot; meaningful once `entries` is non-empty
    index: usize,
    policy: HistoryPolicy,
    /// Whether the last mutation was a record (merging is allowed)
    merge_open: bool,
}

impl History {
    /// Create an empty history
    pub fn new(policy: HistoryPolicy) -> Self {
        Self {
            entries: Vec::new(),
            index: 0,
            policy,
            merge_open: false,
        }
    }

    /// Record the surface content as the new current snapshot
    pub fn record(&mut self, content: impl Into<String>) {
        self.record_at(content, current_timestamp());
    }

    /// Record with an explicit timestamp in milliseconds
    pub fn record_at(&mut self, content: impl Into<String>, now: u64) {
        let content = content.into();

        if !self.entries.is_empty() {
            let dropped = self.entries.len() - (self.index + 1);
            if dropped > 0 {
                self.entries.truncate(self.index + 1);
                self.merge_open = false;
                debug!(dropped, "discarded redo entries");
            }
        }

        if self.policy.coalesce_identical {
            if let Some(last) = self.entries.last() {
                if last.content == content {
                    return;
                }
            }
        }

        if self.should_merge(now) {
            if let Some(last) = self.entries.last_mut() {
                *last = Snapshot::new(content, now);
                return;
            }
        }

        self.entries.push(Snapshot::new(content, now));
        self.index = self.entries.len() - 1;
        self.merge_open = true;

        // Enforce depth limit
        if let Some(max) = self.policy.max_entries {
            let max = max.max(1);
            if self.entries.len() > max {
                let excess = self.entries.len() - max;
                self.entries.drain(..excess);
                self.index = self.entries.len() - 1;
                debug!(evicted = excess, "history at capacity");
            }
        }
    }

    /// Merge only into a record that is not the mount snapshot
    fn should_merge(&self, now: u64) -> bool {
        let Some(window) = self.policy.merge_window_ms else {
            return false;
        };
        if !self.merge_open || self.entries.len() < 2 {
            return false;
        }
        self.entries
            .last()
            .map(|last| now.saturating_sub(last.recorded_at) < window)
            .unwrap_or(false)
    }

    /// Step back; returns the snapshot to restore
    pub fn undo(&mut self) -> Option<&Snapshot> {
        if !self.can_undo() {
            return None;
        }
        self.index -= 1;
        self.merge_open = false;
        debug!(index = self.index, len = self.entries.len(), "undo");
        self.entries.get(self.index)
    }

    /// Step forward; returns the snapshot to restore
    pub fn redo(&mut self) -> Option<&Snapshot> {
        if !self.can_redo() {
            return None;
        }
        self.index += 1;
        self.merge_open = false;
        debug!(index = self.index, len = self.entries.len(), "redo");
        self.entries.get(self.index)
    }

    pub fn can_undo(&self) -> bool {
        !self.entries.is_empty() && self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    /// Current index, or `None` before the first record
    pub fn index(&self) -> Option<usize> {
        (!self.entries.is_empty()).then_some(self.index)
    }

    pub fn current(&self) -> Option<&Snapshot> {
        self.entries.get(self.index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stored snapshot contents, oldest first
    pub fn snapshots(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(Snapshot::content)
    }

    /// Clear all history
    pub fn clear(&mut self) {
        self.entries.clear();
        self.index = 0;
        self.merge_open = false;
    }
}

/// Get current timestamp in milliseconds
pub(crate) fn current_timestamp() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now() as u64
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}
