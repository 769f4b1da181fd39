#![forbid(unsafe_code)]

//! Bounded snapshot history for undo/redo.
//!
//! [`HistoryBuffer`] keeps an ordered log of document snapshots plus a
//! cursor. Undo and redo are pure cursor movement; pushing while the
//! cursor is not at the end truncates the redo branch (linear-stack
//! undo semantics).
//!
//! ```text
//! push("C")
//! ┌─────────────────────────────────────────┐
//! │ Snapshots: ["A", "B", "C"]   cursor = 2 │
//! └─────────────────────────────────────────┘
//!
//! undo() x2  → returns "B", then "A"
//! ┌─────────────────────────────────────────┐
//! │ Snapshots: ["A", "B", "C"]   cursor = 0 │
//! └─────────────────────────────────────────┘
//!
//! push("D") — truncates the redo branch
//! ┌─────────────────────────────────────────┐
//! │ Snapshots: ["A", "D"]        cursor = 1 │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Invariants
//!
//! 1. The buffer is never empty: it is seeded with one snapshot at
//!    construction and every mutation preserves at least one.
//! 2. `cursor < snapshots.len()` after any operation.
//! 3. `snapshots.len() <= config.max_depth`; the oldest snapshot is
//!    evicted (and the cursor decremented to compensate) when a push
//!    would exceed the bound.
//!
//! # Debounce
//!
//! Rapid keystroke-driven pushes coalesce into one undo step: a push is
//! ignored when its content equals the cursor snapshot (regardless of
//! timing) or when less than `config.debounce` has elapsed since the
//! last *accepted* push. Time is injected by the caller so tests are
//! deterministic; the buffer never reads a global clock.
//!
//! No concurrency: the buffer is single-threaded and called only from
//! the UI/event thread. Operations never fail — undo/redo at the
//! boundary return `None`, which callers gate on [`can_undo`]/
//! [`can_redo`] rather than treating as an error.
//!
//! [`can_undo`]: HistoryBuffer::can_undo
//! [`can_redo`]: HistoryBuffer::can_redo

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use web_time::{Duration, Instant};

/// Configuration for the history buffer.
#[derive(Debug, Clone)]
pub struct HistoryConfig {
    /// Maximum number of snapshots to retain. Oldest snapshots are
    /// evicted when this limit is exceeded.
    pub max_depth: usize,
    /// Minimum interval between accepted pushes.
    pub debounce: Duration,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_depth: 100,
            debounce: Duration::from_millis(500),
        }
    }
}

impl HistoryConfig {
    /// Create a new configuration with custom limits.
    #[must_use]
    pub fn new(max_depth: usize, debounce: Duration) -> Self {
        Self { max_depth, debounce }
    }

    /// Unlimited depth, zero debounce (for testing).
    #[must_use]
    pub fn unlimited() -> Self {
        Self {
            max_depth: usize::MAX,
            debounce: Duration::ZERO,
        }
    }
}

/// One recorded document state plus its capture time.
#[derive(Debug, Clone)]
pub struct Snapshot {
    content: Arc<str>,
    taken_at: Instant,
}

impl Snapshot {
    /// The recorded document text.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// When the snapshot was captured.
    #[must_use]
    pub fn taken_at(&self) -> Instant {
        self.taken_at
    }
}

/// Bounded, append-only-with-truncation log of document snapshots.
pub struct HistoryBuffer {
    snapshots: VecDeque<Snapshot>,
    cursor: usize,
    last_push: Instant,
    config: HistoryConfig,
}

impl fmt::Debug for HistoryBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HistoryBuffer")
            .field("depth", &self.snapshots.len())
            .field("cursor", &self.cursor)
            .field("config", &self.config)
            .finish()
    }
}

impl HistoryBuffer {
    /// Create a buffer seeded with one snapshot of `seed`.
    ///
    /// The debounce window starts at `now`, so a push arriving within
    /// `config.debounce` of construction is coalesced into the seed.
    #[must_use]
    pub fn new(seed: &str, now: Instant, config: HistoryConfig) -> Self {
        let mut snapshots = VecDeque::new();
        snapshots.push_back(Snapshot {
            content: Arc::from(seed),
            taken_at: now,
        });
        Self {
            snapshots,
            cursor: 0,
            last_push: now,
            config,
        }
    }

    // ====================================================================
    // Core Operations
    // ====================================================================

    /// Record a new snapshot, truncating any redo branch.
    ///
    /// Returns `false` without mutating when the content equals the
    /// cursor snapshot or when the push lands inside the debounce
    /// window. On acceptance the cursor advances to the new snapshot
    /// and the oldest snapshot is evicted if the depth bound is
    /// exceeded.
    pub fn push(&mut self, content: &str, now: Instant) -> bool {
        if self.current() == content {
            return false;
        }
        if now.saturating_duration_since(self.last_push) < self.config.debounce {
            return false;
        }

        self.last_push = now;
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push_back(Snapshot {
            content: Arc::from(content),
            taken_at: now,
        });
        self.cursor = self.snapshots.len() - 1;
        self.enforce_depth();
        true
    }

    /// Step the cursor back and return that snapshot's content.
    ///
    /// Returns `None` at the oldest snapshot (a no-op, not an error).
    pub fn undo(&mut self) -> Option<Arc<str>> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(Arc::clone(&self.snapshots[self.cursor].content))
    }

    /// Step the cursor forward and return that snapshot's content.
    ///
    /// Returns `None` at the newest snapshot (a no-op, not an error).
    pub fn redo(&mut self) -> Option<Arc<str>> {
        if self.cursor + 1 >= self.snapshots.len() {
            return None;
        }
        self.cursor += 1;
        Some(Arc::clone(&self.snapshots[self.cursor].content))
    }

    /// Replace the buffer with a single seed snapshot.
    ///
    /// Used when the document identity changes (loading a new file or
    /// template), never for normal edits.
    pub fn reset(&mut self, content: &str, now: Instant) {
        self.snapshots.clear();
        self.snapshots.push_back(Snapshot {
            content: Arc::from(content),
            taken_at: now,
        });
        self.cursor = 0;
        self.last_push = now;
    }

    // ====================================================================
    // Query
    // ====================================================================

    /// Check if undo is available.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Check if redo is available.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    /// The content at the cursor.
    #[must_use]
    pub fn current(&self) -> &str {
        &self.snapshots[self.cursor].content
    }

    /// Number of snapshots currently retained.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.snapshots.len()
    }

    /// Current cursor position.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &HistoryConfig {
        &self.config
    }

    // ====================================================================
    // Maintenance
    // ====================================================================

    /// Evict from the front until within the depth bound, keeping the
    /// cursor on the same snapshot. At least one snapshot always
    /// survives.
    fn enforce_depth(&mut self) {
        while self.snapshots.len() > self.config.max_depth && self.snapshots.len() > 1 {
            self.snapshots.pop_front();
            self.cursor = self.cursor.saturating_sub(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer(seed: &str) -> (HistoryBuffer, Instant) {
        let t0 = Instant::now();
        (HistoryBuffer::new(seed, t0, HistoryConfig::unlimited()), t0)
    }

    /// Times spaced far enough apart to clear any debounce window.
    fn later(t0: Instant, steps: u64) -> Instant {
        t0 + Duration::from_secs(steps)
    }

    #[test]
    fn seeded_buffer_has_one_snapshot() {
        let (buf, _) = buffer("A");
        assert_eq!(buf.depth(), 1);
        assert_eq!(buf.current(), "A");
        assert!(!buf.can_undo());
        assert!(!buf.can_redo());
    }

    #[test]
    fn push_advances_cursor() {
        let (mut buf, t0) = buffer("A");
        assert!(buf.push("B", later(t0, 1)));
        assert_eq!(buf.current(), "B");
        assert!(buf.can_undo());
        assert!(!buf.can_redo());
    }

    #[test]
    fn identical_content_is_noop_even_past_debounce() {
        let t0 = Instant::now();
        let mut buf = HistoryBuffer::new("A", t0, HistoryConfig::default());
        assert!(buf.push("B", later(t0, 10)));
        assert!(!buf.push("B", later(t0, 20)));
        assert_eq!(buf.depth(), 2);
    }

    #[test]
    fn push_within_debounce_window_is_noop() {
        let t0 = Instant::now();
        let mut buf = HistoryBuffer::new("A", t0, HistoryConfig::default());
        // Window opens at construction.
        assert!(!buf.push("B", t0 + Duration::from_millis(100)));
        assert!(buf.push("B", t0 + Duration::from_millis(600)));
        // Window restarts from the accepted push, not the rejected one.
        assert!(!buf.push("C", t0 + Duration::from_millis(900)));
        assert!(buf.push("C", t0 + Duration::from_millis(1200)));
        assert_eq!(buf.depth(), 3);
    }

    #[test]
    fn n_undos_return_to_seed() {
        let (mut buf, t0) = buffer("seed");
        for (i, text) in ["one", "two", "three"].iter().enumerate() {
            buf.push(text, later(t0, i as u64 + 1));
        }
        buf.undo();
        buf.undo();
        let last = buf.undo();
        assert_eq!(last.as_deref(), Some("seed"));
        assert!(!buf.can_undo());
    }

    #[test]
    fn undo_then_redo_is_identity() {
        let (mut buf, t0) = buffer("A");
        buf.push("B", later(t0, 1));
        let undone = buf.undo();
        assert_eq!(undone.as_deref(), Some("A"));
        let redone = buf.redo();
        assert_eq!(redone.as_deref(), Some("B"));
        assert_eq!(buf.current(), "B");
    }

    #[test]
    fn push_after_undo_destroys_redo_branch() {
        let (mut buf, t0) = buffer("A");
        buf.push("B", later(t0, 1));
        buf.push("C", later(t0, 2));
        buf.undo();
        assert!(buf.can_redo());

        buf.push("D", later(t0, 3));
        assert!(!buf.can_redo());
        assert_eq!(buf.current(), "D");
        assert_eq!(buf.depth(), 3); // A, B, D
    }

    #[test]
    fn spec_example_trace() {
        // Seed "A", push "B", push "C"; undo → "B", undo → "A",
        // undo is a no-op, redo → "B".
        let (mut buf, t0) = buffer("A");
        buf.push("B", later(t0, 1));
        buf.push("C", later(t0, 2));

        assert_eq!(buf.undo().as_deref(), Some("B"));
        assert_eq!(buf.undo().as_deref(), Some("A"));
        assert!(buf.undo().is_none());
        assert_eq!(buf.current(), "A");
        assert_eq!(buf.redo().as_deref(), Some("B"));
    }

    #[test]
    fn undo_at_boundary_is_noop() {
        let (mut buf, _) = buffer("A");
        assert!(buf.undo().is_none());
        assert_eq!(buf.current(), "A");
    }

    #[test]
    fn redo_at_boundary_is_noop() {
        let (mut buf, t0) = buffer("A");
        buf.push("B", later(t0, 1));
        assert!(buf.redo().is_none());
        assert_eq!(buf.current(), "B");
    }

    #[test]
    fn depth_limit_evicts_oldest_and_keeps_cursor() {
        let t0 = Instant::now();
        let config = HistoryConfig::new(3, Duration::ZERO);
        let mut buf = HistoryBuffer::new("s0", t0, config);
        for i in 1..=5u64 {
            buf.push(&format!("s{i}"), later(t0, i));
        }

        assert_eq!(buf.depth(), 3);
        assert_eq!(buf.current(), "s5");
        // Oldest were evicted; undo bottoms out at s3.
        assert_eq!(buf.undo().as_deref(), Some("s4"));
        assert_eq!(buf.undo().as_deref(), Some("s3"));
        assert!(buf.undo().is_none());
    }

    #[test]
    fn depth_limit_never_empties_buffer() {
        let t0 = Instant::now();
        let mut buf = HistoryBuffer::new("A", t0, HistoryConfig::new(1, Duration::ZERO));
        buf.push("B", later(t0, 1));
        assert_eq!(buf.depth(), 1);
        assert_eq!(buf.current(), "B");
        assert!(!buf.can_undo());
    }

    #[test]
    fn reset_replaces_everything() {
        let (mut buf, t0) = buffer("A");
        buf.push("B", later(t0, 1));
        buf.undo();

        buf.reset("fresh", later(t0, 2));
        assert_eq!(buf.depth(), 1);
        assert_eq!(buf.current(), "fresh");
        assert!(!buf.can_undo());
        assert!(!buf.can_redo());
    }

    #[test]
    fn snapshot_records_capture_time() {
        let t0 = Instant::now();
        let buf = HistoryBuffer::new("A", t0, HistoryConfig::unlimited());
        assert_eq!(buf.snapshots[0].taken_at(), t0);
        assert_eq!(buf.snapshots[0].content(), "A");
    }

    #[test]
    fn config_default_matches_documented_values() {
        let config = HistoryConfig::default();
        assert_eq!(config.max_depth, 100);
        assert_eq!(config.debounce, Duration::from_millis(500));
    }

    #[test]
    fn debug_impl_reports_depth_and_cursor() {
        let (buf, _) = buffer("A");
        let s = format!("{buf:?}");
        assert!(s.contains("HistoryBuffer"));
        assert!(s.contains("cursor"));
    }
}
