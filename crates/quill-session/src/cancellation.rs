#![forbid(unsafe_code)]

//! Cooperative cancellation for transform requests.
//!
//! [`CancellationToken`] is a thread-safe, cloneable signal that an
//! invocation capability polls to detect that its request has been
//! superseded or aborted by the user. The pipeline mints one source per
//! request and hands the token to the worker; invokers are expected to
//! propagate it to their transport (abort the HTTP call) but pipeline
//! correctness never depends on the remote call actually stopping, only
//! on the stale result being discarded.
//!
//! # Example
//!
//! ```
//! use quill_session::cancellation::CancellationSource;
//!
//! let source = CancellationSource::new();
//! let token = source.token();
//! assert!(!token.is_cancelled());
//! source.cancel();
//! assert!(token.is_cancelled());
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// A thread-safe, cloneable cancellation token.
///
/// Tokens are cheap to clone and share across thread boundaries.
#[derive(Debug, Clone)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

/// The control handle that triggers cancellation.
///
/// Dropping the source does **not** cancel the token — call
/// [`cancel`](Self::cancel) explicitly. This prevents accidental
/// cancellation on scope exit.
#[derive(Debug)]
pub struct CancellationSource {
    cancelled: Arc<AtomicBool>,
}

impl CancellationSource {
    /// Create a new cancellation source with an uncancelled token.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Obtain a cloneable token that observes this source's state.
    #[must_use]
    pub fn token(&self) -> CancellationToken {
        CancellationToken {
            cancelled: Arc::clone(&self.cancelled),
        }
    }

    /// Signal cancellation. All tokens derived from this source will
    /// observe `is_cancelled() == true`. Idempotent.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Check whether cancellation has already been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

impl Default for CancellationSource {
    fn default() -> Self {
        Self::new()
    }
}

impl CancellationToken {
    /// Returns `true` if cancellation has been requested.
    #[inline]
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}
