#![forbid(unsafe_code)]

//! Single-flight transform pipeline.
//!
//! [`ActionPipeline`] owns at most one in-flight transform request and
//! maps its outcome to a [`Status`] value, the sole externally
//! observable state of the pipeline.
//!
//! # State machine
//!
//! ```text
//! Idle ──run()──▶ Processing ──success──▶ Success ──(2s)──▶ Idle
//!                     │  │
//!                     │  └────failure───▶ Failure ──(3s)──▶ Idle
//!                     │
//!                     └─cancel()/supersede──▶ Idle (no status callback)
//! ```
//!
//! Every request is identified by a [`RequestId`] generation and holds
//! a fresh cancellation token. The invocation runs on a worker thread;
//! its result comes back tagged with the generation and is compared to
//! the live one at the continuation point. A superseded or cancelled
//! request's late result is discarded — it can never resurrect after a
//! newer request has resolved. That token comparison is the entire
//! single-flight mechanism; no locking is involved on the event thread.
//!
//! Outcomes are delivered through [`poll`](ActionPipeline::poll) as
//! [`PipelineEvent`]s with three distinct terminals: success, failure,
//! and cancelled. A superseded request's `Cancelled` event is emitted
//! at supersession time, so it always precedes the superseding
//! request's outcome.

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{Receiver, Sender, channel};
use std::thread;

use thiserror::Error;
use web_time::{Duration, Instant};

use crate::cancellation::{CancellationSource, CancellationToken};
use crate::prompt::{Prompt, prompt_for_action};

// ---------------------------------------------------------------------------
// Monotonic counters
// ---------------------------------------------------------------------------

static PIPELINE_RUNS_TOTAL: AtomicU64 = AtomicU64::new(0);
static PIPELINE_STALE_RESULTS_TOTAL: AtomicU64 = AtomicU64::new(0);

/// Total transform runs dispatched (monotonic counter).
#[must_use]
pub fn pipeline_runs_total() -> u64 {
    PIPELINE_RUNS_TOTAL.load(Ordering::Relaxed)
}

/// Total worker results discarded as stale (monotonic counter).
#[must_use]
pub fn pipeline_stale_results_total() -> u64 {
    PIPELINE_STALE_RESULTS_TOTAL.load(Ordering::Relaxed)
}

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

/// The transform actions offered by the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    /// Improve clarity and flow.
    Rewrite,
    /// Produce a concise summary.
    Summarize,
    /// Add detail and depth.
    Expand,
    /// Convert to a bullet list.
    Bulletify,
    /// Shift to a formal tone.
    Formalize,
    /// Tighten the text.
    Shorten,
    /// Translate to the configured language.
    Translate,
    /// Correct grammar and spelling.
    FixGrammar,
}

impl ActionKind {
    /// All actions, in command-palette order.
    pub const ALL: [ActionKind; 8] = [
        ActionKind::Rewrite,
        ActionKind::Summarize,
        ActionKind::Expand,
        ActionKind::Bulletify,
        ActionKind::Formalize,
        ActionKind::Shorten,
        ActionKind::Translate,
        ActionKind::FixGrammar,
    ];

    /// Human-readable label for status display.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            ActionKind::Rewrite => "Rewrite",
            ActionKind::Summarize => "Summarize",
            ActionKind::Expand => "Expand",
            ActionKind::Bulletify => "Bulletify",
            ActionKind::Formalize => "Formalize",
            ActionKind::Shorten => "Shorten",
            ActionKind::Translate => "Translate",
            ActionKind::FixGrammar => "Fix Grammar",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Requests and outcomes
// ---------------------------------------------------------------------------

/// Opaque identity minted per request; compared to detect staleness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(u64);

/// One transform request handed to the invocation capability.
#[derive(Debug, Clone)]
pub struct ActionRequest {
    /// Which transform to apply.
    pub kind: ActionKind,
    /// The text being transformed.
    pub source_text: String,
    /// The constructed system/user prompt pair.
    pub prompt: Prompt,
}

/// External invocation capability.
///
/// Implementations perform the actual transform call (the wire
/// protocol is out of scope here). They should propagate the
/// cancellation token to their transport so superseded calls can be
/// aborted, but the pipeline stays correct even if they don't.
pub trait Invoker: Send + Sync {
    /// Transform the request text, or fail with a provider message.
    fn invoke(
        &self,
        request: &ActionRequest,
        cancel: &CancellationToken,
    ) -> Result<String, InvokeError>;
}

/// A request rejected before dispatch. Never shown as failure status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RunError {
    /// No text to transform.
    #[error("no text to transform")]
    EmptyInput,
    /// No invocation capability configured.
    #[error("no API credential configured")]
    MissingCredential,
}

/// Failure reported by the invocation capability.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct InvokeError {
    /// Provider-specific, human-readable message.
    pub message: String,
}

impl InvokeError {
    /// Wrap a provider message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Terminal outcome of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The transform produced a result text.
    Success(String),
    /// The invocation failed.
    Failure(InvokeError),
    /// The request was superseded or user-aborted. Not an error.
    Cancelled,
}

/// A completed request, delivered through [`ActionPipeline::poll`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineEvent {
    /// Identity of the completed request.
    pub id: RequestId,
    /// Which transform it was running.
    pub kind: ActionKind,
    /// How it ended.
    pub outcome: RunOutcome,
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Externally observable pipeline state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// Nothing in flight.
    Idle,
    /// A transform is running.
    Processing {
        /// Label of the running action.
        label: &'static str,
    },
    /// The last transform succeeded (held briefly, then back to Idle).
    Success {
        /// Label of the completed action.
        label: &'static str,
    },
    /// The last transform failed (held briefly, then back to Idle).
    Failure {
        /// Human-readable provider message.
        reason: String,
    },
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Configuration for the pipeline.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// How long `Success` status is held before auto-reset.
    pub success_hold: Duration,
    /// How long `Failure` status is held before auto-reset.
    pub failure_hold: Duration,
    /// Target language for the translate action.
    pub translate_language: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            success_hold: Duration::from_secs(2),
            failure_hold: Duration::from_secs(3),
            translate_language: "Spanish".to_string(),
        }
    }
}

struct LiveRequest {
    id: RequestId,
    kind: ActionKind,
    source: CancellationSource,
}

struct WorkerResult {
    id: RequestId,
    result: Result<String, InvokeError>,
}

/// Single-flight transform state machine.
///
/// All methods are called from the single UI/event thread; worker
/// threads only feed results back over an internal channel.
pub struct ActionPipeline {
    invoker: Option<Arc<dyn Invoker>>,
    status: Status,
    live: Option<LiveRequest>,
    next_id: u64,
    results_tx: Sender<WorkerResult>,
    results_rx: Receiver<WorkerResult>,
    outbox: VecDeque<PipelineEvent>,
    reset_at: Option<Instant>,
    config: PipelineConfig,
}

impl fmt::Debug for ActionPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionPipeline")
            .field("status", &self.status)
            .field("live", &self.live.as_ref().map(|l| l.id))
            .field("outbox", &self.outbox.len())
            .finish()
    }
}

impl ActionPipeline {
    /// Create a pipeline with no invocation capability configured.
    #[must_use]
    pub fn new(config: PipelineConfig) -> Self {
        let (results_tx, results_rx) = channel();
        Self {
            invoker: None,
            status: Status::Idle,
            live: None,
            next_id: 0,
            results_tx,
            results_rx,
            outbox: VecDeque::new(),
            reset_at: None,
            config,
        }
    }

    /// Attach the invocation capability.
    #[must_use]
    pub fn with_invoker(mut self, invoker: Arc<dyn Invoker>) -> Self {
        self.invoker = Some(invoker);
        self
    }

    /// Replace or clear the invocation capability.
    pub fn set_invoker(&mut self, invoker: Option<Arc<dyn Invoker>>) {
        self.invoker = invoker;
    }

    /// Whether an invocation capability is configured.
    #[must_use]
    pub fn has_invoker(&self) -> bool {
        self.invoker.is_some()
    }

    /// Current status.
    #[must_use]
    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Whether a request is in flight.
    #[must_use]
    pub fn is_processing(&self) -> bool {
        self.live.is_some()
    }

    // ====================================================================
    // Core Operations
    // ====================================================================

    /// Start a transform, superseding any live request.
    ///
    /// Fails fast with [`RunError::EmptyInput`] when `text` is blank or
    /// [`RunError::MissingCredential`] when no invoker is configured —
    /// in both cases without touching the status or the live request.
    /// Otherwise the prior request (if any) is cancelled and reported
    /// as `Cancelled`, a fresh generation is minted, status moves to
    /// `Processing`, and the invocation is dispatched on a worker
    /// thread.
    pub fn run(&mut self, text: &str, kind: ActionKind) -> Result<RequestId, RunError> {
        if text.trim().is_empty() {
            return Err(RunError::EmptyInput);
        }
        let Some(invoker) = self.invoker.clone() else {
            return Err(RunError::MissingCredential);
        };

        // At most one live request: supersede before dispatching.
        if let Some(prev) = self.live.take() {
            prev.source.cancel();
            tracing::debug!(
                target: "quill.pipeline",
                superseded = prev.id.0,
                action = %prev.kind,
                "request superseded by newer run"
            );
            self.outbox.push_back(PipelineEvent {
                id: prev.id,
                kind: prev.kind,
                outcome: RunOutcome::Cancelled,
            });
        }

        let id = RequestId(self.next_id);
        self.next_id += 1;
        let source = CancellationSource::new();
        let token = source.token();

        let request = ActionRequest {
            kind,
            source_text: text.to_string(),
            prompt: prompt_for_action(kind, text, &self.config.translate_language),
        };

        PIPELINE_RUNS_TOTAL.fetch_add(1, Ordering::Relaxed);
        let _span = tracing::debug_span!(
            "pipeline.run",
            action = %kind,
            request = id.0,
        )
        .entered();
        tracing::debug!(
            target: "quill.pipeline",
            action = %kind,
            request = id.0,
            "transform dispatched"
        );

        let results_tx = self.results_tx.clone();
        thread::spawn(move || {
            let result = invoker.invoke(&request, &token);
            // The pipeline may already be gone; a dead channel is fine.
            let _ = results_tx.send(WorkerResult { id, result });
        });

        self.status = Status::Processing { label: kind.label() };
        self.reset_at = None;
        self.live = Some(LiveRequest { id, kind, source });
        Ok(id)
    }

    /// Abort the live request, if any, and return to `Idle` at once.
    ///
    /// The aborted request observes a `Cancelled` outcome; a worker
    /// result arriving afterward changes nothing.
    pub fn cancel(&mut self) {
        if let Some(live) = self.live.take() {
            live.source.cancel();
            tracing::debug!(
                target: "quill.pipeline",
                request = live.id.0,
                action = %live.kind,
                "request cancelled"
            );
            self.outbox.push_back(PipelineEvent {
                id: live.id,
                kind: live.kind,
                outcome: RunOutcome::Cancelled,
            });
            self.status = Status::Idle;
            self.reset_at = None;
        }
    }

    /// Drain the next completed outcome, absorbing worker results.
    pub fn poll(&mut self, now: Instant) -> Option<PipelineEvent> {
        self.absorb_results(now);
        self.outbox.pop_front()
    }

    /// Drive the timed auto-reset back to `Idle`.
    pub fn tick(&mut self, now: Instant) {
        if self.reset_at.is_some_and(|at| now >= at) {
            self.status = Status::Idle;
            self.reset_at = None;
        }
    }

    // ====================================================================
    // Continuation
    // ====================================================================

    /// Fold worker results into state. The generation comparison here
    /// is the single staleness check: only the live request may commit
    /// a transition.
    fn absorb_results(&mut self, now: Instant) {
        while let Ok(res) = self.results_rx.try_recv() {
            match self.live.take() {
                Some(live) if live.id == res.id => match res.result {
                    Ok(text) => {
                        self.status = Status::Success {
                            label: live.kind.label(),
                        };
                        self.reset_at = Some(now + self.config.success_hold);
                        tracing::debug!(
                            target: "quill.pipeline",
                            request = live.id.0,
                            action = %live.kind,
                            "transform completed"
                        );
                        self.outbox.push_back(PipelineEvent {
                            id: live.id,
                            kind: live.kind,
                            outcome: RunOutcome::Success(text),
                        });
                    }
                    Err(err) => {
                        self.status = Status::Failure {
                            reason: err.message.clone(),
                        };
                        self.reset_at = Some(now + self.config.failure_hold);
                        tracing::warn!(
                            target: "quill.pipeline",
                            request = live.id.0,
                            action = %live.kind,
                            reason = %err.message,
                            "transform failed"
                        );
                        self.outbox.push_back(PipelineEvent {
                            id: live.id,
                            kind: live.kind,
                            outcome: RunOutcome::Failure(err),
                        });
                    }
                },
                other => {
                    // Superseded or cancelled request: the result is
                    // discarded and must not transition state.
                    self.live = other;
                    PIPELINE_STALE_RESULTS_TOTAL.fetch_add(1, Ordering::Relaxed);
                    tracing::debug!(
                        target: "quill.pipeline",
                        request = res.id.0,
                        "stale result discarded"
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::mpsc;

    /// Invoker that blocks each request on a per-text gate, so tests
    /// control exactly when and how each invocation completes.
    struct GatedInvoker {
        gates: Mutex<HashMap<String, mpsc::Receiver<Result<String, InvokeError>>>>,
    }

    impl GatedInvoker {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                gates: Mutex::new(HashMap::new()),
            })
        }

        fn gate(&self, key: &str) -> mpsc::Sender<Result<String, InvokeError>> {
            let (tx, rx) = mpsc::channel();
            self.gates.lock().unwrap().insert(key.to_string(), rx);
            tx
        }
    }

    impl Invoker for GatedInvoker {
        fn invoke(
            &self,
            request: &ActionRequest,
            _cancel: &CancellationToken,
        ) -> Result<String, InvokeError> {
            let rx = self.gates.lock().unwrap().remove(&request.source_text);
            match rx {
                Some(rx) => rx
                    .recv()
                    .unwrap_or_else(|_| Err(InvokeError::new("gate closed"))),
                None => Err(InvokeError::new("no gate registered")),
            }
        }
    }

    /// Invoker that answers immediately.
    struct FixedInvoker(Result<String, InvokeError>);

    impl Invoker for FixedInvoker {
        fn invoke(
            &self,
            _request: &ActionRequest,
            _cancel: &CancellationToken,
        ) -> Result<String, InvokeError> {
            self.0.clone()
        }
    }

    fn wait_event(pipeline: &mut ActionPipeline) -> PipelineEvent {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if let Some(ev) = pipeline.poll(Instant::now()) {
                return ev;
            }
            assert!(Instant::now() < deadline, "timed out waiting for event");
            thread::sleep(Duration::from_millis(2));
        }
    }

    #[test]
    fn empty_input_rejected_before_dispatch() {
        let mut p = ActionPipeline::new(PipelineConfig::default())
            .with_invoker(Arc::new(FixedInvoker(Ok("x".into()))));
        let err = p.run("   \n", ActionKind::Rewrite).unwrap_err();
        assert_eq!(err, RunError::EmptyInput);
        assert_eq!(*p.status(), Status::Idle);
        assert!(p.poll(Instant::now()).is_none());
    }

    #[test]
    fn missing_credential_rejected_before_dispatch() {
        let mut p = ActionPipeline::new(PipelineConfig::default());
        let err = p.run("some text", ActionKind::Summarize).unwrap_err();
        assert_eq!(err, RunError::MissingCredential);
        assert_eq!(*p.status(), Status::Idle);
    }

    #[test]
    fn successful_run_reaches_success_then_resets() {
        let mut p = ActionPipeline::new(PipelineConfig::default())
            .with_invoker(Arc::new(FixedInvoker(Ok("better text".into()))));

        let id = p.run("rough text", ActionKind::Rewrite).unwrap();
        assert_eq!(
            *p.status(),
            Status::Processing { label: "Rewrite" }
        );

        let ev = wait_event(&mut p);
        assert_eq!(ev.id, id);
        assert_eq!(ev.outcome, RunOutcome::Success("better text".into()));
        assert_eq!(*p.status(), Status::Success { label: "Rewrite" });
        assert!(!p.is_processing());

        // Held for the success interval, then back to Idle.
        p.tick(Instant::now());
        assert_eq!(*p.status(), Status::Success { label: "Rewrite" });
        p.tick(Instant::now() + Duration::from_secs(3));
        assert_eq!(*p.status(), Status::Idle);
    }

    #[test]
    fn failed_run_reaches_failure_then_resets() {
        let mut p = ActionPipeline::new(PipelineConfig::default())
            .with_invoker(Arc::new(FixedInvoker(Err(InvokeError::new("rate limited")))));

        p.run("text", ActionKind::Shorten).unwrap();
        let ev = wait_event(&mut p);
        assert_eq!(
            ev.outcome,
            RunOutcome::Failure(InvokeError::new("rate limited"))
        );
        assert_eq!(
            *p.status(),
            Status::Failure {
                reason: "rate limited".into()
            }
        );

        p.tick(Instant::now() + Duration::from_secs(4));
        assert_eq!(*p.status(), Status::Idle);
    }

    #[test]
    fn second_run_supersedes_first() {
        let invoker = GatedInvoker::new();
        let first_gate = invoker.gate("one");
        let second_gate = invoker.gate("two");
        let mut p = ActionPipeline::new(PipelineConfig::default()).with_invoker(invoker);

        let first = p.run("one", ActionKind::Rewrite).unwrap();
        let second = p.run("two", ActionKind::Summarize).unwrap();
        assert_ne!(first, second);

        // The superseded request observes Cancelled immediately, before
        // the superseding request resolves.
        let ev = wait_event(&mut p);
        assert_eq!(ev.id, first);
        assert_eq!(ev.outcome, RunOutcome::Cancelled);
        assert_eq!(
            *p.status(),
            Status::Processing { label: "Summarize" }
        );

        // The first request's late success must not transition state.
        let stale_before = pipeline_stale_results_total();
        first_gate.send(Ok("stale".into())).unwrap();
        let deadline = Instant::now() + Duration::from_secs(5);
        while pipeline_stale_results_total() == stale_before {
            assert!(p.poll(Instant::now()).is_none(), "stale result leaked");
            assert!(Instant::now() < deadline, "stale result never absorbed");
            thread::sleep(Duration::from_millis(2));
        }
        assert_eq!(
            *p.status(),
            Status::Processing { label: "Summarize" }
        );

        // Only the second request's outcome is observable.
        second_gate.send(Ok("fresh".into())).unwrap();
        let ev = wait_event(&mut p);
        assert_eq!(ev.id, second);
        assert_eq!(ev.outcome, RunOutcome::Success("fresh".into()));
    }

    #[test]
    fn cancel_returns_to_idle_immediately() {
        let invoker = GatedInvoker::new();
        let gate = invoker.gate("text");
        let mut p = ActionPipeline::new(PipelineConfig::default()).with_invoker(invoker);

        let id = p.run("text", ActionKind::Expand).unwrap();
        p.cancel();
        assert_eq!(*p.status(), Status::Idle);

        let ev = wait_event(&mut p);
        assert_eq!(ev.id, id);
        assert_eq!(ev.outcome, RunOutcome::Cancelled);

        // A result arriving after cancellation changes nothing.
        let stale_before = pipeline_stale_results_total();
        gate.send(Ok("late".into())).unwrap();
        let deadline = Instant::now() + Duration::from_secs(5);
        while pipeline_stale_results_total() == stale_before {
            assert!(p.poll(Instant::now()).is_none());
            assert!(Instant::now() < deadline, "late result never absorbed");
            thread::sleep(Duration::from_millis(2));
        }
        assert_eq!(*p.status(), Status::Idle);
    }

    #[test]
    fn cancel_when_idle_is_noop() {
        let mut p = ActionPipeline::new(PipelineConfig::default());
        p.cancel();
        assert_eq!(*p.status(), Status::Idle);
        assert!(p.poll(Instant::now()).is_none());
    }

    #[test]
    fn supersession_cancels_the_prior_token() {
        struct TokenProbe {
            seen: Mutex<Vec<CancellationToken>>,
            gates: Mutex<HashMap<String, mpsc::Receiver<Result<String, InvokeError>>>>,
        }
        impl Invoker for TokenProbe {
            fn invoke(
                &self,
                request: &ActionRequest,
                cancel: &CancellationToken,
            ) -> Result<String, InvokeError> {
                self.seen.lock().unwrap().push(cancel.clone());
                let rx = self.gates.lock().unwrap().remove(&request.source_text);
                match rx {
                    Some(rx) => rx
                        .recv()
                        .unwrap_or_else(|_| Err(InvokeError::new("gate closed"))),
                    None => Err(InvokeError::new("no gate registered")),
                }
            }
        }

        let probe = Arc::new(TokenProbe {
            seen: Mutex::new(Vec::new()),
            gates: Mutex::new(HashMap::new()),
        });
        let (tx_a, rx_a) = mpsc::channel();
        let (tx_b, rx_b) = mpsc::channel();
        probe.gates.lock().unwrap().insert("a".into(), rx_a);
        probe.gates.lock().unwrap().insert("b".into(), rx_b);

        let mut p = ActionPipeline::new(PipelineConfig::default()).with_invoker(probe.clone());
        p.run("a", ActionKind::Rewrite).unwrap();

        // Wait for the first worker to register its token.
        let deadline = Instant::now() + Duration::from_secs(5);
        while probe.seen.lock().unwrap().is_empty() {
            assert!(Instant::now() < deadline);
            thread::sleep(Duration::from_millis(2));
        }

        p.run("b", ActionKind::Rewrite).unwrap();
        let tokens = probe.seen.lock().unwrap();
        assert!(tokens[0].is_cancelled(), "superseded token not cancelled");
        drop(tokens);

        tx_a.send(Ok("a".into())).unwrap();
        tx_b.send(Ok("b".into())).unwrap();
    }

    #[test]
    fn prompt_carries_translate_language() {
        struct CaptureInvoker(Mutex<Option<Prompt>>);
        impl Invoker for CaptureInvoker {
            fn invoke(
                &self,
                request: &ActionRequest,
                _cancel: &CancellationToken,
            ) -> Result<String, InvokeError> {
                *self.0.lock().unwrap() = Some(request.prompt.clone());
                Ok("ok".into())
            }
        }

        let capture = Arc::new(CaptureInvoker(Mutex::new(None)));
        let config = PipelineConfig {
            translate_language: "German".into(),
            ..PipelineConfig::default()
        };
        let mut p = ActionPipeline::new(config).with_invoker(capture.clone());
        p.run("hello", ActionKind::Translate).unwrap();
        wait_event(&mut p);

        let prompt = capture.0.lock().unwrap().clone().unwrap();
        assert!(prompt.user.contains("German"));
        assert!(prompt.user.contains("hello"));
    }

    #[test]
    fn action_labels_are_stable() {
        assert_eq!(ActionKind::FixGrammar.label(), "Fix Grammar");
        assert_eq!(ActionKind::ALL.len(), 8);
        assert_eq!(format!("{}", ActionKind::Bulletify), "Bulletify");
    }

    #[test]
    fn run_error_messages() {
        assert_eq!(RunError::EmptyInput.to_string(), "no text to transform");
        assert_eq!(
            RunError::MissingCredential.to_string(),
            "no API credential configured"
        );
        assert_eq!(InvokeError::new("boom").to_string(), "boom");
    }
}
