#![forbid(unsafe_code)]

//! Quill Session
//!
//! The interactive editing session runtime: a bounded undo/redo
//! [`HistoryBuffer`], the single-flight [`ActionPipeline`] that drives
//! external text transforms with cooperative cancellation, and the
//! [`Session`] composition root that wires keyboard commands to both.
//!
//! # Key Components
//!
//! - [`HistoryBuffer`] - Bounded snapshot log with cursor-based undo/redo
//! - [`ActionPipeline`] - At-most-one in-flight transform with token
//!   invalidation of superseded requests
//! - [`CancellationSource`] / [`CancellationToken`] - Cooperative
//!   cancellation primitive shared with invocation capabilities
//! - [`Session`] - Composition root owning history, pipeline, router,
//!   and the editing-surface capability
//!
//! # How it fits in the system
//! The session runtime sits between the host's editing surface (an
//! opaque capability for reading and replacing document text) and the
//! external invocation capability (an [`Invoker`] that performs the
//! actual transform call). Rendering, persistence, and provider wire
//! protocols all live outside this crate.

pub mod cancellation;
pub mod config;
pub mod history;
pub mod pipeline;
pub mod prompt;
pub mod session;

pub use cancellation::{CancellationSource, CancellationToken};
pub use config::{ConfigError, HistoryPolicy, Provider, SessionConfig, StatusPolicy};
pub use history::{HistoryBuffer, HistoryConfig, Snapshot};
pub use pipeline::{
    ActionKind, ActionPipeline, ActionRequest, InvokeError, Invoker, PipelineConfig,
    PipelineEvent, RequestId, RunError, RunOutcome, Status, pipeline_runs_total,
    pipeline_stale_results_total,
};
pub use prompt::{Prompt, prompt_for_action};
pub use session::{EditorSurface, Session, SessionCommand};
