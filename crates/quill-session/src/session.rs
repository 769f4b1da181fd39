#![forbid(unsafe_code)]

//! Session composition root.
//!
//! [`Session`] owns one [`HistoryBuffer`], one [`ActionPipeline`], and
//! one [`CommandRouter`], and wires keyboard commands to both over an
//! internal command queue.
//!
//! ```text
//!  keystroke ──▶ CommandRouter ──▶ SessionCommand queue
//!                                        │
//!        ┌───────────────┬───────────────┤
//!        ▼               ▼               ▼
//!   HistoryBuffer   ActionPipeline   palette toggle
//!        ▲               │
//!        │          success text
//!        └── apply_edit ◀┘
//! ```
//!
//! All document mutation funnels through [`apply_edit`](Session::apply_edit):
//! direct typing and pipeline successes converge there, so history is a
//! complete record of document states regardless of source.
//!
//! The editing surface is an injected capability, not ambient state;
//! the session holds the only reference and passes text down to the
//! pipeline explicitly.

use std::sync::mpsc::{Receiver, Sender, channel};

use web_time::Instant;

use quill_core::{Chord, CommandRouter, KeyCode, KeyEvent};

use crate::config::SessionConfig;
use crate::history::HistoryBuffer;
use crate::pipeline::{
    ActionKind, ActionPipeline, Invoker, RequestId, RunError, RunOutcome, Status,
};

// ---------------------------------------------------------------------------
// Editing surface capability
// ---------------------------------------------------------------------------

/// The host's text-editing surface, as seen by the session.
///
/// Rendering and cursor management live on the host side; the session
/// only reads text and writes replacements.
pub trait EditorSurface {
    /// The current selection, or `None` when nothing is selected.
    fn selection(&self) -> Option<String>;

    /// The whole document text.
    fn full_text(&self) -> String;

    /// Replace the current selection with `text`.
    fn replace_selection(&mut self, text: &str);

    /// Replace the whole document with `text`.
    fn replace_all(&mut self, text: &str);
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

/// A routed keyboard command, queued by the router and drained by the
/// session on the same thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    /// Step history back one snapshot.
    Undo,
    /// Step history forward one snapshot.
    Redo,
    /// Start a transform on the selection or whole document.
    RunAction(ActionKind),
    /// Open or close the command palette.
    TogglePalette,
}

/// Where a pending transform result should land.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ApplyTarget {
    Selection,
    Document,
}

#[derive(Debug, Clone, Copy)]
struct PendingApply {
    id: RequestId,
    target: ApplyTarget,
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Composition root for one editing session.
///
/// Single-threaded: every method is called from the UI/event thread.
/// Router handlers never touch session state directly; they enqueue a
/// [`SessionCommand`] which [`on_key`](Session::on_key) drains after
/// dispatch, so a handler can never observe the session mid-mutation.
pub struct Session<S: EditorSurface> {
    surface: S,
    history: HistoryBuffer,
    pipeline: ActionPipeline,
    router: CommandRouter,
    commands: Receiver<SessionCommand>,
    pending: Option<PendingApply>,
    palette_open: bool,
}

impl<S: EditorSurface> std::fmt::Debug for Session<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("history", &self.history)
            .field("pipeline", &self.pipeline)
            .field("palette_open", &self.palette_open)
            .finish()
    }
}

impl<S: EditorSurface> Session<S> {
    /// Build a session over `surface`, seeding history from its
    /// current text and binding the default command table.
    #[must_use]
    pub fn new(surface: S, config: &SessionConfig, now: Instant) -> Self {
        let (tx, commands) = channel();
        let history = HistoryBuffer::new(&surface.full_text(), now, config.to_history_config());
        let pipeline = ActionPipeline::new(config.to_pipeline_config());
        Self {
            surface,
            history,
            pipeline,
            router: default_bindings(&tx),
            commands,
            pending: None,
            palette_open: false,
        }
    }

    /// Attach the transform invocation capability.
    pub fn set_invoker(&mut self, invoker: std::sync::Arc<dyn Invoker>) {
        self.pipeline.set_invoker(Some(invoker));
    }

    // ====================================================================
    // Input
    // ====================================================================

    /// Route one key event, then execute whatever commands it queued.
    ///
    /// Returns whether a binding consumed the event.
    pub fn on_key(&mut self, key: &KeyEvent) -> bool {
        let handled = self.router.dispatch(key);
        self.drain_commands();
        handled
    }

    /// Suppress or restore keyboard dispatch (e.g. while a blocking
    /// dialog is open).
    pub fn set_commands_enabled(&mut self, enabled: bool) {
        self.router.set_enabled(enabled);
    }

    /// Record a document edit from the surface and make it visible.
    ///
    /// Both direct typing and pipeline successes land here, so every
    /// document state is a history snapshot (modulo debounce).
    pub fn apply_edit(&mut self, text: &str, now: Instant) {
        self.surface.replace_all(text);
        self.history.push(text, now);
    }

    /// Re-seed the session with a new document (file load, template).
    /// History restarts from the new content.
    pub fn reset_document(&mut self, text: &str, now: Instant) {
        self.surface.replace_all(text);
        self.history.reset(text, now);
        self.pipeline.cancel();
        self.pending = None;
    }

    // ====================================================================
    // Commands
    // ====================================================================

    /// Step back one snapshot, pushing the restored text to the surface.
    pub fn undo(&mut self) {
        if let Some(content) = self.history.undo() {
            self.surface.replace_all(&content);
        }
    }

    /// Step forward one snapshot, pushing the restored text to the surface.
    pub fn redo(&mut self) {
        if let Some(content) = self.history.redo() {
            self.surface.replace_all(&content);
        }
    }

    /// Start a transform on the selection, or the whole document when
    /// nothing is selected. The result lands back on the same target.
    pub fn run_action(&mut self, kind: ActionKind) -> Result<RequestId, RunError> {
        let (text, target) = match self.surface.selection() {
            Some(sel) if !sel.trim().is_empty() => (sel, ApplyTarget::Selection),
            _ => (self.surface.full_text(), ApplyTarget::Document),
        };
        let id = self.pipeline.run(&text, kind)?;
        self.pending = Some(PendingApply { id, target });
        Ok(id)
    }

    /// Abort the in-flight transform, if any.
    pub fn cancel_transform(&mut self) {
        self.pipeline.cancel();
        self.pending = None;
    }

    // ====================================================================
    // Driving
    // ====================================================================

    /// Absorb pipeline outcomes and drive the status auto-reset.
    /// Call once per event-loop turn.
    pub fn tick(&mut self, now: Instant) {
        while let Some(ev) = self.pipeline.poll(now) {
            match self.pending.take() {
                Some(p) if p.id == ev.id => {
                    if let RunOutcome::Success(text) = ev.outcome {
                        self.apply_result(&text, p.target, now);
                    }
                }
                other => self.pending = other,
            }
        }
        self.pipeline.tick(now);
    }

    fn apply_result(&mut self, text: &str, target: ApplyTarget, now: Instant) {
        match target {
            ApplyTarget::Selection => {
                self.surface.replace_selection(text);
                let full = self.surface.full_text();
                self.history.push(&full, now);
            }
            ApplyTarget::Document => self.apply_edit(text, now),
        }
    }

    fn drain_commands(&mut self) {
        let queued: Vec<SessionCommand> = self.commands.try_iter().collect();
        for cmd in queued {
            match cmd {
                SessionCommand::Undo => self.undo(),
                SessionCommand::Redo => self.redo(),
                SessionCommand::RunAction(kind) => {
                    if let Err(err) = self.run_action(kind) {
                        tracing::warn!(
                            target: "quill.session",
                            action = %kind,
                            error = %err,
                            "transform rejected"
                        );
                    }
                }
                SessionCommand::TogglePalette => self.palette_open = !self.palette_open,
            }
        }
    }

    // ====================================================================
    // Queries
    // ====================================================================

    /// Current pipeline status, for display.
    #[must_use]
    pub fn status(&self) -> &Status {
        self.pipeline.status()
    }

    /// Whether undo is available, for control enablement.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Whether redo is available, for control enablement.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Whether the command palette is open.
    #[must_use]
    pub fn palette_open(&self) -> bool {
        self.palette_open
    }

    /// The editing surface.
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// The editing surface, mutably.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// The undo/redo history.
    #[must_use]
    pub fn history(&self) -> &HistoryBuffer {
        &self.history
    }
}

/// The default command table: palette on accel-K, undo/redo on
/// accel-Z / accel-shift-Z, and one digit per transform action.
fn default_bindings(tx: &Sender<SessionCommand>) -> CommandRouter {
    let mut router = CommandRouter::new();

    let send = tx.clone();
    router.bind(Chord::accel(KeyCode::Char('k')), move || {
        let _ = send.send(SessionCommand::TogglePalette);
    });

    let send = tx.clone();
    router.bind(Chord::accel(KeyCode::Char('z')), move || {
        let _ = send.send(SessionCommand::Undo);
    });

    let send = tx.clone();
    router.bind(Chord::accel(KeyCode::Char('z')).with_shift(), move || {
        let _ = send.send(SessionCommand::Redo);
    });

    for (i, kind) in ActionKind::ALL.into_iter().enumerate() {
        let digit = (b'1' + i as u8) as char;
        let send = tx.clone();
        router.bind(Chord::accel(KeyCode::Char(digit)), move || {
            let _ = send.send(SessionCommand::RunAction(kind));
        });
    }

    router
}
