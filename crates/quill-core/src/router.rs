#![forbid(unsafe_code)]

//! Chord matching and command dispatch.
//!
//! [`CommandRouter`] holds an ordered table of chord → handler bindings
//! and resolves each key event to at most one handler. Matching is
//! synchronous and runs on every key press with no queuing; handlers
//! must be fire-and-forget (anything asynchronous goes through the
//! session's pipeline, not the router).
//!
//! # Matching policy
//!
//! A key event matches a [`Chord`] when all of the following hold:
//!
//! - the key code matches, case-insensitively for character keys
//! - the accelerator requirement matches exactly: a chord with
//!   `accel = true` needs Ctrl **or** Super held (one logical
//!   modifier); a chord with `accel = false` needs both absent
//! - shift and alt match exactly — a chord that does not require them
//!   must see them absent
//!
//! The exact-match rule means `Accel+Shift+Z` never satisfies an
//! `Accel+Z` binding and vice versa. The table is scanned in
//! registration order and the first match wins.

use std::fmt;

use crate::event::{KeyCode, KeyEvent, KeyEventKind};

/// A keyboard chord: a key plus required modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chord {
    /// The literal key.
    pub code: KeyCode,
    /// Require the platform accelerator (Ctrl or Super).
    pub accel: bool,
    /// Require Shift.
    pub shift: bool,
    /// Require Alt.
    pub alt: bool,
}

impl Chord {
    /// A bare chord with no modifiers.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            accel: false,
            shift: false,
            alt: false,
        }
    }

    /// A chord requiring the platform accelerator.
    #[must_use]
    pub const fn accel(code: KeyCode) -> Self {
        Self {
            code,
            accel: true,
            shift: false,
            alt: false,
        }
    }

    /// Additionally require Shift.
    #[must_use]
    pub const fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    /// Additionally require Alt.
    #[must_use]
    pub const fn with_alt(mut self) -> Self {
        self.alt = true;
        self
    }

    /// Check whether a key event satisfies this chord.
    #[must_use]
    pub fn matches(&self, key: &KeyEvent) -> bool {
        if !code_matches(self.code, key.code) {
            return false;
        }
        key.accel() == self.accel && key.shift() == self.shift && key.alt() == self.alt
    }
}

/// Case-insensitive comparison for character keys, exact otherwise.
fn code_matches(chord: KeyCode, event: KeyCode) -> bool {
    match (chord, event) {
        (KeyCode::Char(a), KeyCode::Char(b)) => a.eq_ignore_ascii_case(&b),
        (a, b) => a == b,
    }
}

struct Binding {
    chord: Chord,
    handler: Box<dyn FnMut()>,
}

/// Ordered chord → handler table with first-match-wins dispatch.
///
/// Bindings are static configuration: they are registered once by the
/// host and never mutated at runtime. The only runtime state is the
/// enabled flag, used to suppress all dispatch while a blocking dialog
/// is open.
pub struct CommandRouter {
    bindings: Vec<Binding>,
    enabled: bool,
}

impl fmt::Debug for CommandRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandRouter")
            .field("bindings", &self.bindings.len())
            .field("enabled", &self.enabled)
            .finish()
    }
}

impl Default for CommandRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRouter {
    /// Create an empty, enabled router.
    #[must_use]
    pub fn new() -> Self {
        Self {
            bindings: Vec::new(),
            enabled: true,
        }
    }

    /// Append a binding. Registration order is dispatch order.
    pub fn bind(&mut self, chord: Chord, handler: impl FnMut() + 'static) {
        self.bindings.push(Binding {
            chord,
            handler: Box::new(handler),
        });
    }

    /// Enable or disable dispatch. While disabled every event falls
    /// through unconsumed.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Whether dispatch is currently enabled.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Number of registered bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Resolve a key event and invoke the first matching handler.
    ///
    /// Returns `true` when a binding consumed the event. Release
    /// events never dispatch.
    pub fn dispatch(&mut self, key: &KeyEvent) -> bool {
        if !self.enabled || key.kind == KeyEventKind::Release {
            return false;
        }
        for binding in &mut self.bindings {
            if binding.chord.matches(key) {
                (binding.handler)();
                return true;
            }
        }
        false
    }
}
