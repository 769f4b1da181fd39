#![forbid(unsafe_code)]

//! Quill Core
//!
//! Input primitives for the Quill editing session: canonical keyboard
//! event types, chord descriptions, and the [`CommandRouter`] that maps
//! key events to host-supplied command handlers.
//!
//! # Role in Quill
//! `quill-core` sits below the session runtime. It knows nothing about
//! documents, history, or transform pipelines — it only answers the
//! question "which command, if any, does this keystroke trigger?".

pub mod event;
pub mod router;

pub use event::{KeyCode, KeyEvent, KeyEventKind, Modifiers};
pub use router::{Chord, CommandRouter};
