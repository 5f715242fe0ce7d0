//! Core application state for Taskdeck.
//!
//! This crate owns the single-screen controller: the in-memory task list,
//! the draft input, the editing cursor, and the reconciliation of store
//! call completions into local state. Rendering lives in `taskdeck-tui`;
//! the remote store behind the [`TaskStore`] seam lives in
//! `taskdeck-store`.

mod app;
mod draft;

pub use app::{App, StatusKind, StatusLine, StoreAction, StoreEvent};
pub use draft::DraftInput;

pub use taskdeck_store::{StoreError, TaskStore};
pub use taskdeck_types::{Task, TaskId, TaskName};
