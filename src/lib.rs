//! Reopen closed editor windows and tabs where they used to be.
//!
//! A close hook captures a [`Snapshot`] of the view while it is still open and
//! pushes it onto an [`UndoStack`]. Undoing pops the newest snapshot and turns
//! it into a [`RestoreInstruction`] placed against the live layout, which the
//! [`Host`] then carries out.

pub mod config;
pub mod editor;
pub mod host;
pub mod layout;
pub mod plugin;
pub mod snapshot;
pub mod stack;
pub mod tab;
pub mod tabline;

pub use host::{Host, RestoreInstruction};
pub use plugin::Undoquit;
pub use snapshot::{ContentId, Snapshot, ViewKind, capture};
pub use stack::UndoStack;
