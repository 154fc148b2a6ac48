//! Foundation types shared by every other module.
//!
//! - [`FileId`] — interned per-document identifier
//! - [`Interner`], [`Name`] — string interning for element/attribute names
//! - [`Position`], [`Span`] — 0-based source locations for AST nodes and diagnostics
//! - [`LineIndex`] — byte offset <-> line/column conversion
//!
//! This module has no dependency on any other `syster` module.

mod file_id;
mod interner;
mod line_index;
mod position;

pub use file_id::FileId;
pub use interner::{Interner, Name};
pub use line_index::LineIndex;
pub use position::{Position, Span};

pub use text_size::{TextRange, TextSize};
