//! # syster
//!
//! Front-end compiler for SysML v2 and KerML: lexer, parser, name
//! resolution, and validator.
//!
//! ## Module structure (dependency order)
//!
//! ```text
//! driver    → Document/Workspace state machine, parallel stage advancement
//!   ↓
//! validator → Semantic checks over linked documents
//!   ↓
//! scope     → Export/local scope computation, reference resolution
//!   ↓
//! ast       → Node arena, NodeKind, qualified names, expressions
//!   ↓
//! parser    → Recursive-descent grammar over the lexer's token stream
//!   ↓
//! lexer     → Hand-written tokenizer
//!   ↓
//! base      → Primitives (FileId, Name interning, TextSize, LineIndex)
//! ```

/// Foundation types: FileId, Name interning, Position/Span, LineIndex.
pub mod base;

/// Hand-written tokenizer.
pub mod lexer;

/// AST: node arena, closed `NodeKind` set, qualified names, expressions.
pub mod ast;

/// Recursive-descent parser and diagnostics.
pub mod parser;

/// Export/local scope computation and reference resolution.
pub mod scope;

/// Semantic validation over linked documents.
pub mod validator;

/// Document/workspace state machine and per-document pipeline driver.
pub mod driver;

pub use base::{FileId, Interner, LineIndex, Name, Position, Span, TextRange, TextSize};
pub use parser::{Diagnostic, ErrorCode, Severity};
