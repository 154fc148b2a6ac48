//! Recursive-descent parser (spec §4.2). Hand-written rather than
//! generated — see `SPEC_FULL.md` §B and the teacher's own design note for
//! why — but structured the same way: a token [`cursor::Cursor`] shared by
//! every grammar function, each function owning one non-terminal.

mod cursor;
pub mod errors;
pub mod grammar;

pub use errors::{cap_message, simplify_expected_message, Diagnostic, ErrorCode, RelatedInfo, Severity};

use crate::ast::Ast;
use cursor::Cursor;

/// The result of parsing one document: a (possibly partial) AST plus every
/// lexer/parser diagnostic collected along the way. Parsing never aborts —
/// a result is always returned, even for maximally ill-formed input (spec
/// §4.2, §8).
pub struct ParseResult {
    pub ast: Ast,
    pub diagnostics: Vec<Diagnostic>,
}

pub fn parse(source: &str) -> ParseResult {
    let mut cursor = Cursor::new(source);
    let root = grammar::parse_root(&mut cursor);
    let ast = cursor.builder.finish(root);
    ParseResult {
        ast,
        diagnostics: cursor.diagnostics,
    }
}
