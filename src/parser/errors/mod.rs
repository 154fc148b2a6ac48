//! Diagnostics produced by the parser (and, via [`Severity`]/[`Diagnostic`],
//! shared with the validator). Grounded on the teacher's
//! `parser::errors::error`/`codes` split, trimmed to what the spec actually
//! asks for: no `ParseContext`-aware formatter, since this grammar's
//! contexts are handled inline at each call site instead of through a
//! context stack.

mod code;

pub use code::ErrorCode;

use crate::base::{Span, TextRange};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Severity {
    #[default]
    Error,
    Warning,
    Information,
    Hint,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Information => "info",
            Severity::Hint => "hint",
        }
    }
}

/// A related source location, e.g. "opening brace here" pointing back at
/// an unclosed delimiter's opening token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedInfo {
    pub message: String,
    pub range: TextRange,
    pub span: Span,
}

/// `(severity, message, range, optional code)` (spec §3 "Diagnostic"),
/// enriched with an optional hint and related locations the same way the
/// teacher's `SyntaxError` is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub range: TextRange,
    pub span: Span,
    pub code: Option<ErrorCode>,
    pub hint: Option<String>,
    pub related: Vec<RelatedInfo>,
}

impl Diagnostic {
    pub fn new(severity: Severity, message: impl Into<String>, range: TextRange, span: Span) -> Self {
        Self {
            severity,
            message: message.into(),
            range,
            span,
            code: None,
            hint: None,
            related: Vec::new(),
        }
    }

    pub fn error(message: impl Into<String>, range: TextRange, span: Span) -> Self {
        Self::new(Severity::Error, message, range, span)
    }

    pub fn warning(message: impl Into<String>, range: TextRange, span: Span) -> Self {
        Self::new(Severity::Warning, message, range, span)
    }

    pub fn hint(message: impl Into<String>, range: TextRange, span: Span) -> Self {
        Self::new(Severity::Hint, message, range, span)
    }

    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_related(mut self, info: RelatedInfo) -> Self {
        self.related.push(info);
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Chevrotain-style alternative lists blow up to "expected one of: A, B, C,
/// D, E, F, G, …" for grammars with many alternatives at one position.
/// Spec §7 requires truncating to the first five plus `, ...`, then
/// capping the whole message at 200 characters.
pub fn simplify_expected_message(alternatives: &[&str]) -> String {
    let shown: Vec<&str> = alternatives.iter().take(5).copied().collect();
    let mut message = format!("expected {}", shown.join(", "));
    if alternatives.len() > 5 {
        message.push_str(", ...");
    }
    cap_message(&message)
}

pub fn cap_message(message: &str) -> String {
    const MAX: usize = 200;
    if message.len() <= MAX {
        return message.to_string();
    }
    let mut end = MAX;
    while !message.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &message[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simplifies_long_alternative_lists() {
        let alts = ["A", "B", "C", "D", "E", "F", "G"];
        let msg = simplify_expected_message(&alts);
        assert_eq!(msg, "expected A, B, C, D, E, ...");
    }

    #[test]
    fn leaves_short_lists_untouched() {
        let alts = ["A", "B"];
        assert_eq!(simplify_expected_message(&alts), "expected A, B");
    }

    #[test]
    fn caps_message_length() {
        let long = "x".repeat(500);
        let capped = cap_message(&long);
        assert_eq!(capped.len(), 203);
    }
}
