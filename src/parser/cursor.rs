//! The token cursor: lookahead, recovery, and the keyword/identifier
//! arbitration contract (spec §4.2) live here so every grammar function
//! shares one implementation of "what counts as a name here".

use crate::ast::AstBuilder;
use crate::base::{Interner, LineIndex, Name, Span, TextSize};
use crate::lexer::{self, LexError, Token, TokenKind};

use super::errors::{Diagnostic, ErrorCode, RelatedInfo, Severity};

/// Keywords the synchronisation routine treats as the start of a new
/// top-level declaration (spec §4.2 "synchronisation point … start of a
/// top-level declaration keyword").
const TOP_LEVEL_SYNC_KEYWORDS: &[TokenKind] = &[
    TokenKind::KwPackage,
    TokenKind::KwPart,
    TokenKind::KwItem,
    TokenKind::KwAttribute,
    TokenKind::KwAction,
    TokenKind::KwState,
    TokenKind::KwConstraint,
    TokenKind::KwRequirement,
    TokenKind::KwPort,
    TokenKind::KwConnection,
    TokenKind::KwInterface,
    TokenKind::KwFlow,
    TokenKind::KwAllocation,
    TokenKind::KwCalc,
    TokenKind::KwCase,
    TokenKind::KwAnalysis,
    TokenKind::KwVerification,
    TokenKind::KwUse,
    TokenKind::KwView,
    TokenKind::KwViewpoint,
    TokenKind::KwRendering,
    TokenKind::KwMetadata,
    TokenKind::KwOccurrence,
    TokenKind::KwConcern,
    TokenKind::KwEnum,
    TokenKind::KwImport,
    TokenKind::KwAlias,
    TokenKind::KwPublic,
    TokenKind::KwPrivate,
    TokenKind::KwProtected,
    TokenKind::KwComment,
    TokenKind::KwDoc,
    TokenKind::KwRep,
    TokenKind::KwTransition,
    TokenKind::KwSuccession,
    TokenKind::KwConnect,
    TokenKind::KwBind,
];

pub struct Cursor<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    pos: usize,
    pub builder: AstBuilder,
    pub interner: Interner,
    pub diagnostics: Vec<Diagnostic>,
    pending_doc: Option<Token>,
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a str) -> Self {
        let (tokens, lex_errors) = lexer::tokenize(source);
        let mut diagnostics: Vec<Diagnostic> = lex_errors
            .into_iter()
            .map(|e: LexError| {
                let range = crate::base::TextRange::new(
                    TextSize::from(e.span.start_offset),
                    TextSize::from(e.span.end_offset),
                );
                Diagnostic::new(Severity::Error, e.message, range, e.span)
                    .with_code(ErrorCode::InvalidCharacter)
            })
            .collect();
        // Re-derive the precise lexical error code from the message, since
        // the lexer itself only knows text, not `ErrorCode`.
        for d in diagnostics.iter_mut() {
            d.code = Some(if d.message.contains("unterminated string")
                || d.message.contains("unterminated unrestricted name")
            {
                ErrorCode::UnterminatedString
            } else if d.message.contains("unterminated block comment") {
                ErrorCode::UnterminatedBlockComment
            } else {
                ErrorCode::InvalidCharacter
            });
        }

        let mut cursor = Self {
            source,
            tokens,
            pos: 0,
            builder: AstBuilder::new(),
            interner: Interner::new(),
            diagnostics,
            pending_doc: None,
        };
        cursor.pending_doc = cursor.skip_doc_comments();
        cursor
    }

    pub fn line_index(&self) -> LineIndex {
        LineIndex::new(self.source)
    }

    fn skip_doc_comments(&mut self) -> Option<Token> {
        let mut last = None;
        while self.tokens[self.pos].kind == TokenKind::DocComment {
            last = Some(self.tokens[self.pos]);
            self.pos += 1;
        }
        last
    }

    /// Consume a leading doc comment, if the current position has one
    /// (spec §4.1: `/** … */` is consumed by `doc`/`comment`/`rep`
    /// productions). Since [`Cursor::new`]/[`Cursor::bump`] already
    /// advance past doc comments as trivia, a pending one (if any) was
    /// captured there; callers that care about its text use this to
    /// retrieve the most recently skipped one.
    pub fn take_pending_doc_comment(&mut self) -> Option<Token> {
        self.pending_doc.take()
    }

    pub fn raw_pos(&self) -> usize {
        self.pos
    }

    pub fn source_text(&self) -> &'a str {
        self.source
    }

    pub fn current(&self) -> &Token {
        &self.tokens[self.pos]
    }

    pub fn current_kind(&self) -> TokenKind {
        self.tokens[self.pos].kind
    }

    pub fn current_span(&self) -> Span {
        self.tokens[self.pos].span
    }

    pub fn current_text(&self) -> &'a str {
        self.tokens[self.pos].text(self.source)
    }

    pub fn at(&self, kind: TokenKind) -> bool {
        self.current_kind() == kind
    }

    pub fn at_any(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.current_kind())
    }

    pub fn at_eof(&self) -> bool {
        self.at(TokenKind::Eof)
    }

    /// Keyword/identifier arbitration (spec §4.2): true wherever a token
    /// can play the role of `<identifier>`.
    pub fn at_identifier_like(&self) -> bool {
        self.current_kind().keyword_usable_as_identifier()
            || self.at(TokenKind::UnrestrictedName)
    }

    /// Consume the current token and return it, skipping any doc comment
    /// that immediately follows.
    pub fn bump(&mut self) -> Token {
        let tok = self.tokens[self.pos];
        self.pos += 1;
        self.pending_doc = self.skip_doc_comments().or(self.pending_doc.take());
        tok
    }

    pub fn eat(&mut self, kind: TokenKind) -> Option<Token> {
        if self.at(kind) {
            Some(self.bump())
        } else {
            None
        }
    }

    /// Consume the current token as a name, under the arbitration contract.
    /// Returns `None` (recording a diagnostic) if the current token cannot
    /// play the role of an identifier.
    pub fn expect_name(&mut self) -> Option<(Name, Span)> {
        if !self.at_identifier_like() {
            self.error_expected("an identifier", ErrorCode::MissingIdentifier);
            return None;
        }
        let span = self.current_span();
        let raw = self.current_text();
        // `'an unrestricted name'` carries its quotes in the lexeme; every
        // other name-like token (plain identifier or keyword) is used as-is.
        let text = if self.current_kind() == TokenKind::UnrestrictedName {
            raw.get(1..raw.len().saturating_sub(1)).unwrap_or("").to_string()
        } else {
            raw.to_string()
        };
        self.bump();
        Some((self.interner.intern(&text), span))
    }

    pub fn expect(&mut self, kind: TokenKind, what: &str) -> Option<Token> {
        if self.at(kind) {
            Some(self.bump())
        } else {
            self.error_expected(what, ErrorCode::UnexpectedToken);
            None
        }
    }

    pub fn error_expected(&mut self, what: &str, code: ErrorCode) {
        let range = self.text_range(self.current_span());
        let message = format!(
            "expected {what}, found '{}'",
            self.current_text_or_eof()
        );
        self.diagnostics.push(
            Diagnostic::error(super::errors::cap_message(&message), range, self.current_span())
                .with_code(code),
        );
    }

    pub fn error_at(&mut self, message: impl Into<String>, span: Span, code: ErrorCode) {
        let range = self.text_range(span);
        self.diagnostics
            .push(Diagnostic::error(message, range, span).with_code(code));
    }

    pub fn hint_at(&mut self, message: impl Into<String>, span: Span) {
        let range = self.text_range(span);
        self.diagnostics.push(Diagnostic::hint(message, range, span));
    }

    pub fn related_at(message: impl Into<String>, span: Span, range: crate::base::TextRange) -> RelatedInfo {
        RelatedInfo {
            message: message.into(),
            range,
            span,
        }
    }

    pub fn text_range(&self, span: Span) -> crate::base::TextRange {
        crate::base::TextRange::new(TextSize::from(span.start_offset), TextSize::from(span.end_offset))
    }

    fn current_text_or_eof(&self) -> &'a str {
        if self.at_eof() {
            "<eof>"
        } else {
            self.current_text()
        }
    }

    /// Distinguishes the anonymous `flow from <src> to <tgt>;` usage from an
    /// ordinary `flow [def] <name>? ...` declaration — both start with the
    /// same `flow` keyword token. Scans up to the next statement boundary
    /// for a `from` keyword, never past it.
    pub fn looks_like_anonymous_flow(&self) -> bool {
        let mut i = self.pos + 1;
        loop {
            match self.tokens.get(i).map(|t| t.kind) {
                Some(TokenKind::KwFrom) => return true,
                Some(TokenKind::Semicolon)
                | Some(TokenKind::LBrace)
                | Some(TokenKind::RBrace)
                | Some(TokenKind::Eof)
                | None => return false,
                _ => i += 1,
            }
        }
    }

    /// Spec §4.2 recovery policy: skip to `;`, `}`, or the start of a
    /// top-level declaration keyword, then stop (consuming a trailing `;`
    /// if that's what was found). Never loops past EOF, so parsing always
    /// terminates in time linear in the remaining input.
    pub fn synchronize(&mut self) {
        loop {
            match self.current_kind() {
                TokenKind::Eof | TokenKind::RBrace => return,
                TokenKind::Semicolon => {
                    self.bump();
                    return;
                }
                kind if TOP_LEVEL_SYNC_KEYWORDS.contains(&kind) => return,
                _ => {
                    self.bump();
                }
            }
        }
    }
}
