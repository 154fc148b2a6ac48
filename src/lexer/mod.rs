//! Hand-written lexer for SysML v2 and KerML (spec §4.1).
//!
//! The lexer is a plain character scanner rather than a generated or
//! regex-table-driven tokenizer: the spec-mandated recovery rule for
//! unterminated strings/unrestricted-names/block-comments (anchor a
//! diagnostic at the opening delimiter, then resynchronise at the next
//! whitespace/EOF boundary and keep going) needs lookahead a longest-match
//! regex engine does not expose cleanly, so it is easiest to get exactly
//! right as explicit code — the same reasoning spec §9 gives for hand
//! writing the parser instead of generating it.

mod token_kind;

#[cfg(test)]
mod tests;

pub use token_kind::TokenKind;

use crate::base::{LineIndex, Position, Span, TextRange, TextSize};

/// A single token: its kind and its location. The lexeme itself is not
/// stored — callers hold the source text for the lifetime of a parse and
/// slice `range` out of it on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub range: TextRange,
    pub span: Span,
}

impl Token {
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.range]
    }
}

/// A lexer-level diagnostic (spec §7: "Lexer errors").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    pub message: String,
    pub span: Span,
}

/// Tokenize `source` in one pass, returning the token stream (terminated
/// by a single [`TokenKind::Eof`]) and any lexer diagnostics.
pub fn tokenize(source: &str) -> (Vec<Token>, Vec<LexError>) {
    Scanner::new(source).run()
}

struct Scanner<'a> {
    source: &'a str,
    bytes: &'a [u8],
    pos: usize,
    line_index: LineIndex,
    tokens: Vec<Token>,
    errors: Vec<LexError>,
}

impl<'a> Scanner<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            bytes: source.as_bytes(),
            pos: 0,
            line_index: LineIndex::new(source),
            tokens: Vec::new(),
            errors: Vec::new(),
        }
    }

    fn len(&self) -> usize {
        self.bytes.len()
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    fn pos_of(&self, offset: usize) -> Position {
        self.line_index.position(offset as u32)
    }

    fn span(&self, start: usize, end: usize) -> Span {
        Span::new(self.pos_of(start), self.pos_of(end), start as u32, end as u32)
    }

    fn push(&mut self, kind: TokenKind, start: usize) {
        let end = self.pos;
        self.tokens.push(Token {
            kind,
            range: TextRange::new(TextSize::from(start as u32), TextSize::from(end as u32)),
            span: self.span(start, end),
        });
    }

    fn error(&mut self, message: impl Into<String>, start: usize, end: usize) {
        self.errors.push(LexError {
            message: message.into(),
            span: self.span(start, end),
        });
    }

    fn run(mut self) -> (Vec<Token>, Vec<LexError>) {
        loop {
            self.skip_whitespace();
            let Some(b) = self.peek() else {
                let eof = self.len();
                self.tokens.push(Token {
                    kind: TokenKind::Eof,
                    range: TextRange::empty(TextSize::from(eof as u32)),
                    span: Span::empty(self.pos_of(eof), eof as u32),
                });
                return (self.tokens, self.errors);
            };

            if b == b'/' && self.peek_at(1) == Some(b'/') {
                self.skip_line_comment();
                continue;
            }
            if b == b'/' && self.peek_at(1) == Some(b'*') {
                self.scan_block_comment();
                continue;
            }
            if b == b'"' {
                self.scan_delimited(b'"', TokenKind::Str, "string literal");
                continue;
            }
            if b == b'\'' {
                self.scan_delimited(b'\'', TokenKind::UnrestrictedName, "unrestricted name");
                continue;
            }
            if b.is_ascii_digit() {
                self.scan_number();
                continue;
            }
            if b.is_ascii_alphabetic() || b == b'_' {
                self.scan_ident_or_keyword();
                continue;
            }
            self.scan_punctuation();
        }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t' | b'\r' | b'\n')) {
            self.pos += 1;
        }
    }

    fn skip_line_comment(&mut self) {
        while !matches!(self.peek(), None | Some(b'\n')) {
            self.pos += 1;
        }
    }

    /// Scans `/* ... */`, including the `/**` doc-comment form. Emits a
    /// [`TokenKind::DocComment`] token for `/**`, no token for a plain
    /// block comment, and a single lexer error (anchored at `/*`) when
    /// the closing `*/` is never found — recovery point is EOF, since an
    /// unterminated comment has no earlier natural boundary.
    fn scan_block_comment(&mut self) {
        let start = self.pos;
        let is_doc = self.peek_at(2) == Some(b'*') && self.peek_at(3) != Some(b'/');
        self.pos += 2; // consume `/*`
        loop {
            match self.peek() {
                None => {
                    self.error("unterminated block comment", start, self.pos);
                    if is_doc {
                        self.push(TokenKind::DocComment, start);
                    }
                    return;
                }
                Some(b'*') if self.peek_at(1) == Some(b'/') => {
                    self.pos += 2;
                    if is_doc {
                        self.push(TokenKind::DocComment, start);
                    }
                    return;
                }
                _ => self.pos += 1,
            }
        }
    }

    /// Scans a `"`- or `'`-delimited literal, honoring `\` escapes. If the
    /// line ends or input runs out before the closing delimiter, records a
    /// lexer error anchored at the opening delimiter and resynchronises at
    /// the newline (not consumed) or EOF.
    fn scan_delimited(&mut self, delim: u8, kind: TokenKind, what: &str) {
        let start = self.pos;
        self.pos += 1;
        loop {
            match self.peek() {
                None => {
                    self.error(format!("unterminated {what}"), start, self.pos);
                    return;
                }
                Some(b'\n') => {
                    self.error(format!("unterminated {what}"), start, self.pos);
                    return;
                }
                Some(b'\\') => {
                    self.pos += 1;
                    if self.peek().is_some() {
                        self.pos += 1;
                    }
                }
                Some(b) if b == delim => {
                    self.pos += 1;
                    self.push(kind, start);
                    return;
                }
                _ => self.pos += 1,
            }
        }
    }

    /// Integer (decimal/hex/bin/oct) or real literal (spec §4.1/§6.1).
    fn scan_number(&mut self) {
        let start = self.pos;
        if self.peek() == Some(b'0') && matches!(self.peek_at(1), Some(b'x' | b'X')) {
            self.pos += 2;
            self.consume_digits(|b| b.is_ascii_hexdigit());
            self.push(TokenKind::IntHex, start);
            return;
        }
        if self.peek() == Some(b'0') && matches!(self.peek_at(1), Some(b'b' | b'B')) {
            self.pos += 2;
            self.consume_digits(|b| b == b'0' || b == b'1');
            self.push(TokenKind::IntBin, start);
            return;
        }
        if self.peek() == Some(b'0') && matches!(self.peek_at(1), Some(b'o' | b'O')) {
            self.pos += 2;
            self.consume_digits(|b| (b'0'..=b'7').contains(&b));
            self.push(TokenKind::IntOct, start);
            return;
        }

        self.consume_digits(|b| b.is_ascii_digit());
        let mut is_real = false;

        if self.peek() == Some(b'.') && matches!(self.peek_at(1), Some(b) if b.is_ascii_digit()) {
            is_real = true;
            self.pos += 1;
            self.consume_digits(|b| b.is_ascii_digit());
        }

        if matches!(self.peek(), Some(b'e' | b'E')) {
            let mut lookahead = self.pos + 1;
            if matches!(self.bytes.get(lookahead), Some(b'+' | b'-')) {
                lookahead += 1;
            }
            if matches!(self.bytes.get(lookahead), Some(b) if b.is_ascii_digit()) {
                is_real = true;
                self.pos = lookahead;
                self.consume_digits(|b| b.is_ascii_digit());
            }
        }

        self.push(if is_real { TokenKind::Real } else { TokenKind::IntDec }, start);
    }

    fn consume_digits(&mut self, pred: impl Fn(u8) -> bool) {
        while matches!(self.peek(), Some(b) if pred(b)) {
            self.pos += 1;
        }
    }

    fn scan_ident_or_keyword(&mut self) {
        let start = self.pos;
        while matches!(self.peek(), Some(b) if b.is_ascii_alphanumeric() || b == b'_') {
            self.pos += 1;
        }
        let text = &self.source[start..self.pos];
        let kind = TokenKind::keyword_from_str(text).unwrap_or(TokenKind::Ident);
        self.push(kind, start);
    }

    fn scan_punctuation(&mut self) {
        let start = self.pos;
        macro_rules! lit {
            ($s:expr) => {
                self.bytes[self.pos..].starts_with($s.as_bytes())
            };
        }
        let kind = if lit!("::=") {
            self.pos += 3;
            TokenKind::ColonColonEq
        } else if lit!("===") {
            self.pos += 3;
            TokenKind::EqEqEq
        } else if lit!("!==") {
            self.pos += 3;
            TokenKind::BangEqEq
        } else if lit!(":>>") {
            self.pos += 3;
            TokenKind::ColonGtGt
        } else if lit!("::") {
            self.pos += 2;
            TokenKind::ColonColon
        } else if lit!(":>") {
            self.pos += 2;
            TokenKind::ColonGt
        } else if lit!(":=") {
            self.pos += 2;
            TokenKind::ColonEq
        } else if lit!("..") {
            self.pos += 2;
            TokenKind::DotDot
        } else if lit!("==") {
            self.pos += 2;
            TokenKind::EqEq
        } else if lit!("!=") {
            self.pos += 2;
            TokenKind::BangEq
        } else if lit!("<=") {
            self.pos += 2;
            TokenKind::LtEq
        } else if lit!(">=") {
            self.pos += 2;
            TokenKind::GtEq
        } else if lit!("**") {
            self.pos += 2;
            TokenKind::StarStar
        } else if lit!("??") {
            self.pos += 2;
            TokenKind::QuestionQuestion
        } else {
            let b = self.bytes[self.pos];
            self.pos += 1;
            match b {
                b'{' => TokenKind::LBrace,
                b'}' => TokenKind::RBrace,
                b'[' => TokenKind::LBracket,
                b']' => TokenKind::RBracket,
                b'(' => TokenKind::LParen,
                b')' => TokenKind::RParen,
                b',' => TokenKind::Comma,
                b';' => TokenKind::Semicolon,
                b':' => TokenKind::Colon,
                b'=' => TokenKind::Eq,
                b'#' => TokenKind::Hash,
                b'@' => TokenKind::At,
                b'.' => TokenKind::Dot,
                b'*' => TokenKind::Star,
                b'/' => TokenKind::Slash,
                b'%' => TokenKind::Percent,
                b'+' => TokenKind::Plus,
                b'-' => TokenKind::Minus,
                b'!' => TokenKind::Bang,
                b'~' => TokenKind::Tilde,
                b'<' => TokenKind::Lt,
                b'>' => TokenKind::Gt,
                b'?' => TokenKind::Question,
                _ => {
                    self.error(
                        format!("unexpected character '{}'", b as char),
                        start,
                        self.pos,
                    );
                    TokenKind::Error
                }
            }
        };
        self.push(kind, start);
    }
}
