use super::*;

fn kinds(source: &str) -> Vec<TokenKind> {
    let (tokens, errors) = tokenize(source);
    assert!(errors.is_empty(), "unexpected lexer errors: {errors:?}");
    tokens.into_iter().map(|t| t.kind).collect()
}

#[test]
fn empty_input_is_just_eof() {
    assert_eq!(kinds(""), vec![TokenKind::Eof]);
}

#[test]
fn skips_whitespace_and_comments() {
    assert_eq!(
        kinds("  // a comment\n\tpart /* block */ def"),
        vec![TokenKind::KwPart, TokenKind::KwDef, TokenKind::Eof]
    );
}

#[test]
fn doc_comment_is_a_token() {
    let (tokens, errors) = tokenize("/** hello */ part");
    assert!(errors.is_empty());
    assert_eq!(
        tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
        vec![TokenKind::DocComment, TokenKind::KwPart, TokenKind::Eof]
    );
}

#[test]
fn keywords_and_identifiers() {
    let source = "package part def foo";
    let (tokens, _) = tokenize(source);
    assert_eq!(
        tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
        vec![
            TokenKind::KwPackage,
            TokenKind::KwPart,
            TokenKind::KwDef,
            TokenKind::Ident,
            TokenKind::Eof,
        ]
    );
    let foo = tokens[3];
    assert_eq!(foo.text(source), "foo");
}

#[test]
fn every_keyword_is_usable_as_identifier() {
    for kind in [TokenKind::KwPart, TokenKind::KwDef, TokenKind::KwIn] {
        assert!(kind.keyword_usable_as_identifier());
    }
    assert!(TokenKind::Ident.keyword_usable_as_identifier());
}

#[test]
fn string_literal() {
    let source = r#""hello \"world\"""#;
    let (tokens, errors) = tokenize(source);
    assert!(errors.is_empty());
    assert_eq!(tokens[0].kind, TokenKind::Str);
    assert_eq!(tokens[0].text(source), source);
}

#[test]
fn unterminated_string_recovers_at_newline() {
    let source = "\"oops\npart";
    let (tokens, errors) = tokenize(source);
    assert_eq!(errors.len(), 1);
    assert_eq!(
        tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
        vec![TokenKind::KwPart, TokenKind::Eof]
    );
}

#[test]
fn unterminated_string_at_eof_emits_single_error() {
    let source = "\"oops";
    let (tokens, errors) = tokenize(source);
    assert_eq!(errors.len(), 1);
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Eof);
}

#[test]
fn unterminated_block_comment_emits_single_error_and_stops() {
    let source = "part /* never closed";
    let (tokens, errors) = tokenize(source);
    assert_eq!(errors.len(), 1);
    assert_eq!(
        tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
        vec![TokenKind::KwPart, TokenKind::Eof]
    );
}

#[test]
fn unrestricted_name() {
    let source = "'a weird name'";
    let (tokens, errors) = tokenize(source);
    assert!(errors.is_empty());
    assert_eq!(tokens[0].kind, TokenKind::UnrestrictedName);
}

#[test]
fn integer_literals() {
    let source = "0 123 0x1F 0b101 0o17";
    let (tokens, errors) = tokenize(source);
    assert!(errors.is_empty());
    assert_eq!(
        tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
        vec![
            TokenKind::IntDec,
            TokenKind::IntDec,
            TokenKind::IntHex,
            TokenKind::IntBin,
            TokenKind::IntOct,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn real_literals_with_and_without_exponent() {
    let source = "1.5 2.0e10 3e-2 4E+3";
    let (tokens, errors) = tokenize(source);
    assert!(errors.is_empty());
    assert_eq!(
        tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
        vec![
            TokenKind::Real,
            TokenKind::Real,
            TokenKind::Real,
            TokenKind::Real,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn range_literal_is_not_mistaken_for_a_real() {
    let source = "[5..10]";
    let (tokens, errors) = tokenize(source);
    assert!(errors.is_empty());
    assert_eq!(
        tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
        vec![
            TokenKind::LBracket,
            TokenKind::IntDec,
            TokenKind::DotDot,
            TokenKind::IntDec,
            TokenKind::RBracket,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn maximal_munch_punctuation() {
    let source = ":: :> :>> := ::= === !== == != <= >= ** ?? ..";
    let (tokens, errors) = tokenize(source);
    assert!(errors.is_empty());
    assert_eq!(
        tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
        vec![
            TokenKind::ColonColon,
            TokenKind::ColonGt,
            TokenKind::ColonGtGt,
            TokenKind::ColonEq,
            TokenKind::ColonColonEq,
            TokenKind::EqEqEq,
            TokenKind::BangEqEq,
            TokenKind::EqEq,
            TokenKind::BangEq,
            TokenKind::LtEq,
            TokenKind::GtEq,
            TokenKind::StarStar,
            TokenKind::QuestionQuestion,
            TokenKind::DotDot,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn unexpected_character_is_reported_and_lexing_continues() {
    let source = "part $ def";
    let (tokens, errors) = tokenize(source);
    assert_eq!(errors.len(), 1);
    assert_eq!(
        tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
        vec![TokenKind::KwPart, TokenKind::Error, TokenKind::KwDef, TokenKind::Eof]
    );
}

#[test]
fn spans_track_line_and_column() {
    let source = "part\n  def";
    let (tokens, _) = tokenize(source);
    let def = tokens.iter().find(|t| t.kind == TokenKind::KwDef).unwrap();
    assert_eq!(def.span.start, Position::new(1, 2));
}
