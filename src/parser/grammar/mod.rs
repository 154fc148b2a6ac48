//! Namespace-level grammar: root namespace, package bodies, imports,
//! aliases, comments, and the definition/usage dispatch (spec §4.2, §6.2).

mod behavioral;
mod declaration;
mod expr;

use crate::ast::{
    AliasMember, ImportMembership, ImportRef, Membership, NodeId, NodeKind, OwningMembership,
    PackageBody, QualifiedName, RootNamespace, Visibility,
};
use crate::lexer::TokenKind;

use super::cursor::Cursor;
use super::errors::ErrorCode;

pub(crate) use declaration::parse_definition_or_usage;
pub(crate) use expr::parse_expression;

pub fn parse_root(c: &mut Cursor) -> NodeId {
    let start = c.current_span();
    let mut elements = Vec::new();
    loop {
        if c.at_eof() {
            break;
        }
        let before = c.raw_pos();
        if let Some(member) = parse_membership(c) {
            elements.push(member);
        }
        if c.raw_pos() == before && !c.at_eof() {
            // Defensive: parse_membership must always make progress or
            // return None after already synchronizing; this guards
            // against a future grammar bug turning into an infinite loop.
            c.bump();
        }
    }
    let span = start.to(c.current_span());
    let root = c.builder.alloc(NodeKind::RootNamespace(RootNamespace { elements: elements.clone() }), span);
    c.builder.adopt(root, &elements);
    root
}

/// Parses the brace-delimited body shared by packages, definitions, and
/// usages (`TypeBody`/`FeatureBody` in spec §4.2 — syntactically identical,
/// distinguished only by the caller's validation dispatch). Returns `None`
/// when no body was present but a `;` was consumed instead.
pub(crate) fn parse_optional_body(c: &mut Cursor) -> Option<Vec<NodeId>> {
    if c.eat(TokenKind::Semicolon).is_some() {
        return None;
    }
    if c.expect(TokenKind::LBrace, "';' or '{'").is_none() {
        // Recovery: pretend there was no body so the caller can still
        // build a node and the outer loop can resynchronize.
        return Some(Vec::new());
    }
    let mut elements = Vec::new();
    loop {
        if c.at(TokenKind::RBrace) || c.at_eof() {
            break;
        }
        let before = c.raw_pos();
        if let Some(member) = parse_membership(c) {
            elements.push(member);
        }
        if c.raw_pos() == before && !c.at(TokenKind::RBrace) && !c.at_eof() {
            c.bump();
        }
    }
    if c.expect(TokenKind::RBrace, "'}'").is_none() {
        // Unterminated body: nothing further to consume, caller continues.
    }
    Some(elements)
}

fn parse_membership(c: &mut Cursor) -> Option<NodeId> {
    c.take_pending_doc_comment();
    let start = c.current_span();
    let visibility = parse_visibility(c);

    match c.current_kind() {
        TokenKind::KwImport => Some(parse_import(c, start, visibility)),
        TokenKind::KwAlias => Some(parse_alias(c, start, visibility)),
        TokenKind::KwPackage | TokenKind::KwLibrary | TokenKind::KwStandard => {
            Some(parse_package(c, start, visibility))
        }
        TokenKind::KwComment => Some(behavioral::parse_comment(c, start, visibility)),
        TokenKind::KwDoc => Some(behavioral::parse_doc(c, start, visibility)),
        TokenKind::KwRep => Some(behavioral::parse_rep(c, start, visibility)),
        TokenKind::Hash => Some(behavioral::parse_prefix_metadata(c, start, visibility)),
        // `@Meta { ... }` inline annotation. `metadata def`/`metadata` usages
        // of the `Metadata` element kind go through the ordinary
        // definition/usage grammar instead (ElementKind already unifies
        // them), so this is the `@`-prefixed short form only.
        TokenKind::At => Some(behavioral::parse_inline_metadata(c, start, visibility)),
        TokenKind::KwTransition => Some(behavioral::parse_transition(c, start, visibility)),
        TokenKind::KwSuccession => Some(behavioral::parse_succession(c, start, visibility)),
        TokenKind::KwConnect => Some(behavioral::parse_connector(c, start, visibility)),
        TokenKind::KwBind => Some(behavioral::parse_binding(c, start, visibility)),
        // `flow` is shared between the anonymous `flow from a to b;` usage
        // and an ordinary `flow def`/`flow` declaration (ElementKind::Flow);
        // only the former is handled here, distinguished by whether a `from`
        // appears before the next statement boundary.
        TokenKind::KwFlow if c.looks_like_anonymous_flow() => {
            Some(behavioral::parse_flow(c, start, visibility))
        }
        TokenKind::KwEntry | TokenKind::KwExit | TokenKind::KwDo => {
            Some(behavioral::parse_action_block(c, start, visibility))
        }
        TokenKind::Eof | TokenKind::RBrace => None,
        kind if declaration::starts_declaration(kind) => {
            Some(parse_definition_or_usage(c, start, visibility))
        }
        _ => {
            c.error_expected("a namespace element", ErrorCode::UnexpectedTokenInDeclaration);
            c.synchronize();
            None
        }
    }
}

fn parse_visibility(c: &mut Cursor) -> Option<Visibility> {
    match c.current_kind() {
        TokenKind::KwPublic => {
            c.bump();
            Some(Visibility::Public)
        }
        TokenKind::KwPrivate => {
            c.bump();
            Some(Visibility::Private)
        }
        TokenKind::KwProtected => {
            c.bump();
            Some(Visibility::Protected)
        }
        _ => None,
    }
}

fn parse_package(c: &mut Cursor, start: crate::base::Span, visibility: Option<Visibility>) -> NodeId {
    let is_standard = c.eat(TokenKind::KwStandard).is_some();
    let is_library = c.eat(TokenKind::KwLibrary).is_some();
    c.expect(TokenKind::KwPackage, "'package'");

    let (name, name_span) = if c.at_identifier_like() {
        let (n, s) = c.expect_name().unwrap();
        (Some(n), Some(s))
    } else {
        (None, None)
    };

    let elements = parse_optional_body(c).unwrap_or_default();
    let span = start.to(c.current_span());
    let pkg = c.builder.alloc(
        NodeKind::PackageBody(PackageBody {
            name,
            name_span,
            is_library,
            is_standard,
            elements: elements.clone(),
        }),
        span,
    );
    c.builder.adopt(pkg, &elements);

    wrap_owning(c, visibility, pkg, span)
}

fn parse_import(c: &mut Cursor, start: crate::base::Span, visibility: Option<Visibility>) -> NodeId {
    c.expect(TokenKind::KwImport, "'import'");
    let is_all = c.eat(TokenKind::KwAll).is_some();

    let (path, is_wildcard, is_recursive) = parse_import_path(c);
    c.expect(TokenKind::Semicolon, "';'");

    let span = start.to(c.current_span());
    let import_ref = c.builder.alloc(
        NodeKind::ImportRef(ImportRef {
            path,
            is_wildcard,
            is_recursive,
        }),
        span,
    );
    c.builder.set_parent(path, import_ref);

    let membership = c.builder.alloc(
        NodeKind::Membership(Membership::Import(ImportMembership {
            visibility,
            is_all,
            import_ref,
        })),
        span,
    );
    c.builder.set_parent(import_ref, membership);
    membership
}

/// Parses the path of an import: `A::B`, `A::B::*`, or `A::B::**`. The
/// trailing `::*`/`::**` is not itself part of the `QualifiedName` — only
/// the name parts before it are.
fn parse_import_path(c: &mut Cursor) -> (NodeId, bool, bool) {
    let mut parts = Vec::new();
    let mut spans = Vec::new();
    let mut is_wildcard = false;
    let mut is_recursive = false;

    loop {
        if c.eat(TokenKind::StarStar).is_some() {
            is_wildcard = true;
            is_recursive = true;
            break;
        }
        if c.eat(TokenKind::Star).is_some() {
            is_wildcard = true;
            break;
        }
        match c.expect_name() {
            Some((name, span)) => {
                parts.push(name);
                spans.push(span);
            }
            None => break,
        }
        if c.eat(TokenKind::ColonColon).is_none() {
            break;
        }
    }

    let span = spans
        .first()
        .copied()
        .unwrap_or_else(|| c.current_span())
        .to(spans.last().copied().unwrap_or_else(|| c.current_span()));
    let qn = c
        .builder
        .alloc(NodeKind::QualifiedName(QualifiedName::new(parts, spans)), span);
    (qn, is_wildcard, is_recursive)
}

fn parse_alias(c: &mut Cursor, start: crate::base::Span, visibility: Option<Visibility>) -> NodeId {
    c.expect(TokenKind::KwAlias, "'alias'");
    let (alias_name, alias_name_span) = c
        .expect_name()
        .unwrap_or_else(|| (c.interner.intern("<error>"), c.current_span()));
    c.expect(TokenKind::KwFor, "'for'");
    let target = parse_qualified_name(c);
    c.expect(TokenKind::Semicolon, "';'");

    let span = start.to(c.current_span());
    let membership = c.builder.alloc(
        NodeKind::Membership(Membership::Alias(AliasMember {
            visibility,
            alias_name,
            alias_name_span,
            target,
        })),
        span,
    );
    c.builder.set_parent(target, membership);
    membership
}

/// `A::B::C` — no wildcard suffix allowed (used everywhere except import
/// paths: specializations, feature types, alias targets, `as`/`meta`
/// classification targets).
pub(crate) fn parse_qualified_name(c: &mut Cursor) -> NodeId {
    let mut parts = Vec::new();
    let mut spans = Vec::new();
    loop {
        match c.expect_name() {
            Some((name, span)) => {
                parts.push(name);
                spans.push(span);
            }
            None => break,
        }
        if c.eat(TokenKind::ColonColon).is_none() {
            break;
        }
    }
    let span = spans
        .first()
        .copied()
        .unwrap_or_else(|| c.current_span())
        .to(spans.last().copied().unwrap_or_else(|| c.current_span()));
    c.builder
        .alloc(NodeKind::QualifiedName(QualifiedName::new(parts, spans)), span)
}

pub(crate) fn wrap_owning(
    c: &mut Cursor,
    visibility: Option<Visibility>,
    element: NodeId,
    span: crate::base::Span,
) -> NodeId {
    let membership = c.builder.alloc(
        NodeKind::Membership(Membership::Owning(OwningMembership { visibility, element })),
        span,
    );
    c.builder.set_parent(element, membership);
    membership
}
