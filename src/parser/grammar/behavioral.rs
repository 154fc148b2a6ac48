//! `comment`/`doc` annotations and the action-language grammar: transitions,
//! successions, connectors, bindings, flows, and the statement forms that
//! appear inside an action's body (spec §3 "Behavioral" node kinds).

use crate::ast::behavioral::{
    AcceptAction, ActionBlock, AssertAction, AssignAction, Binding, Connector, FlowSpec,
    ForAction, IfAction, PerformAction, SendAction, Succession, Transition, WhileAction,
};
use crate::ast::metadata::{CommentNode, Documentation, InlineMetadata, PrefixMetadata, TextualRepresentation};
use crate::ast::{NodeId, NodeKind, Visibility};
use crate::base::Span;
use crate::lexer::TokenKind;
use crate::parser::cursor::Cursor;

use super::{parse_expression, parse_optional_body, parse_qualified_name, wrap_owning};

/// `comment [name] [about ref(,ref)*] [locale "..."] <doc-comment body>`.
/// The optional identification name has no dedicated field on
/// `CommentNode` (spec lists `about`/`language`/`body` only) — it is
/// consumed for its tokens and otherwise discarded, same as a definition's
/// modifiers that don't map to a tracked flag.
pub(crate) fn parse_comment(c: &mut Cursor, start: Span, visibility: Option<Visibility>) -> NodeId {
    c.expect(TokenKind::KwComment, "'comment'");

    if c.at_identifier_like() && !c.at(TokenKind::KwAbout) && !c.at(TokenKind::KwLocale) {
        c.expect_name();
    }

    let mut about = Vec::new();
    if c.eat(TokenKind::KwAbout).is_some() {
        loop {
            about.push(parse_qualified_name(c));
            if c.eat(TokenKind::Comma).is_none() {
                break;
            }
        }
    }

    let language = if c.eat(TokenKind::KwLocale).is_some() || c.eat(TokenKind::KwLanguage).is_some() {
        c.expect(TokenKind::Str, "a string literal").map(|tok| c.interner.intern(tok.text(c_source(c))))
    } else {
        None
    };

    let body = c
        .take_pending_doc_comment()
        .map(|tok| c.interner.intern(tok.text(c_source(c))))
        .unwrap_or_else(|| c.interner.intern(""));
    c.eat(TokenKind::Semicolon);

    let span = start.to(c.current_span());
    let comment_id = c.builder.alloc(
        NodeKind::Comment(CommentNode { about: about.clone(), language, body }),
        span,
    );
    c.builder.adopt(comment_id, &about);

    wrap_owning(c, visibility, comment_id, span)
}

/// `doc [locale "..."] <doc-comment body>`.
pub(crate) fn parse_doc(c: &mut Cursor, start: Span, visibility: Option<Visibility>) -> NodeId {
    c.expect(TokenKind::KwDoc, "'doc'");

    let locale = if c.eat(TokenKind::KwLocale).is_some() {
        c.expect(TokenKind::Str, "a string literal").map(|tok| c.interner.intern(tok.text(c_source(c))))
    } else {
        None
    };

    let body = c
        .take_pending_doc_comment()
        .map(|tok| c.interner.intern(tok.text(c_source(c))))
        .unwrap_or_else(|| c.interner.intern(""));
    c.eat(TokenKind::Semicolon);

    let span = start.to(c.current_span());
    let doc_id = c.builder.alloc(NodeKind::Documentation(Documentation { locale, body }), span);
    wrap_owning(c, visibility, doc_id, span)
}

/// `rep [name] language "..." <doc-comment body>` — a textual representation.
pub(crate) fn parse_rep(c: &mut Cursor, start: Span, visibility: Option<Visibility>) -> NodeId {
    c.expect(TokenKind::KwRep, "'rep'");
    if c.at_identifier_like() && !c.at(TokenKind::KwLanguage) {
        c.expect_name();
    }
    c.expect(TokenKind::KwLanguage, "'language'");
    let language = c
        .expect(TokenKind::Str, "a string literal")
        .map(|tok| c.interner.intern(tok.text(c_source(c))))
        .unwrap_or_else(|| c.interner.intern(""));
    let body = c
        .take_pending_doc_comment()
        .map(|tok| c.interner.intern(tok.text(c_source(c))))
        .unwrap_or_else(|| c.interner.intern(""));
    c.eat(TokenKind::Semicolon);

    let span = start.to(c.current_span());
    let rep_id = c.builder.alloc(
        NodeKind::TextualRepresentation(TextualRepresentation { language, body }),
        span,
    );
    wrap_owning(c, visibility, rep_id, span)
}

/// `#Metaclass <name>? <body>?;` — prefix metadata annotation.
pub(crate) fn parse_prefix_metadata(c: &mut Cursor, start: Span, visibility: Option<Visibility>) -> NodeId {
    c.expect(TokenKind::Hash, "'#'");
    let target = parse_qualified_name(c);
    c.eat(TokenKind::Semicolon);
    let span = start.to(c.current_span());
    let meta_id = c.builder.alloc(NodeKind::PrefixMetadata(PrefixMetadata { target }), span);
    c.builder.set_parent(target, meta_id);
    wrap_owning(c, visibility, meta_id, span)
}

/// `@Metaclass [name] <body>?;` — inline metadata annotation.
pub(crate) fn parse_inline_metadata(c: &mut Cursor, start: Span, visibility: Option<Visibility>) -> NodeId {
    c.expect(TokenKind::At, "'@'");
    let metaclass = Some(parse_qualified_name(c));
    let (name, _) = if c.at_identifier_like() {
        let (n, s) = c.expect_name().unwrap();
        (Some(n), Some(s))
    } else {
        (None, None)
    };
    let body = parse_optional_body(c);
    let span = start.to(c.current_span());
    let meta_id = c.builder.alloc(
        NodeKind::InlineMetadata(InlineMetadata { name, metaclass, body: body.clone() }),
        span,
    );
    if let Some(mc) = metaclass {
        c.builder.set_parent(mc, meta_id);
    }
    if let Some(elements) = &body {
        c.builder.adopt(meta_id, elements);
    }
    wrap_owning(c, visibility, meta_id, span)
}

/// `transition [name] first <source> [accept <event>] [if <guard>] [do <effect>] then <target>;`
pub(crate) fn parse_transition(c: &mut Cursor, start: Span, visibility: Option<Visibility>) -> NodeId {
    c.expect(TokenKind::KwTransition, "'transition'");
    let (name, name_span) = if c.at_identifier_like() && !c.at(TokenKind::KwFirst) {
        let (n, s) = c.expect_name().unwrap();
        (Some(n), Some(s))
    } else {
        (None, None)
    };
    c.expect(TokenKind::KwFirst, "'first'");
    let source = parse_qualified_name(c);

    let mut accept_event = None;
    let mut guard = None;
    let mut effect = None;
    loop {
        if c.eat(TokenKind::KwAccept).is_some() {
            accept_event = Some(parse_qualified_name(c));
        } else if c.eat(TokenKind::KwIf).is_some() {
            guard = Some(parse_expression(c));
        } else if c.eat(TokenKind::KwDo).is_some() {
            effect = Some(parse_statement(c));
        } else {
            break;
        }
    }

    c.expect(TokenKind::KwThen, "'then'");
    let target = parse_qualified_name(c);
    c.expect(TokenKind::Semicolon, "';'");

    let span = start.to(c.current_span());
    let t_id = c.builder.alloc(
        NodeKind::Transition(Transition { name, name_span, source, accept_event, guard, effect, target }),
        span,
    );
    c.builder.set_parent(source, t_id);
    if let Some(e) = accept_event {
        c.builder.set_parent(e, t_id);
    }
    if let Some(g) = guard {
        c.builder.set_parent(g, t_id);
    }
    if let Some(e) = effect {
        c.builder.set_parent(e, t_id);
    }
    c.builder.set_parent(target, t_id);

    wrap_owning(c, visibility, t_id, span)
}

/// `succession [name] first <a> then <b>;` (and the bare `then a then b` shorthand).
pub(crate) fn parse_succession(c: &mut Cursor, start: Span, visibility: Option<Visibility>) -> NodeId {
    c.expect(TokenKind::KwSuccession, "'succession'");
    let (name, name_span) = if c.at_identifier_like() && !c.at(TokenKind::KwFirst) && !c.at(TokenKind::KwThen) {
        let (n, s) = c.expect_name().unwrap();
        (Some(n), Some(s))
    } else {
        (None, None)
    };
    c.eat(TokenKind::KwFirst);
    let mut steps = vec![parse_qualified_name(c)];
    while c.eat(TokenKind::KwThen).is_some() {
        steps.push(parse_qualified_name(c));
    }
    c.expect(TokenKind::Semicolon, "';'");

    let span = start.to(c.current_span());
    let s_id = c.builder.alloc(NodeKind::Succession(Succession { name, name_span, steps: steps.clone() }), span);
    c.builder.adopt(s_id, &steps);
    wrap_owning(c, visibility, s_id, span)
}

/// `connect [name] <end> to <end> (to <end>)*;` — an anonymous connector
/// usage among parts, as opposed to a `connection def`/`connection` usage.
pub(crate) fn parse_connector(c: &mut Cursor, start: Span, visibility: Option<Visibility>) -> NodeId {
    c.expect(TokenKind::KwConnect, "'connect'");
    let (name, _) = if c.at_identifier_like() {
        let (n, s) = c.expect_name().unwrap();
        (Some(n), Some(s))
    } else {
        (None, None)
    };
    let mut ends = vec![parse_qualified_name(c)];
    while c.eat(TokenKind::KwTo).is_some() {
        ends.push(parse_qualified_name(c));
    }
    c.expect(TokenKind::Semicolon, "';'");

    let span = start.to(c.current_span());
    let conn_id = c.builder.alloc(NodeKind::Connector(Connector { name, ends: ends.clone() }), span);
    c.builder.adopt(conn_id, &ends);
    wrap_owning(c, visibility, conn_id, span)
}

/// `bind [name] of <lhs> = <rhs>;` — `of` disambiguates the optional name
/// from the bound feature, since both are bare qualified names.
pub(crate) fn parse_binding(c: &mut Cursor, start: Span, visibility: Option<Visibility>) -> NodeId {
    c.expect(TokenKind::KwBind, "'bind'");
    let (name, _) = if c.at_identifier_like() && !c.at(TokenKind::KwOf) {
        let (n, s) = c.expect_name().unwrap();
        (Some(n), Some(s))
    } else {
        (None, None)
    };
    c.expect(TokenKind::KwOf, "'of'");
    let lhs = parse_qualified_name(c);
    c.expect(TokenKind::Eq, "'='");
    let rhs = parse_qualified_name(c);
    c.expect(TokenKind::Semicolon, "';'");

    let span = start.to(c.current_span());
    let b_id = c.builder.alloc(NodeKind::Binding(Binding { name, lhs, rhs }), span);
    c.builder.set_parent(lhs, b_id);
    c.builder.set_parent(rhs, b_id);
    wrap_owning(c, visibility, b_id, span)
}

/// `flow [name] from <source> to <target>;` (optionally `flow <payload> from … to …`).
pub(crate) fn parse_flow(c: &mut Cursor, start: Span, visibility: Option<Visibility>) -> NodeId {
    c.expect(TokenKind::KwFlow, "'flow'");
    let (name, payload) = if c.at_identifier_like() && !c.at(TokenKind::KwFrom) {
        let (n, _) = c.expect_name().unwrap();
        (Some(n), None)
    } else {
        (None, None)
    };
    c.expect(TokenKind::KwFrom, "'from'");
    let source = parse_qualified_name(c);
    c.expect(TokenKind::KwTo, "'to'");
    let target = parse_qualified_name(c);
    c.expect(TokenKind::Semicolon, "';'");

    let span = start.to(c.current_span());
    let f_id = c.builder.alloc(NodeKind::Flow(FlowSpec { name, source, target, payload }), span);
    c.builder.set_parent(source, f_id);
    c.builder.set_parent(target, f_id);
    if let Some(p) = payload {
        c.builder.set_parent(p, f_id);
    }
    wrap_owning(c, visibility, f_id, span)
}

/// A single statement inside an action body: `if`/`while`/`for`/`assign`/
/// `send`/`accept`/`perform`/`assert`, or a bare expression statement.
pub(crate) fn parse_statement(c: &mut Cursor) -> NodeId {
    let start = c.current_span();
    match c.current_kind() {
        TokenKind::KwIf => parse_if(c, start),
        TokenKind::KwWhile => parse_while(c, start),
        TokenKind::KwFor => parse_for(c, start),
        TokenKind::KwAssign => parse_assign(c, start),
        TokenKind::KwSend => parse_send(c, start),
        TokenKind::KwAccept => parse_accept(c, start),
        TokenKind::KwPerform => parse_perform(c, start),
        TokenKind::KwAssert => parse_assert(c, start),
        _ => {
            let expr = parse_expression(c);
            c.eat(TokenKind::Semicolon);
            expr
        }
    }
}

fn parse_if(c: &mut Cursor, start: Span) -> NodeId {
    c.expect(TokenKind::KwIf, "'if'");
    let condition = parse_expression(c);
    let then_branch = parse_statement_body(c);
    let else_branch = if c.eat(TokenKind::KwElse).is_some() {
        Some(parse_statement_body(c))
    } else {
        None
    };
    let span = start.to(c.current_span());
    let id = c.builder.alloc(NodeKind::IfAction(IfAction { condition, then_branch, else_branch }), span);
    c.builder.set_parent(condition, id);
    c.builder.set_parent(then_branch, id);
    if let Some(e) = else_branch {
        c.builder.set_parent(e, id);
    }
    id
}

fn parse_while(c: &mut Cursor, start: Span) -> NodeId {
    c.expect(TokenKind::KwWhile, "'while'");
    let condition = if c.at(TokenKind::LBrace) { None } else { Some(parse_expression(c)) };
    let until = if c.eat(TokenKind::KwUntil).is_some() { Some(parse_expression(c)) } else { None };
    let body = parse_statement_body(c);
    let span = start.to(c.current_span());
    let id = c.builder.alloc(NodeKind::WhileAction(WhileAction { condition, until, body }), span);
    if let Some(cond) = condition {
        c.builder.set_parent(cond, id);
    }
    if let Some(u) = until {
        c.builder.set_parent(u, id);
    }
    c.builder.set_parent(body, id);
    id
}

fn parse_for(c: &mut Cursor, start: Span) -> NodeId {
    c.expect(TokenKind::KwFor, "'for'");
    let (loop_var, loop_var_span) = c
        .expect_name()
        .unwrap_or_else(|| (c.interner.intern("<error>"), c.current_span()));
    c.expect(TokenKind::KwIn, "'in'");
    let range = parse_expression(c);
    let body = parse_statement_body(c);
    let span = start.to(c.current_span());
    let id = c.builder.alloc(
        NodeKind::ForAction(ForAction { loop_var, loop_var_span, range, body }),
        span,
    );
    c.builder.set_parent(range, id);
    c.builder.set_parent(body, id);
    id
}

fn parse_assign(c: &mut Cursor, start: Span) -> NodeId {
    c.expect(TokenKind::KwAssign, "'assign'");
    let target = parse_qualified_name(c);
    c.expect(TokenKind::ColonEq, "':='");
    let value = parse_expression(c);
    c.expect(TokenKind::Semicolon, "';'");
    let span = start.to(c.current_span());
    let id = c.builder.alloc(NodeKind::AssignAction(AssignAction { target, value }), span);
    c.builder.set_parent(target, id);
    c.builder.set_parent(value, id);
    id
}

fn parse_send(c: &mut Cursor, start: Span) -> NodeId {
    c.expect(TokenKind::KwSend, "'send'");
    let payload = parse_expression(c);
    let via = if c.eat(TokenKind::KwVia).is_some() { Some(parse_qualified_name(c)) } else { None };
    let to = if c.eat(TokenKind::KwTo).is_some() { Some(parse_qualified_name(c)) } else { None };
    c.expect(TokenKind::Semicolon, "';'");
    let span = start.to(c.current_span());
    let id = c.builder.alloc(NodeKind::SendAction(SendAction { payload, via, to }), span);
    c.builder.set_parent(payload, id);
    if let Some(v) = via {
        c.builder.set_parent(v, id);
    }
    if let Some(t) = to {
        c.builder.set_parent(t, id);
    }
    id
}

fn parse_accept(c: &mut Cursor, start: Span) -> NodeId {
    c.expect(TokenKind::KwAccept, "'accept'");
    let payload = parse_qualified_name(c);
    let via = if c.eat(TokenKind::KwVia).is_some() { Some(parse_qualified_name(c)) } else { None };
    c.expect(TokenKind::Semicolon, "';'");
    let span = start.to(c.current_span());
    let id = c.builder.alloc(NodeKind::AcceptAction(AcceptAction { payload, via }), span);
    c.builder.set_parent(payload, id);
    if let Some(v) = via {
        c.builder.set_parent(v, id);
    }
    id
}

fn parse_perform(c: &mut Cursor, start: Span) -> NodeId {
    c.expect(TokenKind::KwPerform, "'perform'");
    let target = parse_qualified_name(c);
    c.expect(TokenKind::Semicolon, "';'");
    let span = start.to(c.current_span());
    let id = c.builder.alloc(NodeKind::PerformAction(PerformAction { target }), span);
    c.builder.set_parent(target, id);
    id
}

fn parse_assert(c: &mut Cursor, start: Span) -> NodeId {
    c.expect(TokenKind::KwAssert, "'assert'");
    let negated = c.eat(TokenKind::KwNot).is_some();
    let condition = parse_expression(c);
    c.expect(TokenKind::Semicolon, "';'");
    let span = start.to(c.current_span());
    let id = c.builder.alloc(NodeKind::AssertAction(AssertAction { negated, condition }), span);
    c.builder.set_parent(condition, id);
    id
}

/// A brace-delimited statement list, or a single statement with no braces
/// (both `if cond { ... }` and `if cond stmt;` are accepted).
fn parse_statement_body(c: &mut Cursor) -> NodeId {
    let start = c.current_span();
    if c.eat(TokenKind::LBrace).is_none() {
        return parse_statement(c);
    }
    let mut statements = Vec::new();
    loop {
        if c.at(TokenKind::RBrace) || c.at_eof() {
            break;
        }
        let before = c.raw_pos();
        statements.push(parse_statement(c));
        if c.raw_pos() == before {
            c.bump();
        }
    }
    c.expect(TokenKind::RBrace, "'}'");
    let span = start.to(c.current_span());
    let id = c.builder.alloc(
        NodeKind::ActionBlock(ActionBlock { name: None, reference: None, body: Some(statements.clone()) }),
        span,
    );
    c.builder.adopt(id, &statements);
    id
}

/// `entry`/`exit`/`do` bodies inside a state/action definition — each wraps
/// an optional behavior reference or inline statement list.
pub(crate) fn parse_action_block(c: &mut Cursor, start: Span, visibility: Option<Visibility>) -> NodeId {
    c.bump(); // `entry` | `exit` | `do`
    let (name, reference) = if c.eat(TokenKind::Semicolon).is_some() {
        (None, None)
    } else if c.at(TokenKind::LBrace) {
        let block = parse_statement_body(c);
        return wrap_owning(c, visibility, block, start.to(c.current_span()));
    } else {
        let reference = Some(parse_qualified_name(c));
        c.eat(TokenKind::Semicolon);
        (None, reference)
    };
    let span = start.to(c.current_span());
    let id = c.builder.alloc(NodeKind::ActionBlock(ActionBlock { name, reference, body: None }), span);
    if let Some(r) = reference {
        c.builder.set_parent(r, id);
    }
    wrap_owning(c, visibility, id, span)
}

fn c_source<'a>(c: &Cursor<'a>) -> &'a str {
    c.source_text()
}
