//! Expression grammar (spec §4.2 precedence table): 15 levels from the
//! conditional operator down to postfix feature chains and invocations,
//! implemented as one precedence-climbing function per level, each calling
//! the next-tighter level for its operands.

use crate::ast::{BinaryOp, ClassifyOp, Expression, IntBase, NodeId, NodeKind, UnaryOp};
use crate::base::Span;
use crate::lexer::TokenKind;
use crate::parser::cursor::Cursor;
use crate::parser::errors::ErrorCode;

use super::parse_qualified_name;

pub(crate) fn parse_expression(c: &mut Cursor) -> NodeId {
    parse_conditional(c)
}

fn alloc(c: &mut Cursor, expr: Expression, span: Span) -> NodeId {
    c.builder.alloc(NodeKind::Expression(expr), span)
}

/// `cond ? then : else`, right-grouped so `a ? b : c ? d : e` reads as
/// `a ? b : (c ? d : e)`.
fn parse_conditional(c: &mut Cursor) -> NodeId {
    let start = c.current_span();
    let condition = parse_implies(c);
    if c.eat(TokenKind::Question).is_none() {
        return condition;
    }
    let then_branch = parse_expression(c);
    c.expect(TokenKind::Colon, "':'");
    let else_branch = parse_conditional(c);
    let span = start.to(c.current_span());
    let id = alloc(c, Expression::Conditional { condition, then_branch, else_branch }, span);
    c.builder.set_parent(condition, id);
    c.builder.set_parent(then_branch, id);
    c.builder.set_parent(else_branch, id);
    id
}

fn parse_implies(c: &mut Cursor) -> NodeId {
    let start = c.current_span();
    let lhs = parse_or(c);
    if c.eat(TokenKind::KwImplies).is_none() {
        return lhs;
    }
    let rhs = parse_implies(c);
    let span = start.to(c.current_span());
    let id = alloc(c, Expression::Binary { op: BinaryOp::Implies, lhs, rhs }, span);
    c.builder.set_parent(lhs, id);
    c.builder.set_parent(rhs, id);
    id
}

fn parse_or(c: &mut Cursor) -> NodeId {
    let start = c.current_span();
    let mut lhs = parse_and(c);
    loop {
        let op = if c.eat(TokenKind::KwOr).is_some() {
            BinaryOp::Or
        } else if c.eat(TokenKind::KwXor).is_some() {
            BinaryOp::Xor
        } else {
            return lhs;
        };
        let rhs = parse_and(c);
        let span = start.to(c.current_span());
        let id = alloc(c, Expression::Binary { op, lhs, rhs }, span);
        c.builder.set_parent(lhs, id);
        c.builder.set_parent(rhs, id);
        lhs = id;
    }
}

fn parse_and(c: &mut Cursor) -> NodeId {
    let start = c.current_span();
    let mut lhs = parse_null_coalesce(c);
    while c.eat(TokenKind::KwAnd).is_some() {
        let rhs = parse_null_coalesce(c);
        let span = start.to(c.current_span());
        let id = alloc(c, Expression::Binary { op: BinaryOp::And, lhs, rhs }, span);
        c.builder.set_parent(lhs, id);
        c.builder.set_parent(rhs, id);
        lhs = id;
    }
    lhs
}

fn parse_null_coalesce(c: &mut Cursor) -> NodeId {
    let start = c.current_span();
    let mut lhs = parse_classify(c);
    while c.eat(TokenKind::QuestionQuestion).is_some() {
        let rhs = parse_classify(c);
        let span = start.to(c.current_span());
        let id = alloc(c, Expression::Binary { op: BinaryOp::NullCoalesce, lhs, rhs }, span);
        c.builder.set_parent(lhs, id);
        c.builder.set_parent(rhs, id);
        lhs = id;
    }
    lhs
}

/// `operand hastype|istype|as|@|meta target` — the target is always a type
/// reference, never a further expression.
fn parse_classify(c: &mut Cursor) -> NodeId {
    let start = c.current_span();
    let mut operand = parse_equality(c);
    loop {
        let op = if c.eat(TokenKind::KwHastype).is_some() {
            ClassifyOp::HasType
        } else if c.eat(TokenKind::KwIstype).is_some() {
            ClassifyOp::IsType
        } else if c.eat(TokenKind::KwAs).is_some() {
            ClassifyOp::As
        } else if c.eat(TokenKind::At).is_some() {
            ClassifyOp::MetaAt
        } else if c.eat(TokenKind::KwMeta).is_some() {
            ClassifyOp::Meta
        } else {
            return operand;
        };
        let target = parse_qualified_name(c);
        let span = start.to(c.current_span());
        let id = alloc(c, Expression::Classify { op, operand, target }, span);
        c.builder.set_parent(operand, id);
        c.builder.set_parent(target, id);
        operand = id;
    }
}

fn parse_equality(c: &mut Cursor) -> NodeId {
    let start = c.current_span();
    let mut lhs = parse_relational(c);
    loop {
        let op = if c.eat(TokenKind::EqEqEq).is_some() {
            BinaryOp::IdentEq
        } else if c.eat(TokenKind::BangEqEq).is_some() {
            BinaryOp::IdentNotEq
        } else if c.eat(TokenKind::EqEq).is_some() {
            BinaryOp::Eq
        } else if c.eat(TokenKind::BangEq).is_some() {
            BinaryOp::NotEq
        } else {
            return lhs;
        };
        let rhs = parse_relational(c);
        let span = start.to(c.current_span());
        let id = alloc(c, Expression::Binary { op, lhs, rhs }, span);
        c.builder.set_parent(lhs, id);
        c.builder.set_parent(rhs, id);
        lhs = id;
    }
}

fn parse_relational(c: &mut Cursor) -> NodeId {
    let start = c.current_span();
    let mut lhs = parse_range(c);
    loop {
        let op = if c.eat(TokenKind::LtEq).is_some() {
            BinaryOp::LtEq
        } else if c.eat(TokenKind::GtEq).is_some() {
            BinaryOp::GtEq
        } else if c.eat(TokenKind::Lt).is_some() {
            BinaryOp::Lt
        } else if c.eat(TokenKind::Gt).is_some() {
            BinaryOp::Gt
        } else {
            return lhs;
        };
        let rhs = parse_range(c);
        let span = start.to(c.current_span());
        let id = alloc(c, Expression::Binary { op, lhs, rhs }, span);
        c.builder.set_parent(lhs, id);
        c.builder.set_parent(rhs, id);
        lhs = id;
    }
}

/// `a..b` does not chain: `a..b..c` is a parse error one level up, not a
/// range-of-ranges.
fn parse_range(c: &mut Cursor) -> NodeId {
    let start = c.current_span();
    let lhs = parse_additive(c);
    if c.eat(TokenKind::DotDot).is_none() {
        return lhs;
    }
    let rhs = parse_additive(c);
    let span = start.to(c.current_span());
    let id = alloc(c, Expression::Binary { op: BinaryOp::Range, lhs, rhs }, span);
    c.builder.set_parent(lhs, id);
    c.builder.set_parent(rhs, id);
    id
}

fn parse_additive(c: &mut Cursor) -> NodeId {
    let start = c.current_span();
    let mut lhs = parse_multiplicative(c);
    loop {
        let op = if c.eat(TokenKind::Plus).is_some() {
            BinaryOp::Add
        } else if c.eat(TokenKind::Minus).is_some() {
            BinaryOp::Sub
        } else {
            return lhs;
        };
        let rhs = parse_multiplicative(c);
        let span = start.to(c.current_span());
        let id = alloc(c, Expression::Binary { op, lhs, rhs }, span);
        c.builder.set_parent(lhs, id);
        c.builder.set_parent(rhs, id);
        lhs = id;
    }
}

fn parse_multiplicative(c: &mut Cursor) -> NodeId {
    let start = c.current_span();
    let mut lhs = parse_exponent(c);
    loop {
        let op = if c.eat(TokenKind::Star).is_some() {
            BinaryOp::Mul
        } else if c.eat(TokenKind::Slash).is_some() {
            BinaryOp::Div
        } else if c.eat(TokenKind::Percent).is_some() {
            BinaryOp::Mod
        } else {
            return lhs;
        };
        let rhs = parse_exponent(c);
        let span = start.to(c.current_span());
        let id = alloc(c, Expression::Binary { op, lhs, rhs }, span);
        c.builder.set_parent(lhs, id);
        c.builder.set_parent(rhs, id);
        lhs = id;
    }
}

/// `**` is right-associative: `2 ** 3 ** 2` is `2 ** (3 ** 2)`.
fn parse_exponent(c: &mut Cursor) -> NodeId {
    let start = c.current_span();
    let lhs = parse_unary(c);
    if c.eat(TokenKind::StarStar).is_none() {
        return lhs;
    }
    let rhs = parse_exponent(c);
    let span = start.to(c.current_span());
    let id = alloc(c, Expression::Binary { op: BinaryOp::Pow, lhs, rhs }, span);
    c.builder.set_parent(lhs, id);
    c.builder.set_parent(rhs, id);
    id
}

fn parse_unary(c: &mut Cursor) -> NodeId {
    let start = c.current_span();
    let op = if c.eat(TokenKind::Plus).is_some() {
        Some(UnaryOp::Plus)
    } else if c.eat(TokenKind::Minus).is_some() {
        Some(UnaryOp::Minus)
    } else if c.eat(TokenKind::Bang).is_some() || c.eat(TokenKind::KwNot).is_some() {
        Some(UnaryOp::Not)
    } else if c.eat(TokenKind::Tilde).is_some() {
        Some(UnaryOp::BitNot)
    } else {
        None
    };
    let Some(op) = op else {
        return parse_postfix(c);
    };
    let operand = parse_unary(c);
    let span = start.to(c.current_span());
    let id = alloc(c, Expression::Unary { op, operand }, span);
    c.builder.set_parent(operand, id);
    id
}

fn parse_postfix(c: &mut Cursor) -> NodeId {
    let start = c.current_span();
    let mut expr = parse_primary(c);
    loop {
        if c.eat(TokenKind::Dot).is_some() {
            let Some((name, _)) = c.expect_name() else {
                break;
            };
            let span = start.to(c.current_span());
            let id = alloc(c, Expression::FeatureChain { base: expr, name }, span);
            c.builder.set_parent(expr, id);
            expr = id;
        } else if c.at(TokenKind::LParen) {
            let args = parse_arg_list(c);
            let span = start.to(c.current_span());
            let id = alloc(c, Expression::Invocation { callee: expr, args: args.clone() }, span);
            c.builder.set_parent(expr, id);
            c.builder.adopt(id, &args);
            expr = id;
        } else {
            break;
        }
    }
    expr
}

fn parse_arg_list(c: &mut Cursor) -> Vec<NodeId> {
    c.expect(TokenKind::LParen, "'('");
    let mut args = Vec::new();
    if !c.at(TokenKind::RParen) {
        loop {
            args.push(parse_expression(c));
            if c.eat(TokenKind::Comma).is_none() {
                break;
            }
        }
    }
    c.expect(TokenKind::RParen, "')'");
    args
}

fn parse_primary(c: &mut Cursor) -> NodeId {
    let start = c.current_span();
    match c.current_kind() {
        TokenKind::IntDec | TokenKind::IntHex | TokenKind::IntBin | TokenKind::IntOct => {
            let base = match c.current_kind() {
                TokenKind::IntHex => IntBase::Hex,
                TokenKind::IntBin => IntBase::Bin,
                TokenKind::IntOct => IntBase::Oct,
                _ => IntBase::Dec,
            };
            let text = c.interner.intern(c.current_text());
            c.bump();
            alloc(c, Expression::LiteralInt { text, base }, start.to(c.current_span()))
        }
        TokenKind::Real => {
            let text = c.interner.intern(c.current_text());
            c.bump();
            alloc(c, Expression::LiteralReal { text }, start.to(c.current_span()))
        }
        TokenKind::Str => {
            let text = c.interner.intern(c.current_text());
            c.bump();
            alloc(c, Expression::LiteralString { text }, start.to(c.current_span()))
        }
        TokenKind::KwTrue => {
            c.bump();
            alloc(c, Expression::LiteralBool(true), start.to(c.current_span()))
        }
        TokenKind::KwFalse => {
            c.bump();
            alloc(c, Expression::LiteralBool(false), start.to(c.current_span()))
        }
        TokenKind::KwNull => {
            c.bump();
            alloc(c, Expression::LiteralNull, start.to(c.current_span()))
        }
        TokenKind::LParen => {
            c.bump();
            let inner = parse_expression(c);
            c.expect(TokenKind::RParen, "')'");
            let id = alloc(c, Expression::Paren(inner), start.to(c.current_span()));
            c.builder.set_parent(inner, id);
            id
        }
        TokenKind::KwAll => {
            c.bump();
            let target = parse_qualified_name(c);
            let id = alloc(c, Expression::Extent(target), start.to(c.current_span()));
            c.builder.set_parent(target, id);
            id
        }
        _ if c.at_identifier_like() => {
            let qn = parse_qualified_name(c);
            let id = alloc(c, Expression::NameRef(qn), start.to(c.current_span()));
            c.builder.set_parent(qn, id);
            id
        }
        _ => {
            c.error_expected("an expression", ErrorCode::InvalidExpression);
            alloc(c, Expression::LiteralNull, start)
        }
    }
}
