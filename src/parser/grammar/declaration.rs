//! Definition/usage grammar (spec §4.2, §6.2): modifiers, the kind keyword,
//! `def` disambiguation, feature types, multiplicity, relationships, value
//! binding, and the shared body.

use crate::ast::{
    Definition, Direction, ElementKind, MultiplicityBounds, NodeId, NodeKind, Usage, ValueKind,
    Visibility,
};
use crate::base::Span;
use crate::lexer::TokenKind;

use crate::parser::cursor::Cursor;
use crate::parser::errors::ErrorCode;
use super::{parse_expression, parse_optional_body, parse_qualified_name, wrap_owning};

pub(crate) fn starts_declaration(kind: TokenKind) -> bool {
    is_modifier_start(kind) || element_kind_start(kind)
}

fn is_modifier_start(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::KwAbstract
            | TokenKind::KwReadonly
            | TokenKind::KwDerived
            | TokenKind::KwRef
            | TokenKind::KwEnd
            | TokenKind::KwComposite
            | TokenKind::KwPortion
            | TokenKind::KwVariant
            | TokenKind::KwParallel
            | TokenKind::KwIn
            | TokenKind::KwOut
            | TokenKind::KwInout
    )
}

fn element_kind_start(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::KwPart
            | TokenKind::KwItem
            | TokenKind::KwAttribute
            | TokenKind::KwEnum
            | TokenKind::KwAction
            | TokenKind::KwState
            | TokenKind::KwConstraint
            | TokenKind::KwRequirement
            | TokenKind::KwPort
            | TokenKind::KwConnection
            | TokenKind::KwInterface
            | TokenKind::KwFlow
            | TokenKind::KwAllocation
            | TokenKind::KwCalc
            | TokenKind::KwCase
            | TokenKind::KwAnalysis
            | TokenKind::KwVerification
            | TokenKind::KwUse
            | TokenKind::KwView
            | TokenKind::KwViewpoint
            | TokenKind::KwRendering
            | TokenKind::KwMetadata
            | TokenKind::KwOccurrence
            | TokenKind::KwConcern
    )
}

/// Keywords that, immediately after the kind keyword (or `def`), are almost
/// certainly an anonymous declaration's relationship keyword rather than its
/// own name. None of these appear in the spec's keyword-as-identifier
/// regression list, unlike `from`/`to`/`by`/`as`/`of`/`for`/`via`/`until`,
/// which this check deliberately leaves alone.
fn looks_like_relationship_keyword(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::KwSpecializes
            | TokenKind::KwSubsets
            | TokenKind::KwRedefines
            | TokenKind::KwReferences
            | TokenKind::KwSubclassification
            | TokenKind::KwDisjoint
            | TokenKind::KwTyped
    )
}

pub(crate) fn parse_definition_or_usage(
    c: &mut Cursor,
    start: Span,
    visibility: Option<Visibility>,
) -> NodeId {
    let direction = parse_direction(c);

    let mut is_abstract = false;
    let mut is_readonly = false;
    let mut is_derived = false;
    let mut is_ref = false;
    let mut is_end = false;
    let mut is_variant = false;
    loop {
        match c.current_kind() {
            TokenKind::KwAbstract => {
                is_abstract = true;
                c.bump();
            }
            TokenKind::KwReadonly => {
                is_readonly = true;
                c.bump();
            }
            TokenKind::KwDerived => {
                is_derived = true;
                c.bump();
            }
            TokenKind::KwRef => {
                is_ref = true;
                c.bump();
            }
            TokenKind::KwEnd => {
                is_end = true;
                c.bump();
            }
            // Accepted but not separately tracked: they refine how a usage
            // participates in its owning feature rather than adding a flag
            // the validator needs to see.
            TokenKind::KwComposite | TokenKind::KwPortion => {
                c.bump();
            }
            TokenKind::KwVariant => {
                is_variant = true;
                c.bump();
            }
            _ => break,
        }
    }

    let is_parallel = c.eat(TokenKind::KwParallel).is_some();

    let kind = match parse_element_kind(c) {
        Some(k) => k,
        None => {
            c.error_expected("a definition or usage kind keyword", ErrorCode::UnexpectedTokenInDeclaration);
            ElementKind::Part
        }
    };
    let kind = match kind {
        ElementKind::State { .. } => ElementKind::State { is_parallel },
        other => other,
    };

    let is_definition = c.eat(TokenKind::KwDef).is_some();

    let (name, name_span) = if c.at_identifier_like() && !looks_like_relationship_keyword(c.current_kind()) {
        let (n, s) = c.expect_name().unwrap();
        (Some(n), Some(s))
    } else {
        (None, None)
    };

    if is_definition {
        parse_definition_tail(c, start, visibility, kind, name, name_span, is_abstract, is_variant)
    } else {
        parse_usage_tail(
            c, start, visibility, kind, name, name_span, direction, is_abstract, is_readonly,
            is_derived, is_end, is_ref,
        )
    }
}

fn parse_direction(c: &mut Cursor) -> Option<Direction> {
    match c.current_kind() {
        TokenKind::KwIn => {
            c.bump();
            Some(Direction::In)
        }
        TokenKind::KwOut => {
            c.bump();
            Some(Direction::Out)
        }
        TokenKind::KwInout => {
            c.bump();
            Some(Direction::InOut)
        }
        _ => None,
    }
}

fn parse_element_kind(c: &mut Cursor) -> Option<ElementKind> {
    let kind = match c.current_kind() {
        TokenKind::KwPart => ElementKind::Part,
        TokenKind::KwItem => ElementKind::Item,
        TokenKind::KwAttribute => ElementKind::Attribute,
        TokenKind::KwEnum => ElementKind::Enumeration,
        TokenKind::KwAction => ElementKind::Action,
        TokenKind::KwState => ElementKind::State { is_parallel: false },
        TokenKind::KwConstraint => ElementKind::Constraint,
        TokenKind::KwRequirement => ElementKind::Requirement,
        TokenKind::KwPort => ElementKind::Port,
        TokenKind::KwConnection => ElementKind::Connection,
        TokenKind::KwInterface => ElementKind::Interface,
        TokenKind::KwFlow => ElementKind::Flow,
        TokenKind::KwAllocation => ElementKind::Allocation,
        TokenKind::KwCalc => ElementKind::Calculation,
        TokenKind::KwView => ElementKind::View,
        TokenKind::KwViewpoint => ElementKind::Viewpoint,
        TokenKind::KwRendering => ElementKind::Rendering,
        TokenKind::KwMetadata => ElementKind::Metadata,
        TokenKind::KwOccurrence => ElementKind::Occurrence,
        TokenKind::KwConcern => ElementKind::Concern,
        TokenKind::KwCase => {
            c.bump();
            return Some(ElementKind::Case);
        }
        TokenKind::KwAnalysis => {
            c.bump();
            c.expect(TokenKind::KwCase, "'case'");
            return Some(ElementKind::AnalysisCase);
        }
        TokenKind::KwVerification => {
            c.bump();
            c.expect(TokenKind::KwCase, "'case'");
            return Some(ElementKind::VerificationCase);
        }
        TokenKind::KwUse => {
            c.bump();
            c.expect(TokenKind::KwCase, "'case'");
            return Some(ElementKind::UseCase);
        }
        _ => return None,
    };
    c.bump();
    Some(kind)
}

fn parse_qn_comma_list(c: &mut Cursor) -> Vec<NodeId> {
    let mut list = Vec::new();
    loop {
        list.push(parse_qualified_name(c));
        if c.eat(TokenKind::Comma).is_none() {
            break;
        }
    }
    list
}

fn parse_definition_tail(
    c: &mut Cursor,
    start: Span,
    visibility: Option<Visibility>,
    kind: ElementKind,
    name: Option<crate::base::Name>,
    name_span: Option<Span>,
    is_abstract: bool,
    is_variant: bool,
) -> NodeId {
    let mut specializations = Vec::new();
    if c.at(TokenKind::ColonGt) || c.at(TokenKind::KwSpecializes) {
        c.bump();
        specializations = parse_qn_comma_list(c);
    }

    let mut disjoint_types = Vec::new();
    if c.eat(TokenKind::KwDisjoint).is_some() {
        c.eat(TokenKind::KwFrom);
        disjoint_types = parse_qn_comma_list(c);
    }

    let body = parse_optional_body(c);
    let span = start.to(c.current_span());

    let def_id = c.builder.alloc(
        NodeKind::Definition(Definition {
            kind,
            name,
            name_span,
            is_abstract,
            is_variation: is_variant,
            specializations: specializations.clone(),
            disjoint_types: disjoint_types.clone(),
            body: body.clone(),
        }),
        span,
    );
    c.builder.adopt(def_id, &specializations);
    c.builder.adopt(def_id, &disjoint_types);
    if let Some(elements) = &body {
        c.builder.adopt(def_id, elements);
    }

    wrap_owning(c, visibility, def_id, span)
}

#[allow(clippy::too_many_arguments)]
fn parse_usage_tail(
    c: &mut Cursor,
    start: Span,
    visibility: Option<Visibility>,
    kind: ElementKind,
    name: Option<crate::base::Name>,
    name_span: Option<Span>,
    direction: Option<Direction>,
    is_abstract: bool,
    is_readonly: bool,
    is_derived: bool,
    is_end: bool,
    is_ref: bool,
) -> NodeId {
    let mut feature_types = Vec::new();
    if c.eat(TokenKind::Colon).is_some() {
        feature_types = parse_qn_comma_list(c);
    } else if c.eat(TokenKind::KwTyped).is_some() {
        c.eat(TokenKind::KwBy);
        feature_types = parse_qn_comma_list(c);
    }

    let multiplicity = if c.at(TokenKind::LBracket) {
        Some(parse_multiplicity(c))
    } else {
        None
    };

    let mut specializations = Vec::new();
    let mut redefinitions = Vec::new();
    let mut references = Vec::new();
    loop {
        if c.at(TokenKind::ColonGt) || c.at(TokenKind::KwSubsets) || c.at(TokenKind::KwSpecializes) {
            c.bump();
            specializations.extend(parse_qn_comma_list(c));
        } else if c.at(TokenKind::ColonGtGt) || c.at(TokenKind::KwRedefines) {
            c.bump();
            redefinitions.extend(parse_qn_comma_list(c));
        } else if c.at(TokenKind::KwReferences) {
            c.bump();
            references.extend(parse_qn_comma_list(c));
        } else {
            break;
        }
    }

    let value = parse_value_binding(c);
    let body = parse_optional_body(c);
    let span = start.to(c.current_span());

    let usage_id = c.builder.alloc(
        NodeKind::Usage(Usage {
            kind,
            name,
            name_span,
            direction,
            is_abstract,
            is_readonly,
            is_derived,
            is_end,
            is_ref,
            feature_types: feature_types.clone(),
            multiplicity,
            specializations: specializations.clone(),
            redefinitions: redefinitions.clone(),
            references: references.clone(),
            value: value.clone(),
            body: body.clone(),
        }),
        span,
    );
    c.builder.adopt(usage_id, &feature_types);
    if let Some(m) = multiplicity {
        c.builder.set_parent(m, usage_id);
    }
    c.builder.adopt(usage_id, &specializations);
    c.builder.adopt(usage_id, &redefinitions);
    c.builder.adopt(usage_id, &references);
    if let Some((_, expr)) = value {
        c.builder.set_parent(expr, usage_id);
    }
    if let Some(elements) = &body {
        c.builder.adopt(usage_id, elements);
    }

    wrap_owning(c, visibility, usage_id, span)
}

fn parse_value_binding(c: &mut Cursor) -> Option<(ValueKind, NodeId)> {
    let kind = if c.eat(TokenKind::ColonColonEq).is_some() {
        ValueKind::Computed
    } else if c.eat(TokenKind::ColonEq).is_some() {
        ValueKind::Initial
    } else if c.eat(TokenKind::Eq).is_some() {
        ValueKind::Assign
    } else {
        return None;
    };
    Some((kind, parse_expression(c)))
}

fn parse_multiplicity(c: &mut Cursor) -> NodeId {
    let start = c.current_span();
    c.expect(TokenKind::LBracket, "'['");
    let (first_text, first_span) = parse_bound(c);

    let (lower, lower_span, upper, upper_span) = if c.eat(TokenKind::DotDot).is_some() {
        let (upper_text, upper_span) = parse_bound(c);
        (Some(first_text), Some(first_span), upper_text, upper_span)
    } else {
        (None, None, first_text, first_span)
    };

    c.expect(TokenKind::RBracket, "']'");
    let span = start.to(c.current_span());
    c.builder.alloc(
        NodeKind::MultiplicityBounds(MultiplicityBounds {
            lower,
            lower_span,
            upper,
            upper_span,
        }),
        span,
    )
}

fn parse_bound(c: &mut Cursor) -> (String, Span) {
    if c.at(TokenKind::Star) {
        let span = c.current_span();
        c.bump();
        ("*".to_string(), span)
    } else if matches!(
        c.current_kind(),
        TokenKind::IntDec | TokenKind::IntHex | TokenKind::IntBin | TokenKind::IntOct
    ) {
        let span = c.current_span();
        let text = c.current_text().to_string();
        c.bump();
        (text, span)
    } else {
        c.error_expected("a multiplicity bound", ErrorCode::InvalidNumericLiteral);
        (String::new(), c.current_span())
    }
}
