//! Semantic validation over a linked AST (spec §4.5), grounded on the
//! teacher's `hir::diagnostics::SemanticChecker`/`check_file` shape: one
//! struct collecting diagnostics, a handful of focused `check_*` methods,
//! and a free `validate` function for callers that don't need the struct.

mod multiplicity;

pub use crate::parser::{Diagnostic, ErrorCode, Severity};

use rustc_hash::FxHashMap;

use crate::ast::{Ast, Definition, ElementKind, Membership, NodeId, NodeKind, PackageBody, Usage, ValueKind};
use crate::base::{Span, TextRange, TextSize};

fn range_of(span: Span) -> TextRange {
    TextRange::new(TextSize::from(span.start_offset), TextSize::from(span.end_offset))
}

fn error(message: impl Into<String>, span: Span) -> Diagnostic {
    Diagnostic::new(Severity::Error, message, range_of(span), span)
}

fn hint(message: impl Into<String>, span: Span) -> Diagnostic {
    Diagnostic::new(Severity::Hint, message, range_of(span), span)
}

/// `(name, name_span)` for the three container/leaf kinds that carry a
/// name — `PackageBody`/`Definition`/`Usage` — falling back to the node's
/// own span when no narrower `name_span` was recorded.
fn named(ast: &Ast, id: NodeId) -> Option<(&str, Span)> {
    let fallback = ast.span(id);
    match ast.kind(id) {
        NodeKind::PackageBody(p) => p.name.as_deref().map(|n| (n, p.name_span.unwrap_or(fallback))),
        NodeKind::Definition(d) => d.name.as_deref().map(|n| (n, d.name_span.unwrap_or(fallback))),
        NodeKind::Usage(u) => u.name.as_deref().map(|n| (n, u.name_span.unwrap_or(fallback))),
        _ => None,
    }
}

/// Runs every check in spec §4.5 over a document that has completed the
/// `Linked` stage (scope resolution must have already run — self-
/// specialization and cross-package checks rely on `QualifiedName::target`).
pub fn validate(ast: &Ast) -> Vec<Diagnostic> {
    let mut diags = Vec::new();
    check_duplicate_names_at_root(ast, &mut diags);
    for id in ast.ids() {
        match ast.kind(id) {
            NodeKind::PackageBody(pkg) => check_duplicate_names_in_package(ast, pkg, &mut diags),
            NodeKind::Definition(def) => {
                check_self_specialization(ast, id, &def.specializations, def.name.as_deref(), def.kind, &mut diags);
                check_empty_abstract_part(ast, id, def, &mut diags);
            }
            NodeKind::Usage(usage) => {
                check_self_specialization(
                    ast,
                    id,
                    &usage.specializations,
                    usage.name.as_deref(),
                    usage.kind,
                    &mut diags,
                );
                check_untyped_part_usage(ast, id, usage, &mut diags);
                check_computed_attribute(ast, usage, &mut diags);
            }
            NodeKind::QualifiedName(qn) => {
                if qn.parts.is_empty() {
                    diags.push(
                        error("Qualified name must have at least one part", ast.span(id))
                            .with_code(ErrorCode::EmptyQualifiedName),
                    );
                }
            }
            NodeKind::MultiplicityBounds(mb) => multiplicity::check_bounds(mb, &mut diags),
            _ => {}
        }
    }
    diags
}

fn check_duplicate_names_at_root(ast: &Ast, diags: &mut Vec<Diagnostic>) {
    let mut counts: FxHashMap<&str, usize> = FxHashMap::default();
    for &m in &ast.root_namespace().elements {
        let NodeKind::Membership(Membership::Owning(om)) = ast.kind(m) else {
            continue;
        };
        if let Some((name, _)) = named(ast, om.element) {
            *counts.entry(name).or_insert(0) += 1;
        }
    }

    for &m in &ast.root_namespace().elements {
        let NodeKind::Membership(Membership::Owning(om)) = ast.kind(m) else {
            continue;
        };
        let Some((name, span)) = named(ast, om.element) else {
            continue;
        };
        if counts[name] > 1 {
            diags.push(
                error(format!("Duplicate element name: '{name}'"), span).with_code(ErrorCode::DuplicateNameAtRoot),
            );
        }
    }
}

fn check_duplicate_names_in_package(ast: &Ast, pkg: &PackageBody, diags: &mut Vec<Diagnostic>) {
    let mut first_seen: FxHashMap<&str, (Span, bool)> = FxHashMap::default();
    for &m in &pkg.elements {
        let NodeKind::Membership(Membership::Owning(om)) = ast.kind(m) else {
            continue;
        };
        let Some((name, span)) = named(ast, om.element) else {
            continue;
        };
        match first_seen.get_mut(name) {
            None => {
                first_seen.insert(name, (span, false));
            }
            Some((first_span, reported)) => {
                if !*reported {
                    let pkg_name = pkg.name.as_deref().unwrap_or("<anonymous>");
                    diags.push(
                        error(format!("Duplicate element name '{name}' in package '{pkg_name}'"), *first_span)
                            .with_code(ErrorCode::DuplicateNameInPackage),
                    );
                    *reported = true;
                }
            }
        }
    }
}

fn check_self_specialization(
    ast: &Ast,
    self_id: NodeId,
    specializations: &[NodeId],
    name: Option<&str>,
    kind: ElementKind,
    diags: &mut Vec<Diagnostic>,
) {
    let Some(name) = name else {
        return;
    };
    for &spec_id in specializations {
        let NodeKind::QualifiedName(qn) = ast.kind(spec_id) else {
            continue;
        };
        if qn.target() == Some(self_id) {
            diags.push(
                error(format!("{} '{name}' cannot specialize itself", kind.type_name()), ast.span(spec_id))
                    .with_code(ErrorCode::SelfSpecialization),
            );
        }
    }
}

fn check_empty_abstract_part(ast: &Ast, id: NodeId, def: &Definition, diags: &mut Vec<Diagnostic>) {
    if def.kind != ElementKind::Part || !def.is_abstract {
        return;
    }
    if matches!(&def.body, Some(members) if members.is_empty()) {
        let name = def.name.as_deref().unwrap_or("<anonymous>");
        let span = def.name_span.unwrap_or_else(|| ast.span(id));
        diags.push(
            hint(format!("Abstract part definition '{name}' has no members"), span)
                .with_code(ErrorCode::EmptyAbstractDefinition),
        );
    }
}

fn check_untyped_part_usage(ast: &Ast, id: NodeId, usage: &Usage, diags: &mut Vec<Diagnostic>) {
    if usage.kind != ElementKind::Part {
        return;
    }
    let Some(name) = usage.name.as_deref() else {
        return;
    };
    if usage.feature_types.is_empty() {
        let span = usage.name_span.unwrap_or_else(|| ast.span(id));
        diags.push(hint(format!("Part '{name}' has no explicit type"), span).with_code(ErrorCode::UntypedPartUsage));
    }
}

/// Safety net for spec §4.5 check 8: the grammar only ever pairs
/// `ValueKind::Computed` with an actual expression node, so this never
/// fires in practice, but guards against a future grammar bug silently
/// producing an attribute with no value.
fn check_computed_attribute(ast: &Ast, usage: &Usage, diags: &mut Vec<Diagnostic>) {
    if usage.kind != ElementKind::Attribute {
        return;
    }
    if let Some((ValueKind::Computed, value_id)) = usage.value {
        if !matches!(ast.kind(value_id), NodeKind::Expression(_)) {
            let name = usage.name.as_deref().unwrap_or("<anonymous>");
            diags.push(
                error(format!("Computed attribute '{name}' has no value expression"), ast.span(value_id))
                    .with_code(ErrorCode::ComputedAttributeMissingValue),
            );
        }
    }
}
