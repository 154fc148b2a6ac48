//! End-to-end scenarios and quantified invariants exercised against the
//! public API only: parse, compute scopes, link, then validate — the
//! same sequence a driver `Document` runs internally.

use rstest::rstest;
use syster::ast::NodeKind;
use syster::driver::{Stage, Workspace};
use syster::scope::{compute_scopes, link};
use syster::validator::validate;
use syster::{parser, Severity};

struct Built {
    ast: syster::ast::Ast,
    diagnostics: Vec<syster::Diagnostic>,
}

fn build(source: &str) -> Built {
    let result = parser::parse(source);
    let mut ast = result.ast;
    let (exports, locals) = compute_scopes(&ast);
    link(&mut ast, &exports, &locals);
    let mut diagnostics = result.diagnostics;
    diagnostics.extend(validate(&ast));
    Built { ast, diagnostics }
}

fn messages(built: &Built) -> Vec<&str> {
    built.diagnostics.iter().map(|d| d.message.as_str()).collect()
}

fn errors(built: &Built) -> impl Iterator<Item = &syster::Diagnostic> {
    built.diagnostics.iter().filter(|d| d.severity == Severity::Error)
}

#[test]
fn seed_1_self_specialization() {
    let built = build("part def A :> A;");
    let matches: Vec<_> = errors(&built).filter(|d| d.message.contains("cannot specialize itself")).collect();
    assert_eq!(matches.len(), 1, "diagnostics: {:?}", messages(&built));
}

#[test]
fn seed_2_duplicate_package_names_at_root() {
    let built = build("package P; package P;");
    let matches: Vec<_> =
        errors(&built).filter(|d| d.message == "Duplicate element name: 'P'").collect();
    assert_eq!(matches.len(), 2, "diagnostics: {:?}", messages(&built));
}

#[test]
fn seed_3_duplicate_within_a_package() {
    let built = build("package P { part def A; part def A; }");
    let matches: Vec<_> =
        errors(&built).filter(|d| d.message == "Duplicate element name 'A' in package 'P'").collect();
    assert_eq!(matches.len(), 1, "diagnostics: {:?}", messages(&built));
}

#[test]
fn seed_4_multiplicity_bounds() {
    let built = build("part def P { part x [10..5]; }");
    let matches: Vec<_> =
        errors(&built).filter(|d| d.message == "Lower bound (10) cannot be greater than upper bound (5)").collect();
    assert_eq!(matches.len(), 1, "diagnostics: {:?}", messages(&built));
}

#[test]
fn seed_5_qualified_resolution_across_packages() {
    let built = build(
        "package A { package B { part def X; } } package C { part def Y :> A::B::X; }",
    );
    assert_eq!(errors(&built).count(), 0, "diagnostics: {:?}", messages(&built));

    let x = built
        .ast
        .ids()
        .find(|&id| matches!(built.ast.kind(id), NodeKind::Definition(d) if d.name.as_deref() == Some("X")))
        .expect("X definition");
    let target = built
        .ast
        .ids()
        .find_map(|id| match built.ast.kind(id) {
            NodeKind::QualifiedName(qn) if qn.parts.last().map(|p| p.as_ref()) == Some("X") => qn.target(),
            _ => None,
        })
        .expect("a qualified name ending in X");
    assert_eq!(target, Some(x));
}

#[test]
fn seed_6_keyword_as_identifier_regression() {
    let source = r#"
        package DomainEntities {
            item def SharedTypeRegistry {
                attribute package : String = "@car-dealership/shared-types";
            }
        }
    "#;
    let built = build(source);
    assert_eq!(errors(&built).count(), 0, "diagnostics: {:?}", messages(&built));
}

#[test]
fn seed_7_wildcard_import() {
    let built = build(
        r#"
        package Lib { part def A; part def B; }
        package App {
            import Lib::*;
            part def UseA :> A;
            part def UseB :> B;
        }
        "#,
    );
    assert_eq!(errors(&built).count(), 0, "diagnostics: {:?}", messages(&built));

    let unresolved: Vec<_> = built
        .ast
        .ids()
        .filter_map(|id| match built.ast.kind(id) {
            NodeKind::QualifiedName(qn) if qn.parts.len() == 1 => Some(qn),
            _ => None,
        })
        .filter(|qn| qn.target().is_none())
        .collect();
    assert!(unresolved.is_empty(), "some single-segment references failed to resolve");
}

#[rstest]
fn every_reserved_keyword_is_accepted_as_an_element_name(
    #[values(
        "public", "private", "protected", "package", "library", "standard", "import", "alias",
        "for", "namespace", "part", "item", "attribute", "action", "state", "constraint",
        "requirement", "port", "connection", "interface", "flow", "allocation", "calc", "case",
        "analysis", "verification", "use", "view", "viewpoint", "rendering", "metadata",
        "occurrence", "concern", "enum", "def", "abstract", "readonly", "derived", "ref", "end",
        "composite", "portion", "parallel", "variant", "in", "out", "inout", "subtype",
        "subclassifier", "specialization", "specializes", "subclassification", "subset",
        "subsets", "redefinition", "redefines", "references", "dependency", "conjugate",
        "disjoint", "from", "to", "typed", "by", "feature", "entry", "exit", "do", "transition",
        "succession", "first", "then", "accept", "send", "via", "perform", "assert", "if",
        "else", "while", "until", "of", "assign", "and", "or", "xor", "not", "implies",
        "hastype", "istype", "as", "meta", "all", "true", "false", "null", "subject", "actor",
        "require", "return", "comment", "doc", "about", "language", "rep"
    )]
    keyword: &str,
) {
    let source = format!("part def {keyword};");
    let result = parser::parse(&source);
    let parser_errors: Vec<_> = result.diagnostics.iter().filter(|d| d.severity == Severity::Error).collect();
    assert!(
        parser_errors.is_empty(),
        "keyword '{keyword}' as a name produced errors: {parser_errors:?}"
    );
    let found = result
        .ast
        .ids()
        .any(|id| matches!(result.ast.kind(id), NodeKind::Definition(d) if d.name.as_deref() == Some(keyword)));
    assert!(found, "keyword '{keyword}' was not recorded as the definition's name");
}

#[test]
fn container_back_links_are_consistent() {
    let built = build(
        "package Outer { package Inner { part def X :> Outer::Inner::X { part y; } } }",
    );
    for id in built.ast.ids() {
        if let Some(parent) = built.ast.parent(id) {
            let child_listed = match built.ast.kind(parent) {
                NodeKind::RootNamespace(ns) => ns.elements.contains(&id),
                NodeKind::PackageBody(p) => p.elements.contains(&id),
                NodeKind::Definition(d) => {
                    d.specializations.contains(&id)
                        || d.disjoint_types.contains(&id)
                        || d.body.as_deref().is_some_and(|b| b.contains(&id))
                }
                NodeKind::Usage(u) => {
                    u.feature_types.contains(&id)
                        || u.multiplicity == Some(id)
                        || u.specializations.contains(&id)
                        || u.redefinitions.contains(&id)
                        || u.references.contains(&id)
                        || u.value.as_ref().is_some_and(|(_, v)| *v == id)
                        || u.body.as_deref().is_some_and(|b| b.contains(&id))
                }
                NodeKind::Membership(m) => match m {
                    syster::ast::Membership::Owning(o) => o.element == id,
                    syster::ast::Membership::Import(i) => i.import_ref == id,
                    syster::ast::Membership::Alias(a) => a.target == id,
                },
                NodeKind::ImportRef(r) => r.path == id,
                _ => true,
            };
            assert!(child_listed, "node {id:?}'s parent does not list it as a child");
        }
    }
}

#[test]
fn scope_computation_and_validation_are_idempotent() {
    let result = parser::parse("package A { package B { part def X; } } part def Y :> A::B::X;");
    let (exports_1, locals_1) = compute_scopes(&result.ast);
    let (exports_2, locals_2) = compute_scopes(&result.ast);
    assert_eq!(exports_1.len(), exports_2.len());
    let root = result.ast.root();
    assert_eq!(locals_1.entries(root).len(), locals_2.entries(root).len());

    let diags_1 = validate(&result.ast);
    let diags_2 = validate(&result.ast);
    assert_eq!(diags_1.len(), diags_2.len());
}

#[test]
fn shadowing_inner_hides_outer_but_outer_stays_reachable() {
    let built = build(
        r#"
        package Outer {
            part def Shared;
            package Inner {
                part def Shared;
                part def RefInner :> Shared;
                part def RefOuter :> Outer::Shared;
            }
        }
        "#,
    );
    assert_eq!(errors(&built).count(), 0, "diagnostics: {:?}", messages(&built));

    let definitions: Vec<_> = built
        .ast
        .ids()
        .filter(|&id| matches!(built.ast.kind(id), NodeKind::Definition(d) if d.name.as_deref() == Some("Shared")))
        .collect();
    assert_eq!(definitions.len(), 2);
    let (outer_shared, inner_shared) = (definitions[0], definitions[1]);

    let mut qns = built.ast.ids().filter_map(|id| match built.ast.kind(id) {
        NodeKind::QualifiedName(qn) if qn.parts.last().map(|p| p.as_ref()) == Some("Shared") => Some(qn),
        _ => None,
    });
    let inner_ref = qns.next().expect("RefInner's qualified name");
    let outer_ref = qns.next().expect("RefOuter's qualified name");
    assert_eq!(inner_ref.target(), Some(inner_shared));
    assert_eq!(outer_ref.target(), Some(outer_shared));
}

#[test]
fn empty_and_trivial_input_produces_no_errors() {
    for source in ["", "   \n\t  ", "// just a comment\n", "/* a block comment */"] {
        let result = parser::parse(source);
        assert!(result.diagnostics.is_empty(), "source {source:?} produced diagnostics: {:?}", result.diagnostics);
        assert_eq!(result.ast.root_namespace().elements.len(), 0);
    }
}

#[test]
fn unterminated_block_comment_is_one_lexer_error_not_a_hang() {
    let result = parser::parse("/* never closed");
    assert_eq!(result.diagnostics.len(), 1, "diagnostics: {:?}", result.diagnostics);
    assert_eq!(result.diagnostics[0].severity, Severity::Error);
}

#[rstest]
#[case::lower_below_upper("part def P { part x [0..5]; }", false)]
#[case::bounds_equal("part def P { part x [5..5]; }", false)]
#[case::lower_above_upper("part def P { part x [6..5]; }", true)]
#[case::hex_bounds_inverted("part def P { part x [0x10..0x5]; }", true)]
#[case::unbounded_upper("part def P { part x [0..*]; }", false)]
fn multiplicity_validator_agrees_with_lower_le_upper(#[case] source: &str, #[case] expect_error: bool) {
    let built = build(source);
    let has_bounds_error = errors(&built).any(|d| d.message.starts_with("Lower bound"));
    assert_eq!(has_bounds_error, expect_error, "source: {source}, diagnostics: {:?}", messages(&built));
}

#[test]
fn workspace_drives_a_document_through_every_stage() {
    let mut ws = Workspace::new();
    let file = ws.add_document("package Lib { part def Engine; } part def Car :> Lib::Engine;");
    ws.advance_all_to(Stage::Validated);
    let doc = ws.document(file).expect("document still present");
    assert_eq!(doc.stage(), Stage::Validated);
    assert!(doc.diagnostics().iter().all(|d| d.severity != Severity::Error));
}
