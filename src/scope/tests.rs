use crate::ast::{Ast, NodeId, NodeKind};
use crate::parser::parse;

use super::{compute_scopes, link};

fn build(source: &str) -> Ast {
    let result = parse(source);
    assert!(
        result.diagnostics.iter().all(|d| d.severity != crate::Severity::Error),
        "unexpected parse errors: {:?}",
        result.diagnostics
    );
    let mut ast = result.ast;
    let (exports, locals) = compute_scopes(&ast);
    link(&mut ast, &exports, &locals);
    ast
}

fn find_named(ast: &Ast, name: &str) -> NodeId {
    ast.ids()
        .find(|&id| match ast.kind(id) {
            NodeKind::Definition(d) => d.name.as_deref() == Some(name),
            NodeKind::Usage(u) => u.name.as_deref() == Some(name),
            NodeKind::PackageBody(p) => p.name.as_deref() == Some(name),
            _ => false,
        })
        .unwrap_or_else(|| panic!("no named element '{name}' in ast"))
}

fn find_qualified_name_targeting<'a>(ast: &'a Ast, dotted_last_part: &str) -> &'a crate::ast::QualifiedName {
    ast.ids()
        .find_map(|id| match ast.kind(id) {
            NodeKind::QualifiedName(qn) if qn.parts.last().map(|p| p.as_ref()) == Some(dotted_last_part) => Some(qn),
            _ => None,
        })
        .unwrap_or_else(|| panic!("no qualified name ending in '{dotted_last_part}'"))
}

#[test]
fn cross_package_qualified_resolution() {
    let ast = build(
        r#"
        package A {
            package B {
                part def X;
            }
        }
        package C {
            part def Y :> A::B::X;
        }
        "#,
    );
    let x = find_named(&ast, "X");
    let qn = find_qualified_name_targeting(&ast, "X");
    assert_eq!(qn.target(), Some(x));
    assert_eq!(qn.resolved.len(), 3);
    assert!(qn.resolved.iter().all(Option::is_some));
}

#[test]
fn inner_scope_shadows_outer() {
    let ast = build(
        r#"
        package Outer {
            part def Shared;
            package Inner {
                part def Shared;
                part def Ref :> Shared;
            }
        }
        "#,
    );
    let inner_shared = ast
        .ids()
        .filter(|&id| matches!(ast.kind(id), NodeKind::Definition(d) if d.name.as_deref() == Some("Shared")))
        .nth(1)
        .expect("two definitions named Shared");
    let qn = find_qualified_name_targeting(&ast, "Shared");
    assert_eq!(qn.target(), Some(inner_shared));
}

#[test]
fn outer_still_reachable_via_qualification_from_inner_scope() {
    let ast = build(
        r#"
        package Outer {
            part def Shared;
            package Inner {
                part def Shared;
                part def Ref :> Outer::Shared;
            }
        }
        "#,
    );
    let outer_shared = ast
        .ids()
        .filter(|&id| matches!(ast.kind(id), NodeKind::Definition(d) if d.name.as_deref() == Some("Shared")))
        .next()
        .unwrap();
    let qn = find_qualified_name_targeting(&ast, "Shared");
    assert_eq!(qn.target(), Some(outer_shared));
}

#[test]
fn wildcard_import_resolves_unqualified_names() {
    let ast = build(
        r#"
        package Lib {
            part def Engine;
            part def Wheel;
        }
        package App {
            import Lib::*;
            part def Car :> Engine, Wheel;
        }
        "#,
    );
    let engine = find_named(&ast, "Engine");
    let wheel = find_named(&ast, "Wheel");
    let engine_qn = find_qualified_name_targeting(&ast, "Engine");
    let wheel_qn = find_qualified_name_targeting(&ast, "Wheel");
    assert_eq!(engine_qn.target(), Some(engine));
    assert_eq!(wheel_qn.target(), Some(wheel));
}

#[test]
fn alias_resolves_to_its_target() {
    let ast = build(
        r#"
        package Lib {
            part def Engine;
        }
        alias Motor for Lib::Engine;
        package App {
            part def Car :> Motor;
        }
        "#,
    );
    let engine = find_named(&ast, "Engine");
    let qn = find_qualified_name_targeting(&ast, "Motor");
    assert_eq!(qn.target(), Some(engine));
}

#[test]
fn private_members_are_excluded_from_exports() {
    let ast = build(
        r#"
        package Lib {
            private part def Hidden;
            part def Visible;
        }
        "#,
    );
    let (exports, _) = compute_scopes(&ast);
    assert!(exports.resolve_qualified("Lib::Hidden").is_none());
    assert!(exports.resolve_qualified("Lib::Visible").is_some());
}

#[test]
fn scope_computation_is_idempotent() {
    let source = r#"
        package A {
            package B { part def X; }
        }
        part def Y :> A::B::X;
    "#;
    let result = parse(source);
    let (exports1, locals1) = compute_scopes(&result.ast);
    let (exports2, locals2) = compute_scopes(&result.ast);
    assert_eq!(exports1.len(), exports2.len());
    let root = result.ast.root();
    assert_eq!(locals1.entries(root).len(), locals2.entries(root).len());
}
