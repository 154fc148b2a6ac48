//! The scope provider (spec §4.4/§4.4.1): resolves each segment of a
//! `QualifiedName` against the local-scope chain, document exports, and
//! imports in scope, computed lazily per lookup rather than as one
//! materialized table per node (spec §9 design note — hot paths can layer
//! a cache over this without changing its contract).

use crate::ast::{Ast, NodeId, NodeKind, QualifiedName};

use super::export::ExportIndex;
use super::local::LocalScopeIndex;

pub struct Resolver<'a> {
    ast: &'a Ast,
    exports: &'a ExportIndex,
    locals: &'a LocalScopeIndex,
}

impl<'a> Resolver<'a> {
    pub fn new(ast: &'a Ast, exports: &'a ExportIndex, locals: &'a LocalScopeIndex) -> Self {
        Self { ast, exports, locals }
    }

    /// Resolves every segment of `qn`, with `container` — the nearest
    /// enclosing `RootNamespace`/`PackageBody`/`Definition`/`Usage` — as the
    /// starting scope for segment 0. A segment that fails to resolve leaves
    /// every later segment unresolved too, without aborting the whole
    /// traversal (spec §4.4: "failures... do not abort").
    pub fn resolve(&self, container: NodeId, qn: &QualifiedName) -> Vec<Option<NodeId>> {
        let mut resolved: Vec<Option<NodeId>> = Vec::with_capacity(qn.parts.len());
        let mut path = String::new();
        for (i, part) in qn.parts.iter().enumerate() {
            let found = if i == 0 {
                self.resolve_first(container, part)
            } else if resolved[i - 1].is_none() {
                None
            } else {
                self.exports.resolve_qualified(&format!("{path}::{part}"))
            };
            if i == 0 {
                path.push_str(part);
            } else {
                path.push_str("::");
                path.push_str(part);
            }
            resolved.push(found);
        }
        resolved
    }

    /// First-segment lookup: walk the `$container` chain outward, innermost
    /// scope first (shadowing), checking direct members then imports at
    /// each level; fall back to document-wide exports at the outermost
    /// level (spec §4.4's "(a) local chain, (b) exports, (c) imports",
    /// unioned with inner-hides-outer precedence).
    fn resolve_first(&self, container: NodeId, name: &str) -> Option<NodeId> {
        for ancestor in self.ast.ancestors(container) {
            if let Some((_, target)) = self.locals.entries(ancestor).iter().rev().find(|(n, _)| n.as_ref() == name) {
                return Some(*target);
            }
            if let Some(found) = self.resolve_via_imports(ancestor, name) {
                return Some(found);
            }
        }
        self.exports.resolve_simple(name)
    }

    fn resolve_via_imports(&self, container: NodeId, name: &str) -> Option<NodeId> {
        for spec in self.locals.imports(container) {
            if spec.is_recursive {
                if let Some((_, id)) = self.exports.recursive_children(&spec.path).find(|(tail, _)| *tail == name) {
                    return Some(id);
                }
            } else if spec.is_wildcard || spec.is_all {
                // `import all X` is treated the same as `import X::*` here:
                // cross-document exposure of X's private/protected members
                // is left unspecified by spec §9, and this crate only
                // indexes public exports, so same-document `all` collapses
                // to the public-children case (see DESIGN.md).
                if let Some((_, id)) = self.exports.direct_children(&spec.path).find(|(tail, _)| *tail == name) {
                    return Some(id);
                }
            } else {
                let tail = spec.path.rsplit("::").next().unwrap_or(spec.path.as_str());
                if tail == name {
                    return self.exports.resolve_qualified(&spec.path);
                }
            }
        }
        None
    }
}

/// Finds the nearest ancestor of `id` that's a valid scope container. Used
/// to determine which scope a `QualifiedName`'s segment-0 lookup starts
/// from; all reference properties hanging off one element (specializations,
/// feature types, value expressions, …) resolve at the same granularity —
/// the element's nearest enclosing container — rather than per distinct
/// property (a simplification of spec §4.4's per-`reference_property`
/// generality; see DESIGN.md).
fn nearest_container(ast: &Ast, id: NodeId) -> NodeId {
    for ancestor in ast.ancestors(id).skip(1) {
        if matches!(
            ast.kind(ancestor),
            NodeKind::RootNamespace(_) | NodeKind::PackageBody(_) | NodeKind::Definition(_) | NodeKind::Usage(_)
        ) {
            return ancestor;
        }
    }
    ast.root()
}

/// Runs the linking phase (spec §4.4): resolves every `QualifiedName` node
/// in `ast` and writes the result back into `QualifiedName::resolved`.
pub fn link(ast: &mut Ast, exports: &ExportIndex, locals: &LocalScopeIndex) {
    let targets: Vec<(NodeId, NodeId)> = ast
        .ids()
        .filter(|&id| matches!(ast.kind(id), NodeKind::QualifiedName(_)))
        .map(|id| (id, nearest_container(ast, id)))
        .collect();

    let results: Vec<(NodeId, Vec<Option<NodeId>>)> = {
        let resolver = Resolver::new(ast, exports, locals);
        targets
            .into_iter()
            .map(|(qn_id, container)| {
                let NodeKind::QualifiedName(qn) = ast.kind(qn_id) else {
                    unreachable!("filtered to QualifiedName nodes above");
                };
                (qn_id, resolver.resolve(container, qn))
            })
            .collect()
    };

    for (qn_id, resolved) in results {
        if let NodeKind::QualifiedName(qn) = ast.kind_mut(qn_id) {
            qn.resolved = resolved;
        }
    }
}
