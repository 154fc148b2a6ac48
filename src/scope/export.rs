//! Export computation (spec §4.3 "Exports"): a traversal from the root that
//! accumulates a qualified-name prefix and records every publicly visible
//! named element under both its simple and fully-qualified name.

use rustc_hash::FxHashMap;

use crate::ast::{Ast, Membership, NodeId, NodeKind, Visibility};
use crate::base::Name;

/// Maps qualified and simple names to the elements they export. Built once
/// per document after parsing (spec §4.3); re-running it on an unchanged
/// AST always yields the same maps (idempotence, spec §8).
#[derive(Debug, Default, Clone)]
pub struct ExportIndex {
    by_qualified: FxHashMap<String, NodeId>,
    by_simple: FxHashMap<String, Vec<NodeId>>,
}

impl ExportIndex {
    pub fn resolve_qualified(&self, path: &str) -> Option<NodeId> {
        self.by_qualified.get(path).copied()
    }

    /// First export wins. Spec §9 leaves cross-namespace simple-name
    /// collisions unspecified; this crate picks "first recorded during the
    /// export traversal" rather than flagging ambiguity.
    pub fn resolve_simple(&self, name: &str) -> Option<NodeId> {
        self.by_simple.get(name).and_then(|v| v.first().copied())
    }

    /// Direct children of `prefix` (`import X::*`, spec §4.4.1): exports
    /// whose qualified path starts with `prefix::` and has no further `::`.
    pub fn direct_children<'a>(&'a self, prefix: &str) -> impl Iterator<Item = (&'a str, NodeId)> + 'a {
        let needle = format!("{prefix}::");
        self.by_qualified.iter().filter_map(move |(q, &id)| {
            let rest = q.strip_prefix(needle.as_str())?;
            if rest.contains("::") {
                None
            } else {
                Some((rest, id))
            }
        })
    }

    /// Every transitively-reachable descendant of `prefix` (`import
    /// X::**`), keyed by the simple tail of its own qualified path.
    pub fn recursive_children<'a>(&'a self, prefix: &str) -> impl Iterator<Item = (&'a str, NodeId)> + 'a {
        let needle = format!("{prefix}::");
        self.by_qualified.iter().filter_map(move |(q, &id)| {
            q.strip_prefix(needle.as_str())
                .map(|_| (q.rsplit("::").next().unwrap_or(q.as_str()), id))
        })
    }

    fn insert(&mut self, qualified: String, simple: &str, node: NodeId) {
        self.by_qualified.insert(qualified, node);
        self.by_simple.entry(simple.to_string()).or_default().push(node);
    }

    /// Every qualified name this index records, in arbitrary order. Used
    /// by the driver to fold a document's own exports into the
    /// workspace-wide aggregate.
    pub fn iter(&self) -> impl Iterator<Item = (&str, NodeId)> + '_ {
        self.by_qualified.iter().map(|(q, &id)| (q.as_str(), id))
    }

    pub fn len(&self) -> usize {
        self.by_qualified.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_qualified.is_empty()
    }
}

/// `(name, children)` for the node kinds exports/local scopes recurse
/// through — `PackageBody`/`Definition`/`Usage` — and `(None, None)` for
/// everything else; behavioral/metadata nodes are not namespace containers.
pub(super) fn named_container(ast: &Ast, id: NodeId) -> (Option<&Name>, Option<&[NodeId]>) {
    match ast.kind(id) {
        NodeKind::PackageBody(p) => (p.name.as_ref(), Some(p.elements.as_slice())),
        NodeKind::Definition(d) => (d.name.as_ref(), d.body.as_deref()),
        NodeKind::Usage(u) => (u.name.as_ref(), u.body.as_deref()),
        _ => (None, None),
    }
}

struct PendingAlias {
    qualified_name: String,
    simple_name: Name,
    target_qn: NodeId,
}

pub fn compute_exports(ast: &Ast) -> ExportIndex {
    let mut idx = ExportIndex::default();
    let mut pending_aliases = Vec::new();
    walk(ast, ast.root_namespace().elements.as_slice(), "", &mut idx, &mut pending_aliases);

    // Aliases target qualified names into this same document's exports, so
    // they're resolved in a second pass once every owned element is known.
    for alias in pending_aliases {
        if let NodeKind::QualifiedName(qn) = ast.kind(alias.target_qn) {
            if let Some(target) = idx.resolve_qualified(&qn.dotted()) {
                idx.insert(alias.qualified_name, &alias.simple_name, target);
            }
        }
    }
    idx
}

fn walk(ast: &Ast, members: &[NodeId], prefix: &str, idx: &mut ExportIndex, pending_aliases: &mut Vec<PendingAlias>) {
    for &m in members {
        let NodeKind::Membership(membership) = ast.kind(m) else {
            continue;
        };
        match membership {
            Membership::Owning(om) => {
                if matches!(om.visibility, Some(Visibility::Private) | Some(Visibility::Protected)) {
                    continue;
                }
                let (name, children) = named_container(ast, om.element);
                if let Some(name) = name {
                    let qualified = join(prefix, name);
                    idx.insert(qualified.clone(), name, om.element);
                    if let Some(children) = children {
                        walk(ast, children, &qualified, idx, pending_aliases);
                    }
                } else if let Some(children) = children {
                    walk(ast, children, prefix, idx, pending_aliases);
                }
            }
            Membership::Alias(am) => {
                if matches!(am.visibility, Some(Visibility::Private) | Some(Visibility::Protected)) {
                    continue;
                }
                pending_aliases.push(PendingAlias {
                    qualified_name: join(prefix, &am.alias_name),
                    simple_name: am.alias_name.clone(),
                    target_qn: am.target,
                });
            }
            Membership::Import(_) => {}
        }
    }
}

fn join(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}::{name}")
    }
}
