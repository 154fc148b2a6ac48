//! Local-scope computation (spec §4.3 "Local scopes"): for every container
//! node, the immediately-enclosed named elements and the imports it
//! introduces. Walking a node's `$container` chain ([`Ast::ancestors`]) and
//! consulting this at each step yields the chain of scopes visible there.

use rustc_hash::FxHashMap;

use super::export::{named_container, ExportIndex};
use crate::ast::{Ast, Membership, NodeId, NodeKind};
use crate::base::Name;

/// One `import` statement, reduced to the shape the resolver needs: a
/// dotted prefix and which of the three forms (plain, `*`, `**`) it is.
/// `import all X` sets `is_all` without necessarily setting `is_wildcard`
/// (the `all` keyword stands in for the trailing `::*`).
#[derive(Debug, Clone)]
pub struct ImportSpec {
    pub path: String,
    pub is_wildcard: bool,
    pub is_recursive: bool,
    pub is_all: bool,
}

#[derive(Debug, Default)]
pub struct LocalScopeIndex {
    entries: FxHashMap<NodeId, Vec<(Name, NodeId)>>,
    imports: FxHashMap<NodeId, Vec<ImportSpec>>,
}

impl LocalScopeIndex {
    pub fn entries(&self, container: NodeId) -> &[(Name, NodeId)] {
        self.entries.get(&container).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn imports(&self, container: NodeId) -> &[ImportSpec] {
        self.imports.get(&container).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// `exports` is consulted only to resolve alias targets that land inside
/// this same document; local scopes are otherwise visibility-blind (spec
/// §4.4.1: "within the same container body they are visible").
pub fn compute_local_scopes(ast: &Ast, exports: &ExportIndex) -> LocalScopeIndex {
    let mut index = LocalScopeIndex::default();
    collect(ast, ast.root(), ast.root_namespace().elements.as_slice(), exports, &mut index);
    index
}

fn collect(ast: &Ast, container: NodeId, members: &[NodeId], exports: &ExportIndex, index: &mut LocalScopeIndex) {
    let mut entries = Vec::new();
    let mut imports = Vec::new();
    for &m in members {
        let NodeKind::Membership(membership) = ast.kind(m) else {
            continue;
        };
        match membership {
            Membership::Owning(om) => {
                let (name, children) = named_container(ast, om.element);
                if let Some(name) = name {
                    entries.push((name.clone(), om.element));
                }
                if let Some(children) = children {
                    collect(ast, om.element, children, exports, index);
                }
            }
            Membership::Alias(am) => {
                let target = if let NodeKind::QualifiedName(qn) = ast.kind(am.target) {
                    exports.resolve_qualified(&qn.dotted()).unwrap_or(am.target)
                } else {
                    am.target
                };
                entries.push((am.alias_name.clone(), target));
            }
            Membership::Import(im) => {
                if let NodeKind::ImportRef(ir) = ast.kind(im.import_ref) {
                    if let NodeKind::QualifiedName(qn) = ast.kind(ir.path) {
                        imports.push(ImportSpec {
                            path: qn.dotted(),
                            is_wildcard: ir.is_wildcard,
                            is_recursive: ir.is_recursive,
                            is_all: im.is_all,
                        });
                    }
                }
            }
        }
    }
    index.entries.insert(container, entries);
    index.imports.insert(container, imports);
}
