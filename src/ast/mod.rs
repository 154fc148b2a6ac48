//! The AST: a tree of tagged nodes stored in a flat arena (spec §3, design
//! note 9).
//!
//! Every node is exclusively owned by its parent and addressed by a
//! [`NodeId`] rather than a pointer; the `$container` back-link from the
//! spec becomes [`Ast::parent`], a lookup against the arena rather than a
//! real pointer. This gives the "non-owning back-link" property for free —
//! there is nothing for a back-link to outlive, since it is just an index.

pub mod behavioral;
mod expr;
pub mod metadata;
mod multiplicity;
mod node;
mod qualified_name;

pub use expr::{BinaryOp, ClassifyOp, Expression, IntBase, UnaryOp};
pub use multiplicity::MultiplicityBounds;
pub use node::{
    AliasMember, Definition, Direction, ElementKind, ImportMembership, Membership, NodeKind,
    OwningMembership, PackageBody, RootNamespace, Usage, ValueKind, Visibility,
};
pub use qualified_name::{ImportRef, QualifiedName};

use crate::base::Span;

/// An index into an [`Ast`]'s node arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    fn new(index: usize) -> Self {
        Self(index as u32)
    }

    fn index(self) -> usize {
        self.0 as usize
    }
}

/// One arena slot: a tagged node, its span, and its parent (if any).
#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    pub span: Span,
    pub parent: Option<NodeId>,
}

/// The parsed document tree. Owned by a single document; discarded when the
/// document is removed from the driver's index (spec §3, "Lifecycle").
#[derive(Debug, Clone)]
pub struct Ast {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Ast {
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.index()].kind
    }

    pub fn span(&self, id: NodeId) -> Span {
        self.nodes[id.index()].span
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.index()].parent
    }

    /// Iterate `id`'s ancestors, innermost first. Used by scope lookup to
    /// walk the `$container` chain (spec §4.4).
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let mut current = Some(id);
        std::iter::from_fn(move || {
            let next = current?;
            current = self.parent(next);
            Some(next)
        })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The root-namespace's membership list, for convenience at call sites
    /// that don't want to match on `NodeKind` themselves.
    pub fn root_namespace(&self) -> &RootNamespace {
        match &self.kind(self.root) {
            NodeKind::RootNamespace(ns) => ns,
            other => unreachable!("document root must be a RootNamespace, found {other:?}"),
        }
    }

    /// Every id in the arena, in allocation order. Used by the linking pass
    /// (spec §4.4) to find every `QualifiedName` node without the caller
    /// needing its own traversal.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId::new)
    }

    /// Mutates a node's kind in place. Used only by the linking pass to
    /// write resolved references back into `QualifiedName` nodes after
    /// scope computation; nothing else in the pipeline mutates a parsed
    /// `Ast`.
    pub fn kind_mut(&mut self, id: NodeId) -> &mut NodeKind {
        &mut self.nodes[id.index()].kind
    }
}

/// Incrementally builds an [`Ast`] while parsing. Nodes are allocated before
/// their final parent is known (a child is always parsed before the
/// membership wrapper around it), so `set_parent` is a separate step run
/// immediately after a child's enclosing node is allocated.
#[derive(Debug, Default)]
pub struct AstBuilder {
    nodes: Vec<Node>,
}

impl AstBuilder {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    pub fn alloc(&mut self, kind: NodeKind, span: Span) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(Node {
            kind,
            span,
            parent: None,
        });
        id
    }

    pub fn set_parent(&mut self, child: NodeId, parent: NodeId) {
        self.nodes[child.index()].parent = Some(parent);
    }

    /// Set `parent` as the parent of every id in `children`. A convenience
    /// for the common case of allocating a container and then back-linking
    /// the list of members it was just given.
    pub fn adopt(&mut self, parent: NodeId, children: &[NodeId]) {
        for &child in children {
            self.set_parent(child, parent);
        }
    }

    pub fn kind_mut(&mut self, id: NodeId) -> &mut NodeKind {
        &mut self.nodes[id.index()].kind
    }

    pub fn finish(self, root: NodeId) -> Ast {
        Ast {
            nodes: self.nodes,
            root,
        }
    }
}
