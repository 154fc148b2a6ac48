//! `QualifiedName` and `ImportRef` (spec §3 "References").

use super::NodeId;
use crate::base::{Name, Span};

/// `A::B::C` — a sequence of name parts, each a plain identifier or an
/// unrestricted name. `resolved[i]` is the target of `parts[0..=i]` once
/// the scope provider has run (spec §4.4); it stays `None` for documents
/// that haven't reached the `Linked` stage, and for segments the scope
/// provider could not resolve.
#[derive(Debug, Clone)]
pub struct QualifiedName {
    pub parts: Vec<Name>,
    pub part_spans: Vec<Span>,
    pub resolved: Vec<Option<NodeId>>,
}

impl QualifiedName {
    pub fn new(parts: Vec<Name>, part_spans: Vec<Span>) -> Self {
        let resolved = vec![None; parts.len()];
        Self {
            parts,
            part_spans,
            resolved,
        }
    }

    /// The fully resolved target, i.e. what the whole path points to, if
    /// every segment resolved.
    pub fn target(&self) -> Option<NodeId> {
        self.resolved.last().copied().flatten()
    }

    pub fn dotted(&self) -> String {
        self.parts
            .iter()
            .map(|p| p.as_ref())
            .collect::<Vec<_>>()
            .join("::")
    }
}

/// `import X::Y` / `import X::*` / `import X::**`.
#[derive(Debug, Clone)]
pub struct ImportRef {
    pub path: NodeId,
    pub is_wildcard: bool,
    pub is_recursive: bool,
}
