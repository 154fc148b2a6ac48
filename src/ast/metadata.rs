//! Metadata node kinds (spec §3 "Metadata").

use super::NodeId;
use crate::base::Name;

#[derive(Debug, Clone)]
pub struct Documentation {
    pub locale: Option<Name>,
    pub body: Name,
}

/// `comment [about qn (',' qn)*] [locale <str>] body`.
#[derive(Debug, Clone)]
pub struct CommentNode {
    pub about: Vec<NodeId>,
    pub language: Option<Name>,
    pub body: Name,
}

#[derive(Debug, Clone)]
pub struct TextualRepresentation {
    pub language: Name,
    pub body: Name,
}

/// Prefixed metadata, `#Type`.
#[derive(Debug, Clone)]
pub struct PrefixMetadata {
    pub target: NodeId,
}

/// Inline metadata, `@name?:Type?{body?}`.
#[derive(Debug, Clone)]
pub struct InlineMetadata {
    pub name: Option<Name>,
    pub metaclass: Option<NodeId>,
    pub body: Option<Vec<NodeId>>,
}
