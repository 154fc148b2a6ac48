//! Node payloads (spec §3, "Essential node kinds").
//!
//! `Definition` and `Usage` carry an [`ElementKind`] rather than being split
//! into two dozen node-kind variants apiece — the fields the spec lists
//! (`name?`, `specializations`, `multiplicity?`, `body?`, …) are identical
//! across every definition/usage flavor, only the keyword and a couple of
//! flags (`is_parallel` for states) differ, so one struct with a kind tag
//! carries the same information as a closed set of near-duplicate variants
//! while keeping match arms in the parser and validator from multiplying.

use super::{Expression, ImportRef, MultiplicityBounds, NodeId, QualifiedName};
use crate::base::{Name, Span};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Private,
    Protected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    In,
    Out,
    InOut,
}

/// How a usage's value was bound: `=` (assignment), `:=` (initial), `::=`
/// (computed/derived-by-expression).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Assign,
    Initial,
    Computed,
}

/// The definition/usage kind keyword (spec §3's list of 24 definitions,
/// reused verbatim for usages per "Usages: per definition kind above").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Part,
    Item,
    Attribute,
    Enumeration,
    Action,
    State { is_parallel: bool },
    Constraint,
    Requirement,
    Port,
    Connection,
    Interface,
    Flow,
    Allocation,
    Calculation,
    Case,
    AnalysisCase,
    VerificationCase,
    UseCase,
    View,
    Viewpoint,
    Rendering,
    Metadata,
    Occurrence,
    Concern,
}

impl ElementKind {
    /// The bare name used in validator messages, e.g. `Part` → `PartDefinition`.
    pub fn type_name(self) -> &'static str {
        match self {
            ElementKind::Part => "Part",
            ElementKind::Item => "Item",
            ElementKind::Attribute => "Attribute",
            ElementKind::Enumeration => "Enumeration",
            ElementKind::Action => "Action",
            ElementKind::State { .. } => "State",
            ElementKind::Constraint => "Constraint",
            ElementKind::Requirement => "Requirement",
            ElementKind::Port => "Port",
            ElementKind::Connection => "Connection",
            ElementKind::Interface => "Interface",
            ElementKind::Flow => "Flow",
            ElementKind::Allocation => "Allocation",
            ElementKind::Calculation => "Calculation",
            ElementKind::Case => "Case",
            ElementKind::AnalysisCase => "AnalysisCase",
            ElementKind::VerificationCase => "VerificationCase",
            ElementKind::UseCase => "UseCase",
            ElementKind::View => "View",
            ElementKind::Viewpoint => "Viewpoint",
            ElementKind::Rendering => "Rendering",
            ElementKind::Metadata => "Metadata",
            ElementKind::Occurrence => "Occurrence",
            ElementKind::Concern => "Concern",
        }
    }
}

/// `RootNamespace(namespace_elements: Membership[])`.
#[derive(Debug, Clone, Default)]
pub struct RootNamespace {
    pub elements: Vec<NodeId>,
}

/// `PackageBody(name?, is_library, is_standard, elements: NamespaceElement[])`.
/// Also used, with `name = None`, to hold the top-level `elements` of the
/// document's own implicit package when no `package` keyword wraps them —
/// in that case the `RootNamespace` holds the members directly instead.
#[derive(Debug, Clone)]
pub struct PackageBody {
    pub name: Option<Name>,
    pub name_span: Option<Span>,
    pub is_library: bool,
    pub is_standard: bool,
    pub elements: Vec<NodeId>,
}

/// One of the three membership wrappers a namespace element can be held
/// under. `RootNamespace`/`PackageBody`/definition-and-usage bodies all
/// store `Vec<NodeId>` of `NodeKind::Membership` nodes.
#[derive(Debug, Clone)]
pub enum Membership {
    Owning(OwningMembership),
    Import(ImportMembership),
    Alias(AliasMember),
}

/// `OwningMembership(visibility?, element: Element)`.
#[derive(Debug, Clone)]
pub struct OwningMembership {
    pub visibility: Option<Visibility>,
    pub element: NodeId,
}

/// `ImportMembership(visibility?, is_all, import_ref: ImportRef)`.
#[derive(Debug, Clone)]
pub struct ImportMembership {
    pub visibility: Option<Visibility>,
    pub is_all: bool,
    pub import_ref: NodeId,
}

/// `AliasMember(visibility?, alias_name, target: QualifiedName)`.
#[derive(Debug, Clone)]
pub struct AliasMember {
    pub visibility: Option<Visibility>,
    pub alias_name: Name,
    pub alias_name_span: Span,
    pub target: NodeId,
}

/// A definition: `kind def [name] [:> specializations] [disjoint …] (';' | body)`.
#[derive(Debug, Clone)]
pub struct Definition {
    pub kind: ElementKind,
    pub name: Option<Name>,
    pub name_span: Option<Span>,
    pub is_abstract: bool,
    pub is_variation: bool,
    pub specializations: Vec<NodeId>,
    pub disjoint_types: Vec<NodeId>,
    /// `None` for a `;`-terminated declaration, `Some` (possibly empty) for
    /// a brace body. The distinction matters for the empty-abstract-body
    /// validator check (spec §4.5 #4), which only fires on `Some(vec![])`.
    pub body: Option<Vec<NodeId>>,
}

/// A usage: `kind [name] [: feature_types] [multiplicity] [relationships] [value] (';' | body)`.
#[derive(Debug, Clone)]
pub struct Usage {
    pub kind: ElementKind,
    pub name: Option<Name>,
    pub name_span: Option<Span>,
    pub direction: Option<Direction>,
    pub is_abstract: bool,
    pub is_readonly: bool,
    pub is_derived: bool,
    pub is_end: bool,
    pub is_ref: bool,
    pub feature_types: Vec<NodeId>,
    pub multiplicity: Option<NodeId>,
    pub specializations: Vec<NodeId>,
    pub redefinitions: Vec<NodeId>,
    pub references: Vec<NodeId>,
    pub value: Option<(ValueKind, NodeId)>,
    pub body: Option<Vec<NodeId>>,
}

/// The closed set of ~60 tagged node kinds (spec §3). `Definition`/`Usage`
/// collapse the ~24 per-kind variants the spec enumerates into one variant
/// apiece carrying an [`ElementKind`] — see the module doc comment.
#[derive(Debug, Clone)]
pub enum NodeKind {
    RootNamespace(RootNamespace),
    PackageBody(PackageBody),
    Membership(Membership),
    Definition(Definition),
    Usage(Usage),
    QualifiedName(QualifiedName),
    ImportRef(ImportRef),
    MultiplicityBounds(MultiplicityBounds),
    Expression(Expression),

    Transition(super::behavioral::Transition),
    Succession(super::behavioral::Succession),
    Connector(super::behavioral::Connector),
    Binding(super::behavioral::Binding),
    Flow(super::behavioral::FlowSpec),
    ActionBlock(super::behavioral::ActionBlock),
    IfAction(super::behavioral::IfAction),
    WhileAction(super::behavioral::WhileAction),
    ForAction(super::behavioral::ForAction),
    AssignAction(super::behavioral::AssignAction),
    SendAction(super::behavioral::SendAction),
    AcceptAction(super::behavioral::AcceptAction),
    PerformAction(super::behavioral::PerformAction),
    AssertAction(super::behavioral::AssertAction),

    Documentation(super::metadata::Documentation),
    Comment(super::metadata::CommentNode),
    TextualRepresentation(super::metadata::TextualRepresentation),
    PrefixMetadata(super::metadata::PrefixMetadata),
    InlineMetadata(super::metadata::InlineMetadata),
}
