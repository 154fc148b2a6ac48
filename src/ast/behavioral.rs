//! Behavioral node kinds (spec §3 "Behavioral", §6.2 transition/succession
//! forms). These are parsed but not yet subject to dedicated validator
//! checks — the spec's required checks (§4.5) are all namespace/typing
//! level, so these node kinds exist for AST completeness and downstream
//! consumers rather than for the validator itself.

use super::NodeId;
use crate::base::{Name, Span};

/// `transition [name] first <state-ref> [accept <event>] [if <guard>]
/// [do action <effect>] then <state-ref> ';'`. Spec §9 leaves segment order
/// unspecified beyond syntactic acceptance, so the four optional segments
/// are stored independently rather than as an ordered list.
#[derive(Debug, Clone)]
pub struct Transition {
    pub name: Option<Name>,
    pub name_span: Option<Span>,
    pub source: NodeId,
    pub accept_event: Option<NodeId>,
    pub guard: Option<NodeId>,
    pub effect: Option<NodeId>,
    pub target: NodeId,
}

/// `succession [name] first <step> ('then' <step>)+ ';'`.
#[derive(Debug, Clone)]
pub struct Succession {
    pub name: Option<Name>,
    pub name_span: Option<Span>,
    pub steps: Vec<NodeId>,
}

#[derive(Debug, Clone)]
pub struct Connector {
    pub name: Option<Name>,
    pub ends: Vec<NodeId>,
}

#[derive(Debug, Clone)]
pub struct Binding {
    pub name: Option<Name>,
    pub lhs: NodeId,
    pub rhs: NodeId,
}

#[derive(Debug, Clone)]
pub struct FlowSpec {
    pub name: Option<Name>,
    pub source: NodeId,
    pub target: NodeId,
    pub payload: Option<NodeId>,
}

/// Shared shape for `entry`/`exit`/`do` action bodies, which are all just a
/// named reference to a performed action plus an optional inline body.
#[derive(Debug, Clone)]
pub struct ActionBlock {
    pub name: Option<Name>,
    pub reference: Option<NodeId>,
    pub body: Option<Vec<NodeId>>,
}

#[derive(Debug, Clone)]
pub struct IfAction {
    pub condition: NodeId,
    pub then_branch: NodeId,
    pub else_branch: Option<NodeId>,
}

#[derive(Debug, Clone)]
pub struct WhileAction {
    pub condition: Option<NodeId>,
    pub until: Option<NodeId>,
    pub body: NodeId,
}

#[derive(Debug, Clone)]
pub struct ForAction {
    pub loop_var: Name,
    pub loop_var_span: Span,
    pub range: NodeId,
    pub body: NodeId,
}

#[derive(Debug, Clone)]
pub struct AssignAction {
    pub target: NodeId,
    pub value: NodeId,
}

#[derive(Debug, Clone)]
pub struct SendAction {
    pub payload: NodeId,
    pub via: Option<NodeId>,
    pub to: Option<NodeId>,
}

#[derive(Debug, Clone)]
pub struct AcceptAction {
    pub payload: NodeId,
    pub via: Option<NodeId>,
}

#[derive(Debug, Clone)]
pub struct PerformAction {
    pub target: NodeId,
}

#[derive(Debug, Clone)]
pub struct AssertAction {
    pub negated: bool,
    pub condition: NodeId,
}
