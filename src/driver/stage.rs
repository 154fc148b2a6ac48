//! The document state machine (spec §5): `Parsed → IndexedContent →
//! ComputedScopes → Linked → Validated`. Stage progression is monotonic —
//! a stage never runs twice for the same build of a document — so the
//! states are modeled as a linear `enum` ordered by declaration, not a
//! bitset or a graph.

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    /// The document has a (possibly partial) AST and lexer/parser
    /// diagnostics; no scope information exists yet.
    Parsed,
    /// The document's own exports have been computed and merged into the
    /// workspace's shared export index (spec §5: "a process-wide shared
    /// index aggregates exports from all known documents").
    IndexedContent,
    /// The document's local-scope index has been computed, so every
    /// container in the document can answer "what do I own" and "what do
    /// I import" queries.
    ComputedScopes,
    /// Every `QualifiedName` in the document has been resolved against the
    /// workspace's aggregate export index and the document's own local
    /// scopes.
    Linked,
    /// The validator has run over the linked document; `diagnostics` now
    /// includes semantic checks alongside lexer/parser ones.
    Validated,
}

impl Stage {
    /// Whether advancing from `self` to `target` is a legal single step
    /// (`advance_to` allows only moving forward one stage at a time, to
    /// keep each stage's preconditions — e.g. "scopes are computed before
    /// linking" — visibly enforced at the call site).
    pub fn can_advance_to(self, target: Stage) -> bool {
        target as u8 == self as u8 + 1
    }
}
