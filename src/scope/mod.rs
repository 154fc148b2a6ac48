//! Export computation, local-scope computation, and reference resolution
//! (spec §4.3, §4.4, §4.4.1).
//!
//! This module is deliberately split the same way the two traversals in
//! spec §4.3 are: [`export`] walks from the root accumulating qualified
//! names, [`local`] records each container's immediately-owned members and
//! imports, and [`provider`] answers "what does this name mean here"
//! queries against both, writing its answers back into the AST's
//! `QualifiedName` nodes.

mod export;
mod local;
mod provider;
#[cfg(test)]
mod tests;

pub use export::ExportIndex;
pub use local::{ImportSpec, LocalScopeIndex};
pub use provider::Resolver;

use crate::ast::Ast;

/// Runs the scope-computation phase (spec §4.3): builds the export index
/// and local-scope index for `ast`. A pure function of the AST's current
/// state — running it twice on an unchanged AST yields identical maps
/// (spec §8 idempotence).
pub fn compute_scopes(ast: &Ast) -> (ExportIndex, LocalScopeIndex) {
    let exports = export::compute_exports(ast);
    let locals = local::compute_local_scopes(ast, &exports);
    (exports, locals)
}

/// The export half of [`compute_scopes`], split out for the driver's
/// `IndexedContent` stage, which needs a document's own exports before it
/// computes local scopes (spec §5).
pub fn compute_exports(ast: &Ast) -> ExportIndex {
    export::compute_exports(ast)
}

/// The local-scope half of [`compute_scopes`], split out for the driver's
/// `ComputedScopes` stage.
pub fn compute_local_scopes(ast: &Ast, exports: &ExportIndex) -> LocalScopeIndex {
    local::compute_local_scopes(ast, exports)
}

/// Runs the linking phase (spec §4.4): resolves every `QualifiedName`'s
/// segments against already-computed scopes, writing results back into
/// `ast`. Must run after [`compute_scopes`] on the same AST.
pub fn link(ast: &mut Ast, exports: &ExportIndex, locals: &LocalScopeIndex) {
    provider::link(ast, exports, locals);
}
