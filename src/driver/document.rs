//! One document's slice of the pipeline (spec §5): owns its source text,
//! AST, scope indices, and diagnostic buffer as a single group whose
//! lifetime ends when the document is removed from its [`super::Workspace`].

use crate::ast::Ast;
use crate::base::FileId;
use crate::parser::{self, Diagnostic};
use crate::scope::{self, ExportIndex, LocalScopeIndex};
use crate::validator;

use super::stage::Stage;

/// A single document tracked by a [`super::Workspace`], advancing
/// monotonically through [`Stage`].
#[derive(Debug)]
pub struct Document {
    file: FileId,
    text: String,
    ast: Ast,
    diagnostics: Vec<Diagnostic>,
    stage: Stage,
    exports: Option<ExportIndex>,
    locals: Option<LocalScopeIndex>,
}

impl Document {
    /// Lexes and parses `text`, producing a document at [`Stage::Parsed`].
    /// Parsing never aborts (spec §4.2), so this always succeeds — a
    /// malformed document just carries parser diagnostics forward.
    pub fn parse(file: FileId, text: String) -> Self {
        let result = parser::parse(&text);
        Self {
            file,
            text,
            ast: result.ast,
            diagnostics: result.diagnostics,
            stage: Stage::Parsed,
            exports: None,
            locals: None,
        }
    }

    pub fn file(&self) -> FileId {
        self.file
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn ast(&self) -> &Ast {
        &self.ast
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// This document's own exports, once [`Stage::IndexedContent`] has run.
    pub fn own_exports(&self) -> Option<&ExportIndex> {
        self.exports.as_ref()
    }

    pub fn local_scopes(&self) -> Option<&LocalScopeIndex> {
        self.locals.as_ref()
    }

    fn require(&self, expected: Stage) {
        assert!(
            self.stage.can_advance_to(expected),
            "document {} cannot advance to {:?} from {:?}",
            self.file,
            expected,
            self.stage
        );
    }

    /// Computes this document's own export index. The caller (the
    /// workspace) is responsible for folding the result into the
    /// process-wide shared index — that merge is a workspace-level
    /// concern, not a per-document one.
    pub fn index_content(&mut self) {
        self.require(Stage::IndexedContent);
        self.exports = Some(scope::compute_exports(&self.ast));
        self.stage = Stage::IndexedContent;
    }

    /// Computes this document's local-scope index against its own exports.
    pub fn compute_scopes(&mut self) {
        self.require(Stage::ComputedScopes);
        let exports = self.exports.as_ref().expect("index_content must run first");
        self.locals = Some(scope::compute_local_scopes(&self.ast, exports));
        self.stage = Stage::ComputedScopes;
    }

    /// Resolves every `QualifiedName` in the document against its own
    /// export and local-scope indices (spec §4.4). Cross-document
    /// resolution is out of scope (spec §1); the workspace's shared index
    /// (see [`super::workspace::SharedExportIndex`]) answers "where is
    /// this name defined" queries separately, without feeding back into
    /// any one document's own reference resolution.
    pub fn link(&mut self) {
        self.require(Stage::Linked);
        let exports = self.exports.as_ref().expect("index_content must run first");
        let locals = self.locals.as_ref().expect("compute_scopes must run first");
        scope::link(&mut self.ast, exports, locals);
        self.stage = Stage::Linked;
    }

    /// Runs the validator and appends its diagnostics to the ones already
    /// collected by the lexer and parser.
    pub fn validate(&mut self) {
        self.require(Stage::Validated);
        self.diagnostics.extend(validator::validate(&self.ast));
        self.stage = Stage::Validated;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_stops_at_parsed_stage() {
        let doc = Document::parse(FileId::new(0), "part def Car;".to_string());
        assert_eq!(doc.stage(), Stage::Parsed);
        assert!(doc.own_exports().is_none());
    }

    #[test]
    fn full_pipeline_reaches_validated() {
        let mut doc = Document::parse(FileId::new(0), "part def Car;".to_string());
        doc.index_content();
        doc.compute_scopes();
        doc.link();
        doc.validate();
        assert_eq!(doc.stage(), Stage::Validated);
    }

    #[test]
    #[should_panic]
    fn skipping_a_stage_panics() {
        let mut doc = Document::parse(FileId::new(0), "part def Car;".to_string());
        doc.compute_scopes();
    }
}
