//! Aggregates documents across a build (spec §5). Grounded on the
//! teacher's `semantic::workspace::Workspace`, which holds a map of files
//! plus shared cross-file indices; this version narrows that to the two
//! things spec §5 actually asks for — a process-wide shared export index
//! and parallel per-document stage advancement.

use std::sync::atomic::{AtomicU32, Ordering};

use parking_lot::RwLock;
use rayon::prelude::*;
use rustc_hash::FxHashMap;

use crate::base::FileId;
use crate::scope::ExportIndex;

use super::document::Document;
use super::error::WorkspaceError;
use super::stage::Stage;

/// A cross-document name lookup. Unlike [`ExportIndex`], which resolves to
/// a bare `NodeId` meaningful only within one document's own arena, this
/// keys each name to the `(FileId, NodeId)` pair needed to find it again —
/// full cross-document reference resolution stays a non-goal (spec §1),
/// but "does the workspace define `A::B::C` anywhere, and in which file"
/// is a useful query on top of the per-document indices alone.
#[derive(Debug, Default)]
pub struct SharedExportIndex {
    by_qualified: FxHashMap<String, (FileId, crate::ast::NodeId)>,
}

impl SharedExportIndex {
    pub fn resolve(&self, qualified: &str) -> Option<(FileId, crate::ast::NodeId)> {
        self.by_qualified.get(qualified).copied()
    }

    pub fn len(&self) -> usize {
        self.by_qualified.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_qualified.is_empty()
    }

    fn merge(&mut self, file: FileId, exports: &ExportIndex) {
        for (qualified, id) in exports.iter() {
            self.by_qualified.entry(qualified.to_string()).or_insert((file, id));
        }
    }
}

/// Owns every document in a build and the shared index they export into.
///
/// Multiple documents may be processed in parallel provided each owns its
/// AST, scope index, and diagnostic buffer (spec §5) — true of
/// [`Document`] by construction. Writes to the shared index are
/// serialised behind a single `RwLock`, whose contention cost is
/// negligible next to parsing (spec §5).
pub struct Workspace {
    documents: FxHashMap<FileId, Document>,
    shared_exports: RwLock<SharedExportIndex>,
    next_file: AtomicU32,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            documents: FxHashMap::default(),
            shared_exports: RwLock::new(SharedExportIndex::default()),
            next_file: AtomicU32::new(0),
        }
    }

    /// Parses `text` as a new document and assigns it the next `FileId` in
    /// insertion order. The document starts at [`Stage::Parsed`]; call
    /// [`Workspace::advance_all_to`] to drive it (and every other pending
    /// document) further.
    pub fn add_document(&mut self, text: impl Into<String>) -> FileId {
        let file = FileId::new(self.next_file.fetch_add(1, Ordering::Relaxed));
        self.documents.insert(file, Document::parse(file, text.into()));
        file
    }

    /// Removes a document. Per spec §5's cancellation model, any stage
    /// still in flight for this document observes the removal as a no-op:
    /// `advance_all_to` only ever iterates documents present in the map at
    /// the moment it runs.
    pub fn remove_document(&mut self, file: FileId) -> Option<Document> {
        self.documents.remove(&file)
    }

    pub fn document(&self, file: FileId) -> Option<&Document> {
        self.documents.get(&file)
    }

    /// Like [`Workspace::document`], but reports a missing document as a
    /// [`WorkspaceError`] instead of `None` — for embedders that want to
    /// propagate "unknown file" with `?` rather than handle it inline.
    pub fn document_or_err(&self, file: FileId) -> Result<&Document, WorkspaceError> {
        self.documents.get(&file).ok_or(WorkspaceError::DocumentNotFound(file))
    }

    pub fn documents(&self) -> impl Iterator<Item = &Document> {
        self.documents.values()
    }

    pub fn shared_exports(&self) -> parking_lot::RwLockReadGuard<'_, SharedExportIndex> {
        self.shared_exports.read()
    }

    /// Drives every document not yet at `target` forward one stage at a
    /// time until all of them reach it. Stage progression is monotonic
    /// (spec §5): a document already past a stage is skipped for it, never
    /// re-run.
    pub fn advance_all_to(&mut self, target: Stage) {
        let stages = [Stage::IndexedContent, Stage::ComputedScopes, Stage::Linked, Stage::Validated];
        for &stage in stages.iter() {
            if stage > target {
                break;
            }
            self.advance_all_one_stage(stage);
        }
    }

    fn advance_all_one_stage(&mut self, stage: Stage) {
        match stage {
            Stage::IndexedContent => {
                let mut pending: Vec<&mut Document> =
                    self.documents.values_mut().filter(|d| d.stage() == Stage::Parsed).collect();
                tracing::debug!(count = pending.len(), "indexing document content");
                pending.par_iter_mut().for_each(|doc| doc.index_content());

                let mut shared = self.shared_exports.write();
                for doc in self.documents.values().filter(|d| d.stage() == Stage::IndexedContent) {
                    if let Some(exports) = doc.own_exports() {
                        shared.merge(doc.file(), exports);
                    }
                }
                tracing::trace!(total_exports = shared.len(), "merged into shared export index");
            }
            Stage::ComputedScopes => {
                let mut pending: Vec<&mut Document> = self
                    .documents
                    .values_mut()
                    .filter(|d| d.stage() == Stage::IndexedContent)
                    .collect();
                tracing::debug!(count = pending.len(), "computing local scopes");
                pending.par_iter_mut().for_each(|doc| doc.compute_scopes());
            }
            Stage::Linked => {
                let mut pending: Vec<&mut Document> =
                    self.documents.values_mut().filter(|d| d.stage() == Stage::ComputedScopes).collect();
                tracing::debug!(count = pending.len(), "linking qualified names");
                pending.par_iter_mut().for_each(|doc| doc.link());
            }
            Stage::Validated => {
                let mut pending: Vec<&mut Document> =
                    self.documents.values_mut().filter(|d| d.stage() == Stage::Linked).collect();
                tracing::debug!(count = pending.len(), "running validator");
                pending.par_iter_mut().for_each(|doc| doc.validate());
            }
            Stage::Parsed => {}
        }
    }
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_document_assigns_ids_in_order() {
        let mut ws = Workspace::new();
        let a = ws.add_document("part def A;");
        let b = ws.add_document("part def B;");
        assert_eq!(a.raw(), 0);
        assert_eq!(b.raw(), 1);
    }

    #[test]
    fn advance_all_to_validated_runs_every_stage() {
        let mut ws = Workspace::new();
        let file = ws.add_document("package Lib { part def Engine; }");
        ws.advance_all_to(Stage::Validated);
        assert_eq!(ws.document(file).unwrap().stage(), Stage::Validated);
    }

    #[test]
    fn removed_document_is_absent_from_later_stages() {
        let mut ws = Workspace::new();
        let file = ws.add_document("part def A;");
        ws.advance_all_to(Stage::IndexedContent);
        ws.remove_document(file);
        ws.advance_all_to(Stage::Validated);
        assert!(ws.document(file).is_none());
    }

    #[test]
    fn document_or_err_reports_missing_file() {
        let ws = Workspace::new();
        let missing = FileId::new(7);
        match ws.document_or_err(missing) {
            Err(WorkspaceError::DocumentNotFound(f)) => assert_eq!(f, missing),
            other => panic!("expected DocumentNotFound, got {other:?}"),
        }
    }

    #[test]
    fn shared_index_sees_exports_from_every_document() {
        let mut ws = Workspace::new();
        ws.add_document("package Lib { part def Engine; }");
        ws.advance_all_to(Stage::IndexedContent);
        assert!(ws.shared_exports().resolve("Lib::Engine").is_some());
    }
}
