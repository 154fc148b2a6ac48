//! Driver-level error type, grounded on the teacher's
//! `interchange::error::InterchangeError` (a `thiserror` enum over
//! `&'static str`/`String` fields rather than wrapped foreign error types,
//! since nothing in this crate's driver wraps another library's errors).

use thiserror::Error;

use crate::base::FileId;

use super::stage::Stage;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorkspaceError {
    #[error("no document with id {0} in this workspace")]
    DocumentNotFound(FileId),

    #[error("document {file} is at stage {actual:?}, which cannot advance to {requested:?}")]
    StageMismatch { file: FileId, actual: Stage, requested: Stage },
}
