//! Error types for stagegraph operations.
//!
//! Every edit either succeeds with a new model or fails with a
//! [`StagegraphError`] before anything is changed, so callers can keep using
//! the model they passed in.

use std::io;

use thiserror::Error;

use stagegraph_core::identifier::Id;

use crate::validate::MissingStage;

/// The main error type for stagegraph operations.
#[derive(Debug, Error)]
pub enum StagegraphError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Stage id `{0}` is already used in this pipeline")]
    DuplicateStageId(Id),

    #[error("No transform with id `{0}` in this pipeline")]
    UnknownStage(Id),

    #[error("Invalid transform order: {reason}")]
    InvalidReorder { reason: String },

    #[error("Reorder session is not open")]
    SessionNotOpen,

    #[error("Layout error: {0}")]
    Layout(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Pipeline cannot proceed, missing: {}", list_missing(.0))]
    IncompletePipeline(Vec<MissingStage>),
}

fn list_missing(missing: &[MissingStage]) -> String {
    missing
        .iter()
        .map(MissingStage::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl StagegraphError {
    pub(crate) fn invalid_reorder(reason: impl Into<String>) -> Self {
        Self::InvalidReorder {
            reason: reason.into(),
        }
    }
}
