//! Pipeline description files.
//!
//! A pipeline file is TOML with optional `[source]` and `[destination]`
//! tables, an ordered `[[transforms]]` array and a `collapsed` flag:
//!
//! ```toml
//! collapsed = false
//!
//! [source]
//! id = "orders"
//! name = "Orders DB"
//! connector = "postgres"
//!
//! [[transforms]]
//! id = "route"
//! name = "Route by topic"
//!
//! [transforms.predicate]
//! kind = "org.apache.kafka.connect.transforms.predicates.TopicNameMatches"
//! negate = false
//! ```
//!
//! The file is replayed through [`GraphEditor`] operations, so a bad file
//! fails with the same errors an interactive edit would.

use std::{fs, io, path::Path};

use log::debug;
use serde::Deserialize;
use thiserror::Error;

use stagegraph::{
    GraphEditor, PipelineGraphModel, StagegraphError,
    stage::{DestinationStage, SourceStage, TransformStage},
};

/// Pipeline file errors for CLI
#[derive(Debug, Error)]
pub enum PipelineFileError {
    #[error("Failed to parse pipeline file: {0}")]
    Parse(String),
}

impl From<PipelineFileError> for StagegraphError {
    fn from(err: PipelineFileError) -> Self {
        StagegraphError::Io(io::Error::new(io::ErrorKind::InvalidData, err.to_string()))
    }
}

/// Contents of a pipeline description file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineFile {
    source: Option<SourceStage>,
    destination: Option<DestinationStage>,
    #[serde(default)]
    transforms: Vec<TransformStage>,
    #[serde(default)]
    collapsed: bool,
}

impl PipelineFile {
    /// Parses a pipeline file from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineFileError::Parse`] if the text is not a valid
    /// pipeline description.
    pub fn parse(content: &str) -> Result<Self, PipelineFileError> {
        toml::from_str(content).map_err(|e| PipelineFileError::Parse(e.to_string()))
    }

    /// Reads and parses a pipeline file.
    ///
    /// # Errors
    ///
    /// Returns `StagegraphError` if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StagegraphError> {
        let content = fs::read_to_string(path)?;
        Ok(Self::parse(&content)?)
    }

    /// Builds the model by replaying the file as editor operations.
    ///
    /// # Errors
    ///
    /// Returns [`StagegraphError::DuplicateStageId`] if two transforms share
    /// an id.
    pub fn into_model(self) -> Result<PipelineGraphModel, StagegraphError> {
        let mut model = PipelineGraphModel::new();
        if let Some(source) = self.source {
            model = GraphEditor::set_source(&model, source);
        }
        if let Some(destination) = self.destination {
            model = GraphEditor::set_destination(&model, destination);
        }
        model = GraphEditor::add_transforms(&model, self.transforms)?;
        if self.collapsed {
            model = GraphEditor::collapse(&model);
        }

        debug!(
            transform_count = model.transform_count(),
            collapsed = model.is_transform_chain_collapsed();
            "Pipeline file applied"
        );
        Ok(model)
    }
}
