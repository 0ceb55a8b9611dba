//! Readiness check run before a pipeline can be configured.
//!
//! A missing source or destination is not an error: the model is valid, it
//! just cannot proceed yet.

use std::fmt;

use serde::Serialize;

use crate::{error::StagegraphError, model::PipelineGraphModel};

/// An endpoint stage the pipeline still needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingStage {
    Source,
    Destination,
}

impl fmt::Display for MissingStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source => f.write_str("source"),
            Self::Destination => f.write_str("destination"),
        }
    }
}

/// Outcome of [`validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Validation {
    can_proceed: bool,
    missing: Vec<MissingStage>,
}

impl Validation {
    /// Whether both source and destination are set.
    pub fn can_proceed(&self) -> bool {
        self.can_proceed
    }

    /// Missing stages, source first.
    pub fn missing(&self) -> &[MissingStage] {
        &self.missing
    }

    /// Turns a failed check into [`StagegraphError::IncompletePipeline`],
    /// for hosts that treat an incomplete pipeline as fatal.
    ///
    /// # Errors
    ///
    /// Returns [`StagegraphError::IncompletePipeline`] listing the missing
    /// stages if the pipeline cannot proceed.
    pub fn into_result(self) -> Result<(), StagegraphError> {
        if self.can_proceed {
            Ok(())
        } else {
            Err(StagegraphError::IncompletePipeline(self.missing))
        }
    }
}

/// Reports which endpoint stages `model` still lacks.
pub fn validate(model: &PipelineGraphModel) -> Validation {
    let mut missing = Vec::with_capacity(2);
    if model.source().is_none() {
        missing.push(MissingStage::Source);
    }
    if model.destination().is_none() {
        missing.push(MissingStage::Destination);
    }

    Validation {
        can_proceed: missing.is_empty(),
        missing,
    }
}

#[cfg(test)]
mod tests {
    use stagegraph_core::{
        identifier::Id,
        stage::{DestinationStage, SourceStage},
    };

    use super::*;
    use crate::editor::GraphEditor;

    #[test]
    fn test_empty_model_misses_both() {
        let validation = validate(&PipelineGraphModel::new());
        assert!(!validation.can_proceed());
        assert_eq!(
            validation.missing(),
            &[MissingStage::Source, MissingStage::Destination]
        );
    }

    #[test]
    fn test_only_destination_missing() {
        let model = GraphEditor::set_source(
            &PipelineGraphModel::new(),
            SourceStage::new(Id::new("pg"), "Orders", "postgres"),
        );
        let validation = validate(&model);
        assert!(!validation.can_proceed());
        assert_eq!(validation.missing(), &[MissingStage::Destination]);
    }

    #[test]
    fn test_complete_model_can_proceed() {
        let model = GraphEditor::set_source(
            &PipelineGraphModel::new(),
            SourceStage::new(Id::new("pg"), "Orders", "postgres"),
        );
        let model = GraphEditor::set_destination(
            &model,
            DestinationStage::new(Id::new("s3"), "Archive", "s3"),
        );
        let validation = validate(&model);
        assert!(validation.can_proceed());
        assert!(validation.missing().is_empty());
        assert!(validation.into_result().is_ok());
    }

    #[test]
    fn test_into_result_lists_missing() {
        match validate(&PipelineGraphModel::new()).into_result() {
            Err(StagegraphError::IncompletePipeline(missing)) => {
                assert_eq!(missing, vec![MissingStage::Source, MissingStage::Destination]);
            }
            other => panic!("Expected IncompletePipeline, got {other:?}"),
        }
    }

    #[test]
    fn test_serialized_shape() {
        let value = serde_json::to_value(validate(&PipelineGraphModel::new())).unwrap();
        assert_eq!(value["canProceed"], false);
        assert_eq!(value["missing"][0], "source");
        assert_eq!(value["missing"][1], "destination");
    }
}
