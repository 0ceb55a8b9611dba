//! Structural edit operations on a [`PipelineGraphModel`].
//!
//! These operations are the only way to change a model. Each one takes the
//! latest model by reference and returns a new one, or an error with the
//! input left as it was.

use std::collections::HashSet;

use log::{debug, trace};

use stagegraph_core::{
    identifier::Id,
    stage::{DestinationStage, SourceStage, TransformStage},
};

use crate::{error::StagegraphError, model::PipelineGraphModel};

/// The mutation surface for pipeline models.
///
/// `GraphEditor` holds no state; it exists so hosts have a single name to
/// call into and so the operations read the same way everywhere.
///
/// # Examples
///
/// ```
/// use stagegraph::{editor::GraphEditor, model::PipelineGraphModel};
/// use stagegraph_core::{identifier::Id, stage::TransformStage};
///
/// let model = PipelineGraphModel::new();
/// let model = GraphEditor::add_transform(&model, TransformStage::new(Id::new("t1"), "Route"))
///     .expect("first transform");
/// let model = GraphEditor::collapse(&model);
/// assert!(model.is_transform_chain_collapsed());
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct GraphEditor;

impl GraphEditor {
    /// Replaces the source stage. Transforms are untouched.
    pub fn set_source(model: &PipelineGraphModel, stage: SourceStage) -> PipelineGraphModel {
        debug!(source = stage.id().to_string(); "Setting pipeline source");
        model.clone().with_source(stage)
    }

    /// Replaces the destination stage. Transforms are untouched.
    pub fn set_destination(
        model: &PipelineGraphModel,
        stage: DestinationStage,
    ) -> PipelineGraphModel {
        debug!(destination = stage.id().to_string(); "Setting pipeline destination");
        model.clone().with_destination(stage)
    }

    /// Appends a transform to the end of the chain.
    ///
    /// # Errors
    ///
    /// Returns [`StagegraphError::DuplicateStageId`] if the chain already has
    /// a transform with the same id.
    pub fn add_transform(
        model: &PipelineGraphModel,
        stage: TransformStage,
    ) -> Result<PipelineGraphModel, StagegraphError> {
        Self::add_transforms(model, vec![stage])
    }

    /// Appends several transforms, keeping their order.
    ///
    /// The whole batch is rejected if any id collides with the chain or
    /// with another id in the batch.
    ///
    /// # Errors
    ///
    /// Returns [`StagegraphError::DuplicateStageId`] naming the first
    /// colliding id.
    pub fn add_transforms(
        model: &PipelineGraphModel,
        stages: Vec<TransformStage>,
    ) -> Result<PipelineGraphModel, StagegraphError> {
        let mut ids: HashSet<Id> = model.transforms().iter().map(TransformStage::id).collect();
        for stage in &stages {
            if !ids.insert(stage.id()) {
                return Err(StagegraphError::DuplicateStageId(stage.id()));
            }
        }

        let added = stages.len();
        let mut transforms = model.transforms().to_vec();
        transforms.extend(stages);
        debug!(added, transform_count = transforms.len(); "Added transforms");

        Ok(model.clone().with_transforms(transforms))
    }

    /// Removes the transform with the given id.
    ///
    /// Removing the last transform brings the chain back to its empty,
    /// expanded state.
    ///
    /// # Errors
    ///
    /// Returns [`StagegraphError::UnknownStage`] if no transform has this id.
    pub fn remove_transform(
        model: &PipelineGraphModel,
        id: Id,
    ) -> Result<PipelineGraphModel, StagegraphError> {
        if !model.contains_transform(id) {
            return Err(StagegraphError::UnknownStage(id));
        }

        let transforms: Vec<TransformStage> = model
            .transforms()
            .iter()
            .filter(|transform| transform.id() != id)
            .cloned()
            .collect();
        debug!(removed = id.to_string(), transform_count = transforms.len(); "Removed transform");

        Ok(model.clone().with_transforms(transforms))
    }

    /// Puts the chain into the order given by `new_order`.
    ///
    /// # Errors
    ///
    /// Returns [`StagegraphError::InvalidReorder`] unless `new_order` is a
    /// permutation of the current transform ids: same length, no repeats,
    /// no ids from outside the chain.
    pub fn reorder_transforms(
        model: &PipelineGraphModel,
        new_order: &[Id],
    ) -> Result<PipelineGraphModel, StagegraphError> {
        if new_order.len() != model.transform_count() {
            return Err(StagegraphError::invalid_reorder(format!(
                "expected {} ids, got {}",
                model.transform_count(),
                new_order.len()
            )));
        }

        let mut seen = HashSet::with_capacity(new_order.len());
        let mut transforms = Vec::with_capacity(new_order.len());
        for &id in new_order {
            if !seen.insert(id) {
                return Err(StagegraphError::invalid_reorder(format!(
                    "`{id}` appears more than once"
                )));
            }
            let transform = model.transform(id).ok_or_else(|| {
                StagegraphError::invalid_reorder(format!("`{id}` is not in this pipeline"))
            })?;
            transforms.push(transform.clone());
        }

        trace!(order:? = new_order; "Reordered transforms");
        Ok(model.clone().with_transforms(transforms))
    }

    /// Collapses the chain into a summary node. No-op if already collapsed
    /// or if there are no transforms.
    pub fn collapse(model: &PipelineGraphModel) -> PipelineGraphModel {
        model.clone().with_collapsed(true)
    }

    /// Expands the chain into one node per transform. No-op if already
    /// expanded.
    pub fn expand(model: &PipelineGraphModel) -> PipelineGraphModel {
        model.clone().with_collapsed(false)
    }
}
