//! The pipeline graph model: the single source of truth for a pipeline diagram.
//!
//! A [`PipelineGraphModel`] is never mutated in place. Edits go through
//! [`GraphEditor`](crate::editor::GraphEditor), which returns a fresh model,
//! and the node/edge lists are always recomputed from the latest model.

use std::collections::HashSet;

use log::trace;

use stagegraph_core::{
    identifier::Id,
    stage::{DestinationStage, SourceStage, TransformStage},
};

use crate::error::StagegraphError;

/// Shape of the transform chain as the layout sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainState {
    /// No transforms: the chain renders as a pass-through link.
    Empty,
    /// Every transform gets its own node.
    Expanded(usize),
    /// The chain renders as one summary node.
    Collapsed(usize),
}

impl ChainState {
    /// Number of transforms in the chain.
    pub fn count(self) -> usize {
        match self {
            ChainState::Empty => 0,
            ChainState::Expanded(count) | ChainState::Collapsed(count) => count,
        }
    }
}

/// Source, ordered transforms, destination, and the collapse flag.
///
/// Invariants held by every instance:
/// - transform ids are unique;
/// - the collapse flag is `false` whenever the chain is empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineGraphModel {
    source: Option<SourceStage>,
    destination: Option<DestinationStage>,
    transforms: Vec<TransformStage>,
    collapsed: bool,
}

impl PipelineGraphModel {
    /// Creates an empty model, as when entering the designer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a model from a persisted pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`StagegraphError::DuplicateStageId`] if two transforms share
    /// an id.
    pub fn from_parts(
        source: Option<SourceStage>,
        destination: Option<DestinationStage>,
        transforms: Vec<TransformStage>,
        collapsed: bool,
    ) -> Result<Self, StagegraphError> {
        let mut seen = HashSet::with_capacity(transforms.len());
        for transform in &transforms {
            if !seen.insert(transform.id()) {
                return Err(StagegraphError::DuplicateStageId(transform.id()));
            }
        }

        let collapsed = collapsed && !transforms.is_empty();
        trace!(transform_count = transforms.len(), collapsed; "Seeded pipeline model");

        Ok(Self {
            source,
            destination,
            transforms,
            collapsed,
        })
    }

    pub fn source(&self) -> Option<&SourceStage> {
        self.source.as_ref()
    }

    pub fn destination(&self) -> Option<&DestinationStage> {
        self.destination.as_ref()
    }

    /// Transforms in execution order.
    pub fn transforms(&self) -> &[TransformStage] {
        &self.transforms
    }

    pub fn transform_count(&self) -> usize {
        self.transforms.len()
    }

    /// Transform ids in execution order.
    pub fn transform_ids(&self) -> Vec<Id> {
        self.transforms.iter().map(TransformStage::id).collect()
    }

    pub fn transform(&self, id: Id) -> Option<&TransformStage> {
        self.transforms.iter().find(|transform| transform.id() == id)
    }

    pub fn contains_transform(&self, id: Id) -> bool {
        self.transform(id).is_some()
    }

    /// Whether the chain renders as a summary node.
    pub fn is_transform_chain_collapsed(&self) -> bool {
        self.collapsed
    }

    pub fn chain_state(&self) -> ChainState {
        match (self.transforms.len(), self.collapsed) {
            (0, _) => ChainState::Empty,
            (count, false) => ChainState::Expanded(count),
            (count, true) => ChainState::Collapsed(count),
        }
    }

    pub(crate) fn with_source(mut self, source: SourceStage) -> Self {
        self.source = Some(source);
        self
    }

    pub(crate) fn with_destination(mut self, destination: DestinationStage) -> Self {
        self.destination = Some(destination);
        self
    }

    /// Replaces the chain, keeping the collapse invariant.
    pub(crate) fn with_transforms(mut self, transforms: Vec<TransformStage>) -> Self {
        self.transforms = transforms;
        self.collapsed = self.collapsed && !self.transforms.is_empty();
        self
    }

    pub(crate) fn with_collapsed(mut self, collapsed: bool) -> Self {
        self.collapsed = collapsed && !self.transforms.is_empty();
        self
    }
}
