//! Stagegraph - A composition graph engine for data-integration pipelines.
//!
//! A pipeline is a source, an ordered chain of transforms and a destination.
//! This crate keeps that pipeline in an immutable [`PipelineGraphModel`],
//! changes it only through [`GraphEditor`] operations, and projects every
//! model into a renderable [`RenderPayload`] of positioned nodes and edges.

pub mod config;
pub mod editor;
pub mod layout;
pub mod model;
pub mod path;
pub mod payload;
pub mod reorder;
pub mod validate;

mod error;

pub use stagegraph_core::{geometry, identifier, stage};

pub use error::StagegraphError;

use log::{debug, info};

use config::{AppConfig, LayoutMode};
use layout::LayoutEngine;
use path::EdgePathBuilder;

pub use editor::GraphEditor;
pub use model::PipelineGraphModel;
pub use payload::RenderPayload;
pub use reorder::ReorderSession;
pub use validate::{MissingStage, Validation};

/// Builder for projecting pipeline models into render payloads.
///
/// This runs the layout and edge path stages with a shared configuration.
///
/// # Examples
///
/// ```rust
/// use stagegraph::{GraphBuilder, GraphEditor, PipelineGraphModel, config::AppConfig};
/// use stagegraph::{identifier::Id, stage::TransformStage};
///
/// let model = GraphEditor::add_transform(
///     &PipelineGraphModel::new(),
///     TransformStage::new(Id::new("mask"), "Mask fields"),
/// )
/// .expect("Failed to add transform");
///
/// let builder = GraphBuilder::new(AppConfig::default());
/// let payload = builder.render(&model).expect("Failed to render");
/// assert_eq!(payload.edges().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct GraphBuilder {
    config: AppConfig,
}

impl GraphBuilder {
    /// Create a new graph builder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration including layout and path settings
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Returns the builder's configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Render a model with the configured layout mode.
    ///
    /// # Errors
    ///
    /// Returns `StagegraphError` if the edge path cannot be built.
    pub fn render(&self, model: &PipelineGraphModel) -> Result<RenderPayload, StagegraphError> {
        self.render_with_mode(model, self.config.layout().mode())
    }

    /// Render a model for a specific designer view.
    ///
    /// # Arguments
    ///
    /// * `model` - The latest pipeline model
    /// * `mode` - Read-only (create and overview) or editable (edit view)
    ///
    /// # Errors
    ///
    /// Returns `StagegraphError` if the edge path cannot be built.
    pub fn render_with_mode(
        &self,
        model: &PipelineGraphModel,
        mode: LayoutMode,
    ) -> Result<RenderPayload, StagegraphError> {
        info!(
            mode:% = mode,
            transform_count = model.transform_count(),
            collapsed = model.is_transform_chain_collapsed();
            "Rendering pipeline"
        );

        let engine = LayoutEngine::new(self.config.layout().clone()).with_mode(mode);
        let nodes = engine.layout(model);
        debug!(nodes_count = nodes.len(); "Layout calculated");

        let edges = EdgePathBuilder::new(self.config.path().clone()).build(model, &nodes)?;
        debug!(edges_count = edges.len(); "Edges built");

        Ok(RenderPayload::new(nodes, edges))
    }

    /// Checks whether the pipeline has both endpoint stages.
    pub fn validate(&self, model: &PipelineGraphModel) -> Validation {
        let validation = validate::validate(model);
        debug!(can_proceed = validation.can_proceed(); "Pipeline validated");
        validation
    }
}
