//! Layout engine for pipeline diagrams.
//!
//! [`LayoutEngine::layout`] maps a [`PipelineGraphModel`] to a complete list
//! of positioned [`Node`]s. It is a pure function of the model, the
//! configuration and the [`LayoutMode`]: the destination position in
//! particular is derived from the chain every time and never carried over
//! from a previous layout.
//!
//! ```text
//!  empty        [source]      (+ add)      [destination]
//!  expanded     [source]  ┌ [t1] [t2] … ┐  [destination]
//!  collapsed    [source]     [summary]     [destination]
//! ```

mod node;

pub use node::{Node, NodeKind, NodePayload, PredicateBadge, ids};

use log::{debug, trace};

use stagegraph_core::{
    geometry::{Point, Size},
    stage::{Stage, TransformStage},
};

use crate::{
    config::{LayoutConfig, LayoutMode},
    model::{ChainState, PipelineGraphModel},
};

const SOURCE_LABEL: &str = "Source";
const DESTINATION_LABEL: &str = "Destination";
const TRANSFORMATION_LABEL: &str = "Transformation";
const GROUP_LABEL: &str = "Transform";

/// Computes node positions for a pipeline model.
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    config: LayoutConfig,
    mode: LayoutMode,
}

impl LayoutEngine {
    /// Creates an engine using the configuration's default mode.
    pub fn new(config: LayoutConfig) -> Self {
        let mode = config.mode();
        Self { config, mode }
    }

    /// Overrides the layout mode (builder style).
    pub fn with_mode(mut self, mode: LayoutMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn mode(&self) -> LayoutMode {
        self.mode
    }

    /// Lays out every node of the diagram.
    ///
    /// Nodes come in drawing order: source, chain nodes (a group always
    /// precedes its children), destination.
    pub fn layout(&self, model: &PipelineGraphModel) -> Vec<Node> {
        let chain = model.chain_state();
        let mut nodes = Vec::with_capacity(model.transform_count() + 4);

        nodes.push(self.source_node(model));
        match chain {
            ChainState::Empty => nodes.push(self.placeholder_node()),
            ChainState::Expanded(_) => self.push_expanded_chain(model.transforms(), &mut nodes),
            ChainState::Collapsed(_) => nodes.push(self.summary_node(model.transforms())),
        }
        nodes.push(self.destination_node(model, chain));

        debug!(
            mode:% = self.mode,
            chain:? = chain,
            nodes_count = nodes.len();
            "Pipeline layout calculated"
        );
        nodes
    }

    /// X coordinate of the first transform node.
    pub fn chain_base_x(&self) -> f32 {
        self.config.origin().x() + self.config.group_offset() + self.config.group_padding()
    }

    /// X coordinate of the destination node for the given chain shape.
    pub fn destination_x(&self, chain: ChainState) -> f32 {
        match chain {
            ChainState::Empty | ChainState::Collapsed(_) => self.compact_destination_x(),
            ChainState::Expanded(count) => {
                self.chain_base_x()
                    + self.config.step() * count as f32
                    + self.add_slot_width()
                    + self.config.destination_margin()
            }
        }
    }

    fn compact_destination_x(&self) -> f32 {
        self.config.origin().x() + self.config.compact_destination_offset()
    }

    fn add_slot_width(&self) -> f32 {
        match self.mode {
            LayoutMode::ReadOnly => 0.0,
            LayoutMode::Editable => self.config.add_slot_width(),
        }
    }

    /// Y coordinate of the line all nodes are vertically centered on.
    fn flow_line_y(&self) -> f32 {
        self.config.origin().y() + self.config.data_node_size().height() / 2.0
    }

    /// Top-left corner that centers a node of `size` on the flow line at `x`.
    fn on_flow_line(&self, x: f32, size: Size) -> Point {
        Point::new(x, self.flow_line_y() - size.height() / 2.0)
    }

    /// Top-left corner that centers a node of `size` in the compact gap
    /// between source and destination.
    fn centered_in_gap(&self, size: Size) -> Point {
        let gap_start = self.config.origin().x() + self.config.data_node_size().width();
        let gap_end = self.compact_destination_x();
        let x = (gap_start + gap_end) / 2.0 - size.width() / 2.0;
        self.on_flow_line(x, size)
    }

    fn source_node(&self, model: &PipelineGraphModel) -> Node {
        let payload = match model.source() {
            Some(source) => NodePayload::stage(source.clone()),
            None => NodePayload::placeholder(SOURCE_LABEL),
        };
        Node::new(
            ids::source(),
            NodeKind::Source,
            self.config.origin(),
            self.config.data_node_size(),
            payload,
        )
    }

    fn destination_node(&self, model: &PipelineGraphModel, chain: ChainState) -> Node {
        let payload = match model.destination() {
            Some(destination) => NodePayload::stage(destination.clone()),
            None => NodePayload::placeholder(DESTINATION_LABEL),
        };
        let size = self.config.data_node_size();
        let position = Point::new(self.destination_x(chain), self.config.origin().y());
        Node::new(ids::destination(), NodeKind::Destination, position, size, payload)
    }

    fn placeholder_node(&self) -> Node {
        let size = self.config.placeholder_size();
        Node::new(
            ids::add_transformation(),
            NodeKind::AddTransform,
            self.centered_in_gap(size),
            size,
            NodePayload::placeholder(TRANSFORMATION_LABEL),
        )
    }

    fn summary_node(&self, transforms: &[TransformStage]) -> Node {
        let size = self.config.summary_size();
        Node::new(
            ids::transform_summary(),
            NodeKind::TransformSummary,
            self.centered_in_gap(size),
            size,
            NodePayload::Summary {
                label: TRANSFORMATION_LABEL.to_string(),
                transforms: transforms.to_vec(),
            },
        )
    }

    fn push_expanded_chain(&self, transforms: &[TransformStage], nodes: &mut Vec<Node>) {
        let step = self.config.step();
        let count = transforms.len();
        let group_id = ids::transform_group();

        let group_size = Size::new(
            step * count as f32 - self.config.group_gap(),
            self.config.group_height(),
        )
        .widen(self.add_slot_width());
        let group_x = self.config.origin().x() + self.config.group_offset();
        nodes.push(Node::new(
            group_id,
            NodeKind::TransformGroup,
            self.on_flow_line(group_x, group_size),
            group_size,
            NodePayload::Group {
                label: GROUP_LABEL.to_string(),
                transform_count: count,
            },
        ));

        let base_x = self.chain_base_x();
        let transform_size = self.config.transform_node_size();
        for (index, transform) in transforms.iter().enumerate() {
            let x = base_x + step * index as f32;
            trace!(transform:% = transform.id(), index, x; "Placing transform node");
            nodes.push(
                Node::new(
                    ids::transform(transform.id()),
                    NodeKind::Transform,
                    self.on_flow_line(x, transform_size),
                    transform_size,
                    NodePayload::stage(Stage::Transform(transform.clone())),
                )
                .with_parent(group_id),
            );
        }

        if self.mode == LayoutMode::Editable {
            let size = self.config.add_node_size();
            let x = base_x + step * count as f32;
            nodes.push(
                Node::new(
                    ids::add_transform(),
                    NodeKind::AddTransform,
                    self.on_flow_line(x, size),
                    size,
                    NodePayload::placeholder(TRANSFORMATION_LABEL),
                )
                .with_parent(group_id),
            );
        }
    }
}
