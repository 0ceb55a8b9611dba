//! Positioned render nodes produced by the layout engine.

use serde::Serialize;

use stagegraph_core::{
    geometry::{Bounds, Point, Size},
    identifier::Id,
    stage::{Predicate, Stage, TransformStage},
};

/// Stable ids of the render nodes.
///
/// Transform nodes are nested under the group id so that a stage named
/// `source` can never collide with the source node.
pub mod ids {
    use stagegraph_core::identifier::Id;

    pub fn source() -> Id {
        Id::new("source")
    }

    pub fn destination() -> Id {
        Id::new("destination")
    }

    /// Placeholder shown while the chain is empty.
    pub fn add_transformation() -> Id {
        Id::new("add_transformation")
    }

    /// Inline "add" node at the end of an expanded chain in editable mode.
    pub fn add_transform() -> Id {
        Id::new("add_transform")
    }

    pub fn transform_group() -> Id {
        Id::new("transform_group")
    }

    pub fn transform_summary() -> Id {
        Id::new("transform_summary")
    }

    pub fn transform(stage_id: Id) -> Id {
        transform_group().create_nested(stage_id)
    }
}

/// What a node stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Source,
    Transform,
    Destination,
    /// Box around the expanded transform nodes.
    TransformGroup,
    /// Single node standing in for a collapsed chain.
    TransformSummary,
    /// Affordance for adding a transform.
    AddTransform,
}

/// Filter badge shown on a transform that has a predicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PredicateBadge {
    label: String,
    negate: bool,
}

impl PredicateBadge {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn negate(&self) -> bool {
        self.negate
    }
}

impl From<&Predicate> for PredicateBadge {
    fn from(predicate: &Predicate) -> Self {
        Self {
            label: predicate.label().to_string(),
            negate: predicate.negate(),
        }
    }
}

/// Data a renderer needs to draw the node's content.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodePayload {
    /// A concrete stage of the pipeline.
    Stage {
        stage: Stage,
        #[serde(skip_serializing_if = "Option::is_none")]
        badge: Option<PredicateBadge>,
    },
    /// A slot with nothing chosen yet.
    Placeholder { label: String },
    Group {
        label: String,
        transform_count: usize,
    },
    /// The full ordered chain behind a collapsed summary node.
    Summary {
        label: String,
        transforms: Vec<TransformStage>,
    },
}

impl NodePayload {
    pub(crate) fn stage(stage: impl Into<Stage>) -> Self {
        let stage = stage.into();
        let badge = match &stage {
            Stage::Transform(transform) => transform.predicate().map(PredicateBadge::from),
            Stage::Source(_) | Stage::Destination(_) => None,
        };
        Self::Stage { stage, badge }
    }

    pub(crate) fn placeholder(label: &str) -> Self {
        Self::Placeholder {
            label: label.to_string(),
        }
    }
}

/// A positioned node of the pipeline diagram.
///
/// `position` is the top-left corner in diagram coordinates. Transform and
/// inline add nodes name the group as their `parent`, but their positions are
/// absolute all the same.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    id: Id,
    kind: NodeKind,
    position: Point,
    #[serde(skip_serializing_if = "Option::is_none")]
    size: Option<Size>,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent: Option<Id>,
    payload: NodePayload,
}

impl Node {
    pub(crate) fn new(
        id: Id,
        kind: NodeKind,
        position: Point,
        size: Size,
        payload: NodePayload,
    ) -> Self {
        Self {
            id,
            kind,
            position,
            size: Some(size),
            parent: None,
            payload,
        }
    }

    pub(crate) fn with_parent(mut self, parent: Id) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Top-left corner.
    pub fn position(&self) -> Point {
        self.position
    }

    pub fn size(&self) -> Option<Size> {
        self.size
    }

    pub fn parent(&self) -> Option<Id> {
        self.parent
    }

    pub fn payload(&self) -> &NodePayload {
        &self.payload
    }

    /// Bounding box of the node; a node without a size is a point.
    pub fn bounds(&self) -> Bounds {
        Bounds::new_from_top_left(self.position, self.size.unwrap_or_default())
    }
}
