//! Edge paths for pipeline diagrams.
//!
//! The pipeline draws as one continuous edge from the source node to the
//! destination node. Its waypoints depend on the chain shape:
//!
//! - empty chain or a single expanded transform: a two-segment curve bowed
//!   upward through the midpoint;
//! - collapsed chain or several transforms: source to the start of the chain
//!   region, a flat run across it, then on to the destination.

use std::fmt::Write as _;

use log::debug;
use serde::Serialize;

use stagegraph_core::{
    geometry::{Bounds, Point},
    identifier::Id,
};

use crate::{
    config::PathConfig,
    error::StagegraphError,
    layout::{Node, ids},
    model::{ChainState, PipelineGraphModel},
};

/// Timing hint for the flow animation along an edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnimationHint {
    duration_secs: f32,
}

impl AnimationHint {
    pub fn duration_secs(&self) -> f32 {
        self.duration_secs
    }
}

/// A drawable connection between two nodes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Edge {
    id: Id,
    from: Id,
    to: Id,
    waypoints: Vec<Point>,
    animation: AnimationHint,
    path: String,
}

impl Edge {
    fn new(id: Id, from: Id, to: Id, waypoints: Vec<Point>, animation: AnimationHint) -> Self {
        let path = path_data(&waypoints);
        Self {
            id,
            from,
            to,
            waypoints,
            animation,
            path,
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn from(&self) -> Id {
        self.from
    }

    pub fn to(&self) -> Id {
        self.to
    }

    /// Ordered points the edge passes through, first and last on the
    /// connected nodes.
    pub fn waypoints(&self) -> &[Point] {
        &self.waypoints
    }

    pub fn animation(&self) -> AnimationHint {
        self.animation
    }

    /// SVG path data joining the waypoints with horizontal cubic curves.
    pub fn path_data(&self) -> &str {
        &self.path
    }
}

/// Creates path data for a chain of horizontal cubic bezier segments.
///
/// Each segment keeps both control points at the segment's middle x, so the
/// curve leaves and enters every waypoint horizontally.
fn path_data(waypoints: &[Point]) -> String {
    let Some((first, rest)) = waypoints.split_first() else {
        return String::new();
    };

    let mut data = format!("M {} {}", first.x(), first.y());
    let mut previous = *first;
    for point in rest {
        let ctrl_x = previous.midpoint(*point).x();
        // Writing to a String cannot fail.
        let _ = write!(
            data,
            " C {} {}, {} {}, {} {}",
            ctrl_x,
            previous.y(),
            ctrl_x,
            point.y(),
            point.x(),
            point.y()
        );
        previous = *point;
    }
    data
}

/// Builds the data-flow edge for a laid-out pipeline.
#[derive(Debug, Clone, Default)]
pub struct EdgePathBuilder {
    config: PathConfig,
}

impl EdgePathBuilder {
    pub fn new(config: PathConfig) -> Self {
        Self { config }
    }

    /// Computes the edges connecting the stages of `model`.
    ///
    /// `nodes` must be the layout of the same model.
    ///
    /// # Errors
    ///
    /// Returns [`StagegraphError::Layout`] if `nodes` has no source or no
    /// destination node.
    pub fn build(
        &self,
        model: &PipelineGraphModel,
        nodes: &[Node],
    ) -> Result<Vec<Edge>, StagegraphError> {
        let source = find_bounds(nodes, ids::source())?;
        let destination = find_bounds(nodes, ids::destination())?;

        let start = source.right_middle();
        let end = destination.left_middle();
        let lifted_y = start.y() - self.config.bow_height();

        let chain = model.chain_state();
        let region = match chain {
            ChainState::Empty | ChainState::Expanded(1) => None,
            ChainState::Expanded(_) => bounds_of(nodes, ids::transform_group()),
            ChainState::Collapsed(_) => bounds_of(nodes, ids::transform_summary()),
        };

        let waypoints = match region {
            Some(region) => vec![
                start,
                Point::new(region.min_x(), lifted_y),
                Point::new(region.max_x(), lifted_y),
                end,
            ],
            None => vec![start, start.midpoint(end).with_y(lifted_y), end],
        };

        let animation = AnimationHint {
            duration_secs: self.config.base_duration_secs() + chain.count() as f32,
        };

        debug!(
            chain:? = chain,
            waypoints_count = waypoints.len(),
            duration_secs = animation.duration_secs;
            "Flow path built"
        );

        Ok(vec![Edge::new(
            Id::new("complete-flow-path"),
            ids::source(),
            ids::destination(),
            waypoints,
            animation,
        )])
    }
}

fn bounds_of(nodes: &[Node], id: Id) -> Option<Bounds> {
    nodes.iter().find(|node| node.id() == id).map(Node::bounds)
}

fn find_bounds(nodes: &[Node], id: Id) -> Result<Bounds, StagegraphError> {
    bounds_of(nodes, id)
        .ok_or_else(|| StagegraphError::Layout(format!("node list has no `{id}` node")))
}
