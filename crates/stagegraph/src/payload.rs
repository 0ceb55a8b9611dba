//! The `{ nodes, edges }` payload handed to a diagram renderer.

use serde::Serialize;

use stagegraph_core::identifier::Id;

use crate::{
    layout::{Node, NodeKind},
    path::Edge,
};

/// Everything a renderer needs to draw one pipeline diagram.
///
/// Always recomputed from the latest model; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderPayload {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl RenderPayload {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node(&self, id: Id) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id() == id)
    }

    pub fn nodes_of_kind(&self, kind: NodeKind) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(move |node| node.kind() == kind)
    }
}
