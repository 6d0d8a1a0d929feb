// SPDX-License-Identifier: MIT OR Apache-2.0
//! Graph container for diagram cells.

use crate::cell::CellId;
use crate::edge::Edge;
use crate::geometry::Rect;
use crate::node::Node;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A diagram graph
///
/// Cells are stored in insertion order, which is also the order layout
/// conversion walks them in.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Graph {
    nodes: IndexMap<CellId, Node>,
    edges: IndexMap<CellId, Edge>,
}

impl Graph {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node to the graph, replacing any node with the same id
    pub fn add_node(&mut self, node: Node) -> CellId {
        let id = node.id.clone();
        self.nodes.insert(id.clone(), node);
        id
    }

    /// Add an edge to the graph
    ///
    /// Both endpoints must already be present.
    pub fn add_edge(&mut self, edge: Edge) -> Result<CellId, EdgeError> {
        if !self.nodes.contains_key(&edge.source) {
            return Err(EdgeError::EndpointNotFound(edge.source.clone()));
        }
        if !self.nodes.contains_key(&edge.target) {
            return Err(EdgeError::EndpointNotFound(edge.target.clone()));
        }
        let id = edge.id.clone();
        self.edges.insert(id.clone(), edge);
        Ok(id)
    }

    /// Remove a node and every edge touching it
    pub fn remove_node(&mut self, node_id: &CellId) -> Option<Node> {
        self.edges.retain(|_, e| !e.involves_node(node_id));
        self.nodes.shift_remove(node_id)
    }

    /// Remove an edge
    pub fn remove_edge(&mut self, edge_id: &CellId) -> Option<Edge> {
        self.edges.shift_remove(edge_id)
    }

    /// Get a node by ID
    pub fn node(&self, node_id: &CellId) -> Option<&Node> {
        self.nodes.get(node_id)
    }

    /// Get a mutable node by ID
    pub fn node_mut(&mut self, node_id: &CellId) -> Option<&mut Node> {
        self.nodes.get_mut(node_id)
    }

    /// Get an edge by ID
    pub fn edge(&self, edge_id: &CellId) -> Option<&Edge> {
        self.edges.get(edge_id)
    }

    /// Get a mutable edge by ID
    pub fn edge_mut(&mut self, edge_id: &CellId) -> Option<&mut Edge> {
        self.edges.get_mut(edge_id)
    }

    /// Iterate all nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Iterate all edges in insertion order
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    /// Iterate edges touching a node
    pub fn edges_for_node<'a>(&'a self, node_id: &'a CellId) -> impl Iterator<Item = &'a Edge> {
        self.edges.values().filter(move |e| e.involves_node(node_id))
    }

    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Bounding rectangle of all placed nodes, `None` for an empty graph
    pub fn bounds(&self) -> Option<Rect> {
        let mut iter = self.nodes.values();
        let first = iter.next()?.bounds();
        Some(iter.fold(first, |acc, node| acc.union(&node.bounds())))
    }
}

/// Error when inserting an edge
#[derive(Debug, thiserror::Error)]
pub enum EdgeError {
    /// An endpoint id does not name a node in the graph
    #[error("Edge endpoint not found: {0}")]
    EndpointNotFound(CellId),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_graph() -> Graph {
        let mut graph = Graph::new();
        graph.add_node(Node::with_id("a").with_size(80.0, 40.0));
        graph.add_node(Node::with_id("b").with_position(100.0, 100.0).with_size(80.0, 40.0));
        graph
            .add_edge(Edge::new("a", "b").with_id("e1"))
            .expect("endpoints exist");
        graph
    }

    #[test]
    fn test_add_edge_validates_endpoints() {
        let mut graph = Graph::new();
        graph.add_node(Node::with_id("a"));
        let err = graph.add_edge(Edge::new("a", "missing"));
        assert!(matches!(err, Err(EdgeError::EndpointNotFound(_))));
    }

    #[test]
    fn test_remove_node_drops_incident_edges() {
        let mut graph = sample_graph();
        graph.remove_node(&CellId::from("a"));
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_bounds_covers_all_nodes() {
        let graph = sample_graph();
        let bounds = graph.bounds().expect("non-empty");
        assert_eq!(bounds, Rect::new(0.0, 0.0, 180.0, 140.0));
    }

    #[test]
    fn test_bounds_empty_graph() {
        assert!(Graph::new().bounds().is_none());
    }
}
