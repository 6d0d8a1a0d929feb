// SPDX-License-Identifier: MIT OR Apache-2.0
//! Edge definitions for the diagram model.

use crate::cell::CellId;
use crate::geometry::Point;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An edge between two nodes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    /// Unique cell ID
    pub id: CellId,
    /// Source node ID
    pub source: CellId,
    /// Target node ID
    pub target: CellId,
    /// Intermediate routing points, in order from source to target
    #[serde(default)]
    pub vertices: Vec<Point>,
    /// Opaque style/attribute payload
    #[serde(default)]
    pub attrs: Map<String, Value>,
}

impl Edge {
    /// Create a new edge with a generated id
    pub fn new(source: impl Into<CellId>, target: impl Into<CellId>) -> Self {
        Self {
            id: CellId::new(),
            source: source.into(),
            target: target.into(),
            vertices: Vec::new(),
            attrs: Map::new(),
        }
    }

    /// Set the edge id
    pub fn with_id(mut self, id: impl Into<CellId>) -> Self {
        self.id = id.into();
        self
    }

    /// Set an attribute value
    pub fn with_attr(mut self, key: impl Into<String>, value: Value) -> Self {
        self.attrs.insert(key.into(), value);
        self
    }

    /// Replace the routing points
    pub fn set_vertices(&mut self, vertices: Vec<Point>) {
        self.vertices = vertices;
    }

    /// Check if this edge touches a specific node
    pub fn involves_node(&self, node_id: &CellId) -> bool {
        self.source == *node_id || self.target == *node_id
    }

    /// Render the whole edge as a JSON value, e.g. for payload embedding
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_involves_node() {
        let edge = Edge::new("a", "b").with_id("e1");
        assert!(edge.involves_node(&CellId::from("a")));
        assert!(edge.involves_node(&CellId::from("b")));
        assert!(!edge.involves_node(&CellId::from("c")));
    }

    #[test]
    fn test_set_vertices_replaces() {
        let mut edge = Edge::new("a", "b");
        edge.set_vertices(vec![Point::new(1.0, 1.0)]);
        edge.set_vertices(vec![Point::new(2.0, 2.0), Point::new(3.0, 3.0)]);
        assert_eq!(edge.vertices.len(), 2);
    }
}
