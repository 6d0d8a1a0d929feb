// SPDX-License-Identifier: MIT OR Apache-2.0
//! Layout descriptor - the engine's input schema.
//!
//! A descriptor is a root node with `children`, `edges` and a flat,
//! string-keyed directive map. The schema is JSON-shaped so it can cross a
//! serialization boundary unchanged.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Well-known directive keys.
pub mod keys {
    /// Algorithm selector: `layered`, `force` or `radial`
    pub const ALGORITHM: &str = "algorithm";
    /// Layered flow direction: `down`, `up`, `right` or `left`
    pub const DIRECTION: &str = "direction";
    /// Spacing between nodes within a layer
    pub const SPACING_NODE_NODE: &str = "spacing.node_node";
    /// Spacing between consecutive layers
    pub const SPACING_LAYER: &str = "spacing.layer";
    /// Clearance between edges and node borders
    pub const SPACING_EDGE_NODE: &str = "spacing.edge_node";
    /// Clearance between parallel edges
    pub const SPACING_EDGE_EDGE: &str = "spacing.edge_edge";
    /// Edge routing style: `orthogonal`, `polyline` or `splines`
    pub const EDGE_ROUTING: &str = "edge.routing";
    /// Margin around the finished layout
    pub const PADDING: &str = "padding";
    /// Barycenter ordering sweep count for the layered algorithm
    pub const LAYERED_SWEEPS: &str = "layered.sweeps";
    /// Compaction strategy for the layered algorithm
    pub const LAYERED_COMPACTION: &str = "layered.compaction";
    /// Whether the layered algorithm favors straight edges
    pub const LAYERED_STRAIGHTEN: &str = "layered.straighten";
    /// Iteration count for the force simulation
    pub const FORCE_ITERATIONS: &str = "force.iterations";
}

/// Flow direction for ranked layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Layers stacked top to bottom
    #[default]
    Down,
    /// Layers stacked bottom to top
    Up,
    /// Layers flowing left to right
    Right,
    /// Layers flowing right to left
    Left,
}

impl Direction {
    /// Directive string for this direction
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Down => "down",
            Direction::Up => "up",
            Direction::Right => "right",
            Direction::Left => "left",
        }
    }

    /// Parse a directive string, `None` for unknown values
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "down" => Some(Direction::Down),
            "up" => Some(Direction::Up),
            "right" => Some(Direction::Right),
            "left" => Some(Direction::Left),
            _ => None,
        }
    }

    /// Whether layers advance along the horizontal axis
    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Right | Direction::Left)
    }
}

/// Edge routing style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoutingStyle {
    /// Axis-aligned segments
    #[default]
    Orthogonal,
    /// Straight segments between anchor points
    Polyline,
    /// Straight sections a renderer may draw as curves
    Splines,
}

impl RoutingStyle {
    /// Directive string for this style
    pub fn as_str(self) -> &'static str {
        match self {
            RoutingStyle::Orthogonal => "orthogonal",
            RoutingStyle::Polyline => "polyline",
            RoutingStyle::Splines => "splines",
        }
    }

    /// Parse a directive string, `None` for unknown values
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "orthogonal" => Some(RoutingStyle::Orthogonal),
            "polyline" => Some(RoutingStyle::Polyline),
            "splines" => Some(RoutingStyle::Splines),
            _ => None,
        }
    }
}

/// String-keyed tuning directives attached to a descriptor root
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directives(IndexMap<String, String>);

impl Directives {
    /// Create an empty directive map
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a directive, replacing any previous value
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Raw string value for a key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Value parsed as `f32`; unparseable values read as absent
    pub fn get_f32(&self, key: &str) -> Option<f32> {
        self.get(key).and_then(|v| v.parse().ok())
    }

    /// Value parsed as `usize`; unparseable values read as absent
    pub fn get_usize(&self, key: &str) -> Option<usize> {
        self.get(key).and_then(|v| v.parse().ok())
    }

    /// Parsed flow direction, defaulting when absent or unknown
    pub fn direction(&self) -> Direction {
        self.get(keys::DIRECTION)
            .and_then(Direction::parse)
            .unwrap_or_default()
    }

    /// Parsed routing style, defaulting when absent or unknown
    pub fn routing(&self) -> RoutingStyle {
        self.get(keys::EDGE_ROUTING)
            .and_then(RoutingStyle::parse)
            .unwrap_or_default()
    }

    /// Merge `other` into `self`; entries of `other` win
    pub fn merge(&mut self, other: &Directives) {
        for (key, value) in &other.0 {
            self.0.insert(key.clone(), value.clone());
        }
    }

    /// Iterate entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the map is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Directives {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// A child node of the descriptor root
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutChild {
    /// Identifier, preserved verbatim in the result
    pub id: String,
    /// Width the algorithm must reserve
    pub width: f32,
    /// Height the algorithm must reserve
    pub height: f32,
    /// Optional display label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Optional embedded payload, carried through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
}

/// An edge of the descriptor root
///
/// Endpoints are lists; the engine consumes the first entry of each.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutEdge {
    /// Identifier, preserved verbatim in the result
    pub id: String,
    /// Source node ids
    pub sources: Vec<String>,
    /// Target node ids
    pub targets: Vec<String>,
    /// Optional embedded payload, carried through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
}

/// The descriptor root handed to a layout engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutGraph {
    /// Root identifier
    pub id: String,
    /// Nodes to place
    #[serde(default)]
    pub children: Vec<LayoutChild>,
    /// Edges to route
    #[serde(default)]
    pub edges: Vec<LayoutEdge>,
    /// Tuning directives
    #[serde(default)]
    pub directives: Directives,
}

impl LayoutGraph {
    /// Create an empty descriptor with the given root id
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            children: Vec::new(),
            edges: Vec::new(),
            directives: Directives::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directive_merge_later_wins() {
        let mut base: Directives = [(keys::ALGORITHM, "layered"), (keys::DIRECTION, "down")]
            .into_iter()
            .collect();
        let overrides: Directives = [(keys::DIRECTION, "right")].into_iter().collect();
        base.merge(&overrides);
        assert_eq!(base.get(keys::DIRECTION), Some("right"));
        assert_eq!(base.get(keys::ALGORITHM), Some("layered"));
    }

    #[test]
    fn test_typed_accessors_ignore_garbage() {
        let mut directives = Directives::new();
        directives.set(keys::SPACING_LAYER, "not-a-number");
        assert_eq!(directives.get_f32(keys::SPACING_LAYER), None);
        directives.set(keys::SPACING_LAYER, "42.5");
        assert_eq!(directives.get_f32(keys::SPACING_LAYER), Some(42.5));
    }

    #[test]
    fn test_unknown_direction_falls_back() {
        let mut directives = Directives::new();
        directives.set(keys::DIRECTION, "sideways");
        assert_eq!(directives.direction(), Direction::Down);
    }

    #[test]
    fn test_descriptor_json_round_trip() {
        let mut graph = LayoutGraph::new("root");
        graph.children.push(LayoutChild {
            id: "a".into(),
            width: 80.0,
            height: 40.0,
            label: Some("Start".into()),
            payload: None,
        });
        graph.edges.push(LayoutEdge {
            id: "e1".into(),
            sources: vec!["a".into()],
            targets: vec!["a".into()],
            payload: None,
        });
        graph.directives.set(keys::ALGORITHM, "layered");

        let json = serde_json::to_string(&graph).expect("serialize");
        let back: LayoutGraph = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.children[0].id, "a");
        assert_eq!(back.edges[0].sources, vec!["a".to_string()]);
        assert_eq!(back.directives.get(keys::ALGORITHM), Some("layered"));
    }
}
