// SPDX-License-Identifier: MIT OR Apache-2.0
//! Layout options and directive construction.

use diaflow_engine::{keys, Direction, Directives, RoutingStyle};
use diaflow_graph::Size;
use serde::{Deserialize, Serialize};

/// Spacing values below this floor are raised to it unless the caller
/// configures a different floor on [`LayoutOptions`].
pub const DEFAULT_SPACING_FLOOR: f32 = 10.0;

/// Node size used when a node carries none of its own.
pub const DEFAULT_NODE_SIZE: Size = Size {
    width: 80.0,
    height: 40.0,
};

/// Layout algorithm selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Ranked layers, the flowchart workhorse
    #[default]
    Layered,
    /// Force-directed simulation
    Force,
    /// Even placement on a circle
    Radial,
}

impl Algorithm {
    /// Directive string for this algorithm
    pub fn as_str(self) -> &'static str {
        match self {
            Algorithm::Layered => "layered",
            Algorithm::Force => "force",
            Algorithm::Radial => "radial",
        }
    }
}

/// The four spacing values passed to the engine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spacing {
    /// Between nodes within a layer
    pub node_node: f32,
    /// Between consecutive layers
    pub layer: f32,
    /// Between edges and node borders
    pub edge_node: f32,
    /// Between parallel edges
    pub edge_edge: f32,
}

impl Spacing {
    /// Create a spacing set
    pub fn new(node_node: f32, layer: f32, edge_node: f32, edge_edge: f32) -> Self {
        Self {
            node_node,
            layer,
            edge_node,
            edge_edge,
        }
    }

    /// Every value multiplied by `factor`
    pub fn scaled(self, factor: f32) -> Self {
        Self {
            node_node: self.node_node * factor,
            layer: self.layer * factor,
            edge_node: self.edge_node * factor,
            edge_edge: self.edge_edge * factor,
        }
    }

    /// Every value raised to at least `floor`
    pub fn clamped(self, floor: f32) -> Self {
        Self {
            node_node: self.node_node.max(floor),
            layer: self.layer.max(floor),
            edge_node: self.edge_node.max(floor),
            edge_edge: self.edge_edge.max(floor),
        }
    }
}

impl Default for Spacing {
    fn default() -> Self {
        Self::new(50.0, 50.0, 30.0, 15.0)
    }
}

/// Options controlling graph -> descriptor conversion
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConvertOptions {
    /// Use a node's own size when it has one
    pub auto_size: bool,
    /// Size substituted for unmeasured nodes
    pub default_size: Size,
    /// Embed each cell's full JSON into the descriptor
    pub include_payload: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            auto_size: true,
            default_size: DEFAULT_NODE_SIZE,
            include_payload: false,
        }
    }
}

/// A complete layout configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutOptions {
    /// Algorithm to run
    pub algorithm: Algorithm,
    /// Flow direction for ranked layouts
    pub direction: Direction,
    /// Spacing values, clamped to [`LayoutOptions::spacing_floor`]
    pub spacing: Spacing,
    /// Minimum any spacing value may take in the built directives
    pub spacing_floor: f32,
    /// Edge routing style
    pub routing: RoutingStyle,
    /// Caller directives, merged last so they win over computed entries
    pub overrides: Directives,
    /// Conversion behavior
    pub convert: ConvertOptions,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Layered,
            direction: Direction::Down,
            spacing: Spacing::default(),
            spacing_floor: DEFAULT_SPACING_FLOOR,
            routing: RoutingStyle::Orthogonal,
            overrides: Directives::new(),
            convert: ConvertOptions::default(),
        }
    }
}

/// Tuning entries attached to every descriptor regardless of preset.
fn quality_directives() -> [(&'static str, &'static str); 3] {
    [
        (keys::LAYERED_SWEEPS, "4"),
        (keys::LAYERED_COMPACTION, "balanced"),
        (keys::LAYERED_STRAIGHTEN, "true"),
    ]
}

impl LayoutOptions {
    /// Build the full directive set for the engine.
    ///
    /// Merge order: algorithm and direction, clamped spacing, routing
    /// style, the fixed quality table, then caller overrides.
    pub fn directives(&self) -> Directives {
        let spacing = self.spacing.clamped(self.spacing_floor);
        let mut directives = Directives::new();
        directives.set(keys::ALGORITHM, self.algorithm.as_str());
        directives.set(keys::DIRECTION, self.direction.as_str());
        directives.set(keys::SPACING_NODE_NODE, spacing.node_node.to_string());
        directives.set(keys::SPACING_LAYER, spacing.layer.to_string());
        directives.set(keys::SPACING_EDGE_NODE, spacing.edge_node.to_string());
        directives.set(keys::SPACING_EDGE_EDGE, spacing.edge_edge.to_string());
        directives.set(keys::EDGE_ROUTING, self.routing.as_str());
        for (key, value) in quality_directives() {
            directives.set(key, value);
        }
        directives.merge(&self.overrides);
        directives
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spacing_floor_applies_to_every_value() {
        let options = LayoutOptions {
            spacing: Spacing::new(2.0, 5.0, 100.0, 0.0),
            ..LayoutOptions::default()
        };
        let directives = options.directives();
        assert_eq!(directives.get_f32(keys::SPACING_NODE_NODE), Some(10.0));
        assert_eq!(directives.get_f32(keys::SPACING_LAYER), Some(10.0));
        assert_eq!(directives.get_f32(keys::SPACING_EDGE_NODE), Some(100.0));
        assert_eq!(directives.get_f32(keys::SPACING_EDGE_EDGE), Some(10.0));
    }

    #[test]
    fn test_caller_overrides_win() {
        let mut overrides = Directives::new();
        overrides.set(keys::DIRECTION, "right");
        overrides.set("custom.flag", "on");
        let options = LayoutOptions {
            overrides,
            ..LayoutOptions::default()
        };
        let directives = options.directives();
        assert_eq!(directives.get(keys::DIRECTION), Some("right"));
        assert_eq!(directives.get("custom.flag"), Some("on"));
        // Computed entries that were not overridden survive.
        assert_eq!(directives.get(keys::ALGORITHM), Some("layered"));
    }

    #[test]
    fn test_quality_table_always_present() {
        let directives = LayoutOptions::default().directives();
        assert_eq!(directives.get_usize(keys::LAYERED_SWEEPS), Some(4));
        assert_eq!(directives.get(keys::LAYERED_COMPACTION), Some("balanced"));
    }

    #[test]
    fn test_scaled_spacing() {
        let spacing = Spacing::new(10.0, 20.0, 30.0, 40.0).scaled(1.5);
        assert_eq!(spacing, Spacing::new(15.0, 30.0, 45.0, 60.0));
    }
}
