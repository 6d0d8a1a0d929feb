// SPDX-License-Identifier: MIT OR Apache-2.0
//! Named layout presets and density-adaptive selection.

use crate::options::{Algorithm, ConvertOptions, LayoutOptions, Spacing, DEFAULT_SPACING_FLOOR};
use diaflow_engine::{keys, Direction, Directives, RoutingStyle};
use diaflow_graph::{CellId, Graph};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A named, pre-built configuration bundle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preset {
    /// Top-to-bottom layered flow with orthogonal edges
    #[default]
    Flowchart,
    /// Flowchart with tightened spacing for very large diagrams
    FlowchartCompact,
    /// Left-to-right layered tree
    Hierarchy,
    /// Hierarchy with generous spacing for small, sparse diagrams
    HierarchyWide,
    /// Force-directed layout with curved edges for dense graphs
    Network,
    /// Radial ring
    Circular,
}

impl Preset {
    /// Every known preset
    pub const ALL: [Preset; 6] = [
        Preset::Flowchart,
        Preset::FlowchartCompact,
        Preset::Hierarchy,
        Preset::HierarchyWide,
        Preset::Network,
        Preset::Circular,
    ];

    /// The preset's name
    pub fn name(self) -> &'static str {
        match self {
            Preset::Flowchart => "flowchart",
            Preset::FlowchartCompact => "flowchart-compact",
            Preset::Hierarchy => "hierarchy",
            Preset::HierarchyWide => "hierarchy-wide",
            Preset::Network => "network",
            Preset::Circular => "circular",
        }
    }

    /// Look a preset up by name; unknown names fall back to `flowchart`.
    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|preset| preset.name() == name)
            .unwrap_or_default()
    }

    /// The complete configuration bundle for this preset.
    pub fn options(self) -> LayoutOptions {
        let (algorithm, direction, spacing, routing) = match self {
            Preset::Flowchart => (
                Algorithm::Layered,
                Direction::Down,
                Spacing::new(50.0, 50.0, 30.0, 15.0),
                RoutingStyle::Orthogonal,
            ),
            Preset::FlowchartCompact => (
                Algorithm::Layered,
                Direction::Down,
                Spacing::new(25.0, 30.0, 20.0, 10.0),
                RoutingStyle::Orthogonal,
            ),
            Preset::Hierarchy => (
                Algorithm::Layered,
                Direction::Right,
                Spacing::new(40.0, 80.0, 30.0, 15.0),
                RoutingStyle::Polyline,
            ),
            Preset::HierarchyWide => (
                Algorithm::Layered,
                Direction::Right,
                Spacing::new(80.0, 120.0, 50.0, 25.0),
                RoutingStyle::Polyline,
            ),
            Preset::Network => (
                Algorithm::Force,
                Direction::Down,
                Spacing::new(60.0, 60.0, 40.0, 20.0),
                RoutingStyle::Splines,
            ),
            Preset::Circular => (
                Algorithm::Radial,
                Direction::Down,
                Spacing::new(40.0, 40.0, 30.0, 15.0),
                RoutingStyle::Polyline,
            ),
        };

        let mut overrides = Directives::new();
        match self {
            Preset::FlowchartCompact => overrides.set(keys::LAYERED_COMPACTION, "aggressive"),
            Preset::Network => overrides.set(keys::FORCE_ITERATIONS, "400"),
            _ => {}
        }

        LayoutOptions {
            algorithm,
            direction,
            spacing,
            spacing_floor: DEFAULT_SPACING_FLOOR,
            routing,
            overrides,
            convert: ConvertOptions::default(),
        }
    }
}

/// Structural measurements driving preset selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphProfile {
    /// Number of nodes
    pub node_count: usize,
    /// Number of edges
    pub edge_count: usize,
    /// Highest degree over all nodes
    pub max_degree: usize,
}

impl GraphProfile {
    /// Measure a graph
    pub fn of(graph: &Graph) -> Self {
        let mut degrees: HashMap<&CellId, usize> = HashMap::new();
        for edge in graph.edges() {
            *degrees.entry(&edge.source).or_insert(0) += 1;
            *degrees.entry(&edge.target).or_insert(0) += 1;
        }
        Self {
            node_count: graph.node_count(),
            edge_count: graph.edge_count(),
            max_degree: degrees.values().copied().max().unwrap_or(0),
        }
    }

    /// Edges per node; zero for an empty graph
    pub fn density(&self) -> f32 {
        if self.node_count == 0 {
            0.0
        } else {
            self.edge_count as f32 / self.node_count as f32
        }
    }
}

/// Cutoffs for density-adaptive preset selection.
///
/// These are tuning values, not derived quantities; override any of them
/// when the defaults fight a particular corpus of diagrams.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DensityThresholds {
    /// At most this many nodes counts as a small diagram
    pub small_nodes: usize,
    /// Below this density a small diagram is considered sparse
    pub sparse_ratio: f32,
    /// Degrees up to this bound keep the flowchart preset viable
    pub bounded_degree: usize,
    /// At most this many nodes counts as a moderate diagram
    pub moderate_nodes: usize,
    /// Above this density the diagram is treated as a network
    pub dense_ratio: f32,
    /// Above this degree the diagram is treated as a network
    pub high_degree: usize,
    /// Above this many nodes the compact preset takes over
    pub large_nodes: usize,
    /// Node count per unit of extra spacing scale
    pub scale_divisor: f32,
    /// Upper bound on the spacing scale factor
    pub scale_cap: f32,
}

impl Default for DensityThresholds {
    fn default() -> Self {
        Self {
            small_nodes: 20,
            sparse_ratio: 1.2,
            bounded_degree: 4,
            moderate_nodes: 80,
            dense_ratio: 2.5,
            high_degree: 8,
            large_nodes: 300,
            scale_divisor: 200.0,
            scale_cap: 1.6,
        }
    }
}

/// Pick a preset for a graph's structure.
pub fn select_preset(profile: &GraphProfile, thresholds: &DensityThresholds) -> Preset {
    let density = profile.density();
    if profile.node_count <= thresholds.small_nodes && density < thresholds.sparse_ratio {
        Preset::HierarchyWide
    } else if profile.max_degree <= thresholds.bounded_degree
        && profile.node_count <= thresholds.moderate_nodes
    {
        Preset::Flowchart
    } else if density > thresholds.dense_ratio || profile.max_degree > thresholds.high_degree {
        Preset::Network
    } else if profile.node_count > thresholds.large_nodes {
        Preset::FlowchartCompact
    } else {
        Preset::Hierarchy
    }
}

/// Select a preset and scale its spacing with the node count.
///
/// The factor grows linearly from 1.0 and saturates at the configured cap.
pub fn adaptive_options(profile: &GraphProfile, thresholds: &DensityThresholds) -> LayoutOptions {
    let preset = select_preset(profile, thresholds);
    let factor =
        (1.0 + profile.node_count as f32 / thresholds.scale_divisor).min(thresholds.scale_cap);
    let mut options = preset.options();
    options.spacing = options.spacing.scaled(factor);
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use diaflow_graph::{Edge, Node};

    fn profile(node_count: usize, edge_count: usize, max_degree: usize) -> GraphProfile {
        GraphProfile {
            node_count,
            edge_count,
            max_degree,
        }
    }

    #[test]
    fn test_unknown_name_falls_back_to_flowchart() {
        assert_eq!(Preset::from_name("does-not-exist"), Preset::Flowchart);
        assert_eq!(
            Preset::from_name("does-not-exist").options(),
            Preset::Flowchart.options()
        );
    }

    #[test]
    fn test_every_name_round_trips() {
        for preset in Preset::ALL {
            assert_eq!(Preset::from_name(preset.name()), preset);
        }
    }

    #[test]
    fn test_profile_measures_degree() {
        let mut graph = Graph::new();
        for id in ["a", "b", "c"] {
            graph.add_node(Node::with_id(id));
        }
        graph.add_edge(Edge::new("a", "b")).expect("endpoints");
        graph.add_edge(Edge::new("a", "c")).expect("endpoints");
        let profile = GraphProfile::of(&graph);
        assert_eq!(profile.node_count, 3);
        assert_eq!(profile.edge_count, 2);
        assert_eq!(profile.max_degree, 2);
    }

    #[test]
    fn test_selection_table() {
        let thresholds = DensityThresholds::default();
        // Small and sparse picks the wide hierarchy.
        assert_eq!(
            select_preset(&profile(10, 8, 3), &thresholds),
            Preset::HierarchyWide
        );
        // Bounded degree and moderate size picks the flowchart.
        assert_eq!(
            select_preset(&profile(50, 70, 4), &thresholds),
            Preset::Flowchart
        );
        // High density picks the network preset.
        assert_eq!(
            select_preset(&profile(50, 160, 6), &thresholds),
            Preset::Network
        );
        // High degree alone also picks the network preset.
        assert_eq!(
            select_preset(&profile(100, 150, 12), &thresholds),
            Preset::Network
        );
        // Very large but tame picks the compact flowchart.
        assert_eq!(
            select_preset(&profile(500, 600, 6), &thresholds),
            Preset::FlowchartCompact
        );
        // Everything else lands on the hierarchy.
        assert_eq!(
            select_preset(&profile(150, 200, 6), &thresholds),
            Preset::Hierarchy
        );
    }

    #[test]
    fn test_thresholds_are_overridable() {
        let thresholds = DensityThresholds {
            small_nodes: 100,
            ..DensityThresholds::default()
        };
        assert_eq!(
            select_preset(&profile(50, 40, 4), &thresholds),
            Preset::HierarchyWide
        );
    }

    #[test]
    fn test_spacing_scale_saturates() {
        let thresholds = DensityThresholds::default();
        let small = adaptive_options(&profile(10, 8, 3), &thresholds);
        let factor = 1.0 + 10.0 / 200.0;
        assert_eq!(
            small.spacing,
            Preset::HierarchyWide.options().spacing.scaled(factor)
        );

        let huge = adaptive_options(&profile(10_000, 12_000, 4), &thresholds);
        assert_eq!(
            huge.spacing,
            Preset::FlowchartCompact.options().spacing.scaled(1.6)
        );
    }
}
