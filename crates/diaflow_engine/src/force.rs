// SPDX-License-Identifier: MIT OR Apache-2.0
//! Force-directed layout on top of the `force_graph` simulation.

use crate::common;
use crate::descriptor::{keys, LayoutGraph};
use crate::result::{ComputedGraph, PlacedChild};
use force_graph::{EdgeData, ForceGraph, NodeData, SimulationParameters};
use std::collections::HashMap;
use std::f32::consts::TAU;

const DEFAULT_ITERATIONS: usize = 300;
const TIME_STEP: f32 = 0.035;
const SEED_RADIUS_MIN: f32 = 100.0;

/// Compute a force-directed layout for a validated descriptor.
pub fn layout(graph: &LayoutGraph) -> ComputedGraph {
    if graph.children.is_empty() {
        return ComputedGraph::empty();
    }

    let directives = &graph.directives;
    let iterations = directives
        .get_usize(keys::FORCE_ITERATIONS)
        .unwrap_or(DEFAULT_ITERATIONS);
    let node_spacing = directives.get_f32(keys::SPACING_NODE_NODE).unwrap_or(50.0);
    let padding = directives.get_f32(keys::PADDING).unwrap_or(20.0);

    let mut sim = ForceGraph::<String, ()>::new(SimulationParameters {
        force_charge: 150.0,
        force_spring: 0.05,
        force_max: 100.0,
        node_speed: 3000.0,
        damping_factor: 0.9,
    });

    // Seed on a circle so the simulation starts untangled.
    let count = graph.children.len();
    let radius = (node_spacing * count as f32 / TAU).max(SEED_RADIUS_MIN);
    let mut id_to_idx = HashMap::new();
    for (i, child) in graph.children.iter().enumerate() {
        let angle = i as f32 * TAU / count as f32;
        let idx = sim.add_node(NodeData {
            x: radius * angle.cos(),
            y: radius * angle.sin(),
            mass: 10.0,
            is_anchor: false,
            user_data: child.id.clone(),
        });
        id_to_idx.insert(child.id.as_str(), idx);
    }

    for edge in &graph.edges {
        let endpoints = edge.sources.first().zip(edge.targets.first());
        if let Some((source, target)) = endpoints {
            if let (Some(&src), Some(&tgt)) =
                (id_to_idx.get(source.as_str()), id_to_idx.get(target.as_str()))
            {
                sim.add_edge(src, tgt, EdgeData::default());
            }
        }
    }

    for _ in 0..iterations {
        sim.update(TIME_STEP);
    }

    let mut centers: HashMap<String, (f32, f32)> = HashMap::new();
    sim.visit_nodes(|node| {
        centers.insert(node.data.user_data.clone(), (node.x(), node.y()));
    });

    let children: Vec<PlacedChild> = graph
        .children
        .iter()
        .map(|child| {
            let (cx, cy) = *centers.get(&child.id).unwrap_or(&(0.0, 0.0));
            PlacedChild {
                id: child.id.clone(),
                x: cx - child.width / 2.0,
                y: cy - child.height / 2.0,
                width: child.width,
                height: child.height,
            }
        })
        .collect();

    common::finish(children, graph, padding)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{LayoutChild, LayoutEdge};

    fn descriptor(nodes: usize) -> LayoutGraph {
        let mut graph = LayoutGraph::new("root");
        for i in 0..nodes {
            graph.children.push(LayoutChild {
                id: format!("n{i}"),
                width: 60.0,
                height: 30.0,
                label: None,
                payload: None,
            });
        }
        for i in 1..nodes {
            graph.edges.push(LayoutEdge {
                id: format!("e{i}"),
                sources: vec!["n0".into()],
                targets: vec![format!("n{i}")],
                payload: None,
            });
        }
        graph
    }

    #[test]
    fn test_all_nodes_placed_with_finite_coordinates() {
        let result = layout(&descriptor(6));
        assert_eq!(result.children.len(), 6);
        for child in &result.children {
            assert!(child.x.is_finite() && child.y.is_finite());
            assert!(child.x >= 0.0 && child.y >= 0.0);
        }
        assert_eq!(result.edges.len(), 5);
    }

    #[test]
    fn test_iteration_directive_is_read() {
        let mut graph = descriptor(3);
        graph.directives.set(keys::FORCE_ITERATIONS, "1");
        let result = layout(&graph);
        assert_eq!(result.children.len(), 3);
    }

    #[test]
    fn test_empty_descriptor_short_circuits() {
        let result = layout(&LayoutGraph::new("root"));
        assert!(result.children.is_empty());
    }
}
