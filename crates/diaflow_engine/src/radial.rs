// SPDX-License-Identifier: MIT OR Apache-2.0
//! Radial layout - even placement on a circle.

use crate::common;
use crate::descriptor::{keys, LayoutGraph};
use crate::result::{ComputedGraph, PlacedChild};
use std::f32::consts::TAU;

/// Compute a radial layout for a validated descriptor.
///
/// The circle's radius grows with the circumference the nodes need at the
/// configured spacing, so rings never collapse onto themselves.
pub fn layout(graph: &LayoutGraph) -> ComputedGraph {
    if graph.children.is_empty() {
        return ComputedGraph::empty();
    }

    let directives = &graph.directives;
    let node_spacing = directives.get_f32(keys::SPACING_NODE_NODE).unwrap_or(50.0);
    let padding = directives.get_f32(keys::PADDING).unwrap_or(20.0);

    let circumference: f32 = graph
        .children
        .iter()
        .map(|c| c.width.max(c.height) + node_spacing)
        .sum();
    let radius = (circumference / TAU).max(node_spacing);

    let count = graph.children.len();
    let children: Vec<PlacedChild> = graph
        .children
        .iter()
        .enumerate()
        .map(|(i, child)| {
            let angle = i as f32 * TAU / count as f32;
            let (cx, cy) = if count == 1 {
                (0.0, 0.0)
            } else {
                (radius * angle.cos(), radius * angle.sin())
            };
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
