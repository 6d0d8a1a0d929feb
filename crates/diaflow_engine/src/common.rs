// SPDX-License-Identifier: MIT OR Apache-2.0
//! Helpers shared by the layout algorithms.

use crate::descriptor::LayoutGraph;
use crate::result::{ComputedGraph, EdgeSection, LayoutPoint, PlacedChild, RoutedEdge};
use std::collections::HashMap;

/// Shift the layout so the smallest coordinate sits at `padding`.
pub(crate) fn normalize(children: &mut [PlacedChild], padding: f32) {
    let min_x = children.iter().map(|c| c.x).fold(f32::MAX, f32::min);
    let min_y = children.iter().map(|c| c.y).fold(f32::MAX, f32::min);
    if min_x == f32::MAX {
        return;
    }
    let shift_x = padding - min_x;
    let shift_y = padding - min_y;
    for child in children.iter_mut() {
        child.x += shift_x;
        child.y += shift_y;
    }
}

/// Overall extents including a trailing margin.
pub(crate) fn bounds(children: &[PlacedChild], padding: f32) -> (f32, f32) {
    let max_x = children.iter().map(|c| c.x + c.width).fold(0.0, f32::max);
    let max_y = children.iter().map(|c| c.y + c.height).fold(0.0, f32::max);
    (max_x + padding, max_y + padding)
}

/// Straight center-to-center sections for every descriptor edge.
pub(crate) fn straight_edges(graph: &LayoutGraph, children: &[PlacedChild]) -> Vec<RoutedEdge> {
    let centers: HashMap<&str, LayoutPoint> = children
        .iter()
        .map(|c| {
            (
                c.id.as_str(),
                LayoutPoint::new(c.x + c.width / 2.0, c.y + c.height / 2.0),
            )
        })
        .collect();

    graph
        .edges
        .iter()
        .filter_map(|edge| {
            let start = *centers.get(edge.sources.first()?.as_str())?;
            let end = *centers.get(edge.targets.first()?.as_str())?;
            Some(RoutedEdge {
                id: edge.id.clone(),
                sections: vec![EdgeSection {
                    start,
                    end,
                    bend_points: Vec::new(),
                }],
            })
        })
        .collect()
}

/// Normalize, route straight edges and wrap up a computed graph.
pub(crate) fn finish(
    mut children: Vec<PlacedChild>,
    graph: &LayoutGraph,
    padding: f32,
) -> ComputedGraph {
    normalize(&mut children, padding);
    let edges = straight_edges(graph, &children);
    let (width, height) = bounds(&children, padding);
    ComputedGraph {
        children,
        edges,
        width,
        height,
    }
}
