// SPDX-License-Identifier: MIT OR Apache-2.0
//! Layered (Sugiyama-style) layout.
//!
//! Pipeline: rank assignment by longest path over a topological order,
//! barycenter ordering sweeps within ranks, cursor-based coordinate
//! assignment along the flow direction, mirroring for reversed directions,
//! and per-edge routing into sections.

use crate::common::{bounds, normalize};
use crate::descriptor::{keys, Direction, LayoutGraph, RoutingStyle};
use crate::result::{ComputedGraph, EdgeSection, LayoutPoint, PlacedChild, RoutedEdge};
use std::collections::{HashMap, HashSet, VecDeque};

const DEFAULT_SPACING: f32 = 50.0;
const DEFAULT_PADDING: f32 = 20.0;
const DEFAULT_SWEEPS: usize = 2;

/// Compute a layered layout for a validated descriptor.
pub fn layout(graph: &LayoutGraph) -> ComputedGraph {
    if graph.children.is_empty() {
        return ComputedGraph::empty();
    }

    let directives = &graph.directives;
    let node_spacing = directives
        .get_f32(keys::SPACING_NODE_NODE)
        .unwrap_or(DEFAULT_SPACING);
    let layer_spacing = directives
        .get_f32(keys::SPACING_LAYER)
        .unwrap_or(DEFAULT_SPACING);
    let padding = directives.get_f32(keys::PADDING).unwrap_or(DEFAULT_PADDING);
    let sweeps = directives
        .get_usize(keys::LAYERED_SWEEPS)
        .unwrap_or(DEFAULT_SWEEPS);
    let direction = directives.direction();
    let routing = directives.routing();

    let endpoints: Vec<(String, String)> = graph
        .edges
        .iter()
        .filter_map(|e| Some((e.sources.first()?.clone(), e.targets.first()?.clone())))
        .collect();

    let ranks = compute_ranks(graph, &endpoints);
    let mut buckets = bucket_by_rank(graph, &ranks);
    order_buckets(&mut buckets, &endpoints, sweeps);

    let mut children = place(graph, &buckets, direction, node_spacing, layer_spacing);
    mirror(&mut children, direction);
    normalize(&mut children, padding);

    let index: HashMap<&str, usize> = children
        .iter()
        .enumerate()
        .map(|(i, c)| (c.id.as_str(), i))
        .collect();

    let edges = graph
        .edges
        .iter()
        .filter_map(|edge| {
            let source = edge.sources.first()?;
            let target = edge.targets.first()?;
            let from = &children[*index.get(source.as_str())?];
            let to = &children[*index.get(target.as_str())?];
            Some(RoutedEdge {
                id: edge.id.clone(),
                sections: vec![route(from, to, direction, routing, node_spacing)],
            })
        })
        .collect();

    let (width, height) = bounds(&children, padding);
    ComputedGraph {
        children,
        edges,
        width,
        height,
    }
}

/// Longest-path ranks over a Kahn order. Nodes left over by a cycle are
/// appended in declaration order so layout always completes.
fn compute_ranks(graph: &LayoutGraph, endpoints: &[(String, String)]) -> HashMap<String, usize> {
    let mut indegree: HashMap<&str, usize> = HashMap::new();
    let mut successors: HashMap<&str, Vec<&str>> = HashMap::new();

    for child in &graph.children {
        indegree.insert(&child.id, 0);
    }
    for (source, target) in endpoints {
        successors
            .entry(source.as_str())
            .or_default()
            .push(target.as_str());
        *indegree.entry(target.as_str()).or_insert(0) += 1;
    }

    let mut queue: VecDeque<&str> = graph
        .children
        .iter()
        .map(|c| c.id.as_str())
        .filter(|id| indegree.get(id) == Some(&0))
        .collect();

    let mut order: Vec<&str> = Vec::with_capacity(graph.children.len());
    while let Some(id) = queue.pop_front() {
        order.push(id);
        if let Some(next) = successors.get(id) {
            for target in next {
                if let Some(degree) = indegree.get_mut(target) {
                    *degree -= 1;
                    if *degree == 0 {
                        queue.push_back(target);
                    }
                }
            }
        }
    }

    if order.len() < graph.children.len() {
        tracing::debug!(
            placed = order.len(),
            total = graph.children.len(),
            "cycle in layout input, appending remaining nodes"
        );
        let seen: HashSet<&str> = order.iter().copied().collect();
        for child in &graph.children {
            if !seen.contains(child.id.as_str()) {
                order.push(&child.id);
            }
        }
    }

    let mut ranks: HashMap<String, usize> = HashMap::new();
    for id in &order {
        let rank = *ranks.get(*id).unwrap_or(&0);
        ranks.entry((*id).to_string()).or_insert(rank);
        if let Some(next) = successors.get(id) {
            for target in next {
                let entry = ranks.entry((*target).to_string()).or_insert(0);
                *entry = (*entry).max(rank + 1);
            }
        }
    }
    ranks
}

/// Group node ids into per-rank buckets, keeping declaration order.
fn bucket_by_rank(graph: &LayoutGraph, ranks: &HashMap<String, usize>) -> Vec<Vec<String>> {
    let max_rank = ranks.values().copied().max().unwrap_or(0);
    let mut buckets: Vec<Vec<String>> = vec![Vec::new(); max_rank + 1];
    for child in &graph.children {
        let rank = *ranks.get(&child.id).unwrap_or(&0);
        buckets[rank].push(child.id.clone());
    }
    buckets
}

/// Barycenter ordering: sort each rank by the mean position of its
/// neighbors in the adjacent rank, sweeping down then up.
fn order_buckets(buckets: &mut [Vec<String>], endpoints: &[(String, String)], sweeps: usize) {
    if buckets.len() <= 1 {
        return;
    }

    let mut incoming: HashMap<&str, Vec<&str>> = HashMap::new();
    let mut outgoing: HashMap<&str, Vec<&str>> = HashMap::new();
    for (source, target) in endpoints {
        outgoing.entry(source.as_str()).or_default().push(target.as_str());
        incoming.entry(target.as_str()).or_default().push(source.as_str());
    }

    let mut positions: HashMap<String, usize> = HashMap::new();
    let reindex = |buckets: &[Vec<String>], positions: &mut HashMap<String, usize>| {
        positions.clear();
        for bucket in buckets {
            for (idx, id) in bucket.iter().enumerate() {
                positions.insert(id.clone(), idx);
            }
        }
    };
    reindex(buckets, &mut positions);

    for _ in 0..sweeps {
        for rank in 1..buckets.len() {
            sort_bucket(&mut buckets[rank], &incoming, &positions);
            reindex(buckets, &mut positions);
        }
        for rank in (0..buckets.len().saturating_sub(1)).rev() {
            sort_bucket(&mut buckets[rank], &outgoing, &positions);
            reindex(buckets, &mut positions);
        }
    }
}

fn sort_bucket(
    bucket: &mut [String],
    neighbors: &HashMap<&str, Vec<&str>>,
    positions: &HashMap<String, usize>,
) {
    if bucket.len() <= 1 {
        return;
    }
    let current: HashMap<String, usize> = bucket
        .iter()
        .enumerate()
        .map(|(idx, id)| (id.clone(), idx))
        .collect();
    bucket.sort_by(|a, b| {
        let score_a = barycenter(a, neighbors, positions, &current);
        let score_b = barycenter(b, neighbors, positions, &current);
        score_a
            .partial_cmp(&score_b)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| current[a].cmp(&current[b]))
    });
}

fn barycenter(
    id: &str,
    neighbors: &HashMap<&str, Vec<&str>>,
    positions: &HashMap<String, usize>,
    current: &HashMap<String, usize>,
) -> f32 {
    let fallback = *current.get(id).unwrap_or(&0) as f32;
    let Some(list) = neighbors.get(id) else {
        return fallback;
    };
    let mut total = 0.0;
    let mut count = 0.0;
    for neighbor in list {
        if let Some(pos) = positions.get(*neighbor) {
            total += *pos as f32;
            count += 1.0;
        }
    }
    if count == 0.0 {
        fallback
    } else {
        total / count
    }
}

/// Cursor-based placement along the base direction (down or right);
/// reversed directions are handled afterwards by [`mirror`].
fn place(
    graph: &LayoutGraph,
    buckets: &[Vec<String>],
    direction: Direction,
    node_spacing: f32,
    layer_spacing: f32,
) -> Vec<PlacedChild> {
    let sizes: HashMap<&str, (f32, f32)> = graph
        .children
        .iter()
        .map(|c| (c.id.as_str(), (c.width, c.height)))
        .collect();

    let horizontal = direction.is_horizontal();
    let mut placed: HashMap<String, (f32, f32)> = HashMap::new();
    let mut main_cursor = 0.0;

    for bucket in buckets {
        let mut cross_cursor = 0.0;
        let mut max_main: f32 = 0.0;
        for id in bucket {
            let (width, height) = *sizes.get(id.as_str()).unwrap_or(&(0.0, 0.0));
            if horizontal {
                placed.insert(id.clone(), (main_cursor, cross_cursor));
                cross_cursor += height + node_spacing;
                max_main = max_main.max(width);
            } else {
                placed.insert(id.clone(), (cross_cursor, main_cursor));
                cross_cursor += width + node_spacing;
                max_main = max_main.max(height);
            }
        }
        main_cursor += max_main + layer_spacing;
    }

    graph
        .children
        .iter()
        .map(|child| {
            let (x, y) = *placed.get(&child.id).unwrap_or(&(0.0, 0.0));
            PlacedChild {
                id: child.id.clone(),
                x,
                y,
                width: child.width,
                height: child.height,
            }
        })
        .collect()
}

/// Flip coordinates for `up` and `left` flows.
fn mirror(children: &mut [PlacedChild], direction: Direction) {
    if !matches!(direction, Direction::Up | Direction::Left) {
        return;
    }
    let max_x = children.iter().map(|c| c.x + c.width).fold(0.0, f32::max);
    let max_y = children.iter().map(|c| c.y + c.height).fold(0.0, f32::max);
    for child in children.iter_mut() {
        match direction {
            Direction::Left => child.x = max_x - child.x - child.width,
            Direction::Up => child.y = max_y - child.y - child.height,
            Direction::Down | Direction::Right => {}
        }
    }
}

/// Route one edge between two placed nodes.
fn route(
    from: &PlacedChild,
    to: &PlacedChild,
    direction: Direction,
    routing: RoutingStyle,
    node_spacing: f32,
) -> EdgeSection {
    if from.id == to.id {
        return route_self_loop(from, node_spacing);
    }

    let (start, end) = anchors(from, to, direction);
    let bend_points = match routing {
        RoutingStyle::Orthogonal => orthogonal_bends(start, end, direction),
        RoutingStyle::Polyline | RoutingStyle::Splines => Vec::new(),
    };
    EdgeSection {
        start,
        end,
        bend_points,
    }
}

/// Anchor points on the node borders facing the flow direction.
fn anchors(from: &PlacedChild, to: &PlacedChild, direction: Direction) -> (LayoutPoint, LayoutPoint) {
    match direction {
        Direction::Down => (
            LayoutPoint::new(from.x + from.width / 2.0, from.y + from.height),
            LayoutPoint::new(to.x + to.width / 2.0, to.y),
        ),
        Direction::Up => (
            LayoutPoint::new(from.x + from.width / 2.0, from.y),
            LayoutPoint::new(to.x + to.width / 2.0, to.y + to.height),
        ),
        Direction::Right => (
            LayoutPoint::new(from.x + from.width, from.y + from.height / 2.0),
            LayoutPoint::new(to.x, to.y + to.height / 2.0),
        ),
        Direction::Left => (
            LayoutPoint::new(from.x, from.y + from.height / 2.0),
            LayoutPoint::new(to.x + to.width, to.y + to.height / 2.0),
        ),
    }
}

/// Two bends at the midpoint between the anchors, skipped when the anchors
/// are already aligned.
fn orthogonal_bends(start: LayoutPoint, end: LayoutPoint, direction: Direction) -> Vec<LayoutPoint> {
    if direction.is_horizontal() {
        if (start.y - end.y).abs() < f32::EPSILON {
            return Vec::new();
        }
        let mid_x = (start.x + end.x) / 2.0;
        vec![LayoutPoint::new(mid_x, start.y), LayoutPoint::new(mid_x, end.y)]
    } else {
        if (start.x - end.x).abs() < f32::EPSILON {
            return Vec::new();
        }
        let mid_y = (start.y + end.y) / 2.0;
        vec![LayoutPoint::new(start.x, mid_y), LayoutPoint::new(end.x, mid_y)]
    }
}

/// Small axis-aligned loop out the right side of the node.
fn route_self_loop(node: &PlacedChild, node_spacing: f32) -> EdgeSection {
    let pad = node_spacing.max(20.0) * 0.6;
    let right = node.x + node.width;
    let start = LayoutPoint::new(right, node.y + node.height * 0.25);
    let end = LayoutPoint::new(right, node.y + node.height * 0.75);
    EdgeSection {
        start,
        end,
        bend_points: vec![
            LayoutPoint::new(right + pad, start.y),
            LayoutPoint::new(right + pad, end.y),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{LayoutChild, LayoutEdge};

    fn child(id: &str, width: f32, height: f32) -> LayoutChild {
        LayoutChild {
            id: id.into(),
            width,
            height,
            label: None,
            payload: None,
        }
    }

    fn edge(id: &str, source: &str, target: &str) -> LayoutEdge {
        LayoutEdge {
            id: id.into(),
            sources: vec![source.into()],
            targets: vec![target.into()],
            payload: None,
        }
    }

    fn chain() -> LayoutGraph {
        let mut graph = LayoutGraph::new("root");
        for id in ["a", "b", "c"] {
            graph.children.push(child(id, 80.0, 40.0));
        }
        graph.edges.push(edge("e1", "a", "b"));
        graph.edges.push(edge("e2", "b", "c"));
        graph
    }

    fn placed<'a>(result: &'a ComputedGraph, id: &str) -> &'a PlacedChild {
        result.children.iter().find(|c| c.id == id).expect("placed")
    }

    #[test]
    fn test_chain_ranks_increase_downwards() {
        let result = layout(&chain());
        let (a, b, c) = (placed(&result, "a"), placed(&result, "b"), placed(&result, "c"));
        assert!(a.y < b.y);
        assert!(b.y < c.y);
    }

    #[test]
    fn test_right_direction_increases_x() {
        let mut graph = chain();
        graph.directives.set(keys::DIRECTION, "right");
        let result = layout(&graph);
        let (a, b, c) = (placed(&result, "a"), placed(&result, "b"), placed(&result, "c"));
        assert!(a.x < b.x);
        assert!(b.x < c.x);
    }

    #[test]
    fn test_up_direction_mirrors() {
        let mut graph = chain();
        graph.directives.set(keys::DIRECTION, "up");
        let result = layout(&graph);
        let (a, c) = (placed(&result, "a"), placed(&result, "c"));
        assert!(a.y > c.y);
    }

    #[test]
    fn test_orthogonal_sections_are_axis_aligned() {
        let mut graph = chain();
        // Give b a sibling so anchors stop lining up and bends appear.
        graph.children.push(child("d", 120.0, 40.0));
        graph.edges.push(edge("e3", "a", "d"));
        let result = layout(&graph);
        for routed in &result.edges {
            for section in &routed.sections {
                let line = section.polyline();
                for pair in line.windows(2) {
                    let aligned = (pair[0].x - pair[1].x).abs() < f32::EPSILON
                        || (pair[0].y - pair[1].y).abs() < f32::EPSILON;
                    assert!(aligned, "segment {:?} -> {:?} not axis-aligned", pair[0], pair[1]);
                }
            }
        }
    }

    #[test]
    fn test_cycle_still_places_all_nodes() {
        let mut graph = chain();
        graph.edges.push(edge("e3", "c", "a"));
        let result = layout(&graph);
        assert_eq!(result.children.len(), 3);
        assert_eq!(result.edges.len(), 3);
    }

    #[test]
    fn test_layer_spacing_directive_respected() {
        let mut graph = chain();
        graph.directives.set(keys::SPACING_LAYER, "200");
        let result = layout(&graph);
        let (a, b) = (placed(&result, "a"), placed(&result, "b"));
        assert!(b.y - (a.y + a.height) >= 200.0 - f32::EPSILON);
    }

    #[test]
    fn test_self_loop_routes_axis_aligned() {
        let mut graph = LayoutGraph::new("root");
        graph.children.push(child("a", 80.0, 40.0));
        graph.edges.push(edge("e1", "a", "a"));
        let result = layout(&graph);
        let section = &result.edges[0].sections[0];
        assert_eq!(section.bend_points.len(), 2);
        let line = section.polyline();
        for pair in line.windows(2) {
            let aligned = (pair[0].x - pair[1].x).abs() < f32::EPSILON
                || (pair[0].y - pair[1].y).abs() < f32::EPSILON;
            assert!(aligned);
        }
    }

    #[test]
    fn test_empty_descriptor_short_circuits() {
        let result = layout(&LayoutGraph::new("root"));
        assert!(result.children.is_empty());
        assert_eq!(result.width, 0.0);
        assert_eq!(result.height, 0.0);
    }

    #[test]
    fn test_coordinates_start_at_padding() {
        let result = layout(&chain());
        let min_x = result.children.iter().map(|c| c.x).fold(f32::MAX, f32::min);
        let min_y = result.children.iter().map(|c| c.y).fold(f32::MAX, f32::min);
        assert_eq!(min_x, DEFAULT_PADDING);
        assert_eq!(min_y, DEFAULT_PADDING);
    }
}
