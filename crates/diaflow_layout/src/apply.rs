// SPDX-License-Identifier: MIT OR Apache-2.0
//! Writing layout results back onto a live graph.

use crate::convert::LayoutPlacement;
use diaflow_graph::{CellId, Graph, Point};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Write a placement onto the graph immediately.
///
/// Cells that disappeared between layout start and apply are skipped, not
/// failed.
pub fn apply_layout(graph: &mut Graph, placement: &LayoutPlacement) {
    for node in &placement.nodes {
        match graph.node_mut(&node.id) {
            Some(live) => live.set_position(Point::new(node.x, node.y)),
            None => tracing::debug!(id = node.id.as_str(), "skipping position for removed node"),
        }
    }
    for route in &placement.edges {
        match graph.edge_mut(&route.id) {
            Some(live) => live.set_vertices(route.bend_points.clone()),
            None => tracing::debug!(id = route.id.as_str(), "skipping route for removed edge"),
        }
    }
}

/// Easing curve for animated position changes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    /// Constant velocity
    Linear,
    /// Cubic deceleration into the target
    EaseOut,
    /// Cubic acceleration and deceleration
    #[default]
    EaseInOut,
}

impl Easing {
    /// Map linear progress in `[0, 1]` onto the curve
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseOut => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

struct NodeMove {
    id: CellId,
    from: Point,
    to: Point,
}

/// An eased, caller-stepped application of a placement
///
/// The transition captures start positions when created and interpolates
/// towards the placement each [`LayoutTransition::step`]. Edge vertices
/// are written once, on the finishing step; intermediate eased vertices
/// are not meaningful.
pub struct LayoutTransition {
    moves: Vec<NodeMove>,
    routes: Vec<(CellId, Vec<Point>)>,
    duration: Duration,
    easing: Easing,
    elapsed: Duration,
    finished: bool,
}

impl LayoutTransition {
    /// Capture start and target positions for an animated apply
    pub fn new(
        graph: &Graph,
        placement: &LayoutPlacement,
        duration: Duration,
        easing: Easing,
    ) -> Self {
        let moves = placement
            .nodes
            .iter()
            .filter_map(|node| {
                let live = graph.node(&node.id)?;
                Some(NodeMove {
                    id: node.id.clone(),
                    from: live.position,
                    to: Point::new(node.x, node.y),
                })
            })
            .collect();
        let routes = placement
            .edges
            .iter()
            .map(|route| (route.id.clone(), route.bend_points.clone()))
            .collect();
        Self {
            moves,
            routes,
            duration,
            easing,
            elapsed: Duration::ZERO,
            finished: false,
        }
    }

    /// Whether the transition has written its final frame
    pub fn finished(&self) -> bool {
        self.finished
    }

    /// Advance by `dt` and write the interpolated frame.
    ///
    /// Returns `true` once the final frame, including edge vertices, has
    /// been written. Cells removed mid-transition are skipped.
    pub fn step(&mut self, dt: Duration, graph: &mut Graph) -> bool {
        if self.finished {
            return true;
        }
        self.elapsed += dt;

        let progress = if self.duration.is_zero() {
            1.0
        } else {
            (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
        };
        let eased = self.easing.apply(progress);

        for node_move in &self.moves {
            if let Some(live) = graph.node_mut(&node_move.id) {
                live.set_position(node_move.from.lerp(node_move.to, eased));
            }
        }

        if progress >= 1.0 {
            for (id, vertices) in &self.routes {
                if let Some(live) = graph.edge_mut(id) {
                    live.set_vertices(vertices.clone());
                }
            }
            self.finished = true;
        }
        self.finished
    }
}
