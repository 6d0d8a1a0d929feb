// SPDX-License-Identifier: MIT OR Apache-2.0
//! Computed layout results.

use serde::{Deserialize, Serialize};

/// A point in engine coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LayoutPoint {
    /// Horizontal coordinate
    pub x: f32,
    /// Vertical coordinate
    pub y: f32,
}

impl LayoutPoint {
    /// Create a new point
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A placed node in a computed layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacedChild {
    /// Identifier from the descriptor
    pub id: String,
    /// Absolute left edge
    pub x: f32,
    /// Absolute top edge
    pub y: f32,
    /// Width as laid out
    pub width: f32,
    /// Height as laid out
    pub height: f32,
}

/// One routed run of an edge
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeSection {
    /// Where the section leaves the source
    pub start: LayoutPoint,
    /// Where the section meets the target
    pub end: LayoutPoint,
    /// Intermediate bend points, in order
    #[serde(default)]
    pub bend_points: Vec<LayoutPoint>,
}

impl EdgeSection {
    /// The full polyline including start and end
    pub fn polyline(&self) -> Vec<LayoutPoint> {
        let mut points = Vec::with_capacity(self.bend_points.len() + 2);
        points.push(self.start);
        points.extend(self.bend_points.iter().copied());
        points.push(self.end);
        points
    }
}

/// A routed edge in a computed layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutedEdge {
    /// Identifier from the descriptor
    pub id: String,
    /// Routed runs; the first section is the primary route
    pub sections: Vec<EdgeSection>,
}

/// A finished layout
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComputedGraph {
    /// Placed nodes
    pub children: Vec<PlacedChild>,
    /// Routed edges
    pub edges: Vec<RoutedEdge>,
    /// Overall width of the layout
    pub width: f32,
    /// Overall height of the layout
    pub height: f32,
}

impl ComputedGraph {
    /// An empty layout with zero bounds
    pub fn empty() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polyline_order() {
        let section = EdgeSection {
            start: LayoutPoint::new(0.0, 0.0),
            end: LayoutPoint::new(10.0, 10.0),
            bend_points: vec![LayoutPoint::new(0.0, 5.0), LayoutPoint::new(10.0, 5.0)],
        };
        let line = section.polyline();
        assert_eq!(line.len(), 4);
        assert_eq!(line[0], section.start);
        assert_eq!(line[3], section.end);
    }
}
