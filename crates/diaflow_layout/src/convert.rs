// SPDX-License-Identifier: MIT OR Apache-2.0
//! Bidirectional conversion between the diagram model and the engine schema.
//!
//! Both representations are transient: a descriptor is built fresh from the
//! current graph for every layout invocation, and a placement is discarded
//! once applied. Identifiers pass through both directions verbatim.

use crate::options::LayoutOptions;
use diaflow_engine::{ComputedGraph, LayoutChild, LayoutEdge, LayoutGraph};
use diaflow_graph::{CellId, Edge, Graph, Node, Point, Size};
use serde_json::Value;

/// Root id used for every descriptor
pub const ROOT_ID: &str = "root";

/// Build an engine descriptor from the current graph state.
pub fn to_descriptor(graph: &Graph, options: &LayoutOptions) -> LayoutGraph {
    let mut descriptor = LayoutGraph::new(ROOT_ID);
    descriptor.directives = options.directives();

    for node in graph.nodes() {
        let size = match (options.convert.auto_size, node.size) {
            (true, Some(size)) => size,
            _ => options.convert.default_size,
        };
        descriptor.children.push(LayoutChild {
            id: node.id.to_string(),
            width: size.width,
            height: size.height,
            label: extract_label(node),
            payload: options.convert.include_payload.then(|| node.to_json()),
        });
    }

    for edge in graph.edges() {
        descriptor.edges.push(LayoutEdge {
            id: edge.id.to_string(),
            sources: vec![edge.source.to_string()],
            targets: vec![edge.target.to_string()],
            payload: options.convert.include_payload.then(|| edge.to_json()),
        });
    }

    descriptor
}

/// Label probe order: the plain label field, then the `text` attribute,
/// then the `label` attribute. Attribute values may be plain strings or
/// objects carrying a `text` field.
fn extract_label(node: &Node) -> Option<String> {
    if let Some(label) = &node.label {
        return Some(label.clone());
    }
    for key in ["text", "label"] {
        let Some(value) = node.attrs.get(key) else {
            continue;
        };
        if let Some(text) = value.as_str() {
            return Some(text.to_string());
        }
        if let Some(text) = value.get("text").and_then(Value::as_str) {
            return Some(text.to_string());
        }
    }
    None
}

/// A node's computed placement, matched back to the original cell
#[derive(Debug, Clone)]
pub struct NodePlacement {
    /// Cell id from the layout result
    pub id: CellId,
    /// Computed left edge
    pub x: f32,
    /// Computed top edge
    pub y: f32,
    /// Computed width
    pub width: f32,
    /// Computed height
    pub height: f32,
    /// The original node, `None` when it was removed mid-flight
    pub node: Option<Node>,
}

/// An edge's computed route, matched back to the original cell
#[derive(Debug, Clone)]
pub struct EdgeRoute {
    /// Cell id from the layout result
    pub id: CellId,
    /// Bend points of the first routed section
    pub bend_points: Vec<Point>,
    /// The original edge, `None` when it was removed mid-flight
    pub edge: Option<Edge>,
}

/// A fully mapped layout result
#[derive(Debug, Clone)]
pub struct LayoutPlacement {
    /// Placed nodes in result order
    pub nodes: Vec<NodePlacement>,
    /// Routed edges in result order
    pub edges: Vec<EdgeRoute>,
    /// Overall bounding size of the layout
    pub size: Size,
}

/// Map an engine result back onto the graph the descriptor was built from.
///
/// Entries whose id no longer resolves are kept with an empty match; the
/// apply step skips them.
pub fn map_result(
    computed: &ComputedGraph,
    graph: &Graph,
    options: &LayoutOptions,
) -> LayoutPlacement {
    let default_size = options.convert.default_size;

    let nodes = computed
        .children
        .iter()
        .map(|placed| {
            let id = CellId::from(placed.id.as_str());
            let node = graph.node(&id).cloned();
            if node.is_none() {
                tracing::debug!(id = placed.id.as_str(), "layout result for unknown node");
            }
            NodePlacement {
                id,
                x: placed.x,
                y: placed.y,
                width: if placed.width > 0.0 { placed.width } else { default_size.width },
                height: if placed.height > 0.0 { placed.height } else { default_size.height },
                node,
            }
        })
        .collect();

    let edges = computed
        .edges
        .iter()
        .map(|routed| {
            let id = CellId::from(routed.id.as_str());
            let edge = graph.edge(&id).cloned();
            let bend_points = routed
                .sections
                .first()
                .map(|section| {
                    section
                        .bend_points
                        .iter()
                        .map(|p| Point::new(p.x, p.y))
                        .collect()
                })
                .unwrap_or_default();
            EdgeRoute {
                id,
                bend_points,
                edge,
            }
        })
        .collect();

    LayoutPlacement {
        nodes,
        edges,
        size: Size::new(computed.width, computed.height),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diaflow_engine::{EdgeSection, LayoutPoint, PlacedChild, RoutedEdge};
    use serde_json::json;

    fn sample_graph() -> Graph {
        let mut graph = Graph::new();
        graph.add_node(Node::with_id("a").with_size(100.0, 60.0).with_label("Start"));
        graph.add_node(Node::with_id("b"));
        graph
            .add_edge(Edge::new("a", "b").with_id("e1"))
            .expect("endpoints exist");
        graph
    }

    #[test]
    fn test_forward_ids_survive_verbatim() {
        let descriptor = to_descriptor(&sample_graph(), &LayoutOptions::default());
        let ids: Vec<&str> = descriptor.children.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(descriptor.edges[0].id, "e1");
        assert_eq!(descriptor.edges[0].sources, vec!["a".to_string()]);
        assert_eq!(descriptor.edges[0].targets, vec!["b".to_string()]);
    }

    #[test]
    fn test_auto_size_and_default_size() {
        let descriptor = to_descriptor(&sample_graph(), &LayoutOptions::default());
        // "a" is measured, "b" falls back to the default size.
        assert_eq!(descriptor.children[0].width, 100.0);
        assert_eq!(descriptor.children[1].width, 80.0);
        assert_eq!(descriptor.children[1].height, 40.0);

        let mut options = LayoutOptions::default();
        options.convert.auto_size = false;
        let descriptor = to_descriptor(&sample_graph(), &options);
        assert_eq!(descriptor.children[0].width, 80.0);
    }

    #[test]
    fn test_label_probe_order() {
        let mut graph = Graph::new();
        graph.add_node(Node::with_id("plain").with_label("from-field"));
        graph.add_node(Node::with_id("attr-text").with_attr("text", json!("from-text")));
        graph.add_node(Node::with_id("attr-nested").with_attr("label", json!({"text": "from-label"})));
        graph.add_node(Node::with_id("none"));

        let descriptor = to_descriptor(&graph, &LayoutOptions::default());
        let labels: Vec<Option<&str>> = descriptor
            .children
            .iter()
            .map(|c| c.label.as_deref())
            .collect();
        assert_eq!(
            labels,
            vec![Some("from-field"), Some("from-text"), Some("from-label"), None]
        );
    }

    #[test]
    fn test_payload_embedding_is_opt_in() {
        let graph = sample_graph();
        let descriptor = to_descriptor(&graph, &LayoutOptions::default());
        assert!(descriptor.children[0].payload.is_none());

        let mut options = LayoutOptions::default();
        options.convert.include_payload = true;
        let descriptor = to_descriptor(&graph, &options);
        let payload = descriptor.children[0].payload.as_ref().expect("payload");
        assert_eq!(payload["id"], "a");
        assert!(descriptor.edges[0].payload.is_some());
    }

    #[test]
    fn test_reverse_matches_by_id() {
        let graph = sample_graph();
        let computed = ComputedGraph {
            children: vec![PlacedChild {
                id: "a".into(),
                x: 20.0,
                y: 30.0,
                width: 100.0,
                height: 60.0,
            }],
            edges: vec![RoutedEdge {
                id: "e1".into(),
                sections: vec![EdgeSection {
                    start: LayoutPoint::new(0.0, 0.0),
                    end: LayoutPoint::new(10.0, 10.0),
                    bend_points: vec![LayoutPoint::new(5.0, 0.0)],
                }],
            }],
            width: 200.0,
            height: 100.0,
        };

        let placement = map_result(&computed, &graph, &LayoutOptions::default());
        let node = &placement.nodes[0];
        assert!(node.node.is_some());
        assert_eq!(node.node.as_ref().map(|n| n.id.as_str()), Some("a"));
        assert_eq!(placement.edges[0].bend_points, vec![Point::new(5.0, 0.0)]);
        assert_eq!(placement.size, Size::new(200.0, 100.0));
    }

    #[test]
    fn test_reverse_unmatched_is_not_an_error() {
        let graph = Graph::new();
        let computed = ComputedGraph {
            children: vec![PlacedChild {
                id: "ghost".into(),
                x: 0.0,
                y: 0.0,
                width: 0.0,
                height: 0.0,
            }],
            edges: vec![RoutedEdge {
                id: "ghost-edge".into(),
                sections: Vec::new(),
            }],
            width: 0.0,
            height: 0.0,
        };

        let placement = map_result(&computed, &graph, &LayoutOptions::default());
        assert!(placement.nodes[0].node.is_none());
        assert!(placement.edges[0].edge.is_none());
        // Zero sizes fall back to the configured default.
        assert_eq!(placement.nodes[0].width, 80.0);
        assert_eq!(placement.nodes[0].height, 40.0);
    }
}
