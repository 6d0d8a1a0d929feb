// SPDX-License-Identifier: MIT OR Apache-2.0
//! Engine trait and algorithm dispatch.

use crate::descriptor::{keys, LayoutGraph};
use crate::result::ComputedGraph;
use std::collections::HashSet;

/// A layout computation service
///
/// Implementations must be thread-safe; a runner may invoke them from a
/// dedicated worker thread.
pub trait LayoutEngine: Send + Sync {
    /// Compute positions and edge routes for a descriptor
    fn layout(&self, graph: &LayoutGraph) -> Result<ComputedGraph, LayoutError>;
}

/// The built-in engine, dispatching on the `algorithm` directive
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeEngine;

impl NativeEngine {
    /// Create a new engine
    pub fn new() -> Self {
        Self
    }
}

impl LayoutEngine for NativeEngine {
    fn layout(&self, graph: &LayoutGraph) -> Result<ComputedGraph, LayoutError> {
        validate(graph)?;
        let algorithm = graph.directives.get(keys::ALGORITHM).unwrap_or("layered");
        match algorithm {
            "layered" => Ok(crate::layered::layout(graph)),
            "force" => Ok(crate::force::layout(graph)),
            "radial" => Ok(crate::radial::layout(graph)),
            other => Err(LayoutError::UnknownAlgorithm(other.to_string())),
        }
    }
}

/// Reject descriptors the algorithms cannot process.
fn validate(graph: &LayoutGraph) -> Result<(), LayoutError> {
    let ids: HashSet<&str> = graph.children.iter().map(|c| c.id.as_str()).collect();
    for edge in &graph.edges {
        let source = edge
            .sources
            .first()
            .ok_or_else(|| LayoutError::MissingEndpoint { edge: edge.id.clone() })?;
        let target = edge
            .targets
            .first()
            .ok_or_else(|| LayoutError::MissingEndpoint { edge: edge.id.clone() })?;
        for endpoint in [source, target] {
            if !ids.contains(endpoint.as_str()) {
                return Err(LayoutError::UnknownEndpoint {
                    edge: edge.id.clone(),
                    endpoint: endpoint.clone(),
                });
            }
        }
    }
    Ok(())
}

/// Error raised by a layout engine
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    /// The `algorithm` directive names no built-in algorithm
    #[error("Unknown layout algorithm: {0}")]
    UnknownAlgorithm(String),

    /// An edge references a node id absent from `children`
    #[error("Edge {edge} references unknown node {endpoint}")]
    UnknownEndpoint {
        /// Offending edge id
        edge: String,
        /// The id that resolved to nothing
        endpoint: String,
    },

    /// An edge has an empty source or target list
    #[error("Edge {edge} has no endpoints")]
    MissingEndpoint {
        /// Offending edge id
        edge: String,
    },
}
