// SPDX-License-Identifier: MIT OR Apache-2.0
//! Diagram model for Diaflow.
//!
//! This crate provides the cell model that diagram tooling operates on:
//! - Nodes with position, size, label and opaque attributes
//! - Edges with endpoints and routed vertices
//! - A graph container with validated insertion and lookup by id
//! - Plain geometry types shared across the workspace
//!
//! Layout computation lives in `diaflow_engine`; conversion between the two
//! representations lives in `diaflow_layout`.

pub mod cell;
pub mod edge;
pub mod geometry;
pub mod graph;
pub mod node;

pub use cell::CellId;
pub use edge::Edge;
pub use geometry::{Point, Rect, Size};
pub use graph::{EdgeError, Graph};
pub use node::Node;
