// SPDX-License-Identifier: MIT OR Apache-2.0
//! Layout engine for Diaflow.
//!
//! The engine consumes a [`LayoutGraph`] descriptor - a root carrying
//! `children`, `edges` and a string-keyed directive map - and produces a
//! [`ComputedGraph`] with absolute positions, sizes and routed edge
//! sections. Callers build descriptors through `diaflow_layout`; this crate
//! knows nothing about the diagram model.
//!
//! Three algorithms are built in, selected by the `algorithm` directive:
//! - `layered`: Sugiyama-style ranked layout with barycenter ordering
//! - `force`: force-directed simulation
//! - `radial`: even placement on a circle

mod common;
pub mod descriptor;
pub mod engine;
pub mod force;
pub mod layered;
pub mod radial;
pub mod result;

pub use descriptor::{keys, Direction, Directives, LayoutChild, LayoutEdge, LayoutGraph, RoutingStyle};
pub use engine::{LayoutEngine, LayoutError, NativeEngine};
pub use result::{ComputedGraph, EdgeSection, LayoutPoint, PlacedChild, RoutedEdge};
