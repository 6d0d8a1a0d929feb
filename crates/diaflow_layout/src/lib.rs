// SPDX-License-Identifier: MIT OR Apache-2.0
//! Layout bridge for Diaflow.
//!
//! This crate connects the diagram model (`diaflow_graph`) to the layout
//! engine (`diaflow_engine`):
//! - [`convert`]: bidirectional graph <-> descriptor translation
//! - [`options`]: directive construction with spacing floors and overrides
//! - [`presets`]: named configuration bundles and density-adaptive selection
//! - [`runner`]: synchronous or background-worker execution
//! - [`apply`]: writing results back, immediately or via eased transitions
//! - [`batch`]: cooperative batching for large diagram updates

pub mod apply;
pub mod batch;
pub mod convert;
pub mod options;
pub mod presets;
pub mod runner;

pub use apply::{apply_layout, Easing, LayoutTransition};
pub use batch::{
    generate_batches, generate_batches_with_progress, process_batches, process_batches_merged,
    process_batches_with_progress, BatchError, BatchProgress, MergePolicy, MergeRule,
};
pub use convert::{map_result, to_descriptor, EdgeRoute, LayoutPlacement, NodePlacement};
pub use options::{Algorithm, ConvertOptions, LayoutOptions, Spacing};
pub use presets::{adaptive_options, select_preset, DensityThresholds, GraphProfile, Preset};
pub use runner::{run_layout, ExecutionMode, LayoutRunner};
