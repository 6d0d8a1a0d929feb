// SPDX-License-Identifier: MIT OR Apache-2.0
//! Layout invocation - synchronous or on a dedicated worker thread.

use crate::convert::{map_result, to_descriptor, LayoutPlacement};
use crate::options::LayoutOptions;
use diaflow_engine::{ComputedGraph, LayoutEngine, LayoutError, LayoutGraph};
use diaflow_graph::Graph;
use parking_lot::Mutex;
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use tokio::sync::oneshot;

/// Where layout computation runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    /// Inline on the calling task
    #[default]
    Synchronous,
    /// On a dedicated background thread
    Worker,
}

struct Job {
    descriptor: LayoutGraph,
    reply: oneshot::Sender<Result<ComputedGraph, LayoutError>>,
}

/// Runs layout computations against one engine
///
/// The execution mode is probed once at construction. When the worker
/// thread cannot be spawned the runner degrades to synchronous execution
/// and [`LayoutRunner::mode`] reports the mode actually in effect, not the
/// one requested.
pub struct LayoutRunner {
    engine: Arc<dyn LayoutEngine>,
    mode: ExecutionMode,
    jobs: Option<Mutex<mpsc::Sender<Job>>>,
}

impl LayoutRunner {
    /// Create a runner, probing worker capability when requested
    pub fn new(engine: Arc<dyn LayoutEngine>, mode: ExecutionMode) -> Self {
        match mode {
            ExecutionMode::Synchronous => Self {
                engine,
                mode,
                jobs: None,
            },
            ExecutionMode::Worker => match spawn_worker(Arc::clone(&engine)) {
                Ok(sender) => Self {
                    engine,
                    mode: ExecutionMode::Worker,
                    jobs: Some(Mutex::new(sender)),
                },
                Err(error) => {
                    tracing::warn!(
                        %error,
                        "layout worker unavailable, falling back to synchronous execution"
                    );
                    Self {
                        engine,
                        mode: ExecutionMode::Synchronous,
                        jobs: None,
                    }
                }
            },
        }
    }

    /// Create a synchronous runner
    pub fn synchronous(engine: Arc<dyn LayoutEngine>) -> Self {
        Self::new(engine, ExecutionMode::Synchronous)
    }

    /// The mode actually in effect
    pub fn mode(&self) -> ExecutionMode {
        self.mode
    }

    /// Compute a layout for a descriptor.
    ///
    /// An empty node set short-circuits to an empty result with zero
    /// bounds without touching the engine. Engine failures propagate
    /// unchanged.
    pub async fn layout(&self, descriptor: &LayoutGraph) -> Result<ComputedGraph, LayoutError> {
        if descriptor.children.is_empty() {
            return Ok(ComputedGraph::empty());
        }

        let Some(jobs) = &self.jobs else {
            return self.engine.layout(descriptor);
        };

        let (reply, receiver) = oneshot::channel();
        let sent = jobs.lock().send(Job {
            descriptor: descriptor.clone(),
            reply,
        });
        if sent.is_err() {
            tracing::warn!("layout worker is gone, computing inline");
            return self.engine.layout(descriptor);
        }
        match receiver.await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!("layout worker dropped a job, computing inline");
                self.engine.layout(descriptor)
            }
        }
    }
}

fn spawn_worker(engine: Arc<dyn LayoutEngine>) -> std::io::Result<mpsc::Sender<Job>> {
    let (sender, receiver) = mpsc::channel::<Job>();
    thread::Builder::new()
        .name("diaflow-layout".into())
        .spawn(move || {
            while let Ok(job) = receiver.recv() {
                let result = engine.layout(&job.descriptor);
                // The caller may have given up on the reply; that is fine.
                let _ = job.reply.send(result);
            }
        })?;
    Ok(sender)
}

/// Convert, compute and map back in one call.
pub async fn run_layout(
    runner: &LayoutRunner,
    graph: &Graph,
    options: &LayoutOptions,
) -> Result<LayoutPlacement, LayoutError> {
    let descriptor = to_descriptor(graph, options);
    let computed = runner.layout(&descriptor).await?;
    Ok(map_result(&computed, graph, options))
}
