// SPDX-License-Identifier: MIT OR Apache-2.0
//! Cooperative batch processing for large diagram updates.
//!
//! Work is split into consecutive batches with a single suspension point
//! per batch boundary (`tokio::task::yield_now`), so a long update never
//! monopolizes the task it runs on for more than one batch. Batches run
//! strictly in order; no cancellation primitive is exposed - a transform
//! wanting early termination has to check its own flag and return early.

use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::future::Future;

/// Progress after one finished batch
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatchProgress {
    /// Completed share of the whole run, in `(0, 1]`
    pub fraction: f32,
    /// Items processed so far
    pub processed: usize,
    /// Items in the whole run
    pub total: usize,
}

/// Error raised by batch processing
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    /// A batch size of zero can never make progress
    #[error("Batch size must be at least 1")]
    ZeroBatchSize,

    /// The merge variant needs at least one batch result to fold
    #[error("No batches to merge")]
    NothingToMerge,
}

/// Run `transform` over consecutive batches of `items`.
///
/// Returns the per-batch results in batch order.
pub async fn process_batches<T, R, F, Fut>(
    items: &[T],
    batch_size: usize,
    transform: F,
) -> Result<Vec<R>, BatchError>
where
    T: Clone,
    F: FnMut(Vec<T>) -> Fut,
    Fut: Future<Output = R>,
{
    process_batches_with_progress(items, batch_size, transform, |_| {}).await
}

/// [`process_batches`] with a progress callback invoked after every batch.
pub async fn process_batches_with_progress<T, R, F, Fut, P>(
    items: &[T],
    batch_size: usize,
    mut transform: F,
    mut on_progress: P,
) -> Result<Vec<R>, BatchError>
where
    T: Clone,
    F: FnMut(Vec<T>) -> Fut,
    Fut: Future<Output = R>,
    P: FnMut(BatchProgress),
{
    if batch_size == 0 {
        return Err(BatchError::ZeroBatchSize);
    }
    let total = items.len();
    let mut results = Vec::with_capacity(total.div_ceil(batch_size));
    let mut processed = 0;

    for chunk in items.chunks(batch_size) {
        if processed > 0 {
            tokio::task::yield_now().await;
        }
        let result = transform(chunk.to_vec()).await;
        results.push(result);
        processed += chunk.len();
        on_progress(BatchProgress {
            fraction: processed as f32 / total as f32,
            processed,
            total,
        });
    }
    Ok(results)
}

/// How one field behaves when batch results are folded together
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeRule {
    /// Append the later batch's array elements to the accumulator's
    Concat,
    /// The later batch's value replaces the accumulator's
    Replace,
}

/// Declared per-field merge behavior
///
/// Fields without an explicit rule default to `Concat` when the incoming
/// value is an array and `Replace` otherwise.
#[derive(Debug, Clone, Default)]
pub struct MergePolicy {
    rules: IndexMap<String, MergeRule>,
}

impl MergePolicy {
    /// Create a policy holding only the defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a rule for one field
    pub fn with_rule(mut self, field: impl Into<String>, rule: MergeRule) -> Self {
        self.rules.insert(field.into(), rule);
        self
    }

    fn rule_for(&self, field: &str, incoming: &Value) -> MergeRule {
        self.rules.get(field).copied().unwrap_or(if incoming.is_array() {
            MergeRule::Concat
        } else {
            MergeRule::Replace
        })
    }
}

/// Run `transform` over batches and fold the JSON-object results into one.
///
/// The first batch seeds the accumulator; later batches merge field by
/// field under `policy`. Zero batches is an explicit failure, distinct
/// from a silently empty result.
pub async fn process_batches_merged<T, F, Fut, P>(
    items: &[T],
    batch_size: usize,
    policy: &MergePolicy,
    transform: F,
    on_progress: P,
) -> Result<Map<String, Value>, BatchError>
where
    T: Clone,
    F: FnMut(Vec<T>) -> Fut,
    Fut: Future<Output = Map<String, Value>>,
    P: FnMut(BatchProgress),
{
    let results = process_batches_with_progress(items, batch_size, transform, on_progress).await?;
    let mut batches = results.into_iter();
    let mut accumulator = batches.next().ok_or(BatchError::NothingToMerge)?;
    for batch in batches {
        merge_into(&mut accumulator, batch, policy);
    }
    Ok(accumulator)
}

fn merge_into(accumulator: &mut Map<String, Value>, batch: Map<String, Value>, policy: &MergePolicy) {
    for (field, incoming) in batch {
        let Some(existing) = accumulator.get_mut(&field) else {
            accumulator.insert(field, incoming);
            continue;
        };
        match (policy.rule_for(&field, &incoming), incoming) {
            (MergeRule::Concat, Value::Array(tail)) => {
                if let Value::Array(head) = existing {
                    head.extend(tail);
                } else {
                    *existing = Value::Array(tail);
                }
            }
            (_, value) => *existing = value,
        }
    }
}

/// Synthesize `count` items by index in cooperative batches.
///
/// Batches are contiguous index ranges rather than slices of an existing
/// sequence; the output is the flat item list in index order.
pub async fn generate_batches<R, G>(
    count: usize,
    batch_size: usize,
    generator: G,
) -> Result<Vec<R>, BatchError>
where
    G: FnMut(usize) -> R,
{
    generate_batches_with_progress(count, batch_size, generator, |_| {}).await
}

/// [`generate_batches`] with a progress callback invoked after every batch.
pub async fn generate_batches_with_progress<R, G, P>(
    count: usize,
    batch_size: usize,
    mut generator: G,
    mut on_progress: P,
) -> Result<Vec<R>, BatchError>
where
    G: FnMut(usize) -> R,
    P: FnMut(BatchProgress),
{
    if batch_size == 0 {
        return Err(BatchError::ZeroBatchSize);
    }
    let mut results = Vec::with_capacity(count);
    let mut start = 0;

    while start < count {
        if start > 0 {
            tokio::task::yield_now().await;
        }
        let end = (start + batch_size).min(count);
        for index in start..end {
            results.push(generator(index));
        }
        on_progress(BatchProgress {
            fraction: end as f32 / count as f32,
            processed: end,
            total: count,
        });
        start = end;
    }
    Ok(results)
}
