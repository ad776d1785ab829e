//! All-pairs comparison of two record collections.
//!
//! The left collection is split into contiguous shards; each shard is crossed
//! with the full right collection. Every pair is evaluated independently
//! (match, dedupe), empty results are filtered out, and shard outputs are
//! merged in shard order. Since shards are contiguous, the merged order is
//! left-major input order for any shard size or worker count.

use rayon::prelude::*;

use crate::config::{ExecutionConfig, OutputOrder};
use crate::dedupe::dedupe_result;
use crate::error::XrefError;
use crate::matcher::find_matches;
use crate::model::{PairResult, Record, RunStats};

/// Surviving results of one shard, tagged with its position.
#[derive(Debug, Clone)]
pub struct Shard {
    pub index: usize,
    pub results: Vec<PairResult>,
}

/// Lazy all-pairs product, left-major.
pub fn cartesian<'a>(
    left: &'a [Record],
    right: &'a [Record],
) -> impl Iterator<Item = (&'a Record, &'a Record)> + 'a {
    left.iter().flat_map(move |l| right.iter().map(move |r| (l, r)))
}

/// Matching followed by deduplication for a single pair.
pub fn evaluate_pair(left: &Record, right: &Record) -> PairResult {
    dedupe_result(PairResult {
        left_id: left.id,
        right_id: right.id,
        matches: find_matches(left, right),
    })
}

/// Concatenate shard outputs in shard order.
pub fn coalesce(mut shards: Vec<Shard>) -> Vec<PairResult> {
    shards.sort_by_key(|s| s.index);
    shards.into_iter().flat_map(|s| s.results).collect()
}

/// Compare every left record with every right record using default execution
/// settings. Only pairs with at least one piece of evidence are returned.
pub fn run(left: &[Record], right: &[Record]) -> Vec<PairResult> {
    let results: Vec<PairResult> = left
        .par_iter()
        .flat_map_iter(|l| right.iter().map(move |r| evaluate_pair(l, r)))
        .filter(PairResult::has_matches)
        .collect();
    log::debug!(
        "compared {} pair(s), {} matched",
        left.len() * right.len(),
        results.len()
    );
    results
}

/// Collect every shard and apply `order` to the merged output.
pub fn run_with(
    left: &[Record],
    right: &[Record],
    exec: &ExecutionConfig,
    order: OutputOrder,
) -> Result<(Vec<PairResult>, RunStats), XrefError> {
    let mut shards = Vec::new();
    let stats = run_sharded(left, right, exec, |shard| {
        shards.push(shard);
        Ok(())
    })?;

    let mut results = coalesce(shards);
    if order == OutputOrder::Ids {
        results.sort_by_key(|r| (r.left_id, r.right_id));
    }
    Ok((results, stats))
}

/// Stream each shard's surviving results to `sink`, in shard order.
///
/// Shards are evaluated in parallel batches sized to the worker pool, so at
/// most one batch of shard results is held in memory. A sink error stops the
/// run.
pub fn run_sharded<F>(
    left: &[Record],
    right: &[Record],
    exec: &ExecutionConfig,
    sink: F,
) -> Result<RunStats, XrefError>
where
    F: FnMut(Shard) -> Result<(), XrefError> + Send,
{
    exec.validate()?;

    if exec.workers == 0 {
        return drive(left, right, exec.shard_size, sink);
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(exec.workers)
        .thread_name(|i| format!("xref-worker-{i}"))
        .build()
        .map_err(|e| XrefError::Execution(e.to_string()))?;
    pool.install(|| drive(left, right, exec.shard_size, sink))
}

fn drive<F>(
    left: &[Record],
    right: &[Record],
    shard_size: usize,
    mut sink: F,
) -> Result<RunStats, XrefError>
where
    F: FnMut(Shard) -> Result<(), XrefError>,
{
    let shards: Vec<&[Record]> = left.chunks(shard_size).collect();
    let batch = rayon::current_num_threads().max(1);
    let mut stats = RunStats {
        pairs_compared: (left.len() as u64) * (right.len() as u64),
        shards: shards.len(),
        ..RunStats::default()
    };

    log::info!(
        "comparing {} x {} record(s) in {} shard(s), {} worker(s)",
        left.len(),
        right.len(),
        shards.len(),
        batch
    );

    for (batch_idx, group) in shards.chunks(batch).enumerate() {
        let outputs: Vec<Vec<PairResult>> = group
            .par_iter()
            .map(|shard| evaluate_shard(shard, right))
            .collect();

        for (offset, results) in outputs.into_iter().enumerate() {
            let index = batch_idx * batch + offset;
            stats.pairs_matched += results.len() as u64;
            stats.evidence += results.iter().map(|r| r.matches.len() as u64).sum::<u64>();
            log::debug!("shard {index}: {} matched pair(s)", results.len());
            sink(Shard { index, results })?;
        }
    }

    log::info!(
        "compared {} pair(s): {} matched, {} evidence entries",
        stats.pairs_compared,
        stats.pairs_matched,
        stats.evidence
    );

    Ok(stats)
}

fn evaluate_shard(shard: &[Record], right: &[Record]) -> Vec<PairResult> {
    cartesian(shard, right)
        .map(|(l, r)| evaluate_pair(l, r))
        .filter(PairResult::has_matches)
        .collect()
}
