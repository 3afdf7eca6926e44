use anyhow::Result;
use log::{debug, error, info};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::engine::parallel::{parallel_walk_handler, resolve_worker_count};
use crate::engine::record::assemble;
use crate::engine::tools::classify_root;
use crate::pipeline::{
    PipelineHandles, RecordJob, WalkOptions, WorkerOutcome, create_pipeline_channels,
    report_skipped_and_dropped, spawn_hash_workers, spawn_walk_thread,
};
use crate::utils::config::{STREAMING_CHANNEL_CAP, WorkerThreadLimits};
use crate::{FileRecord, RunConfig, RunSummary, ScanRoot};

pub fn walk_options(cfg: &RunConfig, excluded: Vec<PathBuf>) -> WalkOptions {
    WalkOptions {
        parallel_walk: cfg.parallel_walk,
        follow_links: cfg.follow_links,
        first_n: cfg.first_n,
        excluded,
    }
}

/// Start the walk thread and `num_workers` workers running `job`. Returns the result receiver
/// and join handles; outcomes arrive in completion order, not walk order.
pub fn run_pipeline_with(
    root: &ScanRoot,
    walk: WalkOptions,
    num_workers: usize,
    job: RecordJob,
) -> PipelineHandles {
    let num_workers = num_workers.max(1);
    let channels = create_pipeline_channels(STREAMING_CHANNEL_CAP);
    parallel_walk_handler(walk.parallel_walk);

    let walk_handle = spawn_walk_thread(channels.path_tx, root.clone(), walk);
    let worker_handles =
        spawn_hash_workers(channels.path_rx, &channels.result_tx, job, num_workers);

    // Dropping the last sender closes the channel once all workers exit.
    drop(channels.result_tx);

    PipelineHandles {
        result_rx: channels.result_rx,
        walk_handle,
        worker_handles,
        num_workers,
    }
}

/// Start the hashing pipeline for `root`: every worker assembles records with a read-only copy
/// of `cfg`. Paths in `excluded` are never hashed.
pub fn run_pipeline(root: &ScanRoot, cfg: &RunConfig, excluded: Vec<PathBuf>) -> PipelineHandles {
    let num_workers = resolve_worker_count(cfg.workers);
    info!(
        "Processing with {} hash workers out of {} threads",
        num_workers,
        WorkerThreadLimits::current().all_threads
    );
    let job_root = root.clone();
    let job_cfg = cfg.clone();
    let job: RecordJob = Arc::new(move |path: &Path| assemble(path, &job_root, &job_cfg));
    run_pipeline_with(root, walk_options(cfg, excluded), num_workers, job)
}

/// Receive every outcome, hand records to `on_record`, then join the walk and the workers.
/// Crashed files are logged and counted, never fatal. An error from `on_record` stops the drain.
pub fn drain_pipeline<F>(handles: PipelineHandles, mut on_record: F) -> Result<RunSummary>
where
    F: FnMut(FileRecord) -> Result<()>,
{
    let PipelineHandles {
        result_rx,
        walk_handle,
        worker_handles,
        ..
    } = handles;

    let mut summary = RunSummary::default();
    for outcome in result_rx.iter() {
        match outcome {
            WorkerOutcome::Record(record) => {
                on_record(record)?;
                summary.written += 1;
            }
            WorkerOutcome::Crashed { path, message } => {
                error!(
                    "hash of {} generated an exception: {}",
                    path.display(),
                    message
                );
                summary.dropped += 1;
            }
        }
    }
    debug!(
        "main: result channel closed, total {} records",
        summary.written
    );

    let walk = walk_handle
        .join()
        .map_err(|_| anyhow::anyhow!("walk thread panicked"))?;
    for h in worker_handles {
        h.join()
            .map_err(|_| anyhow::anyhow!("hash worker thread panicked"))?;
    }

    summary.enumerated = walk.yielded;
    summary.skipped = walk.skipped;
    report_skipped_and_dropped(&summary);
    Ok(summary)
}

/// Classify `cfg.scan_root`, hash everything under it and return the records (in completion
/// order) with the run summary. Fails only when the scan root does not exist.
pub fn collect_records(cfg: &RunConfig) -> Result<(Vec<FileRecord>, RunSummary)> {
    let root = classify_root(&cfg.scan_root)?;
    let handles = run_pipeline(&root, cfg, Vec::new());
    let mut records = Vec::new();
    let summary = drain_pipeline(handles, |record| {
        records.push(record);
        Ok(())
    })?;
    Ok((records, summary))
}
