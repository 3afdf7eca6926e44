//! Pipeline channels and handles: walk thread -> path channel -> hash workers -> result channel.

use crossbeam_channel::{Receiver, Sender, bounded};
use std::path::PathBuf;
use std::thread::JoinHandle;

use super::walk::WalkSummary;
use super::workers::WorkerOutcome;

/// Handles returned by [`run_pipeline`](super::run_pipeline): receive outcomes from `result_rx`,
/// then join the walk and the workers (see [`drain_pipeline`](super::drain_pipeline)).
pub struct PipelineHandles {
    pub result_rx: Receiver<WorkerOutcome>,
    pub walk_handle: JoinHandle<WalkSummary>,
    pub worker_handles: Vec<JoinHandle<()>>,
    pub num_workers: usize,
}

/// Both bounded channels. The walk gets `path_tx`; workers get `path_rx` and clones of `result_tx`.
pub struct PipelineChannels {
    pub path_tx: Sender<PathBuf>,
    pub path_rx: Receiver<PathBuf>,
    pub result_tx: Sender<WorkerOutcome>,
    pub result_rx: Receiver<WorkerOutcome>,
}

pub fn create_pipeline_channels(channel_cap: usize) -> PipelineChannels {
    let (path_tx, path_rx) = bounded::<PathBuf>(channel_cap);
    let (result_tx, result_rx) = bounded::<WorkerOutcome>(channel_cap);
    PipelineChannels {
        path_tx,
        path_rx,
        result_tx,
        result_rx,
    }
}
