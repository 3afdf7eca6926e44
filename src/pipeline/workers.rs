use crossbeam_channel::{Receiver, Sender};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::FileRecord;

/// The per-file job each worker runs. Must not share mutable state across workers.
pub type RecordJob = Arc<dyn Fn(&Path) -> FileRecord + Send + Sync>;

/// What a worker sends back for one path.
pub enum WorkerOutcome {
    Record(FileRecord),
    /// The job panicked; this file gets no row.
    Crashed { path: PathBuf, message: String },
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Single hash worker: read paths from path_rx, run the job, send the outcome on result_tx.
/// A panic in the job is caught and reported for that path only; the worker keeps going.
fn hash_worker_loop(path_rx: Receiver<PathBuf>, result_tx: Sender<WorkerOutcome>, job: RecordJob) {
    while let Ok(path) = path_rx.recv() {
        let outcome = match panic::catch_unwind(AssertUnwindSafe(|| job(&path))) {
            Ok(record) => WorkerOutcome::Record(record),
            Err(payload) => WorkerOutcome::Crashed {
                message: panic_message(payload.as_ref()),
                path,
            },
        };
        if result_tx.send(outcome).is_err() {
            break;
        }
    }
}

/// Spawn `num_workers` hash workers. Caller must drop its own `result_tx` after this so the
/// result channel closes once every worker exits.
pub fn spawn_hash_workers(
    path_rx: Receiver<PathBuf>,
    result_tx: &Sender<WorkerOutcome>,
    job: RecordJob,
    num_workers: usize,
) -> Vec<JoinHandle<()>> {
    (0..num_workers)
        .map(|_| {
            let path_rx = path_rx.clone();
            let result_tx = result_tx.clone();
            let job = Arc::clone(&job);
            thread::spawn(move || hash_worker_loop(path_rx, result_tx, job))
        })
        .collect()
}
