//! Pipeline components: lazy walk, hash worker pool, result fan-in.

pub mod context;
pub mod error_handler;
pub mod orchestrator;
pub mod walk;
pub mod workers;

pub use context::{PipelineChannels, PipelineHandles, create_pipeline_channels};
pub use error_handler::report_skipped_and_dropped;
pub use orchestrator::{
    collect_records, drain_pipeline, run_pipeline, run_pipeline_with, walk_options,
};
pub use walk::{
    FileEnumerator, WalkOptions, WalkOutcome, WalkSummary, spawn_walk_thread, to_outcome_jwalk,
    to_outcome_walkdir,
};
pub use workers::{RecordJob, WorkerOutcome, spawn_hash_workers};
