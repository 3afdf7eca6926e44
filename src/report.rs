//! Report writing: the one entry point that turns a [`RunConfig`] into a CSV file on disk.

use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use crate::engine::progress::BatchedCounter;
use crate::engine::sink::{CsvReportSink, ReportSink};
use crate::engine::tools::classify_root;
use crate::pipeline::{drain_pipeline, run_pipeline};
use crate::utils::{remove_stale_temp, rename_temp_to_final, temp_path_for};
use crate::{RunConfig, RunSummary};

/// Absolute forms of our own output files, so a report written inside the scan root is never
/// hashed into itself.
fn own_outputs(report: &Path, temp_path: &Path) -> Vec<PathBuf> {
    [report, temp_path]
        .iter()
        .filter_map(|p| p.canonicalize().ok())
        .collect()
}

/// Hash every file under `cfg.scan_root` and write one row per file to `cfg.report`.
///
/// The scan root is checked first; if it does not exist the run fails with
/// [`HashError::LocationNotFound`](crate::HashError::LocationNotFound) and no report file is
/// created. Rows go to `<report>.tmp`, which is renamed into place after every worker has drained.
/// Returns the path written.
pub fn hash_report(cfg: &RunConfig) -> Result<PathBuf> {
    let (report, _summary) = hash_report_with_summary(cfg)?;
    Ok(report)
}

/// [`hash_report`], also returning the run's counts.
pub fn hash_report_with_summary(cfg: &RunConfig) -> Result<(PathBuf, RunSummary)> {
    let root = classify_root(&cfg.scan_root)?;

    debug!("CSV report file: {}", cfg.report.display());
    if cfg.report.exists() {
        warn!("Overwriting existing report file: {}", cfg.report.display());
    }
    let temp_path = temp_path_for(&cfg.report);
    remove_stale_temp(&temp_path)?;
    let file = File::create(&temp_path)
        .with_context(|| format!("create report file {}", temp_path.display()))?;
    let mut sink = CsvReportSink::new(BufWriter::new(file), cfg.output_mode, cfg.algorithm)?;
    debug!(
        "CSV output format: {:?} - algorithm: {}",
        cfg.output_mode,
        cfg.algorithm.name()
    );

    let handles = run_pipeline(&root, cfg, own_outputs(&cfg.report, &temp_path));
    let mut counter = BatchedCounter::new(cfg.verbose, "Hashing");
    let drained = drain_pipeline(handles, |record| {
        sink.write_record(&record)?;
        counter.tick();
        Ok(())
    });
    counter.finish();

    let finished = drained.and_then(|summary| {
        sink.flush()?;
        sink.into_inner()?;
        Ok(summary)
    });
    let summary = match finished {
        Ok(summary) => summary,
        Err(e) => {
            let _ = std::fs::remove_file(&temp_path);
            return Err(e);
        }
    };

    rename_temp_to_final(&temp_path, &cfg.report)?;
    info!("{} files hashed", summary.written);
    Ok((cfg.report.clone(), summary))
}
