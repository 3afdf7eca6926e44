use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Work path for a report: rows go here and the file is renamed into place once the run drains.
pub fn temp_path_for(report: &Path) -> PathBuf {
    let name = report
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "report.csv".to_string());
    report
        .parent()
        .unwrap_or(Path::new("."))
        .join(format!("{name}.tmp"))
}

/// Remove a temp report left behind by an earlier aborted run.
pub fn remove_stale_temp(temp_path: &Path) -> Result<()> {
    if temp_path.exists() {
        fs::remove_file(temp_path)
            .with_context(|| format!("remove stale temp report at {}", temp_path.display()))?;
    }
    Ok(())
}

pub fn rename_temp_to_final(temp_path: &Path, final_path: &Path) -> Result<()> {
    fs::rename(temp_path, final_path).with_context(|| {
        format!(
            "rename temp report to final path ({} -> {})",
            temp_path.display(),
            final_path.display()
        )
    })
}
