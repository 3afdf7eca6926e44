use log::{debug, error, warn};

use crate::RunSummary;

/// Log what the run lost along the way: walk entries that could not be read and files whose
/// worker crashed. Call after joining the walk and the workers.
pub fn report_skipped_and_dropped(summary: &RunSummary) {
    if !summary.skipped.is_empty() {
        warn!(
            "Skipped {} walk entries due to permission errors or access issues",
            summary.skipped.len()
        );
        for (p, msg) in &summary.skipped {
            debug!("  skipped: {} ({})", p.display(), msg);
        }
    }
    if summary.dropped > 0 {
        error!(
            "{} of {} files generated an exception and have no report row",
            summary.dropped, summary.enumerated
        );
    }
}
