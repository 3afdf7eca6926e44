//! Progress counter for verbose runs. The total is unknown while the walk is still running,
//! so this is a plain counter rather than a percentage bar.

use kdam::{Animation, Bar, BarExt};

use crate::utils::config::ProgressConsts;

pub fn create_counter(desc: &'static str) -> Bar {
    kdam::tqdm!(
        total = 0,
        desc = desc,
        animation = Animation::Classic,
        position = 0,
        unit = " files"
    )
}

/// Batches counter updates so the sink loop does not redraw on every record.
pub struct BatchedCounter {
    bar: Option<Bar>,
    pending: usize,
}

impl BatchedCounter {
    /// A counter that only draws when `enabled`.
    pub fn new(enabled: bool, desc: &'static str) -> Self {
        let bar = enabled.then(|| {
            let mut b = create_counter(desc);
            let _ = b.refresh();
            b
        });
        BatchedCounter { bar, pending: 0 }
    }

    pub fn tick(&mut self) {
        let Some(bar) = self.bar.as_mut() else {
            return;
        };
        self.pending += 1;
        if self.pending >= ProgressConsts::UPDATE_BATCH_SIZE {
            let _ = bar.update(self.pending);
            self.pending = 0;
        }
    }

    /// Flush the remainder and end the line.
    pub fn finish(mut self) {
        if let Some(bar) = self.bar.as_mut() {
            if self.pending > 0 {
                let _ = bar.update(self.pending);
            }
            let _ = bar.refresh();
            eprintln!();
        }
    }
}
