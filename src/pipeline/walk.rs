//! File enumeration: a lazy, single-pass sequence of regular files under a scan root, and the
//! walk thread that feeds it into the path channel.

use crossbeam_channel::Sender;
use log::{debug, info};
use std::fs::FileType;
use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};

use crate::ScanRoot;
use crate::engine::tools::should_include_in_walk;

/// One result from a directory walk.
pub enum WalkOutcome {
    /// A regular file (or a link to one).
    File(PathBuf),
    /// A directory, a link to a directory, or a special file.
    Other(PathBuf),
    Err { msg: String, path: Option<PathBuf> },
}

/// Walk settings taken from the run configuration.
#[derive(Clone, Debug, Default)]
pub struct WalkOptions {
    pub parallel_walk: bool,
    pub follow_links: bool,
    /// Stop after this many files.
    pub first_n: Option<usize>,
    /// Absolute paths never yielded (the report and its temp file).
    pub excluded: Vec<PathBuf>,
}

/// What the walk saw besides the files it yielded.
#[derive(Debug, Default)]
pub struct WalkSummary {
    pub yielded: usize,
    pub skipped: Vec<(PathBuf, String)>,
}

fn is_regular_file(file_type: FileType, path: &Path) -> bool {
    if file_type.is_file() {
        return true;
    }
    // Without follow_links a link reports its own type; resolve it once.
    file_type.is_symlink()
        && std::fs::metadata(path)
            .map(|m| m.is_file())
            .unwrap_or(false)
}

fn classify_entry(path: PathBuf, file_type: FileType) -> WalkOutcome {
    if is_regular_file(file_type, &path) {
        WalkOutcome::File(path)
    } else {
        WalkOutcome::Other(path)
    }
}

/// Convert a jwalk result into [`WalkOutcome`].
pub fn to_outcome_jwalk(r: Result<jwalk::DirEntry<((), ())>, jwalk::Error>) -> WalkOutcome {
    match r {
        Ok(entry) => {
            let file_type = entry.file_type();
            classify_entry(entry.path(), file_type)
        }
        Err(err) => WalkOutcome::Err {
            msg: format!("{}", err),
            path: err.path().map(PathBuf::from),
        },
    }
}

/// Convert a walkdir result into [`WalkOutcome`].
pub fn to_outcome_walkdir(r: Result<walkdir::DirEntry, walkdir::Error>) -> WalkOutcome {
    match r {
        Ok(entry) => {
            let file_type = entry.file_type();
            classify_entry(entry.into_path(), file_type)
        }
        Err(err) => WalkOutcome::Err {
            msg: format!("{}", err),
            path: err.path().map(PathBuf::from),
        },
    }
}

fn jwalk_iter(root: &Path, opts: &WalkOptions) -> Box<dyn Iterator<Item = WalkOutcome>> {
    use jwalk::Parallelism;
    use std::time::Duration;
    Box::new(
        jwalk::WalkDir::new(root)
            .follow_links(opts.follow_links)
            .skip_hidden(false)
            .min_depth(1)
            .parallelism(Parallelism::RayonDefaultPool {
                busy_timeout: Duration::from_secs(60),
            })
            .into_iter()
            .map(to_outcome_jwalk),
    )
}

fn walkdir_iter(root: &Path, opts: &WalkOptions) -> Box<dyn Iterator<Item = WalkOutcome>> {
    use walkdir::WalkDir;
    Box::new(
        WalkDir::new(root)
            .follow_links(opts.follow_links)
            .min_depth(1)
            .into_iter()
            .map(to_outcome_walkdir),
    )
}

/// Lazy sequence of candidate files under a [`ScanRoot`].
///
/// A `SingleFile` root yields exactly that file. A `Directory` root is walked recursively and
/// only regular files are yielded; traversal and yielding are interleaved. Unreadable entries are
/// recorded (see [`FileEnumerator::into_summary`]) and never end the sequence early.
pub struct FileEnumerator {
    outcomes: Box<dyn Iterator<Item = WalkOutcome>>,
    first_n: Option<usize>,
    excluded: Vec<PathBuf>,
    root: PathBuf,
    yielded: usize,
    capped: bool,
    skipped: Vec<(PathBuf, String)>,
}

impl FileEnumerator {
    pub fn new(root: &ScanRoot, opts: &WalkOptions) -> Self {
        let outcomes: Box<dyn Iterator<Item = WalkOutcome>> = match root {
            ScanRoot::SingleFile(p) => Box::new(std::iter::once(WalkOutcome::File(p.clone()))),
            ScanRoot::Directory(p) => match opts.parallel_walk {
                true => jwalk_iter(p, opts),
                false => walkdir_iter(p, opts),
            },
        };
        FileEnumerator {
            outcomes,
            first_n: opts.first_n,
            excluded: opts.excluded.clone(),
            root: root.path().to_path_buf(),
            yielded: 0,
            capped: false,
            skipped: Vec::new(),
        }
    }

    /// Counts and skipped entries so far. Call once the sequence is exhausted.
    pub fn into_summary(self) -> WalkSummary {
        WalkSummary {
            yielded: self.yielded,
            skipped: self.skipped,
        }
    }
}

impl Iterator for FileEnumerator {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        if let Some(n) = self.first_n
            && self.yielded >= n
        {
            if !self.capped {
                self.capped = true;
                info!(
                    "Only attempting to hash the first: {} files at the scan location: {}",
                    n,
                    self.root.display()
                );
            }
            return None;
        }
        loop {
            match self.outcomes.next()? {
                WalkOutcome::File(path) => {
                    if !should_include_in_walk(&path, &self.excluded) {
                        continue;
                    }
                    self.yielded += 1;
                    return Some(path);
                }
                WalkOutcome::Other(path) => {
                    debug!("not a regular file, skipped: {}", path.display());
                }
                WalkOutcome::Err { msg, path } => {
                    debug!("walk error: {}", msg);
                    let p = path.unwrap_or_else(|| PathBuf::from("<no-path>"));
                    self.skipped.push((p, msg));
                }
            }
        }
    }
}

/// Run the enumerator on its own thread, sending each file to `path_tx` as it is found.
/// Drops `path_tx` when done so workers see the channel close. Returns the walk summary.
pub fn spawn_walk_thread(
    path_tx: Sender<PathBuf>,
    root: ScanRoot,
    opts: WalkOptions,
) -> JoinHandle<WalkSummary> {
    thread::spawn(move || {
        let mut files = FileEnumerator::new(&root, &opts);
        for path in files.by_ref() {
            if path_tx.send(path).is_err() {
                break;
            }
        }
        drop(path_tx);
        files.into_summary()
    })
}
