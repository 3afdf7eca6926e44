pub mod config;
pub mod fd_limit;
pub mod logger;
pub mod settings_toml;
pub mod tempfiles;

pub use config::*;
pub use fd_limit::{FDS_PER_WORKER, max_open_fds, max_workers_by_fd_limit};
pub use logger::setup_logging;
pub use settings_toml::{apply_file_to_config, load_settings_toml};
pub use tempfiles::{remove_stale_temp, rename_temp_to_final, temp_path_for};
