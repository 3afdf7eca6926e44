//! Load `hashsweep.toml` from a directory (CLI only). The library takes a fully built
//! [`RunConfig`] and never reads this file itself.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::utils::config::PackagePaths;
use crate::{DigestAlgorithm, OutputMode, RunConfig};

#[derive(Debug, Default, Deserialize)]
pub struct SettingsToml {
    #[serde(default)]
    settings: SettingsSection,
}

#[derive(Debug, Default, Deserialize)]
struct SettingsSection {
    report: Option<String>,
    case_label: Option<String>,
    max_hash_size: Option<u64>,
    simple: Option<bool>,
    workers: Option<usize>,
    algorithm: Option<DigestAlgorithm>,
    parallel_walk: Option<bool>,
    follow_links: Option<bool>,
    verbose: Option<bool>,
}

/// Load the settings file from `dir` if present. Returns None if missing; a malformed file is
/// logged and ignored.
pub fn load_settings_toml(dir: &Path) -> Option<SettingsToml> {
    let path = dir.join(PackagePaths::get().settings_filename());
    let s = std::fs::read_to_string(&path).ok()?;
    parse_settings_toml(&s)
        .map_err(|e| log::warn!("{}: {}", path.display(), e))
        .ok()
}

pub fn parse_settings_toml(s: &str) -> Result<SettingsToml, toml::de::Error> {
    toml::from_str(s)
}

/// Overwrite a config field from the file when present.
macro_rules! apply_file_opt {
    ($section:expr, $cfg:expr, $field:ident => $cfg_field:ident) => {
        if let Some(v) = $section.$field.clone() {
            $cfg.$cfg_field = v;
        }
    };
}

/// Apply file settings to `cfg` (only fields present in the file). Call before applying CLI flags.
/// The scan root and first-N cap are per-invocation and never read from the file.
pub fn apply_file_to_config(file: &SettingsToml, cfg: &mut RunConfig) {
    let s = &file.settings;
    if let Some(ref p) = s.report {
        cfg.report = PathBuf::from(p);
    }
    apply_file_opt!(s, cfg, case_label => case_label);
    apply_file_opt!(s, cfg, max_hash_size => max_hash_size);
    if let Some(simple) = s.simple {
        cfg.output_mode = if simple {
            OutputMode::Simple
        } else {
            OutputMode::Full
        };
    }
    if s.workers.is_some() {
        cfg.workers = s.workers;
    }
    apply_file_opt!(s, cfg, algorithm => algorithm);
    apply_file_opt!(s, cfg, parallel_walk => parallel_walk);
    apply_file_opt!(s, cfg, follow_links => follow_links);
    apply_file_opt!(s, cfg, verbose => verbose);
}
