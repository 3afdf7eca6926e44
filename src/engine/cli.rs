//! CLI command handler: layer defaults, `hashsweep.toml` and flags into a [`RunConfig`], then run.

use anyhow::Result;
use log::{error, info, warn};

use crate::engine::arg_parser::Cli;
use crate::error::HashError;
use crate::report::hash_report;
use crate::utils::{apply_file_to_config, load_settings_toml, setup_logging};
use crate::{OutputMode, RunConfig};

/// Build the run configuration: defaults, then the settings file in the working directory,
/// then explicit flags.
pub fn build_config(cli: &Cli) -> RunConfig {
    let mut cfg = RunConfig::default();
    if let Ok(cwd) = std::env::current_dir()
        && let Some(file) = load_settings_toml(&cwd)
    {
        apply_file_to_config(&file, &mut cfg);
    }

    cfg.scan_root = cli.scan.clone();
    cfg.first_n = cli.first_n;
    if let Some(ref r) = cli.report {
        cfg.report = r.clone();
    }
    if let Some(ref label) = cli.case_label {
        cfg.case_label = label.clone();
    }
    if let Some(max) = cli.max_hash_size {
        cfg.max_hash_size = max;
    }
    if let Some(simple) = cli.simple {
        cfg.output_mode = if simple {
            OutputMode::Simple
        } else {
            OutputMode::Full
        };
    }
    if cli.workers.is_some() {
        cfg.workers = cli.workers;
    }
    if let Some(alg) = cli.algorithm {
        cfg.algorithm = alg;
    }
    if let Some(pw) = cli.parallel_walk {
        cfg.parallel_walk = pw;
    }
    if let Some(fl) = cli.follow_links {
        cfg.follow_links = fl;
    }
    if let Some(v) = cli.verbose {
        cfg.verbose = v;
    }
    cfg
}

/// Run one hashing pass from parsed CLI arguments.
pub fn handle_run(cli: &Cli) -> Result<()> {
    let cfg = build_config(cli);
    setup_logging(cfg.verbose);
    log::debug!(
        "{} CONFIG:{:#?}",
        env!("CARGO_PKG_NAME").to_uppercase(),
        cfg
    );

    if cli.case_label.is_none() {
        warn!("Case label not provided, using: {}", cfg.case_label);
    }
    if cli.report.is_none() {
        warn!(
            "Output report file not specified, using: {}",
            cfg.report.display()
        );
    }
    info!("Maximum file size to hash: {} bytes", cfg.max_hash_size);

    match hash_report(&cfg) {
        Ok(report) => {
            info!("Output report: {}", report.display());
            Ok(())
        }
        Err(e) => {
            if let Some(he) = e.downcast_ref::<HashError>()
                && he.is_fatal()
            {
                error!("{}", he);
            }
            Err(e)
        }
    }
}
