use colored::Colorize;
use env_logger::Builder;
use log::{Level, LevelFilter};
use std::io::Write;

/// Install the env_logger backend. Our crate logs at Info (Debug when `verbose`), dependencies
/// only at Warn; `RUST_LOG` is still honoured. Safe to call more than once.
pub fn setup_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let _ = Builder::from_default_env()
        .filter_level(LevelFilter::Warn)
        .filter_module(env!("CARGO_PKG_NAME"), level)
        .format(|buf, record| {
            let name = env!("CARGO_PKG_NAME");
            let ts = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
            let line = match record.level() {
                Level::Error | Level::Warn => {
                    let level_str = match record.level() {
                        Level::Warn => "WARN".yellow(),
                        _ => "ERROR".red(),
                    };
                    let path = record.target().to_string().white();
                    format!(
                        "[{} {} {} {}] {}",
                        ts,
                        name.cyan(),
                        level_str,
                        path,
                        record.args()
                    )
                }
                Level::Debug | Level::Trace => {
                    format!(
                        "[{} {}] {}",
                        ts,
                        name.cyan(),
                        record.args().to_string().dimmed()
                    )
                }
                Level::Info => format!("[{} {}] {}", ts, name.cyan(), record.args()),
            };
            writeln!(buf, "{}", line)
        })
        .try_init();
}
