//! Logging setup for jarclash.
//!
//! Diagnostics and the conflict report share the `log` facade, backed by
//! `env_logger` on stderr. The two are told apart by target: report lines are
//! logged under [`REPORT_TARGET`] and printed bare, so the banner and jar
//! lists read the same in every build; everything else carries its level.
//!
//! The filter is chosen as follows:
//!
//! 1. `RUST_LOG`, when set, wins outright
//! 2. `--quiet` keeps errors only; a failing report is raised to error level
//!    by the caller so it stays visible
//! 3. `-v` adds debug records, `-vv` trace
//! 4. otherwise info, which shows clean banners and warn-level conflict reports
//!
//! Debug builds prefix diagnostics with a timestamp, plus the module path from
//! `-v` on.
//!
//! ```rust,no_run
//! use jarclash::logging::init_logging;
//!
//! init_logging(0, false);
//! log::info!(target: jarclash::logging::REPORT_TARGET, "webapp has no class conflicts");
//! ```

use std::env;
use std::io::{self, Write};

use env_logger::fmt::Formatter;
use env_logger::Builder;
use log::{LevelFilter, Record};

/// Log target of conflict report lines.
pub const REPORT_TARGET: &str = "jarclash::report";

/// Install the global logger for the given CLI flags.
///
/// Only the first call installs a logger; later calls are ignored, which lets
/// tests drive [`crate::run_app`] repeatedly.
pub fn init_logging(verbose: u8, quiet: bool) {
    let from_env = env::var("RUST_LOG").ok();
    let level = determine_level(verbose, quiet);

    let mut builder = Builder::new();
    match &from_env {
        Some(filters) => {
            builder.parse_filters(filters);
        }
        None => {
            builder.filter_level(level);
        }
    }
    builder.format(move |buf, record| write_record(buf, record, verbose));

    if builder.try_init().is_err() {
        log::debug!("Logger already initialized");
        return;
    }

    match from_env {
        Some(filters) => log::debug!("Log filter from RUST_LOG: {filters}"),
        None => log::debug!("Log level: {level:?}"),
    }
}

fn determine_level(verbose: u8, quiet: bool) -> LevelFilter {
    match (quiet, verbose) {
        (true, _) => LevelFilter::Error,
        (false, 0) => LevelFilter::Info,
        (false, 1) => LevelFilter::Debug,
        (false, _) => LevelFilter::Trace,
    }
}

fn is_report(record: &Record<'_>) -> bool {
    record.target() == REPORT_TARGET
}

fn write_record(buf: &mut Formatter, record: &Record<'_>, verbose: u8) -> io::Result<()> {
    if is_report(record) {
        return writeln!(buf, "{}", record.args());
    }

    let level = record.level();
    let style = buf.default_level_style(level);

    if cfg!(debug_assertions) {
        let timestamp = buf.timestamp_seconds();
        if verbose >= 1 {
            return writeln!(
                buf,
                "{timestamp} {style}{level:<5}{style:#} [{}] {}",
                record.module_path().unwrap_or("unknown"),
                record.args()
            );
        }
        return writeln!(buf, "{timestamp} {style}{level:<5}{style:#} {}", record.args());
    }

    writeln!(buf, "{style}{level:<5}{style:#} {}", record.args())
}
