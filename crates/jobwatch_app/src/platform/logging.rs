//! Logger setup for jobwatch_app.
//!
//! The dashboard itself owns stdout, so by default logs go to a file and the
//! terminal only receives them when asked.

use std::fs::File;
use std::path::Path;

use log::LevelFilter;
use serde::{Deserialize, Serialize};
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

/// Where log records are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LogDestination {
    #[default]
    File,
    /// Terminal only; warnings and errors go to stderr.
    Terminal,
    Both,
}

impl LogDestination {
    fn to_file(self) -> bool {
        matches!(self, LogDestination::File | LogDestination::Both)
    }

    fn to_terminal(self) -> bool {
        matches!(self, LogDestination::Terminal | LogDestination::Both)
    }
}

fn level_for(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Installs the global logger. A second call, or a log file that cannot be
/// created, leaves logging as it was.
pub fn initialize(destination: LogDestination, log_file: &Path, verbose: bool) {
    let level = level_for(verbose);
    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .add_filter_ignore_str("hyper")
        .add_filter_ignore_str("reqwest")
        .build();

    let mut sinks: Vec<Box<dyn SharedLogger>> = Vec::with_capacity(2);
    if destination.to_terminal() {
        sinks.push(TermLogger::new(
            level,
            config.clone(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ));
    }
    if destination.to_file() {
        match file_sink(level, config, log_file) {
            Ok(sink) => sinks.push(sink),
            Err(err) => eprintln!("jobwatch: no log file at {}: {}", log_file.display(), err),
        }
    }
    if !sinks.is_empty() {
        let _ = CombinedLogger::init(sinks);
    }
}

fn file_sink(
    level: LevelFilter,
    config: Config,
    path: &Path,
) -> std::io::Result<Box<dyn SharedLogger>> {
    let file = File::create(path)?;
    Ok(WriteLogger::new(level, config, file))
}
