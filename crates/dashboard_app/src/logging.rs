//! Logging setup for the dashboard binary.
//!
//! File output goes to `./dashboard.log`; terminal output uses mixed mode so
//! warnings and errors land on stderr and do not interleave with rendered views.

use std::fs::File;
use std::path::Path;

use clap::ValueEnum;
use log::LevelFilter;
use serde::Deserialize;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

const LOG_FILE: &str = "./dashboard.log";

/// Where log lines are written. Selectable from the config file or `--log`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
pub enum LogDestination {
    File,
    #[default]
    Terminal,
    Both,
}

impl LogDestination {
    fn wants_terminal(self) -> bool {
        matches!(self, LogDestination::Terminal | LogDestination::Both)
    }

    fn wants_file(self) -> bool {
        matches!(self, LogDestination::File | LogDestination::Both)
    }
}

/// Install the global logger. A second call is a no-op.
pub fn initialize(destination: LogDestination, level: LevelFilter) {
    let config = dashboard_config();
    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();

    if destination.wants_terminal() {
        loggers.push(TermLogger::new(
            level,
            config.clone(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ));
    }
    if destination.wants_file() {
        match File::create(Path::new(LOG_FILE)) {
            Ok(file) => loggers.push(WriteLogger::new(level, config, file)),
            Err(err) => eprintln!("Warning: cannot write {LOG_FILE}: {err}"),
        }
    }

    if loggers.is_empty() {
        return;
    }
    let _ = CombinedLogger::init(loggers);
}

fn dashboard_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        // hyper and reqwest are chatty at debug.
        .add_filter_ignore_str("hyper")
        .add_filter_ignore_str("reqwest")
        .build()
}

#[cfg(test)]
mod tests {
    use super::LogDestination;

    #[test]
    fn destinations_select_sinks() {
        assert!(LogDestination::Terminal.wants_terminal());
        assert!(!LogDestination::Terminal.wants_file());
        assert!(LogDestination::File.wants_file());
        assert!(!LogDestination::File.wants_terminal());
        assert!(LogDestination::Both.wants_file() && LogDestination::Both.wants_terminal());
    }

    #[test]
    fn destination_parses_from_ron() {
        let parsed: LogDestination = ron::from_str("Both").unwrap();
        assert_eq!(parsed, LogDestination::Both);
    }
}
