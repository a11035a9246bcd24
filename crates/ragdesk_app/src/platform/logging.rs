//! Platform logging initialization for ragdesk.
//!
//! Writes logs to `./ragdesk.log` in the current working directory.

use std::fs::File;
use std::path::Path;

use log::LevelFilter;
use serde::Deserialize;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

const LOG_FILENAME: &str = "./ragdesk.log";

/// Destination for log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum LogDestination {
    /// Write to ./ragdesk.log in current directory.
    #[default]
    File,
    /// Write to terminal (stdout).
    Terminal,
    /// Write to both file and terminal.
    Both,
}

/// Initialize the logger with the specified destination and level.
///
/// For `LogDestination::File` or `Both`, creates `./ragdesk.log` in the
/// current working directory. If that file cannot be created, output goes to
/// the terminal instead.
pub fn initialize(destination: LogDestination, level: LevelFilter) {
    let loggers = build_loggers(destination, level, Path::new(LOG_FILENAME));
    let _ = CombinedLogger::init(loggers);
}

fn build_loggers(
    destination: LogDestination,
    level: LevelFilter,
    log_path: &Path,
) -> Vec<Box<dyn SharedLogger>> {
    let config = build_config();

    match destination {
        LogDestination::File => match create_file_logger(level, config.clone(), log_path) {
            Some(file_logger) => vec![file_logger],
            None => vec![terminal_logger(level, config)],
        },
        LogDestination::Terminal => vec![terminal_logger(level, config)],
        LogDestination::Both => {
            let mut loggers = vec![terminal_logger(level, config.clone())];
            if let Some(file_logger) = create_file_logger(level, config, log_path) {
                loggers.push(file_logger);
            }
            loggers
        }
    }
}

fn terminal_logger(level: LevelFilter, config: Config) -> Box<dyn SharedLogger> {
    TermLogger::new(level, config, TerminalMode::Mixed, ColorChoice::Auto)
}

fn build_config() -> Config {
    // eframe, wgpu and winit are chatty at info level.
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .add_filter_ignore_str("eframe")
        .add_filter_ignore_str("egui")
        .add_filter_ignore_str("wgpu")
        .add_filter_ignore_str("winit")
        .build()
}

fn create_file_logger(
    level: LevelFilter,
    config: Config,
    log_path: &Path,
) -> Option<Box<dyn SharedLogger>> {
    match File::create(log_path) {
        Ok(file) => Some(WriteLogger::new(level, config, file)),
        Err(err) => {
            eprintln!("Warning: Could not create log file at {:?}: {}", log_path, err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn file_destination_creates_the_log_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ragdesk.log");

        let loggers = build_loggers(LogDestination::File, LevelFilter::Info, &path);

        assert_eq!(loggers.len(), 1);
        assert!(path.is_file());
    }

    #[test]
    fn unwritable_file_destination_falls_back_to_terminal() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("ragdesk.log");

        let loggers = build_loggers(LogDestination::File, LevelFilter::Info, &path);

        assert_eq!(loggers.len(), 1);
        assert!(!path.exists());
    }

    #[test]
    fn both_destination_keeps_terminal_when_file_fails() {
        let dir = TempDir::new().unwrap();
        let writable = dir.path().join("ragdesk.log");
        let unwritable = dir.path().join("missing").join("ragdesk.log");

        assert_eq!(
            build_loggers(LogDestination::Both, LevelFilter::Info, &writable).len(),
            2
        );
        assert_eq!(
            build_loggers(LogDestination::Both, LevelFilter::Info, &unwritable).len(),
            1
        );
    }
}
