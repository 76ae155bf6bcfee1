use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

#[derive(Parser, Clone, Eq, PartialEq, Ord, PartialOrd, Debug)]
#[command(
    author,
    version,
    about,
    long_about = "Fetches a daily IT lesson from a language model, archives it and emails it."
)]
pub struct Cli {
    /// Set logging level to use
    #[arg(long, short, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Folder for the application log and the dated digest files
    #[arg(
        long,
        value_name = "PATH",
        env = "DIGEST_LOG_DIR",
        default_value = "/app/logs"
    )]
    pub log_dir: PathBuf,
}

/// Exists to provide better help messages variants copied from LevelFilter as
/// that's the type that is actually needed
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Default)]
pub enum LogLevel {
    /// Nothing emitted in this mode
    Off,
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_info_level() {
        let cli = Cli::try_parse_from(["daily_digest", "--log-dir", "somewhere"]).unwrap();
        assert_eq!(cli.log_level, LogLevel::Info);
        assert_eq!(cli.log_dir, PathBuf::from("somewhere"));
    }

    #[test]
    fn log_level_flag() {
        let cli = Cli::try_parse_from(["daily_digest", "-l", "debug"]).unwrap();
        assert_eq!(LevelFilter::from(cli.log_level), LevelFilter::Debug);
    }
}
