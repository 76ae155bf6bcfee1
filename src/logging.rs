// Copied and edited based on https://github.com/estk/log4rs/pull/295

use std::path::Path;

use anyhow::Context;
use log::{error, LevelFilter};
use log4rs::Handle;
use log4rs::{
    append::{
        console::{ConsoleAppender, Target},
        rolling_file::{
            policy::compound::{
                roll::fixed_window::FixedWindowRoller, trigger::size::SizeTrigger, CompoundPolicy,
            },
            RollingFileAppender,
        },
    },
    config::{Appender, Config, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
};

const LOG_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} - {l} - {m}{n}";

/// Logs to stderr (filtered at `level`) and to `app.log` inside `log_dir`.
///
/// If the log file cannot be opened only stderr is used and the reason is
/// logged there.
pub fn init_logging(level: LevelFilter, log_dir: &Path) -> anyhow::Result<Handle> {
    let (log_file, file_error) = match file_appender(log_dir) {
        Ok(appender) => (Some(appender), None),
        Err(e) => (None, Some(e)),
    };

    let config = build_config(level, log_file)?;
    let handle = log4rs::init_config(config).context("Failed to init_config")?;

    if let Some(e) = file_error {
        error!("Logging to stderr only: {e:?}");
    }
    Ok(handle)
}

fn file_appender(log_dir: &Path) -> anyhow::Result<RollingFileAppender> {
    let file_path = log_dir.join("app.log");
    let archive_pattern = log_dir.join("app_{}.log");
    let archive_pattern = archive_pattern
        .to_str()
        .with_context(|| format!("Log folder is not valid UTF-8: {log_dir:?}"))?;
    // Pattern: https://docs.rs/log4rs/*/log4rs/append/rolling_file/policy/compound/roll/fixed_window/struct.FixedWindowRollerBuilder.html#method.build

    // Create a policy to use with the file logging
    let trigger = SizeTrigger::new(2_097_152); // 2mb (2 * 1024 * 1024)
    let roller = FixedWindowRoller::builder()
        .build(archive_pattern, 10) // Roll based on pattern and max 10 archive files
        .context("Failed to create FixedWindowRoller")?;
    let policy = CompoundPolicy::new(Box::new(trigger), Box::new(roller));

    // Logging to log file. (with rolling)
    RollingFileAppender::builder()
        // Pattern: https://docs.rs/log4rs/*/log4rs/encode/pattern/index.html
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build(&file_path, Box::new(policy))
        .with_context(|| format!("Failed to open log file {file_path:?}"))
}

fn build_config(
    level: LevelFilter,
    log_file: Option<RollingFileAppender>,
) -> anyhow::Result<Config> {
    // Build a stderr logger.
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build();

    let mut builder = Config::builder().appender(
        Appender::builder()
            .filter(Box::new(ThresholdFilter::new(level)))
            .build("stderr", Box::new(stderr)),
    );
    let mut root = Root::builder().appender("stderr");
    if let Some(log_file) = log_file {
        builder = builder.appender(Appender::builder().build("log_file", Box::new(log_file)));
        root = root.appender("log_file");
    }

    builder
        .build(root.build(level))
        .context("Failed to configure logging")
}
