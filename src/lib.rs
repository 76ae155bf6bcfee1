mod archive;
mod cli;
mod config;
mod digest;
mod fetcher;
mod logging;
mod notification;
mod openai;
mod prompt;
mod runner;
mod utils;

pub use archive::{ArchiveOutcome, ContentArchiver};
pub use cli::{Cli, LogLevel};
pub use config::{Config, MailSettings, OpenAiSettings};
pub use digest::DigestContent;
pub use fetcher::{CompletionClient, CompletionRequest, ContentFetcher, FetchOutcome};
pub use logging::init_logging;
pub use notification::{DeliveryOutcome, DigestEmail, MailRelay, Notifier, SmtpRelay};
pub use openai::OpenAiClient;
pub use prompt::{render_prompt, PromptBuilder, TOPICS};
pub use runner::{DailyDigestRunner, RunOutcome, RunReport, Stage};

use chrono::Local;
use log::{error, info};

/// Runs today's digest once. Every failure ends up in the log, nothing is returned
pub fn run(cli: &Cli) {
    info!("Starting daily IT digest");
    match try_run(cli) {
        Ok(outcome) => info!("Run finished: {outcome:?}"),
        Err(e) => error!("Unexpected error: {e:?}"),
    }
}

fn try_run(cli: &Cli) -> anyhow::Result<RunOutcome> {
    let config = Config::from_env(cli.log_dir.clone());
    let client = OpenAiClient::new(&config.openai)?;
    let mut runner = DailyDigestRunner::new(
        PromptBuilder::new(),
        ContentFetcher::new(client),
        ContentArchiver::new(&config.archive_dir),
        Notifier::new(SmtpRelay::new(&config.mail), &config.mail),
    );
    let report = runner.run(Local::now().date_naive());
    Ok(report.outcome)
}
