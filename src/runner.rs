use std::fmt::Display;

use chrono::NaiveDate;
use log::{debug, error, info, warn};
use rand::Rng;

use crate::{
    archive::{ArchiveOutcome, ContentArchiver},
    digest::DigestContent,
    fetcher::{CompletionClient, ContentFetcher},
    notification::{DeliveryOutcome, MailRelay, Notifier},
    prompt::PromptBuilder,
};

/// Points a run passes through, always in this order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Start,
    PromptBuilt,
    ContentFetched,
    ContentArchived,
    EmailAttempted,
    Done,
}

impl Stage {
    pub fn new() -> Self {
        Self::Start
    }

    pub fn next(self) -> Self {
        match self {
            Self::Start => Self::PromptBuilt,
            Self::PromptBuilt => Self::ContentFetched,
            Self::ContentFetched => Self::ContentArchived,
            Self::ContentArchived => Self::EmailAttempted,
            Self::EmailAttempted | Self::Done => Self::Done,
        }
    }
}

impl Default for Stage {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Email sent
    Success,
    /// Email failed, content is on disk
    Degraded,
    /// Neither email nor archive worked
    Failed,
}

impl RunOutcome {
    fn from_steps(archive: &ArchiveOutcome, delivery: &DeliveryOutcome) -> Self {
        match (delivery.is_sent(), archive.is_written()) {
            (true, _) => Self::Success,
            (false, true) => Self::Degraded,
            (false, false) => Self::Failed,
        }
    }
}

impl Display for RunOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "Daily digest completed successfully"),
            Self::Degraded => write!(f, "Email could not be sent, but the content was saved"),
            Self::Failed => write!(f, "Email could not be sent and the content was not saved"),
        }
    }
}

#[derive(Debug)]
pub struct RunReport {
    pub digest: DigestContent,
    pub archive: ArchiveOutcome,
    pub delivery: DeliveryOutcome,
    pub outcome: RunOutcome,
}

/// Runs prompt → fetch → archive → email, carrying on past any failed step
pub struct DailyDigestRunner<R, C, M> {
    prompts: PromptBuilder<R>,
    fetcher: ContentFetcher<C>,
    archiver: ContentArchiver,
    notifier: Notifier<M>,
    stage: Stage,
}

impl<R, C, M> DailyDigestRunner<R, C, M>
where
    R: Rng,
    C: CompletionClient,
    M: MailRelay,
{
    pub fn new(
        prompts: PromptBuilder<R>,
        fetcher: ContentFetcher<C>,
        archiver: ContentArchiver,
        notifier: Notifier<M>,
    ) -> Self {
        Self {
            prompts,
            fetcher,
            archiver,
            notifier,
            stage: Stage::new(),
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn run(&mut self, date: NaiveDate) -> RunReport {
        info!("Starting daily digest for {date}");
        self.stage = Stage::new();

        let prompt = self.prompts.build();
        self.advance();

        let digest = DigestContent::from_fetch(date, self.fetcher.fetch(&prompt));
        if digest.is_fallback {
            warn!("Continuing with fallback text");
        }
        self.advance();

        let archive = self.archiver.archive(&digest);
        self.advance();

        let delivery = self.notifier.notify(&digest);
        self.advance();

        let outcome = RunOutcome::from_steps(&archive, &delivery);
        match outcome {
            RunOutcome::Success => info!("{outcome}"),
            RunOutcome::Degraded | RunOutcome::Failed => error!("{outcome}"),
        }
        self.advance();

        RunReport {
            digest,
            archive,
            delivery,
            outcome,
        }
    }

    fn advance(&mut self) {
        let next = self.stage.next();
        debug!("Stage {:?} -> {next:?}", self.stage);
        self.stage = next;
    }
}
