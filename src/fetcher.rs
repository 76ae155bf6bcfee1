use log::{error, info};

use crate::utils::make_single_line;

/// Role given to the model for every request
pub const SYSTEM_ROLE: &str =
    "Du är en kunnig IT-pedagog som förklarar tekniska koncept på ett tydligt och pedagogiskt sätt.";
pub const MAX_TOKENS: u32 = 1000;
pub const TEMPERATURE: f32 = 0.7;

const FALLBACK_PREFIX: &str =
    "Tyvärr kunde jag inte hämta dagens IT-nyhet på grund av ett tekniskt fel: ";

#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system: String,
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl CompletionRequest {
    pub fn new(prompt: &str) -> Self {
        Self {
            system: SYSTEM_ROLE.to_string(),
            prompt: prompt.to_string(),
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        }
    }
}

/// A service able to turn a prompt into generated text
pub trait CompletionClient {
    fn complete(&self, request: &CompletionRequest) -> anyhow::Result<String>;
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum FetchOutcome {
    Generated(String),
    Fallback { text: String, msg: String },
}

impl FetchOutcome {
    pub fn fallback(msg: String) -> Self {
        Self::Fallback {
            text: format!("{FALLBACK_PREFIX}{msg}"),
            msg,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Self::Generated(text) | Self::Fallback { text, .. } => text,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            Self::Generated(text) | Self::Fallback { text, .. } => text,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }
}

pub struct ContentFetcher<C> {
    client: C,
}

impl<C: CompletionClient> ContentFetcher<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    #[cfg(test)]
    pub(crate) fn client(&self) -> &C {
        &self.client
    }

    /// Always returns usable text. On failure the text explains what went wrong
    pub fn fetch(&self, prompt: &str) -> FetchOutcome {
        info!("Requesting content from the completion service");
        match self.client.complete(&CompletionRequest::new(prompt)) {
            Ok(text) => {
                info!("Received content from the completion service");
                FetchOutcome::Generated(text)
            }
            Err(e) => {
                let msg = format!("{e:#}");
                error!("Failed to fetch content: {}", make_single_line(&msg));
                FetchOutcome::fallback(msg)
            }
        }
    }
}
