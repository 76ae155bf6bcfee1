use std::path::PathBuf;

use log::{debug, warn};

pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4";
pub const DEFAULT_OPENAI_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Settings read once at startup and passed to each step.
///
/// Missing values do not stop the program: the step that needs a value
/// reports the gap when it runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub openai: OpenAiSettings,
    pub mail: MailSettings,

    /// Folder holding the dated digest files
    pub archive_dir: PathBuf,
}

#[derive(Clone, PartialEq, Eq)]
pub struct OpenAiSettings {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

#[derive(Clone, PartialEq, Eq, Default)]
pub struct MailSettings {
    pub smtp_server: Option<String>,
    pub smtp_port: Option<u16>,
    pub smtp_user: Option<String>,
    pub smtp_pass: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

impl Config {
    /// Reads the process environment (after `.env` has been loaded)
    pub fn from_env(archive_dir: PathBuf) -> Config {
        Self::from_vars(archive_dir, |name| std::env::var(name).ok())
    }

    pub fn from_vars<F>(archive_dir: PathBuf, lookup: F) -> Config
    where
        F: Fn(&str) -> Option<String>,
    {
        // Blank values count as unset
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let smtp_port = var("SMTP_PORT").and_then(|raw| match raw.trim().parse() {
            Ok(port) => Some(port),
            Err(e) => {
                warn!("Ignoring SMTP_PORT {raw:?}: {e}");
                None
            }
        });

        let result = Config {
            openai: OpenAiSettings {
                api_key: var("OPENAI_API_KEY"),
                model: var("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
                base_url: var("OPENAI_BASE_URL").unwrap_or_else(|| DEFAULT_OPENAI_URL.to_string()),
            },
            mail: MailSettings {
                smtp_server: var("SMTP_SERVER"),
                smtp_port,
                smtp_user: var("SMTP_USER"),
                smtp_pass: var("SMTP_PASS"),
                from: var("EMAIL_FROM"),
                to: var("EMAIL_TO"),
            },
            archive_dir,
        };
        debug!("Loaded config: {result:?}");
        result
    }
}

/// Secrets are only reported as present or absent
fn redact(value: &Option<String>) -> &'static str {
    match value {
        Some(_) => "<set>",
        None => "<unset>",
    }
}

impl std::fmt::Debug for OpenAiSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiSettings")
            .field("api_key", &redact(&self.api_key))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl std::fmt::Debug for MailSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailSettings")
            .field("smtp_server", &self.smtp_server)
            .field("smtp_port", &self.smtp_port)
            .field("smtp_user", &self.smtp_user)
            .field("smtp_pass", &redact(&self.smtp_pass))
            .field("from", &self.from)
            .field("to", &self.to)
            .finish()
    }
}
