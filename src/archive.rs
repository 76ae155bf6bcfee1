use std::{
    fs::{create_dir_all, File},
    io::Write,
    path::PathBuf,
};

use anyhow::Context;
use chrono::NaiveDate;
use log::{debug, error, info};

use crate::digest::{digest_title, DigestContent, Timestamp};

#[derive(Debug, PartialEq, Eq)]
pub enum ArchiveOutcome {
    Written(PathBuf),
    Failed { msg: String },
}

impl ArchiveOutcome {
    pub fn is_written(&self) -> bool {
        matches!(self, Self::Written(_))
    }
}

/// Keeps one text file per day, the latest run for a day replaces the earlier one
#[derive(Debug)]
pub struct ContentArchiver {
    base_folder: PathBuf,
}

impl ContentArchiver {
    pub fn new(base_folder: impl Into<PathBuf>) -> Self {
        Self {
            base_folder: base_folder.into(),
        }
    }

    pub fn path_for(&self, date: NaiveDate) -> PathBuf {
        self.base_folder.join(format!("{}.txt", date.format("%F")))
    }

    pub fn archive(&self, digest: &DigestContent) -> ArchiveOutcome {
        match self.write_file(digest) {
            Ok(path) => {
                info!("Digest archived to {path:?}");
                ArchiveOutcome::Written(path)
            }
            Err(e) => {
                error!("Failed to archive digest: {e:#}");
                ArchiveOutcome::Failed {
                    msg: format!("{e:#}"),
                }
            }
        }
    }

    fn write_file(&self, digest: &DigestContent) -> anyhow::Result<PathBuf> {
        let folder = &self.base_folder;
        create_dir_all(folder)
            .with_context(|| format!("Failed to create archive folder {folder:?}"))?;

        let path = self.path_for(digest.date);
        debug!("Writing digest for {} to {path:?}", digest.date);
        let mut file =
            File::create(&path).with_context(|| format!("Failed to open {path:?} for writing"))?;
        file.write_all(render_archive(digest, &Timestamp::new()).as_bytes())
            .with_context(|| format!("Failed to write to file: {path:?}"))?;
        Ok(path)
    }
}

fn render_archive(digest: &DigestContent, written_at: &Timestamp) -> String {
    format!(
        "{}\n{}\n\n{}\n\nSkickad: {written_at}",
        digest_title(digest.date),
        "=".repeat(50),
        digest.text,
    )
}
