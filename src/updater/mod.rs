//! Sitemap `<lastmod>` updater.
//!
//! One run is a strict linear pipeline:
//!
//! ```text
//! read ─→ parse ─→ rewrite ─→ write ─→ done
//!   │       │                   │
//!   └───────┴───────────────────┴─→ failed (nothing written)
//! ```
//!
//! The date is computed once per run, so every entry gets the same value
//! even if the run crosses midnight.

mod store;

pub use store::{FsStore, SitemapStore};

use crate::config::UpdaterConfig;
use crate::debug;
use crate::sitemap::{SitemapKind, XmlError, rewrite_lastmod};
use crate::utils::date::{format_ymd, is_w3c_datetime, today};
use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that end an update run.
#[derive(Debug, Error)]
pub enum UpdateError {
    #[error("failed to read sitemap `{0}`")]
    Read(PathBuf, #[source] std::io::Error),

    #[error("failed to parse sitemap `{0}`")]
    Parse(PathBuf, #[source] XmlError),

    #[error("failed to write sitemap `{0}`")]
    Write(PathBuf, #[source] std::io::Error),
}

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct UpdateReport {
    pub path: PathBuf,
    /// Date written into every selected `<lastmod>`, `YYYY-MM-DD`.
    pub date: String,
    pub kind: SitemapKind,
    /// Number of `<lastmod>` elements set to `date`.
    pub updated: usize,
    /// How many of the replaced values were not valid W3C datetimes.
    pub malformed: usize,
    /// False for a dry run.
    pub written: bool,
}

/// Refreshes the `<lastmod>` dates of one sitemap file.
pub struct SitemapUpdater<S = FsStore> {
    config: UpdaterConfig,
    store: S,
    dry_run: bool,
}

impl SitemapUpdater<FsStore> {
    pub fn new(config: UpdaterConfig) -> Self {
        Self::with_store(config, FsStore)
    }
}

impl<S: SitemapStore> SitemapUpdater<S> {
    pub fn with_store(config: UpdaterConfig, store: S) -> Self {
        Self {
            config,
            store,
            dry_run: false,
        }
    }

    /// Stop before writing; the report still counts what would change.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Update the sitemap with today's local date.
    pub fn run(&self) -> Result<UpdateReport, UpdateError> {
        self.run_on(today())
    }

    /// Update the sitemap with an explicit date.
    pub fn run_on(&self, date: NaiveDate) -> Result<UpdateReport, UpdateError> {
        let path = &self.config.path;
        let date = format_ymd(date);

        let original = self
            .store
            .load(path)
            .map_err(|err| UpdateError::Read(path.clone(), err))?;
        debug!("read"; "{} bytes from {}", original.len(), path.display());

        let rewrite = rewrite_lastmod(&original, &date)
            .map_err(|err| UpdateError::Parse(path.clone(), err))?;

        let mut malformed = 0;
        for value in rewrite.previous.iter().map(|v| v.trim()) {
            if !is_w3c_datetime(value) {
                malformed += 1;
                debug!("lastmod"; "replacing malformed value `{}`", value);
            }
        }

        if rewrite.is_unchanged(&original) {
            debug!("lastmod"; "already up to date");
        }

        let mut report = UpdateReport {
            path: path.clone(),
            date,
            kind: rewrite.kind,
            updated: rewrite.updated,
            malformed,
            written: false,
        };

        if self.dry_run {
            return Ok(report);
        }

        self.store
            .save(path, &rewrite.xml)
            .map_err(|err| UpdateError::Write(path.clone(), err))?;
        debug!("write"; "{} bytes to {}", rewrite.xml.len(), path.display());

        report.written = true;
        Ok(report)
    }
}
