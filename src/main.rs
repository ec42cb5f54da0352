//! sitemap-touch - refresh the `<lastmod>` dates of an XML sitemap.
//!
//! Meant to be started by an external scheduler (cron, systemd timer).
//! Exits with status 1 when the sitemap could not be updated.

mod cli;
mod config;
mod logger;
mod sitemap;
mod updater;
mod utils;

use anyhow::{Context, Result};
use clap::{ColorChoice, Parser};
use cli::Cli;
use config::UpdaterConfig;
use std::path::Path;
use updater::{SitemapUpdater, UpdateReport};
use utils::plural::plural_count;

fn main() {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    if let Err(err) = run(&cli) {
        log!("error"; "{:#}", err);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = load_config(&cli.config)?;
    debug!("config"; "sitemap: {}", config.path.display());

    let report = SitemapUpdater::new(config).dry_run(cli.dry_run).run()?;
    print_report(&report);
    Ok(())
}

fn load_config(config_name: &Path) -> Result<UpdaterConfig> {
    UpdaterConfig::load(config_name)
        .with_context(|| format!("cannot load config `{}`", config_name.display()))
}

fn print_report(report: &UpdateReport) {
    let entries = plural_count(report.updated, "entry", "entries");
    debug!("sitemap"; "{}", report.path.display());

    if report.written {
        log!("sitemap"; "lastmod updated to {} ({}, {})", report.date, entries, report.kind);
    } else {
        log!("dry-run"; "would set lastmod to {} ({}, {})", report.date, entries, report.kind);
    }

    if report.malformed > 0 {
        log!("warning"; "replaced {} that were not W3C dates",
            plural_count(report.malformed, "value", "values"));
    }
}
