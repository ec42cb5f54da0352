//! Command-line interface definitions.

use crate::config::DEFAULT_CONFIG_NAME;
use clap::{ColorChoice, Parser};
use std::path::PathBuf;

/// Refresh the <lastmod> dates of the configured sitemap to today
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path, searched upward from the current directory
    #[arg(short = 'C', long, default_value = DEFAULT_CONFIG_NAME, value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Print debug output
    #[arg(short, long)]
    pub verbose: bool,

    /// Report what would change without writing the sitemap
    #[arg(long)]
    pub dry_run: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["sitemap-touch"]).unwrap();
        assert_eq!(cli.config, PathBuf::from(DEFAULT_CONFIG_NAME));
        assert_eq!(cli.color, ColorChoice::Auto);
        assert!(!cli.verbose);
        assert!(!cli.dry_run);
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::try_parse_from([
            "sitemap-touch",
            "-C",
            "/etc/sitemap-touch.toml",
            "--color",
            "never",
            "-v",
            "--dry-run",
        ])
        .unwrap();

        assert_eq!(cli.config, PathBuf::from("/etc/sitemap-touch.toml"));
        assert_eq!(cli.color, ColorChoice::Never);
        assert!(cli.verbose);
        assert!(cli.dry_run);
    }

    #[test]
    fn test_cli_rejects_positional() {
        assert!(Cli::try_parse_from(["sitemap-touch", "sitemap.xml"]).is_err());
    }
}
