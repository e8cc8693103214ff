//! Command-line interface definitions for ETtoday Text News.
//!
//! Options given on the command line override the matching fields of the
//! YAML config file.

use crate::config::ScrapeConfig;
use clap::{Parser, ValueEnum};

/// Which passes a run performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Pass {
    /// Headline text only.
    Titles,
    /// Article bodies only.
    Content,
    /// Titles first, then article bodies.
    Both,
}

impl Pass {
    pub fn includes_titles(self) -> bool {
        matches!(self, Pass::Titles | Pass::Both)
    }

    pub fn includes_content(self) -> bool {
        matches!(self, Pass::Content | Pass::Both)
    }
}

/// Command-line arguments.
///
/// # Examples
///
/// ```sh
/// # Full harvest into ./corpus
/// ettoday_text_news -o ./corpus
///
/// # Only politics and finance titles for 2018
/// ettoday_text_news -o ./corpus --pass titles --category 1 --category 17 --year 2018
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Directory the per-category text files are appended to
    #[arg(short, long, env = "ETTODAY_OUTPUT_DIR", default_value = ".")]
    pub output_dir: String,

    /// Optional path to a YAML config file
    #[arg(short, long, env = "ETTODAY_CONFIG")]
    pub config: Option<String>,

    /// Passes to run
    #[arg(long, value_enum, default_value_t = Pass::Both)]
    pub pass: Pass,

    /// Restrict the run to these category codes (repeatable)
    #[arg(long = "category", value_name = "CODE")]
    pub categories: Vec<u32>,

    /// Year of the listing pages
    #[arg(long)]
    pub year: Option<i32>,

    /// Article fetches in flight at once
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Extra attempts per page after a failed fetch
    #[arg(long)]
    pub max_retries: Option<usize>,
}

impl Cli {
    /// Apply command-line overrides on top of the loaded configuration.
    pub fn apply_overrides(&self, config: &mut ScrapeConfig) {
        if let Some(year) = self.year {
            config.year = year;
        }
        if let Some(concurrency) = self.concurrency {
            config.concurrency = concurrency;
        }
        if let Some(max_retries) = self.max_retries {
            config.max_retries = max_retries;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["ettoday_text_news"]);
        assert_eq!(cli.pass, Pass::Both);
        assert!(cli.categories.is_empty());
        assert!(cli.year.is_none());
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from(["ettoday_text_news", "-o", "/tmp/corpus", "-c", "/tmp/run.yaml"]);
        assert_eq!(cli.output_dir, "/tmp/corpus");
        assert_eq!(cli.config.as_deref(), Some("/tmp/run.yaml"));
    }

    #[test]
    fn test_cli_repeated_categories_and_pass() {
        let cli = Cli::parse_from([
            "ettoday_text_news",
            "--pass",
            "titles",
            "--category",
            "1",
            "--category",
            "17",
        ]);
        assert_eq!(cli.pass, Pass::Titles);
        assert_eq!(cli.categories, vec![1, 17]);
    }

    #[test]
    fn test_apply_overrides() {
        let cli = Cli::parse_from([
            "ettoday_text_news",
            "--year",
            "2016",
            "--concurrency",
            "4",
            "--max-retries",
            "2",
        ]);
        let mut config = ScrapeConfig::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config.year, 2016);
        assert_eq!(config.concurrency, 4);
        assert_eq!(config.max_retries, 2);
        assert_eq!(config.days, vec![25, 10]);
    }

    #[test]
    fn test_pass_selection() {
        assert!(Pass::Both.includes_titles() && Pass::Both.includes_content());
        assert!(Pass::Titles.includes_titles() && !Pass::Titles.includes_content());
        assert!(!Pass::Content.includes_titles() && Pass::Content.includes_content());
    }
}
