use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::utils::config::PackagePaths;
use crate::{OutputMode, Opts};

/// Concurrent web path enumeration.
#[derive(Clone, Debug, Parser)]
#[command(name = "fuzzer")]
#[command(about = "Application to enumerate web directories")]
pub struct Cli {
    /// Number of worker threads. Default: 1.
    #[arg(long, allow_negative_numbers = true)]
    pub threads: Option<i64>,

    /// Url website, ex: https://yoursite.com/FUZZER
    #[arg(long)]
    pub host: Option<String>,

    /// Path to wordlist.
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Hidden unwanted status codes, ex: 201,404
    #[arg(long, value_delimiter = ',')]
    pub hdc: Vec<u16>,

    /// Hidden unwanted content lengths, ex: 5213,63234
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    pub hcl: Vec<i64>,

    /// Per-request timeout in seconds. Default: HTTP client default.
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Print results as JSON lines.
    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub json: Option<bool>,

    /// Disable colored result lines.
    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub no_color: Option<bool>,

    /// Skip the startup banner.
    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub no_banner: Option<bool>,

    /// Verbose output (debug logs, failed request details, run summary).
    #[arg(long, short = 'v', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub verbose: Option<bool>,

    /// Config file. Default: `.fuzzer.toml` in the current directory.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(|| PathBuf::from(PackagePaths::get().config_filename()))
    }

    /// Apply flags given on the command line over `opts` (file values or defaults).
    pub fn apply_to_opts(&self, opts: &mut Opts) {
        if let Some(t) = self.threads {
            opts.threads = t;
        }
        if self.host.is_some() {
            opts.host = self.host.clone();
        }
        if self.file.is_some() {
            opts.file = self.file.clone();
        }
        if !self.hdc.is_empty() {
            opts.hidden_status_codes = self.hdc.clone();
        }
        if !self.hcl.is_empty() {
            opts.hidden_content_lengths = self.hcl.clone();
        }
        if let Some(secs) = self.timeout {
            opts.timeout = Some(Duration::from_secs(secs));
        }
        if let Some(v) = self.verbose {
            opts.verbose = v;
        }
        if let Some(no_banner) = self.no_banner {
            opts.banner = !no_banner;
        }
        if let Some(no_color) = self.no_color {
            opts.output = if no_color {
                OutputMode::Plain
            } else {
                OutputMode::Color
            };
        }
        match self.json {
            Some(true) => opts.output = OutputMode::Json,
            Some(false) if opts.output == OutputMode::Json => opts.output = OutputMode::Color,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("fuzzer").chain(args.iter().copied())).unwrap()
    }

    fn opts(args: &[&str]) -> Opts {
        let mut o = Opts::default();
        parse(args).apply_to_opts(&mut o);
        o
    }

    #[test]
    fn defaults() {
        let o = opts(&[]);
        assert_eq!(o.threads, 1);
        assert!(o.host.is_none());
        assert!(o.file.is_none());
        assert!(o.banner);
        assert_eq!(o.output, OutputMode::Color);
    }

    #[test]
    fn repeated_and_comma_separated_filters() {
        let o = opts(&["--hdc", "404,403", "--hdc", "500", "--hcl", "0", "--hcl", "-1"]);
        assert_eq!(o.hidden_status_codes, vec![404, 403, 500]);
        assert_eq!(o.hidden_content_lengths, vec![0, -1]);
    }

    #[test]
    fn negative_threads_parse_for_later_rejection() {
        assert_eq!(opts(&["--threads", "-2"]).threads, -2);
        assert_eq!(opts(&["--threads", "0"]).threads, 0);
    }

    #[test]
    fn zero_timeout_rejected_by_parser() {
        assert!(Cli::try_parse_from(["fuzzer", "--timeout", "0"]).is_err());
    }

    #[test]
    fn output_flags() {
        assert_eq!(opts(&["--no-color"]).output, OutputMode::Plain);
        assert_eq!(opts(&["--json"]).output, OutputMode::Json);
        assert_eq!(opts(&["--no-color", "--json"]).output, OutputMode::Json);
        assert!(!opts(&["--no-banner"]).banner);
    }

    #[test]
    fn cli_overrides_existing_opts() {
        let mut o = Opts {
            threads: 8,
            hidden_status_codes: vec![404],
            output: OutputMode::Json,
            ..Opts::default()
        };
        parse(&["--threads", "2", "--json", "false"]).apply_to_opts(&mut o);
        assert_eq!(o.threads, 2);
        assert_eq!(o.hidden_status_codes, vec![404]);
        assert_eq!(o.output, OutputMode::Color);
    }

    #[test]
    fn config_path_default() {
        assert_eq!(parse(&[]).config_path(), PathBuf::from(".fuzzer.toml"));
    }
}
