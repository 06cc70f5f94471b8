//! CLI command handler: merge options, validate, dispatch, print results and timing.

use anyhow::{Context, Result};
use colored::Colorize;
use log::{debug, info, warn};
use std::io::{self, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::engine::arg_parser::Cli;
use crate::engine::fetcher::HttpFetcher;
use crate::engine::render::renderer_for;
use crate::engine::wordlist::FileWordlist;
use crate::error::FuzzError;
use crate::pipeline::{self, WriterSink};
use crate::utils::fuzzer_toml::{apply_file_to_opts, load_fuzzer_toml};
use crate::utils::config::PackagePaths;
use crate::utils::{setup_logging, warn_if_over_fd_limit};
use crate::{FuzzOpts, Opts, OutputMode, RunStats};

const BANNER: &str = r"
 ___
| __|  _ ___ ___ ___ _ _
| _| || |_ /_ / -_) '_|
|_| \_,_/__/__\___|_|   web...
";

/// Build Opts from defaults, then `.fuzzer.toml`, then CLI flags. Sets up logging.
pub fn setup_opts(cli: &Cli) -> Opts {
    let mut opts = Opts::default();
    let file = load_fuzzer_toml(&cli.config_path());
    if let Ok(Some(ref f)) = file {
        apply_file_to_opts(f, &mut opts);
    }
    cli.apply_to_opts(&mut opts);
    setup_logging(opts.verbose);
    match file {
        Err(msg) => warn!("ignoring config file: {}", msg),
        Ok(None) if cli.config.is_some() => {
            warn!("config file {} not found", cli.config_path().display())
        }
        _ => {}
    }
    debug!("{} CONFIG: {:#?}", PackagePaths::get().pkg_name().to_uppercase(), opts);
    opts
}

/// Write a status line to stdout. A closed stdout (e.g. piped into `head`) is not an error.
fn emit(out: &mut dyn Write, line: std::fmt::Arguments) {
    if let Err(e) = writeln!(out, "{}", line) {
        debug!("stdout: {}", e);
    }
}

/// Validate required parameters and run. Config and wordlist errors return before any request.
pub fn handle_run(cli: &Cli) -> Result<RunStats> {
    let opts = setup_opts(cli);
    let text_output = opts.output != OutputMode::Json;
    if opts.banner && text_output {
        emit(&mut io::stdout(), format_args!("{}", BANNER.cyan()));
    }

    let host = opts
        .host
        .as_deref()
        .ok_or_else(|| FuzzError::Config("missing host parameter, use --help".into()))?;
    let file = opts
        .file
        .as_ref()
        .ok_or_else(|| FuzzError::Config("missing file parameter, use --help".into()))?;

    let fuzz_opts = FuzzOpts::from(&opts);
    let config = pipeline::prepare_run(
        fuzz_opts.threads,
        host,
        fuzz_opts.filter(),
        &FileWordlist::new(file),
    )?;
    if text_output {
        emit(
            &mut io::stdout(),
            format_args!("HOST: {}\n", config.url_template.display_host()),
        );
    }
    warn_if_over_fd_limit(config.threads);

    let cancel_requested = Arc::new(AtomicBool::new(false));
    let cancel_requested_handler = Arc::clone(&cancel_requested);
    ctrlc::set_handler(move || {
        cancel_requested_handler.store(true, Ordering::Relaxed);
    })
    .context("set Ctrl+C handler")?;

    let fetcher = Arc::new(HttpFetcher::new(opts.timeout)?);
    let sink = WriterSink::new(io::stdout(), renderer_for(opts.output));
    let (stats, _sink) = pipeline::dispatch(config, fetcher, sink, Some(cancel_requested))?;

    report(&stats, &opts, &mut io::stdout());
    Ok(stats)
}

fn report(stats: &RunStats, opts: &Opts, out: &mut dyn Write) {
    if stats.cancelled {
        warn!(
            "Cancelled by user: {} of {} jobs dispatched",
            stats.dispatched, stats.jobs
        );
    }
    if opts.verbose {
        info!(
            "{} jobs: {} shown, {} filtered, {} failed",
            stats.dispatched, stats.accepted, stats.filtered, stats.failed
        );
    }
    if opts.output == OutputMode::Json {
        info!("Execution time: {:?}", stats.elapsed);
    } else {
        emit(out, format_args!("Execution time: {:?}", stats.elapsed));
    }
}
