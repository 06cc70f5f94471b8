//! Load `.fuzzer.toml` (CLI only). Lib callers pass [`FuzzOpts`](crate::FuzzOpts) directly.

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::{OutputMode, Opts};

#[derive(Debug, Default, Deserialize)]
pub(crate) struct FuzzerToml {
    #[serde(default)]
    settings: RunSection,
}

#[derive(Debug, Default, Deserialize)]
struct RunSection {
    threads: Option<i64>,
    timeout: Option<u64>,
    hdc: Option<Vec<u16>>,
    hcl: Option<Vec<i64>>,
    json: Option<bool>,
    no_color: Option<bool>,
    verbose: Option<bool>,
    banner: Option<bool>,
}

/// Load a config file. `Ok(None)` when it does not exist; `Err` carries a message for a file
/// that exists but cannot be read or parsed (the caller logs it once logging is up).
pub(crate) fn load_fuzzer_toml(path: &Path) -> Result<Option<FuzzerToml>, String> {
    let s = match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(format!("{}: {}", path.display(), e)),
    };
    parse_fuzzer_toml(&s)
        .map(Some)
        .map_err(|e| format!("{}: {}", path.display(), e))
}

pub(crate) fn parse_fuzzer_toml(s: &str) -> Result<FuzzerToml, toml::de::Error> {
    toml::from_str(s)
}

/// Overwrite opts field from file when present.
macro_rules! apply_file_opt {
    ($section:expr, $opts:expr, $field:ident => $opts_field:ident) => {
        if let Some(v) = $section.$field.clone() {
            $opts.$opts_field = v;
        }
    };
}

/// Apply file config to opts (only fields present in the file). Call before applying CLI.
/// host and file are never read from the file.
pub(crate) fn apply_file_to_opts(file: &FuzzerToml, opts: &mut Opts) {
    let run = &file.settings;
    apply_file_opt!(run, opts, threads => threads);
    apply_file_opt!(run, opts, hdc => hidden_status_codes);
    apply_file_opt!(run, opts, hcl => hidden_content_lengths);
    apply_file_opt!(run, opts, verbose => verbose);
    apply_file_opt!(run, opts, banner => banner);
    if let Some(secs) = run.timeout {
        opts.timeout = Some(Duration::from_secs(secs));
    }
    if run.no_color == Some(true) {
        opts.output = OutputMode::Plain;
    }
    if run.json == Some(true) {
        opts.output = OutputMode::Json;
    }
}
