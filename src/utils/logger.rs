use colored::{ColoredString, Colorize};
use env_logger::{Builder, Target};
use log::{Level, LevelFilter};
use std::io::Write;

fn level_tag(level: Level) -> Option<ColoredString> {
    match level {
        Level::Error => Some("ERROR".red()),
        Level::Warn => Some("WARN".yellow()),
        Level::Debug => Some("DEBUG".dimmed()),
        Level::Trace => Some("TRACE".dimmed()),
        Level::Info => None,
    }
}

/// Crate logs at Info (Debug when `verbose`), dependencies at Warn. Always stderr, so result
/// lines on stdout can be piped untouched. Safe to call more than once.
pub fn setup_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let _ = Builder::from_default_env()
        .target(Target::Stderr)
        .filter_level(LevelFilter::Warn)
        .filter_module(env!("CARGO_PKG_NAME"), level)
        .format(|buf, record| {
            let name = env!("CARGO_PKG_NAME").cyan();
            match level_tag(record.level()) {
                Some(tag) if record.level() <= Level::Warn => writeln!(
                    buf,
                    "[{} {} {}] {}",
                    name,
                    tag,
                    record.target().white(),
                    record.args()
                ),
                Some(tag) => writeln!(buf, "[{} {}] {}", name, tag, record.args()),
                None => writeln!(buf, "[{}] {}", name, record.args()),
            }
        })
        .try_init();
}
