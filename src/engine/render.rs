//! Result line formatting. Injected into the sink so dispatch never touches terminal state.

use colored::Colorize;
use std::io::{self, Write};

use crate::utils::config::STATUS_OK;
use crate::{Hit, OutputMode};

/// Writes one accepted result (including the trailing newline).
pub trait Renderer: Send {
    fn render(&self, hit: &Hit, out: &mut dyn Write) -> io::Result<()>;
}

/// `Thread <id>: <path> - Status: <code>, Size: <bytes> bytes` with terminal colors.
#[derive(Clone, Copy, Debug, Default)]
pub struct ColorRenderer;

/// Same line as [`ColorRenderer`], no escape codes.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlainRenderer;

/// One JSON object per line.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonRenderer;

impl Renderer for ColorRenderer {
    fn render(&self, hit: &Hit, out: &mut dyn Write) -> io::Result<()> {
        let status = hit.status_code.to_string();
        let status = if hit.status_code == STATUS_OK {
            status.green()
        } else {
            status.red()
        };
        writeln!(
            out,
            "Thread {}: {} - Status: {}, Size: {} bytes",
            hit.worker_id.to_string().cyan(),
            hit.job.blue(),
            status,
            hit.content_length.to_string().yellow()
        )
    }
}

impl Renderer for PlainRenderer {
    fn render(&self, hit: &Hit, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "{}", plain_line(hit))
    }
}

impl Renderer for JsonRenderer {
    fn render(&self, hit: &Hit, out: &mut dyn Write) -> io::Result<()> {
        serde_json::to_writer(&mut *out, hit)?;
        writeln!(out)
    }
}

pub fn plain_line(hit: &Hit) -> String {
    format!(
        "Thread {}: {} - Status: {}, Size: {} bytes",
        hit.worker_id, hit.job, hit.status_code, hit.content_length
    )
}

pub fn renderer_for(mode: OutputMode) -> Box<dyn Renderer> {
    match mode {
        OutputMode::Color => Box::new(ColorRenderer),
        OutputMode::Plain => Box::new(PlainRenderer),
        OutputMode::Json => Box::new(JsonRenderer),
    }
}
