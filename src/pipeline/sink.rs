//! Result consumer: drains the hit channel on its own thread, in arrival order.

use crossbeam_channel::Receiver;
use log::warn;
use std::io::{self, Write};
use std::thread::{self, JoinHandle};

use crate::Hit;
use crate::error::FuzzError;
use crate::engine::render::Renderer;

/// Destination for accepted results.
pub trait HitSink: Send {
    fn accept(&mut self, hit: Hit) -> io::Result<()>;
}

/// Renders each hit to a writer, flushing per line so output streams while the run is live.
pub struct WriterSink<W: Write + Send> {
    out: W,
    renderer: Box<dyn Renderer>,
    written: usize,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(out: W, renderer: Box<dyn Renderer>) -> Self {
        Self {
            out,
            renderer,
            written: 0,
        }
    }

    pub fn written(&self) -> usize {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> HitSink for WriterSink<W> {
    fn accept(&mut self, hit: Hit) -> io::Result<()> {
        self.renderer.render(&hit, &mut self.out)?;
        self.out.flush()?;
        self.written += 1;
        Ok(())
    }
}

/// Keeps every hit in memory (lib callers, tests).
#[derive(Debug, Default)]
pub struct CollectSink {
    pub hits: Vec<Hit>,
}

impl HitSink for CollectSink {
    fn accept(&mut self, hit: Hit) -> io::Result<()> {
        self.hits.push(hit);
        Ok(())
    }
}

/// Spawn the consumer. It runs until every sender is dropped, then hands the sink back.
/// A failing sink is reported once and the channel keeps draining so workers never stall.
pub fn spawn_sink<S: HitSink + 'static>(
    hit_rx: Receiver<Hit>,
    mut sink: S,
) -> Result<JoinHandle<S>, FuzzError> {
    thread::Builder::new()
        .name("sink".into())
        .spawn(move || {
            let mut write_failed = false;
            while let Ok(hit) = hit_rx.recv() {
                if let Err(e) = sink.accept(hit)
                    && !write_failed
                {
                    warn!("result output failed: {}", e);
                    write_failed = true;
                }
            }
            sink
        })
        .map_err(|source| FuzzError::Spawn {
            what: "sink",
            source,
        })
}
