//! Wordlist loading: one job per line, order preserved, all-or-nothing.

use std::fmt::Write as _;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use crate::Job;
use crate::error::FuzzError;

/// Anything that can produce the ordered job list for a run.
pub trait WordSource {
    fn load(&self) -> Result<Vec<Job>, FuzzError>;
}

/// Newline-delimited wordlist on disk.
#[derive(Clone, Debug)]
pub struct FileWordlist {
    path: PathBuf,
}

impl FileWordlist {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl WordSource for FileWordlist {
    fn load(&self) -> Result<Vec<Job>, FuzzError> {
        load_wordlist(&self.path)
    }
}

impl WordSource for Vec<Job> {
    fn load(&self) -> Result<Vec<Job>, FuzzError> {
        Ok(self.clone())
    }
}

impl WordSource for [&str] {
    fn load(&self) -> Result<Vec<Job>, FuzzError> {
        Ok(self.iter().map(|s| s.to_string()).collect())
    }
}

/// Open `path` and read every line. Blank lines are kept; `\n` and `\r\n` endings are stripped.
/// Bytes that are not UTF-8 are percent-encoded, so they still reach the server unchanged.
pub fn load_wordlist(path: &Path) -> Result<Vec<Job>, FuzzError> {
    let file = File::open(path).map_err(|source| FuzzError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    read_lines(file).map_err(|source| FuzzError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Collect lines from `reader`. A failure part-way drops everything read so far.
pub fn read_lines<R: Read>(reader: R) -> io::Result<Vec<Job>> {
    let mut reader = BufReader::new(reader);
    let mut jobs = Vec::new();
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(jobs);
        }
        if buf.last() == Some(&b'\n') {
            buf.pop();
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
        }
        jobs.push(decode_line(&buf));
    }
}

/// UTF-8 runs are kept as text; each invalid byte becomes `%XX`.
fn decode_line(bytes: &[u8]) -> Job {
    let mut line = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        line.push_str(chunk.valid());
        for b in chunk.invalid() {
            let _ = write!(line, "%{b:02X}");
        }
    }
    line
}
