use crate::config::CAPTURE_FILE;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Fans every write out to two sinks. The first sink decides how many
/// bytes were accepted; the second always receives exactly those bytes.
pub struct Tee<A, B> {
    primary: A,
    copy: B,
}

impl<A: Write, B: Write> Tee<A, B> {
    pub fn new(primary: A, copy: B) -> Self {
        Self { primary, copy }
    }
}

impl<A: Write, B: Write> Write for Tee<A, B> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.primary.write(buf)?;
        self.copy.write_all(&buf[..n])?;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.primary.flush()?;
        self.copy.flush()
    }
}

/// Standard output, duplicated into `output.txt` when requested.
pub fn open(capture: bool) -> Result<Box<dyn Write>> {
    open_at(capture, Path::new(CAPTURE_FILE))
}

/// Like [`open`], with the capture file at `path`. The file is truncated;
/// failing to create it is fatal.
pub fn open_at(capture: bool, path: &Path) -> Result<Box<dyn Write>> {
    if !capture {
        return Ok(Box::new(io::stdout()));
    }

    let file = File::create(path)
        .with_context(|| format!("Failed to create capture file '{}'", path.display()))?;
    log::debug!("capturing output to {}", path.display());
    Ok(Box::new(Tee::new(io::stdout(), BufWriter::new(file))))
}
