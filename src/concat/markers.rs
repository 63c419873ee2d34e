//! Marker block formatting for the output document
//!
//! Each included file becomes
//!
//! ```text
//! // --- BEGIN <path> ---
//!
//! <content>
//!
//! // --- END <path> ---
//!
//! ```
//!
//! and a file that cannot be read becomes a single
//! `// Error reading <path>: <message>` line followed by a blank line.

use std::fmt::Display;
use std::io::{self, Write};
use std::path::Path;

/// Writes marker blocks to any `Write` sink.
pub struct MarkerWriter<W: Write> {
    inner: W,
    bytes_written: u64,
}

impl<W: Write> MarkerWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            bytes_written: 0,
        }
    }

    pub fn write_block(&mut self, path: &Path, content: &str) -> io::Result<()> {
        let path = path.display();
        self.write_str(&begin_marker(&path))?;
        self.write_str(content)?;
        self.write_str(&end_marker(&path))
    }

    pub fn write_error(&mut self, path: &Path, message: &dyn Display) -> io::Result<()> {
        self.write_str(&error_line(&path.display(), message))
    }

    /// Total bytes written so far, markers included.
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Flush and hand back the sink.
    pub fn finish(mut self) -> io::Result<W> {
        self.inner.flush()?;
        Ok(self.inner)
    }

    fn write_str(&mut self, s: &str) -> io::Result<()> {
        self.inner.write_all(s.as_bytes())?;
        self.bytes_written += s.len() as u64;
        Ok(())
    }
}

pub fn begin_marker(path: &dyn Display) -> String {
    format!("// --- BEGIN {} ---\n\n", path)
}

pub fn end_marker(path: &dyn Display) -> String {
    format!("\n\n// --- END {} ---\n\n", path)
}

pub fn error_line(path: &dyn Display, message: &dyn Display) -> String {
    format!("// Error reading {}: {}\n\n", path, message)
}
