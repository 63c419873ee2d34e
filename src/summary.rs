//! Per-run summary collection and display
//!
//! The concatenator fills a `ConcatSummary` as it goes; the CLI prints it
//! to stderr in color or to stdout as JSON.

use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// A file that produced an inline error annotation instead of a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedFile {
    pub path: PathBuf,
    pub message: String,
}

/// Counters for one concatenation run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConcatSummary {
    pub root: PathBuf,
    pub output: PathBuf,
    /// Files written as BEGIN/END blocks
    pub files_written: usize,
    /// Files written as an error line
    pub files_failed: usize,
    pub skipped_extension: usize,
    /// Files dropped by the substring re-check
    pub skipped_substring: usize,
    /// Of those, files where the excluded name was not a path segment
    pub over_excluded: usize,
    /// The output file, when it lies inside the tree
    pub skipped_output: usize,
    pub dirs_visited: usize,
    pub dirs_pruned: usize,
    pub dirs_unreadable: usize,
    /// Bytes written to the output document, markers included
    pub bytes_written: u64,
    pub elapsed_ms: u64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<FailedFile>,
}

impl ConcatSummary {
    pub fn new(root: PathBuf, output: PathBuf) -> Self {
        Self {
            root,
            output,
            ..Default::default()
        }
    }

    pub fn record_failure(&mut self, path: PathBuf, message: String) {
        self.files_failed += 1;
        self.failures.push(FailedFile { path, message });
    }

    pub fn files_skipped(&self) -> usize {
        self.skipped_extension + self.skipped_substring + self.skipped_output
    }

    pub fn elapsed(&self) -> Duration {
        Duration::from_millis(self.elapsed_ms)
    }
}

/// Print a human-readable summary to stderr with optional color.
pub fn print_summary(summary: &ConcatSummary, use_color: bool) -> io::Result<()> {
    let color_choice = if use_color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut stderr = StandardStream::stderr(color_choice);
    write_summary(&mut stderr, summary)
}

fn write_summary<W: WriteColor>(out: &mut W, summary: &ConcatSummary) -> io::Result<()> {
    let mut bold = ColorSpec::new();
    bold.set_bold(true);
    let mut path_color = ColorSpec::new();
    path_color.set_fg(Some(Color::Cyan));
    let mut warn_color = ColorSpec::new();
    warn_color.set_fg(Some(Color::Yellow)).set_bold(true);

    out.set_color(&bold)?;
    write!(out, "Wrote ")?;
    out.set_color(&path_color)?;
    write!(out, "{}", summary.output.display())?;
    out.reset()?;
    writeln!(
        out,
        " ({} {}, {}) in {}",
        format_number(summary.files_written),
        plural(summary.files_written, "file", "files"),
        format_bytes(summary.bytes_written),
        humantime::format_duration(summary.elapsed())
    )?;

    writeln!(
        out,
        "  Directories:  {} visited, {} pruned",
        format_number(summary.dirs_visited),
        format_number(summary.dirs_pruned)
    )?;
    write!(
        out,
        "  Skipped:      {} by extension, {} by path check",
        format_number(summary.skipped_extension),
        format_number(summary.skipped_substring)
    )?;
    if summary.skipped_output > 0 {
        write!(out, ", output file")?;
    }
    writeln!(out)?;

    if summary.over_excluded > 0 {
        out.set_color(&warn_color)?;
        write!(out, "  warning:")?;
        out.reset()?;
        writeln!(
            out,
            " {} file(s) skipped only because an excluded name appears inside a file or folder name (see --no-substring-check)",
            summary.over_excluded
        )?;
    }

    if summary.dirs_unreadable > 0 {
        out.set_color(&warn_color)?;
        write!(out, "  warning:")?;
        out.reset()?;
        writeln!(out, " {} directories could not be listed", summary.dirs_unreadable)?;
    }

    for failure in &summary.failures {
        out.set_color(&warn_color)?;
        write!(out, "  error:")?;
        out.reset()?;
        writeln!(out, " {}: {}", failure.path.display(), failure.message)?;
    }

    Ok(())
}

fn plural<'a>(n: usize, one: &'a str, many: &'a str) -> &'a str {
    if n == 1 { one } else { many }
}

/// Format a number with thousand separators.
fn format_number(n: usize) -> String {
    let s = n.to_string();
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::new();

    for (i, c) in chars.iter().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.insert(0, ',');
        }
        result.insert(0, *c);
    }

    result
}

fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.1}M", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1}K", bytes as f64 / KB as f64)
    } else {
        format!("{}B", bytes)
    }
}

/// Print the summary as JSON on stdout.
pub fn print_summary_json(summary: &ConcatSummary) -> io::Result<()> {
    let json = serde_json::to_string_pretty(summary).map_err(io::Error::other)?;
    println!("{}", json);
    Ok(())
}
