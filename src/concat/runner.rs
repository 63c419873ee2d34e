//! The concatenation run: walk, filter, read, write

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::error::{ConcatError, Result};
use crate::summary::ConcatSummary;

use super::config::ConcatRequest;
use super::filter::{Candidate, FileFilter};
use super::markers::MarkerWriter;
use super::reader::read_text_file;
use super::walker::{TreeVisitor, TreeWalker};

/// Concatenate every matching file under `request.root` into
/// `request.output`, truncating it first.
///
/// Fails only if the root cannot be listed or the output cannot be written.
/// Unreadable files become inline error lines and are reported in the
/// returned summary.
pub fn concatenate(request: &ConcatRequest) -> Result<ConcatSummary> {
    let file = File::create(&request.output).map_err(|source| ConcatError::CreateOutput {
        path: request.output.clone(),
        source,
    })?;
    let output_identity = request.output.canonicalize().ok();

    let mut writer = BufWriter::new(file);
    let summary = run(request, &mut writer, output_identity)?;
    writer.flush().map_err(|source| output_error(request, source))?;
    Ok(summary)
}

/// Same as [`concatenate`] but writes into an arbitrary sink instead of
/// `request.output`. Write failures are still reported against that path.
pub fn concatenate_to_writer<W: Write>(
    request: &ConcatRequest,
    writer: &mut W,
) -> Result<ConcatSummary> {
    run(request, writer, None)
}

fn run<W: Write>(
    request: &ConcatRequest,
    writer: &mut W,
    output_identity: Option<PathBuf>,
) -> Result<ConcatSummary> {
    let started = Instant::now();
    info!(
        root = %request.root.display(),
        output = %request.output.display(),
        "concatenating tree"
    );

    let mut sink = Concatenator {
        request,
        filter: FileFilter::new(
            &request.extensions,
            &request.exclusions,
            request.substring_check,
        ),
        writer: MarkerWriter::new(writer),
        output_identity,
        summary: ConcatSummary::new(request.root.clone(), request.output.clone()),
    };

    TreeWalker::new(&request.root, &request.exclusions).walk(&mut sink)?;

    let bytes_written = sink.writer.bytes_written();
    sink.writer
        .finish()
        .map_err(|source| output_error(request, source))?;

    let mut summary = sink.summary;
    summary.bytes_written = bytes_written;
    summary.elapsed_ms = started.elapsed().as_millis() as u64;

    info!(
        files = summary.files_written,
        failed = summary.files_failed,
        skipped = summary.files_skipped(),
        "concatenation finished"
    );
    Ok(summary)
}

fn output_error(request: &ConcatRequest, source: io::Error) -> ConcatError {
    ConcatError::WriteOutput {
        path: request.output.clone(),
        source,
    }
}

/// Walk visitor that writes one marker block (or error line) per file.
struct Concatenator<'a, W: Write> {
    request: &'a ConcatRequest,
    filter: FileFilter<'a>,
    writer: MarkerWriter<W>,
    output_identity: Option<PathBuf>,
    summary: ConcatSummary,
}

impl<W: Write> Concatenator<'_, W> {
    fn is_output_file(&self, path: &Path) -> bool {
        let Some(identity) = &self.output_identity else {
            return false;
        };
        if path.file_name() != identity.file_name() {
            return false;
        }
        path.canonicalize().is_ok_and(|p| &p == identity)
    }
}

impl<W: Write> TreeVisitor for Concatenator<'_, W> {
    fn visit_file(&mut self, path: &Path) -> Result<()> {
        match self.filter.check(path) {
            Candidate::Include => {}
            Candidate::WrongExtension => {
                self.summary.skipped_extension += 1;
                return Ok(());
            }
            Candidate::SubstringExcluded { name, segment } => {
                self.summary.skipped_substring += 1;
                if segment {
                    debug!(path = %path.display(), excluded = name, "skipped by path check");
                } else {
                    self.summary.over_excluded += 1;
                    warn!(
                        path = %path.display(),
                        excluded = name,
                        "skipped because an excluded name occurs inside a file or folder name"
                    );
                }
                return Ok(());
            }
        }

        if self.is_output_file(path) {
            debug!(path = %path.display(), "not concatenating the output file into itself");
            self.summary.skipped_output += 1;
            return Ok(());
        }

        let written = match read_text_file(path) {
            Ok(content) => {
                self.summary.files_written += 1;
                self.writer.write_block(path, &content)
            }
            Err(err) => {
                debug!(path = %path.display(), error = %err, "annotating unreadable file");
                self.summary
                    .record_failure(path.to_path_buf(), err.to_string());
                self.writer.write_error(path, &err)
            }
        };
        written.map_err(|source| output_error(self.request, source))
    }

    fn enter_dir(&mut self, _path: &Path) {
        self.summary.dirs_visited += 1;
    }

    fn prune_dir(&mut self, _path: &Path, _excluded: &str) {
        self.summary.dirs_pruned += 1;
    }

    fn unreadable_dir(&mut self, _path: &Path, _err: &io::Error) {
        self.summary.dirs_unreadable += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_reference_scenario() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("proj");
        write(&root, "a.js", "x");
        write(&root, "node_modules/b.js", "y");
        write(&root, "sub/c.env", "z");

        let request = ConcatRequest::new(&root, dir.path().join("out.txt"))
            .with_extensions([".js", ".env"])
            .with_excluded_folders(["node_modules"]);
        let summary = concatenate(&request).unwrap();

        let a = root.join("a.js");
        let c = root.join("sub").join("c.env");
        let expected = format!(
            "// --- BEGIN {a} ---\n\nx\n\n// --- END {a} ---\n\n\
             // --- BEGIN {c} ---\n\nz\n\n// --- END {c} ---\n\n",
            a = a.display(),
            c = c.display()
        );
        assert_eq!(fs::read_to_string(&request.output).unwrap(), expected);
        assert_eq!(summary.files_written, 2);
        assert_eq!(summary.dirs_pruned, 1);
        assert_eq!(summary.bytes_written, expected.len() as u64);
    }

    #[test]
    fn test_decode_error_annotated_and_run_continues() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("src");
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("a.js"), [0xFF, 0xFE]).unwrap();
        write(&root, "b.js", "ok");

        let request = ConcatRequest::new(&root, dir.path().join("out.txt"));
        let mut buf = Vec::new();
        let summary = concatenate_to_writer(&request, &mut buf).unwrap();
        let out = String::from_utf8(buf).unwrap();

        let bad = root.join("a.js");
        let error_prefix = format!("// Error reading {}: invalid UTF-8", bad.display());
        assert_eq!(out.matches(&error_prefix).count(), 1);
        assert!(!out.contains(&format!("BEGIN {}", bad.display())));
        assert!(out.contains("ok"));
        assert_eq!(summary.files_failed, 1);
        assert_eq!(summary.files_written, 1);
    }

    #[test]
    fn test_output_inside_root_is_not_read_back() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.txt", "hello");
        let output = dir.path().join("combined.txt");
        fs::write(&output, "stale contents").unwrap();

        let request = ConcatRequest::new(dir.path(), &output);
        let summary = concatenate(&request).unwrap();

        let out = fs::read_to_string(&output).unwrap();
        assert!(out.contains("hello"));
        assert!(!out.contains("stale contents"));
        assert!(!out.contains(&format!("BEGIN {}", output.display())));
        assert_eq!(summary.skipped_output, 1);
    }

    #[test]
    fn test_over_exclusion_counted() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "node_modules_backup.js", "kept?");
        write(dir.path(), "app.js", "kept");

        let request = ConcatRequest::new(dir.path(), dir.path().join("out.txt"))
            .with_extensions([".js"])
            .with_excluded_folders(["node_modules"]);
        let mut buf = Vec::new();
        let summary = concatenate_to_writer(&request, &mut buf).unwrap();

        assert_eq!(summary.files_written, 1);
        assert_eq!(summary.skipped_substring, 1);
        assert_eq!(summary.over_excluded, 1);

        let lenient = request.clone().with_substring_check(false);
        let mut buf = Vec::new();
        let summary = concatenate_to_writer(&lenient, &mut buf).unwrap();
        assert_eq!(summary.files_written, 2);
    }

    #[test]
    fn test_empty_suffix_member_includes_every_file() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("src");
        write(&root, "README", "readme");
        write(&root, "app.js", "app");

        let request = ConcatRequest::new(&root, dir.path().join("out.txt"))
            .with_extensions([".js", ""]);
        let mut buf = Vec::new();
        let summary = concatenate_to_writer(&request, &mut buf).unwrap();

        assert_eq!(summary.files_written, 2);
        assert_eq!(summary.skipped_extension, 0);
    }

    #[test]
    fn test_missing_root_still_truncates_output() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("out.txt");
        fs::write(&output, "old").unwrap();

        let request = ConcatRequest::new(dir.path().join("missing"), &output);
        let err = concatenate(&request).unwrap_err();

        assert!(matches!(err, ConcatError::Root { .. }));
        assert_eq!(fs::read_to_string(&output).unwrap(), "");
    }

    #[test]
    fn test_unwritable_output_is_fatal() {
        let dir = TempDir::new().unwrap();
        let request = ConcatRequest::new(dir.path(), dir.path().join("no/such/dir/out.txt"));
        let err = concatenate(&request).unwrap_err();
        assert!(matches!(err, ConcatError::CreateOutput { .. }));
    }
}
