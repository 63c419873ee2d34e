//! Directory-tree concatenation
//!
//! Walks a root directory depth-first, prunes excluded folders before
//! descending, filters files by suffix and writes each survivor into one
//! output document between BEGIN/END markers.

mod config;
mod filter;
mod markers;
mod reader;
mod runner;
mod walker;

pub use config::{ConcatRequest, Preset, default_output_for};
pub use filter::{Candidate, ExclusionSet, ExtensionFilter, FileFilter, has_segment};
pub use markers::{MarkerWriter, begin_marker, end_marker, error_line};
pub use reader::read_text_file;
pub use runner::{concatenate, concatenate_to_writer};
pub use walker::{TreeVisitor, TreeWalker};
