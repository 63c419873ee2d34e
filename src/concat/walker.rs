//! Depth-first, top-down directory walk with prune-before-descend

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{ConcatError, Result};

use super::filter::ExclusionSet;

/// Receives walk events. Files arrive in emission order.
pub trait TreeVisitor {
    /// A file (or file-like entry) of a directory that was not pruned.
    fn visit_file(&mut self, path: &Path) -> Result<()>;

    fn enter_dir(&mut self, _path: &Path) {}

    fn prune_dir(&mut self, _path: &Path, _excluded: &str) {}

    fn unreadable_dir(&mut self, _path: &Path, _err: &io::Error) {}
}

/// Children of one directory, split and sorted by file name.
#[derive(Debug, Default)]
struct DirListing {
    files: Vec<PathBuf>,
    dirs: Vec<PathBuf>,
}

/// Walks `root` visiting each directory's files before recursing into its
/// subdirectories. Only a failure to list the root itself is fatal.
pub struct TreeWalker<'a> {
    root: &'a Path,
    exclusions: &'a ExclusionSet,
}

impl<'a> TreeWalker<'a> {
    pub fn new(root: &'a Path, exclusions: &'a ExclusionSet) -> Self {
        Self { root, exclusions }
    }

    pub fn walk<V: TreeVisitor>(&self, visitor: &mut V) -> Result<()> {
        let listing = read_listing(self.root).map_err(|source| ConcatError::Root {
            path: self.root.to_path_buf(),
            source,
        })?;
        self.walk_listing(self.root, listing, visitor)
    }

    fn walk_dir<V: TreeVisitor>(&self, dir: &Path, visitor: &mut V) -> Result<()> {
        match read_listing(dir) {
            Ok(listing) => self.walk_listing(dir, listing, visitor),
            Err(e) => {
                warn!(path = %dir.display(), error = %e, "skipping unreadable directory");
                visitor.unreadable_dir(dir, &e);
                Ok(())
            }
        }
    }

    fn walk_listing<V: TreeVisitor>(
        &self,
        dir: &Path,
        listing: DirListing,
        visitor: &mut V,
    ) -> Result<()> {
        visitor.enter_dir(dir);

        let mut descend = Vec::with_capacity(listing.dirs.len());
        for sub in listing.dirs {
            match self.exclusions.prunes(self.root, &sub) {
                Some(excluded) => {
                    debug!(path = %sub.display(), excluded, "pruned directory");
                    visitor.prune_dir(&sub, excluded);
                }
                None => descend.push(sub),
            }
        }

        for file in &listing.files {
            visitor.visit_file(file)?;
        }

        for sub in &descend {
            self.walk_dir(sub, visitor)?;
        }

        Ok(())
    }
}

/// List a directory, sorted by name for a deterministic order.
///
/// Symlinked directories are not followed. Symlinks to files and dangling
/// links count as files. FIFOs, sockets and devices are left out so that
/// reading them cannot block.
fn read_listing(dir: &Path) -> io::Result<DirListing> {
    let mut entries: Vec<_> = fs::read_dir(dir)?
        .filter_map(|e| match e {
            Ok(entry) => Some(entry),
            Err(err) => {
                warn!(dir = %dir.display(), error = %err, "skipping unreadable directory entry");
                None
            }
        })
        .collect();
    entries.sort_by_key(|e| e.file_name());

    let mut listing = DirListing::default();
    for entry in entries {
        let path = entry.path();
        let file_type = match entry.file_type() {
            Ok(t) => t,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "skipping entry with unknown file type");
                continue;
            }
        };

        if file_type.is_dir() {
            listing.dirs.push(path);
        } else if file_type.is_symlink() {
            if path.is_dir() {
                debug!(path = %path.display(), "not following directory symlink");
            } else {
                listing.files.push(path);
            }
        } else if file_type.is_file() {
            listing.files.push(path);
        } else {
            debug!(path = %path.display(), "skipping special file");
        }
    }

    Ok(listing)
}
