//! Extension and excluded-folder filtering

use std::ffi::OsStr;
use std::path::{Component, Path};

/// Allow-list of file name suffixes. An empty list means "match everything";
/// an empty suffix `""` is an ordinary member and matches every name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionFilter {
    suffixes: Vec<String>,
}

impl ExtensionFilter {
    pub fn any() -> Self {
        Self::default()
    }

    pub fn new<I, S>(suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut filter = Self::any();
        filter.extend(suffixes);
        filter
    }

    pub fn extend<I, S>(&mut self, suffixes: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for suffix in suffixes {
            let suffix = suffix.into();
            if !self.suffixes.contains(&suffix) {
                self.suffixes.push(suffix);
            }
        }
    }

    pub fn is_any(&self) -> bool {
        self.suffixes.is_empty()
    }

    pub fn suffixes(&self) -> &[String] {
        &self.suffixes
    }

    /// Plain, case-sensitive `ends_with` on the file name.
    pub fn matches(&self, file_name: &OsStr) -> bool {
        if self.is_any() {
            return true;
        }
        let name = file_name.to_string_lossy();
        self.suffixes.iter().any(|s| name.ends_with(s.as_str()))
    }
}

/// Bare folder names that stop descent wherever they occur.
///
/// A name may span several segments (`src/legacy`); it then prunes through
/// the `root/<name>` prefix rule. An empty name prunes every subdirectory and
/// fails the substring re-check for every file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    names: Vec<String>,
}

impl ExclusionSet {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::default();
        set.extend(names);
        set
    }

    pub fn extend<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            let name = name.into();
            if !self.names.contains(&name) {
                self.names.push(name);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Returns the excluded name responsible if `dir` must not be descended
    /// into: either its own name is excluded, or it lies under
    /// `root/<excluded>` (component-wise prefix).
    pub fn prunes(&self, root: &Path, dir: &Path) -> Option<&str> {
        let dir_name = dir.file_name();
        self.names
            .iter()
            .find(|name| {
                dir_name == Some(OsStr::new(name.as_str())) || dir.starts_with(root.join(name))
            })
            .map(String::as_str)
    }

    /// First excluded name appearing anywhere in the path text.
    pub fn substring_match(&self, path: &Path) -> Option<&str> {
        let text = path.to_string_lossy();
        self.names
            .iter()
            .find(|name| text.contains(name.as_str()))
            .map(String::as_str)
    }
}

/// True if some component of `path` is exactly `name`.
pub fn has_segment(path: &Path, name: &str) -> bool {
    path.components().any(|c| match c {
        Component::Normal(part) => part == OsStr::new(name),
        _ => false,
    })
}

/// Outcome of filtering one file found by the walker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Candidate<'a> {
    Include,
    WrongExtension,
    /// Removed by the substring re-check. `segment` is false when no path
    /// component equals the excluded name, i.e. the name only occurs inside
    /// a longer file or folder name.
    SubstringExcluded { name: &'a str, segment: bool },
}

/// Per-file checks applied after directory pruning.
pub struct FileFilter<'a> {
    extensions: &'a ExtensionFilter,
    exclusions: &'a ExclusionSet,
    substring_check: bool,
}

impl<'a> FileFilter<'a> {
    pub fn new(
        extensions: &'a ExtensionFilter,
        exclusions: &'a ExclusionSet,
        substring_check: bool,
    ) -> Self {
        Self {
            extensions,
            exclusions,
            substring_check,
        }
    }

    pub fn check(&self, path: &Path) -> Candidate<'a> {
        let name = path.file_name().unwrap_or_default();
        if !self.extensions.matches(name) {
            return Candidate::WrongExtension;
        }
        let exclusions: &'a ExclusionSet = self.exclusions;
        if self.substring_check {
            if let Some(excluded) = exclusions.substring_match(path) {
                return Candidate::SubstringExcluded {
                    name: excluded,
                    segment: has_segment(path, excluded),
                };
            }
        }
        Candidate::Include
    }
}
