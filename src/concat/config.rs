//! Request types for a concatenation run

use std::path::{Path, PathBuf};

use super::filter::{ExclusionSet, ExtensionFilter};

/// Named bundles of extensions and excluded folders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Node.js server/client trees: `.js` and `.env` sources, build and
    /// dependency folders left out.
    Node,
}

impl Preset {
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            Preset::Node => &[".js", ".env"],
        }
    }

    pub fn excluded_folders(self) -> &'static [&'static str] {
        match self {
            Preset::Node => &["node_modules", ".git", "dist", "build", "logs", "public"],
        }
    }
}

/// Everything one concatenation run needs. Not modified once the run starts.
#[derive(Debug, Clone)]
pub struct ConcatRequest {
    pub root: PathBuf,
    pub output: PathBuf,
    pub extensions: ExtensionFilter,
    pub exclusions: ExclusionSet,
    /// Also drop files whose full path contains an excluded name anywhere.
    /// Can over-exclude (`node_modules_backup.js`), which is logged.
    pub substring_check: bool,
}

impl ConcatRequest {
    /// A request that matches every file and excludes nothing.
    pub fn new(root: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            output: output.into(),
            extensions: ExtensionFilter::any(),
            exclusions: ExclusionSet::default(),
            substring_check: true,
        }
    }

    pub fn from_preset(
        preset: Preset,
        root: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
    ) -> Self {
        Self::new(root, output)
            .with_extensions(preset.extensions().iter().copied())
            .with_excluded_folders(preset.excluded_folders().iter().copied())
    }

    /// Add allowed suffixes. An empty filter still matches everything.
    pub fn with_extensions<I, S>(mut self, suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions.extend(suffixes);
        self
    }

    pub fn with_excluded_folders<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclusions.extend(names);
        self
    }

    pub fn with_substring_check(mut self, enabled: bool) -> Self {
        self.substring_check = enabled;
        self
    }
}

/// Default output file for a root: `combined_code_<dir name>.txt`.
///
/// Roots without a usable final component (`.`, `/`) are resolved first and
/// fall back to `root` if that fails too.
pub fn default_output_for(root: &Path) -> PathBuf {
    let name = root
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .or_else(|| {
            root.canonicalize()
                .ok()
                .and_then(|p| p.file_name().map(|s| s.to_string_lossy().to_string()))
        })
        .unwrap_or_else(|| "root".to_string());
    PathBuf::from(format!("combined_code_{}.txt", name))
}
