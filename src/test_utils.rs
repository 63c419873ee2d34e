//! Test utilities for building temporary source trees.
//!
//! This module is only compiled for tests and benchmarks.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory tree for testing.
///
/// The directory is removed when dropped.
pub struct TestTree {
    dir: TempDir,
}

impl TestTree {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        Self { dir }
    }

    /// Path to the top of the temporary directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Add a text file, creating parent directories as needed.
    pub fn add_file(&self, path: &str, content: &str) -> PathBuf {
        self.add_bytes(path, content.as_bytes())
    }

    /// Add a file with arbitrary bytes, creating parent directories as needed.
    pub fn add_bytes(&self, path: &str, content: &[u8]) -> PathBuf {
        let full_path = self.dir.path().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&full_path, content).expect("Failed to write file");
        full_path
    }

    pub fn add_dir(&self, path: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        fs::create_dir_all(&full_path).expect("Failed to create dir");
        full_path
    }

    /// Lay out a Node-style project under `name`: sources, an env file and
    /// the usual dependency/build folders.
    pub fn add_node_project(&self, name: &str) -> PathBuf {
        self.add_file(&format!("{name}/src/app.js"), "const app = express();\n");
        self.add_file(&format!("{name}/src/routes/api.js"), "module.exports = router;\n");
        self.add_file(&format!("{name}/.env"), "PORT=3000\n");
        self.add_file(&format!("{name}/package.json"), "{}\n");
        self.add_file(&format!("{name}/node_modules/express/index.js"), "dep\n");
        self.add_file(&format!("{name}/dist/bundle.js"), "built\n");
        self.add_file(&format!("{name}/logs/server.js"), "log\n");
        self.add_file(&format!("{name}/public/main.js"), "static\n");
        self.dir.path().join(name)
    }
}

impl Default for TestTree {
    fn default() -> Self {
        Self::new()
    }
}
