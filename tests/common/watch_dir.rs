//! Temporary watched directory builder

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Builder for creating watched directory structures
pub struct WatchDir {
    dir: TempDir,
}

impl WatchDir {
    /// Create a new empty watched directory
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    /// Get the path to the watched root
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Add a file with the given content
    pub fn add_file(&self, relative_path: &str, content: &str) -> &Self {
        self.write_file(relative_path, content);
        self
    }

    /// Replace a file's content atomically, so a concurrent poll never sees
    /// a truncated file
    pub fn write_file(&self, relative_path: &str, content: &str) -> PathBuf {
        let full_path = self.dir.path().join(relative_path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }

        let tmp_path = full_path.with_extension("json.tmp");
        fs::write(&tmp_path, content).expect("Failed to write temp file");
        fs::rename(&tmp_path, &full_path).expect("Failed to move file into place");
        full_path
    }

    /// Delete the watched root and everything under it
    pub fn remove_root(&self) {
        fs::remove_dir_all(self.dir.path()).expect("Failed to remove watched root");
    }

    /// Remove a file
    pub fn remove_file(&self, relative_path: &str) {
        fs::remove_file(self.dir.path().join(relative_path)).expect("Failed to remove file");
    }
}

/// A file with one item named `name` holding a square of side `size`
pub fn square_file(name: &str, size: u32) -> String {
    format!(
        r#"{{"items":[{{"name":"{name}","polygon":{{"rings":[[[0,0],[{size},0],[{size},{size}],[0,{size}]]]}}}}]}}"#,
        name = name,
        size = size
    )
}
