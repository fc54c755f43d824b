//! Snapshot producer
//!
//! Walks the watched directory and decodes every non-empty file ending in the
//! configured extension. Files that cannot be read or decoded are logged and
//! left out of the snapshot; the walk itself never fails.

use std::fs;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use serde::Deserialize;

use crate::error::{Result, VizError};
use crate::fs_utils::{normalize_extension, viz_name};
use crate::schema::{Snapshot, VizFile, VizFileRecord};

/// Default extension of visualization files
pub const DEFAULT_EXTENSION: &str = ".json";

/// Builds snapshots of one watched directory
#[derive(Debug, Clone)]
pub struct SnapshotProducer {
    root: PathBuf,
    extension: String,
}

impl SnapshotProducer {
    /// Create a producer for `root` matching files ending in `extension`
    pub fn new(root: impl Into<PathBuf>, extension: &str) -> Self {
        Self {
            root: root.into(),
            extension: normalize_extension(extension),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Produce a fresh snapshot of the directory as it is on disk now
    pub fn snapshot(&self) -> Snapshot {
        let mut files = Vec::new();

        for entry in self.build_walker() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Error walking {}: {}", self.root.display(), e);
                    continue;
                }
            };

            if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
                continue;
            }

            let path = entry.path();
            if !path.to_string_lossy().ends_with(&self.extension) {
                continue;
            }

            match entry.metadata() {
                Ok(meta) if meta.len() == 0 => continue,
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!("Skipping {}: {}", path.display(), e);
                    continue;
                }
            }

            match read_viz_file(&self.root, path, &self.extension) {
                Ok(file) => files.push(file),
                Err(e) => tracing::warn!("Skipping {}", e),
            }
        }

        tracing::trace!("Snapshot of {}: {} files", self.root.display(), files.len());
        Snapshot::new(files)
    }

    /// Depth-first walk, entries of each directory in name order
    fn build_walker(&self) -> ignore::Walk {
        let mut builder = WalkBuilder::new(&self.root);

        // Every file counts: no .gitignore, hidden-file or parent filtering
        builder.standard_filters(false);

        // Do not follow symlinks
        builder.follow_links(false);

        builder.sort_by_file_name(|a, b| a.cmp(b));

        builder.build()
    }
}

/// Read and decode a single visualization file located under `root`
///
/// Only the first JSON value in the file is decoded; anything after it is
/// ignored.
pub fn read_viz_file(root: &Path, path: &Path, extension: &str) -> Result<VizFile> {
    let name = viz_name(root, path, extension).ok_or_else(|| {
        VizError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!(
                "{} is not a {} file under {}",
                path.display(),
                extension,
                root.display()
            ),
        ))
    })?;

    let bytes = fs::read(path).map_err(|e| {
        VizError::Io(std::io::Error::new(
            e.kind(),
            format!("{}: {}", path.display(), e),
        ))
    })?;

    let mut de = serde_json::Deserializer::from_slice(&bytes);
    let record = VizFileRecord::deserialize(&mut de).map_err(|source| VizError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(record.into_viz_file(name))
}
