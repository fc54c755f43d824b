//! Cross-platform path helpers for naming watched files
//!
//! - `normalize_extension`: Turns `json` / `.json` into `.json`
//! - `viz_name`: Derives a VizFile name from its path under the watched root

use std::path::{Component, Path};

/// Ensure an extension carries exactly one leading dot.
///
/// ```
/// use vizbuzz::fs_utils::normalize_extension;
///
/// assert_eq!(normalize_extension("json"), ".json");
/// assert_eq!(normalize_extension(".json"), ".json");
/// ```
pub fn normalize_extension(ext: &str) -> String {
    format!(".{}", ext.trim_start_matches('.'))
}

/// Derive the VizFile name for `path` under `root`.
///
/// The result is relative to `root`, joined with `/` on every platform, has
/// `extension` stripped and never starts with a separator. Returns `None`
/// when `path` is not under `root` or does not end in `extension`.
///
/// ```
/// use std::path::Path;
/// use vizbuzz::fs_utils::viz_name;
///
/// let name = viz_name(Path::new("/watch"), Path::new("/watch/shapes/a.json"), ".json");
/// assert_eq!(name.as_deref(), Some("shapes/a"));
/// ```
pub fn viz_name(root: &Path, path: &Path, extension: &str) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;

    let parts: Vec<String> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    if parts.is_empty() {
        return None;
    }

    let joined = parts.join("/");
    joined.strip_suffix(extension).map(str::to_string)
}
