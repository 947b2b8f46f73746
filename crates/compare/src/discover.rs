//! Resolve the files of a multi-file comparison.

use crate::error::{CompareError, Result};
use globset::GlobBuilder;
use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// Extensions picked up from directories and glob patterns
pub const RECOGNIZED_EXTENSIONS: [&str; 2] = ["xlsx", "xls"];

const GLOB_META: [char; 4] = ['*', '?', '[', '{'];

/// Where the files of a comparison come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSource {
    /// Paths used exactly as given
    Files(Vec<PathBuf>),
    /// Every spreadsheet directly inside a directory
    Directory(PathBuf),
    /// Every spreadsheet matching a glob pattern
    Pattern(String),
}

impl FileSource {
    /// Classify command-line inputs: a lone directory or a lone pattern are
    /// expanded, anything else is an explicit list.
    #[must_use]
    pub fn from_inputs(inputs: &[String]) -> Self {
        if let [single] = inputs {
            if Path::new(single).is_dir() {
                return FileSource::Directory(PathBuf::from(single));
            }
            if has_glob_meta(single) {
                return FileSource::Pattern(single.clone());
            }
        }
        FileSource::Files(inputs.iter().map(PathBuf::from).collect())
    }
}

fn has_glob_meta(s: &str) -> bool {
    s.contains(GLOB_META)
}

/// Check the extension against [`RECOGNIZED_EXTENSIONS`], ignoring case
#[must_use]
pub fn is_spreadsheet(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            RECOGNIZED_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Resolve a source into a file list. Expanded sources are sorted; explicit
/// lists keep their order with repeated paths dropped.
///
/// # Errors
///
/// Returns error if a directory cannot be read, the pattern is invalid, or
/// the walk fails.
pub fn discover(source: &FileSource) -> Result<Vec<PathBuf>> {
    let mut files = match source {
        FileSource::Files(files) => return Ok(dedup_in_order(files)),
        FileSource::Directory(dir) => list_directory(dir)?,
        FileSource::Pattern(pattern) => match_pattern(pattern)?,
    };
    files.sort();
    tracing::debug!("Discovered {} spreadsheet(s)", files.len());
    Ok(files)
}

fn dedup_in_order(files: &[PathBuf]) -> Vec<PathBuf> {
    let mut seen = HashSet::new();
    files
        .iter()
        .filter(|path| seen.insert(path.as_path()))
        .cloned()
        .collect()
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.'))
}

fn list_directory(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() || is_hidden(&path) {
            continue;
        }
        if is_spreadsheet(&path) {
            files.push(path);
        } else {
            tracing::debug!("Skipping {}: not a spreadsheet", path.display());
        }
    }
    Ok(files)
}

/// Split a pattern into its literal leading directory and the number of
/// components after it (`None` when `**` allows any depth).
fn split_pattern(pattern: &str) -> (PathBuf, Option<usize>) {
    let components: Vec<Component<'_>> = Path::new(pattern).components().collect();
    let literal = components
        .iter()
        .take_while(|c| !has_glob_meta(&c.as_os_str().to_string_lossy()))
        .count()
        .min(components.len().saturating_sub(1));

    let base: PathBuf = components[..literal].iter().collect();
    let depth = if pattern.contains("**") {
        None
    } else {
        Some(components.len() - literal)
    };
    (base, depth)
}

fn match_pattern(pattern: &str) -> Result<Vec<PathBuf>> {
    let invalid = |source| CompareError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    };
    let matcher = GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map_err(invalid)?
        .compile_matcher();

    let (base, depth) = split_pattern(pattern);
    let root = if base.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        base.clone()
    };

    let mut walker = WalkDir::new(&root).min_depth(1);
    if let Some(depth) = depth {
        walker = walker.max_depth(depth);
    }

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|source| CompareError::Walk {
            path: root.clone(),
            source,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        // Relative patterns are matched without the walk's leading "./"
        let path = if base.as_os_str().is_empty() {
            entry.path().strip_prefix(".").unwrap_or(entry.path()).to_path_buf()
        } else {
            entry.path().to_path_buf()
        };

        if matcher.is_match(&path) && is_spreadsheet(&path) {
            files.push(path);
        }
    }
    Ok(files)
}
