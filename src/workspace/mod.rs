//! Directory walking: find target source files under a base directory.
//!
//! A target is a first-level folder of the base directory. Every candidate
//! file below it, at any depth, is attributed to that folder's name. Files
//! sitting directly in the base directory belong to no target and are never
//! returned.

use std::path::{Component, Path, PathBuf};

use walkdir::WalkDir;

use crate::diagnostic::Diagnostic;


/// File name suffixes that may hold kernel registrations.
pub const SOURCE_EXTENSIONS: &[&str] = &[".c", ".cpp"];

/// Target-agnostic interface file; never holds target-specific kernels.
pub const INTERFACE_FILE: &str = "vx_interface.cpp";

/// A candidate source file and the target it belongs to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceFile {
    pub target: String,
    pub path: PathBuf,
}

/// Result of walking a base directory.
#[derive(Debug, Default)]
pub struct Walk {
    /// Candidate files in visitation order.
    pub files: Vec<SourceFile>,
    /// Entries that could not be read.
    pub skipped: Vec<Diagnostic>,
}

/// Whether a file name is scanned at all.
pub fn is_candidate(file_name: &str) -> bool {
    file_name != INTERFACE_FILE && SOURCE_EXTENSIONS.iter().any(|ext| file_name.ends_with(ext))
}

/// Collect every candidate file below `base`.
///
/// Entries are visited depth-first, sorted by file name within each
/// directory, so the order (and with it which declaration wins on a kernel
/// name collision) is the same on every platform.
pub fn collect_sources(base: &Path) -> Walk {
    let mut walk = Walk::default();

    // Depth 1 holds the target folders themselves and stray top-level files.
    for entry in WalkDir::new(base).min_depth(2).sort_by_file_name() {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                walk.skipped
                    .push(Diagnostic::warning(format!("skipping unreadable entry: {}", err)));
                continue;
            }
        };
        if entry.file_type().is_dir() {
            continue;
        }
        if !is_candidate(&entry.file_name().to_string_lossy()) {
            continue;
        }
        if let Some(target) = target_of(base, entry.path()) {
            walk.files.push(SourceFile {
                target,
                path: entry.path().to_path_buf(),
            });
        }
    }

    walk
}

/// First path segment of `path` beneath `base`.
fn target_of(base: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(base).ok()?;
    let mut components = rel.components();
    let first = match components.next()? {
        Component::Normal(name) => name.to_string_lossy().into_owned(),
        _ => return None,
    };
    // A file directly in `base` has nothing after its own name.
    components.next()?;
    Some(first)
}

/// Read a source file, dropping bytes that are not valid UTF-8.
pub fn read_source(path: &Path) -> Result<String, Diagnostic> {
    let bytes = std::fs::read(path).map_err(|e| Diagnostic::io("read", path, e))?;
    Ok(decode_lossy(&bytes))
}

/// Decode UTF-8, silently removing invalid byte sequences.
pub fn decode_lossy(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        out.push_str(chunk.valid());
    }
    out
}
