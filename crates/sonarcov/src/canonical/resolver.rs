//! Per-segment display name lookup

use std::collections::HashMap;
use std::path::Path;

/// Resolves the real on-disk name of a single path segment.
///
/// `parent` is the already-canonicalized text preceding the segment,
/// including its trailing separator (empty for a relative path's first
/// segment). Returning `None` keeps the segment verbatim.
pub trait SegmentResolver {
    /// Resolve `segment` inside `parent`
    fn resolve(&self, parent: &str, segment: &str) -> Option<String>;
}

impl<R: SegmentResolver + ?Sized> SegmentResolver for &R {
    fn resolve(&self, parent: &str, segment: &str) -> Option<String> {
        (**self).resolve(parent, segment)
    }
}

impl<R: SegmentResolver + ?Sized> SegmentResolver for Box<R> {
    fn resolve(&self, parent: &str, segment: &str) -> Option<String> {
        (**self).resolve(parent, segment)
    }
}

/// Looks segments up by listing the parent directory.
///
/// An entry whose name equals the segment exactly wins; otherwise the
/// lexicographically first entry that matches ignoring case is returned.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsSegmentResolver;

impl FsSegmentResolver {
    /// Create a filesystem resolver
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl SegmentResolver for FsSegmentResolver {
    fn resolve(&self, parent: &str, segment: &str) -> Option<String> {
        if matches!(segment, "" | "." | "..") {
            return None;
        }

        let dir = if parent.is_empty() {
            Path::new(".")
        } else {
            Path::new(parent)
        };

        let wanted = segment.to_lowercase();
        let mut best: Option<String> = None;

        for entry in std::fs::read_dir(dir).ok()?.flatten() {
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            if name == segment {
                return Some(name);
            }
            if name.to_lowercase() == wanted && best.as_ref().map_or(true, |b| name < *b) {
                best = Some(name);
            }
        }

        best
    }
}

/// Never resolves anything; every segment is kept as typed
#[derive(Debug, Clone, Copy, Default)]
pub struct VerbatimResolver;

impl SegmentResolver for VerbatimResolver {
    fn resolve(&self, _parent: &str, _segment: &str) -> Option<String> {
        None
    }
}

/// Resolver backed by a fixed table of known names.
///
/// Keys are full lower-cased paths (`parent` + `segment`); values are the
/// display name of the final segment. Useful wherever the live filesystem
/// cannot be consulted, e.g. when replaying coverage recorded on a
/// different machine.
#[derive(Debug, Clone, Default)]
pub struct TableResolver {
    names: HashMap<String, String>,
}

impl TableResolver {
    /// Create an empty table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the display name for the segment ending `path`
    #[must_use]
    pub fn with_entry(mut self, path: &str, display_name: impl Into<String>) -> Self {
        let _ = self.names.insert(path.to_lowercase(), display_name.into());
        self
    }
}

impl SegmentResolver for TableResolver {
    fn resolve(&self, parent: &str, segment: &str) -> Option<String> {
        let key = format!("{parent}{segment}").to_lowercase();
        self.names.get(&key).cloned()
    }
}
