//! Path canonicalization
//!
//! Hosts and compilers are not consistent about letter casing, so the same
//! source file can be reported as `c:\src\Foo.cpp` and `C:\SRC\foo.cpp`.
//! The canonicalizer rewrites each path segment to the name the filesystem
//! actually stores, which gives every file one stable report key.
//!
//! ```text
//! \\server\share\dir\f.cpp   server and share kept verbatim, rest resolved
//! c:\temp\f.cpp              drive letter upper-cased, rest resolved
//! src/f.cpp                  every segment resolved
//! ```
//!
//! Resolution never fails: a segment the resolver cannot answer for is
//! kept exactly as typed.

mod resolver;

pub use resolver::{FsSegmentResolver, SegmentResolver, TableResolver, VerbatimResolver};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Separator convention of the raw paths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathStyle {
    /// Backslash-separated paths
    Windows,
    /// Slash-separated paths
    Posix,
}

impl PathStyle {
    /// Style of the platform this binary runs on
    #[must_use]
    pub const fn native() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else {
            Self::Posix
        }
    }

    /// Separator character
    #[must_use]
    pub const fn separator(self) -> char {
        match self {
            Self::Windows => '\\',
            Self::Posix => '/',
        }
    }
}

impl Default for PathStyle {
    fn default() -> Self {
        Self::native()
    }
}

/// Rewrites raw paths into their on-disk display form
#[derive(Debug, Clone)]
pub struct PathCanonicalizer<R = FsSegmentResolver> {
    resolver: R,
    separator: char,
}

impl PathCanonicalizer<FsSegmentResolver> {
    /// Canonicalizer that consults the live filesystem
    #[must_use]
    pub fn new(style: PathStyle) -> Self {
        Self::with_resolver(FsSegmentResolver, style)
    }
}

impl<R: SegmentResolver> PathCanonicalizer<R> {
    /// Canonicalizer with a custom segment resolver
    #[must_use]
    pub fn with_resolver(resolver: R, style: PathStyle) -> Self {
        Self {
            resolver,
            separator: style.separator(),
        }
    }

    /// Canonicalize a raw path
    #[must_use]
    pub fn canonicalize(&self, raw: &str) -> String {
        let sep = self.separator;
        let (mut result, body_start) = self.root_prefix(raw);
        let body = &raw[body_start..];

        if body.is_empty() {
            return result;
        }

        let mut segments: Vec<&str> = body.split(sep).collect();
        // A trailing separator is dropped unless it is all there is
        if segments.len() > 1
            && segments.last().is_some_and(|s| s.is_empty())
            && segments[..segments.len() - 1].iter().any(|s| !s.is_empty())
        {
            let _ = segments.pop();
        }

        for (i, segment) in segments.into_iter().enumerate() {
            if i > 0 {
                result.push(sep);
            }

            // Parent is the resolved prefix, not the raw one
            match self.resolver.resolve(&result, segment) {
                Some(name) => {
                    trace!(parent = %result, segment, resolved = %name, "resolved segment");
                    result.push_str(&name);
                }
                None => {
                    debug!(parent = %result, segment, "segment kept verbatim");
                    result.push_str(segment);
                }
            }
        }

        result
    }

    /// Emitted prefix for network-share and drive-letter roots, plus the
    /// byte offset where per-segment resolution starts.
    fn root_prefix(&self, raw: &str) -> (String, usize) {
        let sep = self.separator;
        let mut chars = raw.char_indices();

        let first = chars.next();
        let second = chars.next();

        match (first, second) {
            (Some((_, a)), Some((_, b))) if a == sep && b == sep => {
                let skip_from = 2 * sep.len_utf8();
                let end = raw[skip_from..]
                    .match_indices(sep)
                    .nth(1)
                    .map_or(raw.len(), |(pos, _)| skip_from + pos + sep.len_utf8());
                (raw[..end].to_string(), end)
            }
            (Some((_, drive)), Some((colon_at, ':'))) => {
                let mut prefix: String = drive.to_uppercase().collect();
                prefix.push(':');
                let mut end = colon_at + 1;
                if raw[end..].starts_with(sep) {
                    prefix.push(sep);
                    end += sep.len_utf8();
                }
                (prefix, end)
            }
            _ => (String::new(), 0),
        }
    }
}
