//! Canonicalize command handler

use crate::commands::CanonicalizeArgs;
use crate::error::CliResult;
use sonarcov::{PathCanonicalizer, PathStyle, SegmentResolver};

/// Execute the canonicalize command, printing one path per line
pub fn execute_canonicalize(args: &CanonicalizeArgs) -> CliResult<()> {
    let style = args.path_style.map_or_else(PathStyle::native, PathStyle::from);
    let canonicalizer = PathCanonicalizer::new(style);

    for line in canonicalize_all(&canonicalizer, &args.paths) {
        println!("{line}");
    }

    Ok(())
}

/// Canonical form of every path, in input order
pub fn canonicalize_all<R: SegmentResolver>(
    canonicalizer: &PathCanonicalizer<R>,
    paths: &[String],
) -> Vec<String> {
    paths
        .iter()
        .map(|path| canonicalizer.canonicalize(path))
        .collect()
}
