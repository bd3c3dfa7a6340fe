use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use colored::Colorize;
use glob::Pattern;
use walkdir::WalkDir;

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal paths.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// An include or ignore entry, matched against root-relative paths.
enum PathFilter {
    /// Matches the path itself and everything below it.
    Literal(PathBuf),
    Glob(Pattern),
}

impl PathFilter {
    fn new(pattern: &str, verbose: bool) -> Option<Self> {
        if !is_glob_pattern(pattern) {
            return Some(PathFilter::Literal(PathBuf::from(pattern)));
        }
        match Pattern::new(pattern) {
            Ok(glob) => Some(PathFilter::Glob(glob)),
            Err(e) => {
                if verbose {
                    eprintln!(
                        "{} Invalid glob pattern '{}': {}",
                        "warning:".bold().yellow(),
                        pattern,
                        e
                    );
                }
                None
            }
        }
    }

    fn matches(&self, relative: &Path) -> bool {
        match self {
            PathFilter::Literal(prefix) => relative.starts_with(prefix),
            PathFilter::Glob(glob) => glob.matches_path(relative),
        }
    }
}

/// Result of scanning files.
pub struct ScanResult {
    /// Matching files, sorted by path.
    pub files: BTreeSet<String>,
    /// Entries that could not be accessed.
    pub skipped_count: usize,
}

/// Collect the files under `root` matching any include and no ignore.
///
/// Patterns are matched against the path relative to `root`. When `root`
/// is a file, that file is the only candidate.
pub fn scan_files(root: &Path, includes: &[String], ignores: &[String], verbose: bool) -> ScanResult {
    let includes: Vec<PathFilter> = includes
        .iter()
        .filter_map(|p| PathFilter::new(p, verbose))
        .collect();
    let ignores: Vec<PathFilter> = ignores
        .iter()
        .filter_map(|p| PathFilter::new(p, verbose))
        .collect();

    let mut files = BTreeSet::new();
    let mut skipped_count = 0;

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                skipped_count += 1;
                if verbose {
                    eprintln!("{} Cannot access path: {}", "warning:".bold().yellow(), e);
                }
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let relative = match path.strip_prefix(root) {
            Ok(rel) if !rel.as_os_str().is_empty() => rel,
            _ => path,
        };

        if ignores.iter().any(|f| f.matches(relative)) {
            continue;
        }
        if includes.iter().any(|f| f.matches(relative)) {
            files.insert(path.to_string_lossy().into_owned());
        }
    }

    ScanResult {
        files,
        skipped_count,
    }
}
