use crate::utils::{normalize_path, path_to_string, split_literal_prefix};
use glob::{MatchOptions, Pattern};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};
use walkdir::WalkDir;

/// Wildcards stay within one path component and skip dotfiles; `**` spans directories.
pub const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

pub const CORE_FILE_PATTERNS: &[&str] = &["README*", "LICENSE*", "CHANGELOG*"];

/// Resolves glob patterns to files below a base directory.
#[derive(Debug, Clone)]
pub struct FileSelector {
    base_dir: PathBuf,
}

impl Default for FileSelector {
    fn default() -> Self {
        FileSelector::new(".")
    }
}

impl FileSelector {
    pub fn new<P: Into<PathBuf>>(base_dir: P) -> Self {
        FileSelector {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Expands every include pattern on its own, drops anything an exclude
    /// pattern matches, and returns each file once in first-seen order.
    pub fn expand_globs(
        &self,
        include: &[String],
        exclude: &[String],
        suppress_warnings: bool,
    ) -> Vec<String> {
        let excludes = compile_patterns(exclude);
        let mut files = Vec::new();

        for pattern in include {
            let matches = self.match_pattern(pattern, &excludes);
            if matches.is_empty() {
                if !suppress_warnings {
                    warn!("No files found for the pattern \"{}\"", pattern);
                }
                continue;
            }
            debug!("Pattern \"{}\" matched {} file(s)", pattern, matches.len());
            files.extend(matches);
        }

        dedup(files)
    }

    /// README, LICENSE and CHANGELOG variants directly inside `root`.
    pub fn core_files(&self, root: &Path) -> Vec<String> {
        let root = path_to_string(root);
        let patterns: Vec<String> = CORE_FILE_PATTERNS
            .iter()
            .map(|name| {
                if root.is_empty() {
                    name.to_string()
                } else {
                    format!("{}/{}", root.trim_end_matches('/'), name)
                }
            })
            .collect();
        self.expand_globs(&patterns, &[], true)
    }

    fn match_pattern(&self, pattern: &str, excludes: &[Pattern]) -> Vec<String> {
        let normalized = normalize_path(pattern);
        let compiled = match Pattern::new(&normalized) {
            Ok(compiled) => compiled,
            Err(e) => {
                warn!("Invalid glob pattern \"{}\": {}", pattern, e);
                return Vec::new();
            }
        };

        let (prefix, depth) = split_literal_prefix(&normalized);
        let start = self.base_dir.join(&prefix);
        if !start.exists() {
            trace!("Nothing to walk at {}", start.display());
            return Vec::new();
        }

        let absolute = Path::new(&normalized).is_absolute();
        let mut walker = WalkDir::new(&start).sort_by_file_name();
        if let Some(depth) = depth {
            walker = walker.max_depth(depth);
        }

        let mut matches = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Error processing pattern {}: {}", pattern, e);
                    continue;
                }
            };
            if !entry.path().is_file() {
                continue;
            }

            let candidate = self.display_path(entry.path(), absolute);
            if !compiled.matches_with(&candidate, MATCH_OPTIONS) {
                continue;
            }
            if excludes
                .iter()
                .any(|exclude| exclude.matches_with(&candidate, MATCH_OPTIONS))
            {
                trace!("Excluded {}", candidate);
                continue;
            }
            matches.push(candidate);
        }
        matches
    }

    fn display_path(&self, path: &Path, absolute: bool) -> String {
        if absolute {
            return path_to_string(path);
        }
        match path.strip_prefix(&self.base_dir) {
            Ok(relative) => path_to_string(relative),
            Err(_) => path_to_string(path),
        }
    }
}

/// Expands patterns relative to the current directory.
pub fn expand_globs(
    include: &[String],
    exclude: &[String],
    suppress_warnings: bool,
) -> Vec<String> {
    FileSelector::default().expand_globs(include, exclude, suppress_warnings)
}

/// Core files of `root`, relative to the current directory.
pub fn core_files(root: &Path) -> Vec<String> {
    FileSelector::default().core_files(root)
}

fn compile_patterns(patterns: &[String]) -> Vec<Pattern> {
    patterns
        .iter()
        .filter_map(|p| match Pattern::new(&normalize_path(p)) {
            Ok(pattern) => Some(pattern),
            Err(e) => {
                warn!("Invalid exclude pattern \"{}\": {}", p, e);
                None
            }
        })
        .collect()
}

fn dedup(files: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    files
        .into_iter()
        .filter(|file| seen.insert(file.clone()))
        .collect()
}
