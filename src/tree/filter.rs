//! Exclusion decisions for tree walking

use std::fs;
use std::path::{Component, Path, PathBuf};

use super::config::{HIDDEN_NAMES, TreeOptions};

/// Decide whether `path` (and everything beneath it) is left out of the tree.
///
/// Checks run in order and the first hit wins: explicit ignore paths, the
/// hidden-folder defaults, then `.gitignore` rules.
pub fn is_excluded(path: &Path, root: &Path, options: &TreeOptions) -> bool {
    is_explicitly_ignored(path, &options.ignore_paths)
        || (!options.show_hidden && is_hidden_name(path))
        || (options.use_gitignore && matches_ignore_rules(path, root, options))
}

/// Compare filesystem entities, not strings: symlinks and `..` are resolved.
fn is_explicitly_ignored(path: &Path, ignore_paths: &[PathBuf]) -> bool {
    if ignore_paths.is_empty() {
        return false;
    }
    match fs::canonicalize(path) {
        Ok(canonical) => ignore_paths.iter().any(|p| *p == canonical),
        Err(_) => false,
    }
}

fn is_hidden_name(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| HIDDEN_NAMES.contains(&name))
}

fn matches_ignore_rules(path: &Path, root: &Path, options: &TreeOptions) -> bool {
    if options.ignore_rules.is_empty() {
        return false;
    }
    let Some(candidate) = relative_candidate(path, root) else {
        return false;
    };
    let is_dir = fs::symlink_metadata(path)
        .map(|meta| meta.is_dir())
        .unwrap_or(false);
    options
        .ignore_rules
        .iter()
        .any(|rule| rule.matches(&candidate, is_dir))
}

/// Root-relative path joined with `/`, or `None` for the root itself.
pub fn relative_candidate(path: &Path, root: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let candidate = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/");

    (!candidate.is_empty()).then_some(candidate)
}
