//! Configuration types for the tree walker

use std::path::PathBuf;

use crate::gitignore::IgnoreRule;

/// Folder names suppressed at any depth unless `show_hidden` is set.
pub const HIDDEN_NAMES: &[&str] = &[
    ".git",
    ".cache",
    "node_modules",
    ".vscode",
    ".idea",
    "__pycache__",
];

/// Traversal options. Fixed once the walk starts.
#[derive(Debug, Clone)]
pub struct TreeOptions {
    pub root: PathBuf,
    /// `None` is unbounded, `Some(0)` renders the root only.
    pub max_depth: Option<usize>,
    /// Canonicalized paths excluded as filesystem entities.
    pub ignore_paths: Vec<PathBuf>,
    pub show_hidden: bool,
    pub use_gitignore: bool,
    /// Compiled `.gitignore` rules, in file order.
    pub ignore_rules: Vec<IgnoreRule>,
}

impl TreeOptions {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Default::default()
        }
    }

    /// Whether a node at `depth` is past the depth bound.
    pub fn beyond_max_depth(&self, depth: usize) -> bool {
        self.max_depth.is_some_and(|max| depth > max)
    }
}

impl Default for TreeOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            max_depth: None,
            ignore_paths: Vec::new(),
            show_hidden: false,
            use_gitignore: false,
            ignore_rules: Vec::new(),
        }
    }
}
