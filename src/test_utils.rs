//! Test utilities for building temporary directory trees.
//!
//! This module is only compiled for tests and benchmarks.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::output::{Palette, TreeFormatter};
use crate::tree::{TreeOptions, TreeWalker};

/// A temporary directory tree, removed when dropped.
pub struct TestTree {
    dir: TempDir,
}

impl TestTree {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        Self { dir }
    }

    /// Build a tree from relative paths; a trailing `/` makes a directory.
    pub fn with_paths(paths: &[&str]) -> Self {
        let tree = Self::new();
        for p in paths {
            if let Some(dir) = p.strip_suffix('/') {
                tree.add_dir(dir);
            } else {
                tree.add_file(p, "");
            }
        }
        tree
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Add a file, creating parent directories as needed.
    pub fn add_file(&self, path: &str, content: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&full_path, content).expect("Failed to write file");
        full_path
    }

    pub fn add_dir(&self, path: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        fs::create_dir_all(&full_path).expect("Failed to create dir");
        full_path
    }

    /// Options rooted at this tree with everything else at its default.
    pub fn options(&self) -> TreeOptions {
        TreeOptions::new(self.path())
    }
}

impl Default for TestTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Render a tree to an uncolored string.
pub fn render_plain(options: &TreeOptions) -> String {
    let mut formatter = TreeFormatter::new(Palette::default(), termcolor::Buffer::no_color());
    TreeWalker::new(options)
        .walk(&mut formatter)
        .expect("walk failed");
    String::from_utf8(formatter.into_inner().into_inner()).expect("output is not UTF-8")
}
