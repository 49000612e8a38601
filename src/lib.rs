//! Twig - a colored directory tree with depth limits, explicit excludes and .gitignore patterns

pub mod cli;
pub mod config;
pub mod gitignore;
pub mod output;
pub mod tree;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use cli::{Args, Options};
pub use gitignore::{IgnoreRule, compile_rules, load_rules};
pub use output::{OutputConfig, Palette, TreeFormatter};
pub use tree::{EntryKind, TreeOptions, TreeOutput, TreeWalker, WalkSummary, is_excluded};
