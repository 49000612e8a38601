//! Tree formatting and display
//!
//! - `config` - Palette and output configuration
//! - `utils` - Branch glyphs, prefixes and icons
//! - `tree` - Streaming formatter over a `termcolor::WriteColor` sink

mod config;
mod tree;
mod utils;

pub use config::{OutputConfig, Palette};
pub use tree::{ACCESS_DENIED, TreeFormatter};
pub use utils::{ancestor_prefix, continuation_cell, icon, tree_prefix};
