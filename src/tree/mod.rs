//! Directory tree walking logic
//!
//! - `lister` enumerates and classifies the children of one directory
//! - `filter` decides which paths are left out
//! - `walker` runs the depth-first traversal and streams nodes to a
//!   [`TreeOutput`]

mod config;
mod filter;
mod lister;
mod walker;

pub use config::{HIDDEN_NAMES, TreeOptions};
pub use filter::{is_excluded, relative_candidate};
pub use lister::{ClassifiedEntry, EntryKind, classify, display_name, list_children};
pub use walker::{Lister, NodeLine, TreeOutput, TreeWalker, WalkSummary};
