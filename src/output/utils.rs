//! Shared prefix and label helpers for tree output

use crate::tree::EntryKind;

pub const BRANCH: &str = "├── ";
pub const LAST_BRANCH: &str = "└── ";
pub const PIPE: &str = "│   ";
pub const BLANK: &str = "    ";

pub const DIR_ICON: &str = "📁";
pub const FILE_ICON: &str = "📄";
pub const LINK_ICON: &str = "🔗";

/// One four-column cell continuing an ancestor's branch.
pub fn continuation_cell(is_last: bool) -> &'static str {
    if is_last { BLANK } else { PIPE }
}

/// Continuation cells for every ancestor, oldest first.
pub fn ancestor_prefix(ancestors: &[bool]) -> String {
    ancestors.iter().map(|&last| continuation_cell(last)).collect()
}

/// The full left margin of a node line. The root gets no branch glyph.
pub fn tree_prefix(ancestors: &[bool], is_last: bool, is_root: bool) -> String {
    let mut prefix = ancestor_prefix(ancestors);
    if !is_root {
        prefix.push_str(if is_last { LAST_BRANCH } else { BRANCH });
    }
    prefix
}

pub fn icon(kind: EntryKind) -> &'static str {
    match kind {
        EntryKind::Directory => DIR_ICON,
        EntryKind::RegularFile => FILE_ICON,
        EntryKind::ReparsePoint => LINK_ICON,
    }
}
