//! Directory enumeration and entry classification

use std::cmp::Ordering;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// What a filesystem entry is, as far as the tree cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    RegularFile,
    /// Symlinks, junctions and other link-like entries. Never expanded.
    ReparsePoint,
}

impl EntryKind {
    fn from_metadata(meta: &fs::Metadata) -> Self {
        if is_reparse_point(meta) {
            EntryKind::ReparsePoint
        } else if meta.is_dir() {
            EntryKind::Directory
        } else {
            EntryKind::RegularFile
        }
    }

    pub fn is_dir(self) -> bool {
        self == EntryKind::Directory
    }
}

#[cfg(windows)]
fn is_reparse_point(meta: &fs::Metadata) -> bool {
    use std::os::windows::fs::MetadataExt;
    const FILE_ATTRIBUTE_REPARSE_POINT: u32 = 0x400;
    meta.file_attributes() & FILE_ATTRIBUTE_REPARSE_POINT != 0
}

#[cfg(not(windows))]
fn is_reparse_point(meta: &fs::Metadata) -> bool {
    meta.file_type().is_symlink()
}

/// A directory child with its classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedEntry {
    pub path: PathBuf,
    pub name: String,
    pub kind: EntryKind,
}

impl ClassifiedEntry {
    pub fn new(path: PathBuf, kind: EntryKind) -> Self {
        let name = display_name(&path);
        Self { path, name, kind }
    }
}

/// Base name of a path, falling back to the whole path (e.g. for `/`).
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}

/// Classify a single path without following links.
pub fn classify(path: &Path) -> io::Result<EntryKind> {
    fs::symlink_metadata(path).map(|meta| EntryKind::from_metadata(&meta))
}

/// List the immediate children of `path`, directories first, then by path.
///
/// Only failing to open the directory is an error. A child that vanishes or
/// cannot be inspected mid-listing is skipped.
pub fn list_children(path: &Path) -> io::Result<Vec<ClassifiedEntry>> {
    let entries = fs::read_dir(path)?.map(classify_entry);
    Ok(collect_sorted(path, entries))
}

fn classify_entry(entry: io::Result<fs::DirEntry>) -> io::Result<ClassifiedEntry> {
    let entry = entry?;
    let kind = EntryKind::from_metadata(&entry.metadata()?);
    Ok(ClassifiedEntry::new(entry.path(), kind))
}

fn collect_sorted<I>(dir: &Path, entries: I) -> Vec<ClassifiedEntry>
where
    I: IntoIterator<Item = io::Result<ClassifiedEntry>>,
{
    let mut kept: Vec<ClassifiedEntry> = entries
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::debug!("skipping entry in {}: {}", dir.display(), e);
                None
            }
        })
        .collect();
    kept.sort_by(sort_cmp);
    kept
}

/// Directories before everything else, then ordinal comparison of the path.
fn sort_cmp(a: &ClassifiedEntry, b: &ClassifiedEntry) -> Ordering {
    b.kind
        .is_dir()
        .cmp(&a.kind.is_dir())
        .then_with(|| a.path.as_os_str().cmp(b.path.as_os_str()))
}
