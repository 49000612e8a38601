//! TreeWalker - depth-first, depth-bounded traversal that streams nodes to an output

use std::io;
use std::path::Path;

use anyhow::{Context, Result, ensure};

use super::config::TreeOptions;
use super::filter::is_excluded;
use super::lister::{ClassifiedEntry, EntryKind, classify, display_name, list_children};

/// One rendered line: where it sits in the tree and what it shows.
#[derive(Debug, Clone, Copy)]
pub struct NodeLine<'a> {
    pub name: &'a str,
    pub kind: EntryKind,
    pub depth: usize,
    pub is_last: bool,
    /// Is-last flags of the ancestors between the root and this node.
    pub ancestors: &'a [bool],
}

impl NodeLine<'_> {
    pub fn is_root(&self) -> bool {
        self.depth == 0
    }
}

/// Sink for walker output - receives nodes in display order.
pub trait TreeOutput {
    fn output_node(&mut self, node: &NodeLine<'_>) -> io::Result<()>;

    /// A directory below the root could not be enumerated.
    fn output_access_denied(&mut self, ancestors: &[bool], is_last: bool) -> io::Result<()>;
}

/// Counts of what the walk rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkSummary {
    pub directories: usize,
    pub files: usize,
    pub links: usize,
    pub denied: usize,
}

impl WalkSummary {
    fn record(&mut self, kind: EntryKind) {
        match kind {
            EntryKind::Directory => self.directories += 1,
            EntryKind::RegularFile => self.files += 1,
            EntryKind::ReparsePoint => self.links += 1,
        }
    }
}

/// Enumerates one directory. [`list_children`] is the filesystem version.
pub type Lister = fn(&Path) -> io::Result<Vec<ClassifiedEntry>>;

/// Streams the tree under `options.root` to a [`TreeOutput`].
/// Uses O(depth) memory; nothing is kept once a node is written.
pub struct TreeWalker<'a, L = Lister> {
    options: &'a TreeOptions,
    lister: L,
}

impl<'a> TreeWalker<'a> {
    pub fn new(options: &'a TreeOptions) -> Self {
        Self {
            options,
            lister: list_children,
        }
    }
}

impl<'a, L> TreeWalker<'a, L>
where
    L: Fn(&Path) -> io::Result<Vec<ClassifiedEntry>>,
{
    /// Walker that enumerates directories through `lister`.
    pub fn with_lister(options: &'a TreeOptions, lister: L) -> Self {
        Self { options, lister }
    }

    /// Walk the tree. Failing to read the root is fatal and happens before
    /// any output; failures below the root become access-denied markers.
    pub fn walk<O: TreeOutput>(&self, output: &mut O) -> Result<WalkSummary> {
        let root = self.options.root.as_path();
        let kind = classify(root)
            .with_context(|| format!("{}: cannot access path", root.display()))?;
        ensure!(kind.is_dir(), "{}: Not a directory", root.display());

        let children = (self.lister)(root)
            .with_context(|| format!("{}: cannot access directory", root.display()))?;

        let mut summary = WalkSummary::default();
        let name = display_name(root);
        output.output_node(&NodeLine {
            name: &name,
            kind,
            depth: 0,
            is_last: true,
            ancestors: &[],
        })?;

        if !self.options.beyond_max_depth(1) {
            // The root has no branch glyph, so it is not pushed as an ancestor.
            let mut ancestors = Vec::new();
            self.visit_children(root, children, 1, &mut ancestors, output, &mut summary)?;
        }

        log::debug!(
            "walked {}: {} directories, {} files, {} links, {} denied",
            root.display(),
            summary.directories,
            summary.files,
            summary.links,
            summary.denied
        );
        Ok(summary)
    }

    fn visit_children<O: TreeOutput>(
        &self,
        root: &Path,
        children: Vec<ClassifiedEntry>,
        depth: usize,
        ancestors: &mut Vec<bool>,
        output: &mut O,
        summary: &mut WalkSummary,
    ) -> io::Result<()> {
        let visible: Vec<ClassifiedEntry> = children
            .into_iter()
            .filter(|child| !is_excluded(&child.path, root, self.options))
            .collect();

        let total = visible.len();
        for (i, child) in visible.iter().enumerate() {
            self.visit(root, child, depth, i + 1 == total, ancestors, output, summary)?;
        }
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn visit<O: TreeOutput>(
        &self,
        root: &Path,
        entry: &ClassifiedEntry,
        depth: usize,
        is_last: bool,
        ancestors: &mut Vec<bool>,
        output: &mut O,
        summary: &mut WalkSummary,
    ) -> io::Result<()> {
        if self.options.beyond_max_depth(depth) {
            return Ok(());
        }

        output.output_node(&NodeLine {
            name: &entry.name,
            kind: entry.kind,
            depth,
            is_last,
            ancestors: ancestors.as_slice(),
        })?;
        summary.record(entry.kind);

        // Links are never expanded, and there is nothing to list past the bound.
        if entry.kind != EntryKind::Directory || self.options.beyond_max_depth(depth + 1) {
            return Ok(());
        }

        let children = match (self.lister)(&entry.path) {
            Ok(children) => children,
            Err(e) => {
                log::debug!("cannot list {}: {}", entry.path.display(), e);
                summary.denied += 1;
                return output.output_access_denied(ancestors.as_slice(), is_last);
            }
        };

        ancestors.push(is_last);
        let result = self.visit_children(root, children, depth + 1, ancestors, output, summary);
        ancestors.pop();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    /// Records nodes as `depth:name` strings.
    #[derive(Default)]
    struct Recorder {
        lines: Vec<String>,
    }

    impl TreeOutput for Recorder {
        fn output_node(&mut self, node: &NodeLine<'_>) -> io::Result<()> {
            let flags: String = node
                .ancestors
                .iter()
                .map(|&last| if last { 'L' } else { 'M' })
                .collect();
            let own = if node.is_last { 'L' } else { 'M' };
            self.lines
                .push(format!("{}:{}{}:{}", node.depth, flags, own, node.name));
            Ok(())
        }

        fn output_access_denied(&mut self, ancestors: &[bool], is_last: bool) -> io::Result<()> {
            self.lines
                .push(format!("denied:{}:{}", ancestors.len(), is_last));
            Ok(())
        }
    }

    fn fixture(paths: &[&str]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for p in paths {
            let full = dir.path().join(p);
            if p.ends_with('/') {
                fs::create_dir_all(&full).unwrap();
            } else {
                fs::create_dir_all(full.parent().unwrap()).unwrap();
                fs::write(&full, "").unwrap();
            }
        }
        dir
    }

    fn walk(options: &TreeOptions) -> (Vec<String>, WalkSummary) {
        let mut rec = Recorder::default();
        let summary = TreeWalker::new(options).walk(&mut rec).unwrap();
        (rec.lines, summary)
    }

    fn names(lines: &[String]) -> Vec<&str> {
        lines.iter().map(|l| l.rsplit(':').next().unwrap()).collect()
    }

    #[test]
    fn test_depth_first_order_and_flags() {
        let dir = fixture(&["a/x.txt", "a/y.txt", "b/", "z.txt"]);
        let (lines, summary) = walk(&TreeOptions::new(dir.path()));

        assert_eq!(
            &lines[1..],
            &[
                "1:M:a",
                "2:MM:x.txt",
                "2:ML:y.txt",
                "1:M:b",
                "1:L:z.txt",
            ]
        );
        assert_eq!(summary.directories, 2);
        assert_eq!(summary.files, 3);
    }

    #[test]
    fn test_root_is_rendered_first_at_depth_zero() {
        let dir = fixture(&["file.txt"]);
        let (lines, _) = walk(&TreeOptions::new(dir.path()));
        let root_name = display_name(dir.path());
        assert_eq!(lines[0], format!("0:L:{}", root_name));
    }

    #[test]
    fn test_max_depth_zero_renders_root_only() {
        let dir = fixture(&["a/b.txt", "c.txt"]);
        let mut opts = TreeOptions::new(dir.path());
        opts.max_depth = Some(0);

        let (lines, _) = walk(&opts);
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn test_max_depth_one_stops_before_grandchildren() {
        let dir = fixture(&["a/b/c.txt", "a/d.txt", "e.txt"]);
        let mut opts = TreeOptions::new(dir.path());
        opts.max_depth = Some(1);

        let (lines, _) = walk(&opts);
        assert_eq!(names(&lines[1..]), vec!["a", "e.txt"]);
    }

    #[test]
    fn test_excluded_subtree_is_silently_dropped() {
        let dir = fixture(&["node_modules/x.js", "src/a.txt"]);
        let (lines, _) = walk(&TreeOptions::new(dir.path()));

        assert_eq!(names(&lines[1..]), vec!["src", "a.txt"]);
        // `src` becomes the last visible sibling.
        assert_eq!(lines[1], "1:L:src");
    }

    #[test]
    fn test_show_hidden_reveals_default_hidden_folders() {
        let dir = fixture(&["node_modules/x.js", "src/a.txt"]);
        let mut opts = TreeOptions::new(dir.path());
        opts.show_hidden = true;

        let (lines, _) = walk(&opts);
        assert_eq!(names(&lines[1..]), vec!["node_modules", "x.js", "src", "a.txt"]);
    }

    #[test]
    #[cfg(unix)]
    fn test_symlinked_directory_is_not_expanded() {
        let dir = fixture(&["real/inner.txt"]);
        std::os::unix::fs::symlink(dir.path().join("real"), dir.path().join("link")).unwrap();

        let (lines, summary) = walk(&TreeOptions::new(dir.path()));
        assert_eq!(names(&lines[1..]), vec!["real", "inner.txt", "link"]);
        assert_eq!(summary.links, 1);
    }

    /// Lists like the filesystem, except `locked` directories fail.
    fn deny_locked(path: &Path) -> io::Result<Vec<ClassifiedEntry>> {
        if path.file_name().is_some_and(|name| name == "locked") {
            return Err(io::Error::from(io::ErrorKind::PermissionDenied));
        }
        list_children(path)
    }

    #[test]
    fn test_failed_listing_emits_one_marker_and_continues() {
        let dir = fixture(&["a/locked/secret.txt", "a/open/ok.txt", "z.txt"]);
        let opts = TreeOptions::new(dir.path());

        let mut rec = Recorder::default();
        let summary = TreeWalker::with_lister(&opts, deny_locked)
            .walk(&mut rec)
            .unwrap();

        assert_eq!(
            &rec.lines[1..],
            &[
                "1:M:a",
                "2:MM:locked",
                "denied:1:false",
                "2:ML:open",
                "3:MLL:ok.txt",
                "1:L:z.txt",
            ]
        );
        assert_eq!(summary.denied, 1);
        assert_eq!(summary.directories, 3);
        assert_eq!(summary.files, 2);
    }

    #[test]
    fn test_failed_listing_renders_marker_under_its_directory() {
        use crate::output::{Palette, TreeFormatter};
        use termcolor::Buffer;

        let dir = fixture(&["a/locked/secret.txt", "a/open/ok.txt", "z.txt"]);
        let opts = TreeOptions::new(dir.path());

        let mut formatter = TreeFormatter::new(Palette::default(), Buffer::no_color());
        TreeWalker::with_lister(&opts, deny_locked)
            .walk(&mut formatter)
            .unwrap();
        let text = String::from_utf8(formatter.into_inner().into_inner()).unwrap();

        let body: Vec<&str> = text.lines().skip(1).collect();
        assert_eq!(
            body,
            vec![
                "├── 📁 a",
                "│   ├── 📁 locked",
                "│   │   [Access Denied]",
                "│   └── 📁 open",
                "│       └── 📄 ok.txt",
                "└── 📄 z.txt",
            ]
        );
    }

    #[test]
    fn test_failed_root_listing_is_fatal_before_output() {
        let dir = fixture(&["locked/secret.txt"]);
        let opts = TreeOptions::new(dir.path().join("locked"));
        let mut rec = Recorder::default();

        let err = TreeWalker::with_lister(&opts, deny_locked)
            .walk(&mut rec)
            .unwrap_err();
        assert!(err.to_string().contains("cannot access directory"));
        assert!(rec.lines.is_empty());
    }

    #[test]
    #[cfg(unix)]
    fn test_unreadable_directory_emits_marker_and_continues() {
        use std::os::unix::fs::PermissionsExt;

        let dir = fixture(&["locked/secret.txt", "open/ok.txt", "z.txt"]);
        let locked = dir.path().join("locked");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Running as root bypasses permission checks.
        if fs::read_dir(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let (lines, summary) = walk(&TreeOptions::new(dir.path()));
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        assert_eq!(
            &lines[1..],
            &["1:M:locked", "denied:0:false", "1:M:open", "2:ML:ok.txt", "1:L:z.txt"]
        );
        assert_eq!(summary.denied, 1);
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let dir = TempDir::new().unwrap();
        let opts = TreeOptions::new(dir.path().join("missing"));
        let mut rec = Recorder::default();

        assert!(TreeWalker::new(&opts).walk(&mut rec).is_err());
        assert!(rec.lines.is_empty());
    }

    #[test]
    fn test_file_root_is_fatal() {
        let dir = fixture(&["file.txt"]);
        let opts = TreeOptions::new(dir.path().join("file.txt"));
        let mut rec = Recorder::default();

        let err = TreeWalker::new(&opts).walk(&mut rec).unwrap_err();
        assert!(err.to_string().contains("Not a directory"));
        assert!(rec.lines.is_empty());
    }

    #[test]
    fn test_walk_is_repeatable() {
        let dir = fixture(&["a/b/c.txt", "a/d.txt", "e/", "f.txt"]);
        let opts = TreeOptions::new(dir.path());
        assert_eq!(walk(&opts).0, walk(&opts).0);
    }
}
