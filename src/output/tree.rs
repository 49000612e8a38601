//! Tree formatter for console output
//!
//! `TreeFormatter` writes each node as it arrives from the walker. Colors go
//! through the `WriteColor` sink it owns, so there is no global console
//! state: a `StandardStream` renders to the terminal, and a
//! `termcolor::Buffer` or `NoColor<Vec<u8>>` captures output in memory.

use std::io::{self, Write};

use termcolor::{ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::tree::{EntryKind, NodeLine, TreeOutput};

use super::config::{OutputConfig, Palette};
use super::utils::{ancestor_prefix, continuation_cell, icon, tree_prefix};

pub const ACCESS_DENIED: &str = "[Access Denied]";

/// Streaming tree formatter over any color-capable writer.
pub struct TreeFormatter<W: WriteColor> {
    palette: Palette,
    out: W,
}

impl TreeFormatter<StandardStream> {
    /// Formatter writing to stdout, colored when `config.use_color` allows.
    pub fn stdout(config: OutputConfig) -> Self {
        let choice = if config.use_color {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        Self::new(config.palette, StandardStream::stdout(choice))
    }
}

impl<W: WriteColor> TreeFormatter<W> {
    pub fn new(palette: Palette, out: W) -> Self {
        Self { palette, out }
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

fn label_color(palette: &Palette, kind: EntryKind) -> &ColorSpec {
    match kind {
        EntryKind::Directory => &palette.directory,
        EntryKind::RegularFile => &palette.file,
        EntryKind::ReparsePoint => &palette.link,
    }
}

impl<W: WriteColor> TreeOutput for TreeFormatter<W> {
    fn output_node(&mut self, node: &NodeLine<'_>) -> io::Result<()> {
        let prefix = tree_prefix(node.ancestors, node.is_last, node.is_root());
        write!(self.out, "{}", prefix)?;

        self.out.set_color(label_color(&self.palette, node.kind))?;
        write!(self.out, "{} {}", icon(node.kind), node.name)?;
        self.out.reset()?;
        writeln!(self.out)
    }

    fn output_access_denied(&mut self, ancestors: &[bool], is_last: bool) -> io::Result<()> {
        self.out.set_color(&self.palette.error)?;
        write!(
            self.out,
            "{}{}{}",
            ancestor_prefix(ancestors),
            continuation_cell(is_last),
            ACCESS_DENIED
        )?;
        self.out.reset()?;
        writeln!(self.out)
    }
}
