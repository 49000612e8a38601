//! Command-line arguments and their resolution into walker/output options

use std::ffi::OsString;
use std::fs;
use std::io::IsTerminal;
use std::path::{self, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use termcolor::Color;

use crate::gitignore::load_rules;
use crate::output::{OutputConfig, Palette};
use crate::tree::TreeOptions;

const EXAMPLES: &str = "\
Examples:
  twig                          Tree of the current directory
  twig src --depth=2            Two levels below src
  twig --ignore=target,dist     Skip specific paths
  twig --gitignore --show-hidden
  twig --set-config --gitignore --color=yellow";

/// Directory label color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DirColor {
    Cyan,
    Yellow,
    Blue,
    Magenta,
    Red,
}

impl From<DirColor> for Color {
    fn from(color: DirColor) -> Self {
        match color {
            DirColor::Cyan => Color::Cyan,
            DirColor::Yellow => Color::Yellow,
            DirColor::Blue => Color::Blue,
            DirColor::Magenta => Color::Magenta,
            DirColor::Red => Color::Red,
        }
    }
}

#[derive(Parser, Debug, Clone, Default, PartialEq)]
#[command(name = "twig", version)]
#[command(about = "Directory tree with icons, colors, depth limits and .gitignore filtering")]
#[command(after_help = EXAMPLES)]
pub struct Args {
    /// Root directory to list (default: current directory)
    pub path: Option<PathBuf>,

    /// Limit recursion depth to N (default: unlimited)
    #[arg(long = "depth", visible_alias = "max-deep-recursive", value_name = "N")]
    pub depth: Option<usize>,

    /// Ignore listed folders/files (comma-separated, repeatable)
    #[arg(
        long = "ignore",
        value_name = "PATHS",
        value_delimiter = ',',
        action = ArgAction::Append
    )]
    pub ignore: Vec<PathBuf>,

    /// Skip files/folders matching the root's .gitignore
    #[arg(long = "gitignore")]
    pub gitignore: bool,

    /// Show .git, node_modules and other hidden system folders
    #[arg(long = "show-hidden")]
    pub show_hidden: bool,

    /// Set directory color
    #[arg(long = "color", value_name = "COLOR")]
    pub color: Option<DirColor>,

    /// Disable colored output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Save the other given options as defaults for future runs
    #[arg(long = "set-config")]
    pub set_config: bool,
}

/// Everything a run needs: what to walk and how to print it.
#[derive(Debug, Clone)]
pub struct Options {
    pub tree: TreeOptions,
    pub output: OutputConfig,
}

impl Args {
    /// Parse saved default arguments (no program name).
    pub fn from_defaults<I, T>(saved: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let argv = std::iter::once(OsString::from("twig")).chain(saved.into_iter().map(Into::into));
        Self::try_parse_from(argv)
    }

    /// Layer `later` over `self`: later values win, ignore lists accumulate
    /// and switches stay on once set.
    pub fn merged(self, later: Args) -> Args {
        let mut ignore = self.ignore;
        ignore.extend(later.ignore);
        Args {
            path: later.path.or(self.path),
            depth: later.depth.or(self.depth),
            ignore,
            gitignore: self.gitignore || later.gitignore,
            show_hidden: self.show_hidden || later.show_hidden,
            color: later.color.or(self.color),
            no_color: self.no_color || later.no_color,
            set_config: later.set_config,
        }
    }

    /// Resolve paths, compile `.gitignore` rules and pick colors.
    pub fn into_options(self) -> Result<Options> {
        let raw_root = self.path.unwrap_or_else(|| PathBuf::from("."));
        let root = fs::canonicalize(&raw_root)
            .or_else(|_| path::absolute(&raw_root))
            .with_context(|| format!("{}: failed to resolve path", raw_root.display()))?;

        let ignore_paths = resolve_ignore_paths(&self.ignore);
        let ignore_rules = if self.gitignore {
            load_rules(&root)
        } else {
            Vec::new()
        };

        let mut palette = Palette::default();
        if let Some(color) = self.color {
            palette = palette.with_directory(color.into());
        }

        Ok(Options {
            tree: TreeOptions {
                root,
                max_depth: self.depth,
                ignore_paths,
                show_hidden: self.show_hidden,
                use_gitignore: self.gitignore,
                ignore_rules,
            },
            output: OutputConfig {
                use_color: should_use_color(self.no_color),
                palette,
            },
        })
    }
}

/// Canonicalize ignore paths; ones that do not exist are reported and dropped.
fn resolve_ignore_paths(paths: &[PathBuf]) -> Vec<PathBuf> {
    paths
        .iter()
        .filter(|p| !p.as_os_str().is_empty())
        .filter_map(|p| match fs::canonicalize(p) {
            Ok(canonical) => Some(canonical),
            Err(_) if !p.exists() => {
                log::warn!("ignore path does not exist: {}", p.display());
                None
            }
            Err(e) => {
                log::warn!("invalid ignore path {}: {}", p.display(), e);
                None
            }
        })
        .collect()
}

/// Determine whether to use color output based on the flag and environment.
pub fn should_use_color(no_color: bool) -> bool {
    if no_color {
        return false;
    }
    // Respect NO_COLOR environment variable (https://no-color.org/)
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }
    if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
        return false;
    }
    std::io::stdout().is_terminal()
}
