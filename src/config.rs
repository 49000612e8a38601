//! Persisted default arguments
//!
//! `--set-config` stores the given arguments in `<config_dir>/twig/config.toml`.
//! Later runs parse them before the command line, so explicit arguments win.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const APP_DIR: &str = "twig";
const CONFIG_FILE: &str = "config.toml";

#[derive(Serialize, Deserialize, Debug, Default, PartialEq)]
struct DefaultsFile {
    #[serde(default)]
    args: Vec<String>,
}

/// Location of the defaults file.
pub fn config_path() -> Result<PathBuf> {
    let base = dirs::config_dir().context("Could not determine config directory")?;
    Ok(base.join(APP_DIR).join(CONFIG_FILE))
}

/// Saved default arguments, or none if nothing was saved yet.
pub fn load_defaults() -> Result<Vec<String>> {
    let path = config_path()?;
    if !path.exists() {
        return Ok(Vec::new());
    }
    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config at {}", path.display()))?;
    parse_defaults(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Store `args` as the defaults for future runs; returns the file written.
pub fn save_defaults(args: &[String]) -> Result<PathBuf> {
    let path = config_path()?;
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
    }
    fs::write(&path, render_defaults(args)?)
        .with_context(|| format!("Failed to save config to {}", path.display()))?;
    Ok(path)
}

fn parse_defaults(content: &str) -> Result<Vec<String>> {
    let parsed: DefaultsFile = toml::from_str(content)?;
    Ok(parsed.args)
}

fn render_defaults(args: &[String]) -> Result<String> {
    let file = DefaultsFile {
        args: args.to_vec(),
    };
    Ok(toml::to_string(&file)?)
}
