//! CLI entry point for twig

use std::ffi::OsString;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use clap::error::ErrorKind;
use twig::{Args, TreeFormatter, TreeWalker, config};

const SET_CONFIG_FLAG: &str = "--set-config";

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .format_target(false)
        .init();

    if let Err(e) = run() {
        eprintln!("twig: {e:#}");
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let argv: Vec<OsString> = std::env::args_os().collect();
    let cli = parse_or_exit(Args::try_parse_from(&argv));

    if cli.set_config {
        return save_config(&argv);
    }

    let saved = config::load_defaults()?;
    let defaults = match Args::from_defaults(&saved) {
        Ok(args) => args,
        Err(e) => anyhow::bail!("invalid saved defaults: {}", e.to_string().trim_end()),
    };
    let options = defaults.merged(cli).into_options()?;
    log::debug!(
        "root={} depth={:?} ignore={} gitignore={} rules={} show_hidden={}",
        options.tree.root.display(),
        options.tree.max_depth,
        options.tree.ignore_paths.len(),
        options.tree.use_gitignore,
        options.tree.ignore_rules.len(),
        options.tree.show_hidden
    );

    let mut formatter = TreeFormatter::stdout(options.output);
    TreeWalker::new(&options.tree).walk(&mut formatter)?;
    formatter.flush().context("error writing output")?;
    Ok(())
}

/// Help and version exit 0; any other parse error exits 1.
fn parse_or_exit(parsed: Result<Args, clap::Error>) -> Args {
    match parsed {
        Ok(args) => args,
        Err(e) => {
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            let _ = e.print();
            process::exit(code);
        }
    }
}

/// Save every argument except the program name and the flag itself.
fn save_config(argv: &[OsString]) -> Result<()> {
    let args: Vec<String> = argv
        .iter()
        .skip(1)
        .map(|a| a.to_string_lossy().into_owned())
        .filter(|a| a != SET_CONFIG_FLAG)
        .collect();

    let path = config::save_defaults(&args)?;
    println!("Configuration saved to: {}", path.display());
    println!("Saved options:");
    for arg in &args {
        println!("  {}", arg);
    }
    Ok(())
}
