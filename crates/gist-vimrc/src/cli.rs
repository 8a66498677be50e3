//! CLI argument parsing with clap. Defines the `Cli` struct and `Command` enum.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "gist-vimrc",
    version,
    about = "Sync your vimrc with a GitHub gist",
    after_help = "Examples:\n  gist-vimrc push\n  gist-vimrc pull\n  gist-vimrc push --vimrc ~/.vimrc --token <TOKEN>"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to the vimrc file (default: ~/.vimrc)
    #[arg(long, global = true, value_parser = existing_file)]
    pub vimrc: Option<PathBuf>,

    /// GitHub gist API token; written to ~/.gist after a successful run
    #[arg(long, global = true)]
    pub token: Option<String>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Upload the local vimrc, creating or updating the matching gist
    Push,
    /// Overwrite the local vimrc with the matching gist's content
    Pull,
}

/// Value parser for `--vimrc`: the path must exist before anything else runs.
fn existing_file(arg: &str) -> Result<PathBuf, String> {
    let path = expand_tilde(Path::new(arg)).map_err(|e| e.to_string())?;
    if path.exists() {
        Ok(path)
    } else {
        Err(format!("the file {arg} does not exist"))
    }
}

/// Expand `~` prefix to the user's home directory.
pub fn expand_tilde(path: &Path) -> Result<PathBuf> {
    if let Ok(stripped) = path.strip_prefix("~") {
        Ok(dirs::home_dir()
            .context("could not determine home directory")?
            .join(stripped))
    } else {
        Ok(path.to_path_buf())
    }
}
