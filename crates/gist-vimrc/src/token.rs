//! Token discovery and persistence.
//!
//! The token is looked up from, in priority order: the command line,
//! `$XDG_DATA_HOME/gist`, `~/.config/gist`, then `~/.gist`. The config file
//! is a two-line INI with a single `[gist]` section and a `token` key.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ini::Ini;

use crate::error::SyncError;

/// Resolve the API token from the CLI argument or the config file chain.
///
/// An explicit non-empty token wins without touching the filesystem.
pub fn resolve(explicit: Option<&str>) -> Result<String> {
    if let Some(token) = explicit {
        if !token.is_empty() {
            return Ok(token.to_string());
        }
    }

    discover().map_err(|e| SyncError::TokenDiscovery(format!("{e:#}")).into())
}

fn discover() -> Result<String> {
    let home = dirs::home_dir().context("could not determine home directory")?;
    let path = candidate_path(&home, env::var("XDG_DATA_HOME").ok().as_deref());
    load_token(&path)
}

/// Pick the most specific config file that actually exists.
///
/// Layering order: `~/.gist` as the base, overridden by `~/.config/gist`,
/// overridden by `$XDG_DATA_HOME/gist`. An override only applies when its
/// target is a regular file.
fn candidate_path(home: &Path, xdg_data_home: Option<&str>) -> PathBuf {
    let mut candidate = home.join(".gist");

    let dot_config = home.join(".config").join("gist");
    if dot_config.is_file() {
        candidate = dot_config;
    }

    if let Some(xdg) = xdg_data_home {
        let xdg = xdg.trim();
        if !xdg.is_empty() {
            let path = Path::new(xdg).join("gist");
            if path.is_file() {
                candidate = path;
            }
        }
    }

    candidate
}

fn load_token(path: &Path) -> Result<String> {
    let config = Ini::load_from_file(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    config
        .section(Some("gist"))
        .and_then(|section| section.get("token"))
        .map(str::to_owned)
        .with_context(|| format!("no [gist] token entry in {}", path.display()))
}

/// Overwrite `~/.gist` with the given token for future runs.
pub fn persist(token: &str) -> Result<()> {
    let home = dirs::home_dir().context("could not determine home directory")?;
    persist_to(&home.join(".gist"), token)
}

fn persist_to(path: &Path, token: &str) -> Result<()> {
    std::fs::write(path, format!("[gist]\ntoken: {token}"))
        .with_context(|| format!("failed to write {}", path.display()))
}
