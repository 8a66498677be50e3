pub mod api;
pub mod cli;
pub mod error;
pub mod sync;
pub mod token;

use std::path::PathBuf;

use anyhow::{Context, Result};
use console::style;

use api::GistClient;
use cli::{Cli, Command};

/// Run the CLI with parsed arguments.
pub fn run(cli: Cli) -> Result<()> {
    let vimrc = match cli.vimrc {
        Some(path) => path,
        None => default_vimrc_path()?,
    };
    // Fail before any network traffic when the local file is gone.
    anyhow::ensure!(vimrc.exists(), "the file {} does not exist", vimrc.display());

    let token = token::resolve(cli.token.as_deref())?;
    let client = GistClient::new(&token)?;

    match cli.command {
        Command::Push => {
            let url = sync::push(&client, &vimrc)?;
            println!("{} {}", style("Pushed").green().bold(), url);
        }
        Command::Pull => {
            sync::pull(&client, &vimrc)?;
            println!("{} {}", style("Pulled").green().bold(), vimrc.display());
        }
    }

    // A token that came from the command line worked, so keep it for next time.
    if let Some(ref token) = cli.token {
        if !token.is_empty() {
            token::persist(token)?;
        }
    }

    Ok(())
}

/// Sync target when `--vimrc` is not given.
fn default_vimrc_path() -> Result<PathBuf> {
    Ok(dirs::home_dir()
        .context("could not determine home directory")?
        .join(".vimrc"))
}
