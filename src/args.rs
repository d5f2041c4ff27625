use bloglist::config::Config;
use bloglist::error::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

const DEFAULT_CONFIG: &str = "config.toml";

#[derive(Debug, Parser)]
pub struct Args {
    /// Page and listing configuration; defaults apply when omitted
    #[clap(short, long)]
    config: Option<PathBuf>,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Replay an event script against the page and print the listing markup
    Run {
        /// Script file, read from stdin when absent
        script: Option<PathBuf>,

        #[clap(short, long)]
        out: Option<PathBuf>,
    },
    /// List the posts available to "load more"
    Catalog,
}

impl Args {
    pub fn config(&self) -> Result<Config> {
        match self.config.as_ref() {
            Some(path) => Config::load(path),
            None => Config::load_or_default(DEFAULT_CONFIG),
        }
    }
}
