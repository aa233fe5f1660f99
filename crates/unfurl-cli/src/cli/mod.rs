//! CLI for the unfurl service.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use unfurl_core::config::{self, UnfurlConfig};

use commands::{run_config, run_inspect, run_resolve, run_serve};

/// Top-level CLI for the unfurl favicon/theme service.
#[derive(Debug, Parser)]
#[command(name = "unfurl")]
#[command(about = "unfurl: favicon and theme-colour lookup for link previews", long_about = None)]
pub struct Cli {
    /// Read configuration from this file instead of the XDG config path.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Serve `GET /?target=<url>` over HTTP.
    Serve {
        /// Address to bind (overrides `listen` from config).
        #[arg(long, value_name = "ADDR")]
        listen: Option<SocketAddr>,
    },

    /// Fetch a page and print its icon and theme as JSON.
    Resolve {
        /// Absolute URL of the page.
        target: String,
    },

    /// Resolve icon and theme from a saved HTML file (no network).
    Inspect {
        /// Path to the HTML file.
        path: PathBuf,

        /// URL the page was served from; relative icons resolve against it.
        #[arg(long)]
        target: String,
    },

    /// Show the config path and effective configuration.
    Config,
}

fn load_config(path: Option<&Path>) -> Result<UnfurlConfig> {
    match path {
        Some(path) => config::load_from(path),
        None => config::load_or_init(),
    }
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = load_config(cli.config.as_deref())?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Serve { listen } => run_serve(&cfg, listen).await?,
            CliCommand::Resolve { target } => run_resolve(&cfg, &target).await?,
            CliCommand::Inspect { path, target } => run_inspect(&cfg, &path, &target)?,
            CliCommand::Config => run_config(&cfg, cli.config.as_deref())?,
        }

        Ok(())
    }
}
