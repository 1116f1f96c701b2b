//! CLI commands implementation.
//!
//! This module contains the CLI parser and dispatches to command-specific modules.

mod init;
mod propagate;
mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{load_settings_with_options, LoadOptions};

#[derive(Parser)]
#[command(name = "annotag")]
#[command(about = "Local annotation backend for tags, aliases and output logs")]
#[command(version)]
pub struct Cli {
    /// Directory the UI is served from (defaults to the current directory)
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Directory holding output.json, tags.json and aliases.json
    #[arg(long, global = true)]
    assets: Option<PathBuf>,

    /// Config file path (overrides auto-discovery)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Resolve relative paths from current working directory instead of config file location
    #[arg(long, global = true)]
    cwd: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web server for the annotation UI
    Serve {
        /// Address to bind to: PORT, HOST, or HOST:PORT (default: 127.0.0.1:8000)
        bind: Option<String>,
    },

    /// Create the assets directory and empty store files
    Init,

    /// Re-apply saved aliases to the output log
    Propagate,
}

/// Parse arguments, load settings and run the selected command.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let options = LoadOptions {
        config_path: cli.config,
        use_cwd: cli.cwd,
        root_dir: cli.root,
        assets_dir: cli.assets,
    };
    let (settings, _config) = load_settings_with_options(options).await;

    match cli.command {
        Commands::Serve { bind } => serve::cmd_serve(&settings, bind.as_deref()).await,
        Commands::Init => init::cmd_init(&settings).await,
        Commands::Propagate => propagate::cmd_propagate(&settings).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["annotag", "serve", "9000", "--assets", "data", "-v"])
            .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.assets, Some(PathBuf::from("data")));
        assert!(matches!(cli.command, Commands::Serve { bind: Some(ref b) } if b == "9000"));
    }
}
