//! `earbudtracker` - CLI for the earbud lost-and-found tracker
//!
//! This binary starts the interactive menu and offers a few configuration
//! helpers.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io;

use clap::Parser;
use tracing::debug;

use earbudtracker::cli::{Cli, Command, ConfigCommand};
use earbudtracker::{init_logging, Config, RecordStore, Shell};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone())?;
    debug!(?config, "configuration loaded");

    match cli.into_command() {
        Command::Run => handle_run(&config),
        Command::Config(config_cmd) => handle_config(&config, config_cmd),
    }
}

fn handle_run(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = RecordStore::new();
    let stdin = io::stdin();
    let stdout = io::stdout();
    Shell::new(&mut store, &config.shell, stdin.lock(), stdout.lock()).run()?;
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", config.to_json()?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Shell]");
                println!("  Recent limit:       {}", config.shell.recent_limit);
                println!("  Timestamp format:   {}", config.shell.timestamp_format);
                println!("  Show banner:        {}", config.shell.show_banner);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
