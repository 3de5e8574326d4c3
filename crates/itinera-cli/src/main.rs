//! Itinera CLI - turn free-text travel itineraries into structured records.

use clap::Parser;
use itinera_cli::commands;
use itinera_cli::{Cli, Command, Config, Formatter};
use std::path::PathBuf;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> itinera_cli::Result<()> {
    let cli = Cli::parse();
    itinera_cli::init_logging(cli.verbose);

    let config_path = match cli.config {
        Some(path) => PathBuf::from(path),
        None => Config::default_path()?,
    };
    let config = Config::load_from(&config_path)?;

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Parse(args) => {
            commands::execute_parse(args, &config, &formatter).await?;
        }
        Command::Config(args) => {
            commands::execute_config(args, &config, &config_path, &formatter)?;
        }
    }

    Ok(())
}
