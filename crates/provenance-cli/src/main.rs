//! Provenance CLI - Turn museum provenance text into structured timelines.

use clap::Parser;
use provenance_cli::commands;
use provenance_cli::{Cli, Command, Config, Formatter};
use provenance_domain::AcquisitionTable;
use provenance_extractor::Extractor;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_env("PROVENANCE_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> provenance_cli::Result<()> {
    let cli = Cli::parse();

    let path = Config::resolve_path(cli.config.as_deref())?;
    let mut config = Config::load_from(&path)?;

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    let extractor = Extractor::new(AcquisitionTable::standard(), config.extractor.clone());
    tracing::debug!("Using configuration from {}", path.display());

    match cli.command {
        Command::Parse(args) => commands::execute_parse(args, &extractor, &formatter)?,
        Command::Check(args) => commands::execute_check(args, &extractor, &formatter)?,
        Command::Rebuild(args) => commands::execute_rebuild(args, &extractor, &formatter)?,
        Command::Config(args) => commands::execute_config(args, &mut config, &path, &formatter)?,
    }

    Ok(())
}
