use clap::Parser;
use std::path::PathBuf;

use hooksmith::cli::commands::{hook, index, init};
use hooksmith::cli::{Cli, Commands};
use hooksmith::{Settings, logging};

/// Load settings for `root`, falling back to defaults on a bad config file.
/// The error is returned so it can be logged once logging is up.
fn load_settings(cli: &Cli, root: &std::path::Path) -> (Settings, Option<String>) {
    let loaded = match &cli.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(root),
    };
    match loaded {
        Ok(settings) => (settings, None),
        Err(e) => (Settings::default(), Some(e.to_string())),
    }
}

fn main() {
    let cli = Cli::parse();

    let root: PathBuf = match &cli.command {
        Commands::Index {
            root: Some(root), ..
        } => root.clone(),
        _ => Settings::project_root(),
    };

    let (settings, config_error) = load_settings(&cli, &root);
    logging::init_with_config(&settings.logging);
    if let Some(e) = config_error {
        tracing::warn!("[config] using defaults: {e}");
    }

    let result = match cli.command {
        Commands::Hook { handler } => std::process::exit(hook::run(handler, &root, &settings)),
        Commands::Index { dry_run, .. } => index::run(&root, &settings, dry_run),
        Commands::Init { force } => init::run_init(&root, force),
        Commands::Config => init::run_config(&settings),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
