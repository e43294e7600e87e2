//! tasky: in-memory task manager API and terminal client.

use anyhow::Result;
use clap::Parser;
use tasky::cli::{Cli, Command, serve, tasks};
use tasky::config::{ConfigLoader, ConfigPaths};
use tasky::logging::{self, LogTarget};
use tracing::debug;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(&LogTarget::parse(&cli.log), cli.verbose)?;

    // An explicit --config replaces the project and user files.
    let mut loader = match &cli.config {
        Some(path) => ConfigLoader::load_explicit(ConfigPaths::discover(), path.into())?,
        None => ConfigLoader::load()?,
    };
    if let Some(path) = loader.config_path() {
        debug!(path = %path.display(), "Loaded configuration");
    }

    if let Some(api_url) = &cli.api_url {
        loader.config_mut().client.api_url = api_url.clone();
    }

    let config = loader.into_config();
    let api_url = config.client.api_url.clone();

    match cli.command {
        Some(Command::Serve(args)) => serve::run(&args, config).await?,
        None => serve::run(&Default::default(), config).await?,
        Some(Command::List(args)) => tasks::list(&api_url, &args).await?,
        Some(Command::Show(args)) => tasks::show(&api_url, &args).await?,
        Some(Command::Add(args)) => tasks::add(&api_url, &args).await?,
        Some(Command::Update(args)) => tasks::update(&api_url, &args).await?,
        Some(Command::Status(args)) => tasks::status(&api_url, &args).await?,
        Some(Command::Delete(args)) => tasks::delete(&api_url, &args).await?,
    }

    Ok(())
}
