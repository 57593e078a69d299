use anyhow::Context;
use clap::Parser;

use edgewatch::adapter::inbound::cli::command::{Cli, ColorChoice, Commands};
use edgewatch::adapter::inbound::cli::output::{self, OutputConfig};
use edgewatch::adapter::inbound::cli::{address, check, market, prices, run, scan, settings};
use edgewatch::infrastructure::config::settings::Config;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {}
    }
    output::configure(OutputConfig::new(cli.json, cli.quiet, cli.verbose));

    if let Err(err) = dispatch(cli).await {
        output::error(&format!("{err:#}"));
        std::process::exit(1);
    }
}

async fn dispatch(cli: Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Check => check::execute(&cli.config).context("configuration check failed")?,
        Commands::Run(args) => run::execute(&load_config(&cli)?, args).await?,
        Commands::Scan(args) => scan::execute(&load_config(&cli)?, args).await?,
        Commands::Market(args) => market::execute(&load_config(&cli)?, &args.slug).await?,
        Commands::Prices => prices::execute(&load_config(&cli)?).await?,
        Commands::Address(args) => address::execute(&load_config(&cli)?, args)?,
        Commands::Settings(command) => settings::execute(&load_config(&cli)?, command)?,
    }
    Ok(())
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let config = Config::load_or_default(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;

    // `run` installs its own subscriber with the log buffer attached.
    if !matches!(cli.command, Commands::Run(_)) && cli.verbose > 0 {
        config.init_logging(None);
    }
    Ok(config)
}
