use anyhow::Result;
use clap::Parser;

mod cli;
mod config;
mod excel;
mod import;
mod repository;
mod services;

use cli::{Cli, Commands};
use config::Config;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.global.verbose);

    let config = Config::resolve(&cli.global)?;
    log::debug!("Resolved configuration: {:?}", config);

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => cli::commands::handle_run(&config).await,
        Commands::Init => cli::commands::handle_init(&config).await,
        Commands::Import => cli::commands::handle_import(&config).await,
        Commands::Pareto => cli::commands::handle_pareto(&config).await,
        Commands::Top => cli::commands::handle_top(&config).await,
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}
