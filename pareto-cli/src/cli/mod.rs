//! Command-line interface definition

pub mod commands;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pareto-cli")]
#[command(about = "Import sales spreadsheets and export Pareto / top-contributor reports")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Defaults to `run` when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Ensure the table, import the spreadsheet, then write both reports
    Run,
    /// Create the sales table if it does not exist
    Init,
    /// Ensure the table and import the input spreadsheet
    Import,
    /// Write the Pareto (20 step) report
    Pareto,
    /// Write the products making up the target share of sales
    Top,
}

/// Options shared by every command. Anything left unset falls back to the
/// config file, then to built-in defaults.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// TOML configuration file
    #[arg(long, global = true, env = "PARETO_CONFIG")]
    pub config: Option<PathBuf>,

    /// SQLite database URL, e.g. sqlite://ventes.db
    #[arg(long, global = true, env = "PARETO_DATABASE_URL")]
    pub database_url: Option<String>,

    /// Sales spreadsheet to import
    #[arg(short, long, global = true, env = "PARETO_INPUT")]
    pub input: Option<PathBuf>,

    /// Destination of the Pareto report
    #[arg(long, global = true, env = "PARETO_PARETO_OUTPUT")]
    pub pareto_output: Option<PathBuf>,

    /// Destination of the top products report
    #[arg(long, global = true, env = "PARETO_TOP_OUTPUT")]
    pub top_output: Option<PathBuf>,

    /// Share of total sales the top products must reach (0.8 = 80%)
    #[arg(short, long, global = true, env = "PARETO_TARGET_PERCENT")]
    pub target_percent: Option<f64>,

    /// Do not embed a chart in the Pareto report
    #[arg(long, global = true)]
    pub no_chart: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}
