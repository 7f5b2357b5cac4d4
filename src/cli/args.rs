//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};

use crate::cli::commands::{
    completions::CompletionsArgs,
    config::ConfigCommands,
    export::ExportArgs,
    geocode::{GeocodeArgs, ReverseGeocodeArgs},
    import::ImportArgs,
    list::ListArgs,
    shell::ShellArgs,
    stats::StatsArgs,
};

#[derive(Parser)]
#[command(name = "dca")]
#[command(author, version, about = "Dry-cleaning admin: catalog tables from the command line")]
#[command(long_about = "Manage the catalog tables of a dry-cleaning CRM (brands, sizes, colors, payment types, expense categories, measurement units, warehouses, points). Tables start from built-in sample data and live only for the session.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug, Default)]
pub struct GlobalOpts {
    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output (debug logs on stderr)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open an interactive session on one catalog table
    Shell(ShellArgs),

    /// Print a catalog table
    List(ListArgs),

    /// Export a catalog table to CSV or Excel
    Export(ExportArgs),

    /// Import names from a CSV file into a catalog table
    Import(ImportArgs),

    /// Look up coordinates for an address
    Geocode(GeocodeArgs),

    /// Look up the address at a pair of coordinates
    ReverseGeocode(ReverseGeocodeArgs),

    /// Show order statistics for a record
    Stats(StatsArgs),

    /// Show configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// JSON array (for programming)
    Json,
    /// CSV format (for spreadsheets)
    Csv,
    /// Just IDs, one per line
    Id,
}
