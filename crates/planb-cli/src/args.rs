use crate::types::{LogLevel, OutputFormat};
use clap::{Parser, Subcommand};
use planb_types::{BillingPeriod, NavKey};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "planb")]
#[command(about = "Preview pricing-plan catalogs the way the plan widget shows them", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Plan data endpoint: http(s) URL or local JSON file
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Plan to activate when the payload names none
    #[arg(long, global = true)]
    pub default_plan: Option<String>,

    /// Config file (defaults to <config dir>/planb/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, default_value = "plain", global = true)]
    pub format: OutputFormat,

    #[arg(long, default_value = "warn", global = true)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render plan cards with the active plan highlighted
    Show {
        #[arg(long, default_value = "monthly")]
        billing: BillingPeriod,

        /// Viewport width in pixels; decides carousel or grid
        #[arg(long)]
        width: Option<f64>,

        /// Click the first plan with this name after loading
        #[arg(long)]
        select: Option<String>,

        /// Keys to press after loading (ArrowLeft, ArrowRight, Home, End)
        #[arg(long = "key")]
        keys: Vec<NavKey>,

        /// Print emitted widget events as JSON lines
        #[arg(long)]
        events: bool,
    },

    /// Render the feature comparison table
    Compare,

    /// Print the resolved catalog as JSON
    Dump,

    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration
    Show,

    /// Print the config file location
    Path,
}
