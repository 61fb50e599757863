use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "wetbulb")]
#[command(about = "Wet-bulb heat-stress tracker for coastal cities")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Configuration file path")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch the tracked cities once, print the summary and write the plot
    Plot {
        #[arg(
            long = "city",
            help = "City to track, repeatable [default: configured coastal cities]"
        )]
        cities: Vec<String>,

        #[arg(long, help = "City to add after loading")]
        add: Option<String>,

        #[arg(long, help = "City to remove after loading")]
        remove: Option<String>,

        #[arg(short, long, help = "SVG output path [default: from config]")]
        output: Option<PathBuf>,
    },

    /// Load the configured cities, then add, remove and refresh from stdin
    Interactive {
        #[arg(short, long, help = "SVG output path [default: from config]")]
        output: Option<PathBuf>,
    },

    /// Compute the wet-bulb temperature for given conditions without fetching
    Estimate {
        #[arg(allow_negative_numbers = true, help = "Air temperature in °C")]
        temperature: f64,

        #[arg(help = "Relative humidity in percent (0-100)")]
        humidity: f64,
    },
}
