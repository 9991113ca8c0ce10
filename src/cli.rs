use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;

use crate::config::Settings;
use commands::{serve, summary};

#[derive(Parser)]
#[command(name = "storedash")]
#[command(about = "Store sales dashboard: web server and command line summary")]
#[command(version)]
pub struct Cli {
    /// Settings file (TOML); defaults to ./storedash.toml when present
    #[arg(short, long, env = "STOREDASH_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// CSV file with the sales records
    ///
    /// Overrides `data_path` from the settings file and STOREDASH_DATA_PATH.
    #[arg(short, long, global = true)]
    pub data_path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Serve {
        /// Bind address for the web server
        ///
        /// Format: IP:PORT (e.g., 0.0.0.0:3000, 127.0.0.1:8080)
        #[arg(short, long)]
        bind_address: Option<String>,
    },
    /// Print the metric cards and product rankings for one selection
    ///
    /// Year and month default to the first ones found in the data file.
    ///
    /// Examples:
    ///   storedash summary --year 2015 --month 3
    ///   storedash summary --year 2015 --month 3 --countries Peru,Chile
    Summary {
        #[arg(short, long)]
        year: Option<i32>,

        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,

        /// Comma separated countries, all when omitted
        #[arg(long, value_delimiter = ',')]
        countries: Vec<String>,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let settings = Settings::load(self.config.as_deref())?.with_data_path(self.data_path);

        match self.command {
            Commands::Serve { bind_address } => {
                serve(settings.with_bind_address(bind_address)).await?;
            }
            Commands::Summary { year, month, countries } => {
                summary(&settings, year, month, countries)?;
            }
        }
        Ok(())
    }
}
