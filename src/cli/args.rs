use crate::writers::OutputFormat;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ibtracs-explorer")]
#[command(about = "Explore IBTrACS tropical-cyclone tracks by basin, season and storm")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,

    #[arg(long, global = true, help = "Settings file [default: ./ibtracs.toml if present]")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Track file path (overrides settings)")]
    pub data: Option<PathBuf>,

    #[arg(long, global = true, help = "Never download; use the local track file as is")]
    pub offline: bool,

    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Basin and season selection shared by most commands
#[derive(Args, Debug, Clone)]
pub struct Selection {
    #[arg(short, long, default_value = "AL", help = "Two-letter ATCF basin code")]
    pub basin: String,

    #[arg(short, long, help = "Season (year)")]
    pub season: i32,
}

#[derive(Args, Debug, Clone)]
pub struct DateArgs {
    #[arg(long, help = "First day, YYYY-MM-DD [default: earliest observation]")]
    pub start: Option<NaiveDate>,

    #[arg(long, help = "Last day, YYYY-MM-DD [default: latest observation]")]
    pub end: Option<NaiveDate>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download the track file if it is missing or out of date
    Fetch,

    /// Summarise the loaded track table
    Info,

    /// Calendar bounds and observed date span for a basin and season
    Window {
        #[command(flatten)]
        selection: Selection,
    },

    /// Disturbances active within a date range
    Disturbances {
        #[command(flatten)]
        selection: Selection,

        #[command(flatten)]
        dates: DateArgs,
    },

    /// Track points of selected disturbances
    Tracks {
        #[command(flatten)]
        selection: Selection,

        #[command(flatten)]
        dates: DateArgs,

        #[arg(
            short = 'i',
            long = "id",
            help = "Disturbance id, repeatable [default: all in range]"
        )]
        ids: Vec<String>,
    },

    /// Track of a named storm
    Storm {
        #[command(flatten)]
        selection: Selection,

        #[arg(short, long)]
        name: String,
    },

    /// Strongest storms by peak wind speed
    Top {
        #[arg(short, long, default_value = "AL", help = "Two-letter ATCF basin code")]
        basin: String,

        #[arg(long, help = "First season [default: earliest in table]")]
        from: Option<i32>,

        #[arg(long, help = "Last season [default: latest in table]")]
        to: Option<i32>,

        #[arg(short, long, help = "Number of storms [default: from settings]")]
        limit: Option<usize>,
    },
}
