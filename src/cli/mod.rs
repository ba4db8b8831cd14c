use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

mod config;
mod kinds;
mod scan;
mod tags;

/// writ - Discover, order and read chunked array data
#[derive(Parser)]
#[command(name = "writ")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Element type to decode arrays as.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum DtypeArg {
    /// 32-bit floats
    F32,
    /// 64-bit floats
    #[default]
    F64,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the chunk keys that one or more naming patterns resolve to
    Tags {
        /// Naming patterns, each with one {} placeholder
        #[arg(value_name = "PATTERN", required = true)]
        patterns: Vec<String>,

        /// Directory prepended to every pattern
        #[arg(long, value_name = "DIR")]
        parent: Option<PathBuf>,

        /// Fail unless every pattern provides the same keys
        #[arg(long)]
        exact: bool,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// List the distinct field sets held by the groups of a container
    Kinds {
        /// Container file (.npz, or HDF5 with the hdf5 feature)
        #[arg(value_name = "CONTAINER")]
        container: PathBuf,

        /// Print JSON instead of a list
        #[arg(long)]
        json: bool,
    },

    /// Read every item of a configured source and report its shape
    Scan {
        /// TOML file with a [source] table
        #[arg(long, value_name = "FILE", default_value = "writ.toml")]
        config: PathBuf,

        /// Element type of the arrays
        #[arg(long, default_value = "f64", value_enum)]
        dtype: DtypeArg,

        /// Stop after this many items (overrides [scan] limit)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Tags {
            patterns,
            parent,
            exact,
            json,
        } => tags::run(patterns, parent, exact, json),
        Commands::Kinds { container, json } => kinds::run(container, json),
        Commands::Scan {
            config,
            dtype,
            limit,
        } => scan::run(config, dtype, limit),
    }
}
