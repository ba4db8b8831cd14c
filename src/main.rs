//! # writ
//!
//! Command-line companion to the `writ` library: inspect how chunked array data
//! on disk will be discovered, ordered and served.
//!
//! ## Usage
//!
//! ```bash
//! # Show which chunk keys two directories share
//! writ tags 'coords/c_{}.npy' 'forces/f_{}.npy'
//!
//! # List the field sets present in a container
//! writ kinds trajectories.npz
//!
//! # Walk a source described in a config file
//! writ scan --config writ.toml --limit 10
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
