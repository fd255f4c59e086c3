//! CLI struct definitions for the AssetOS command line.
//!
//! The program needs no arguments; every flag only overrides configuration.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Default)]
#[clap(
    name = "assetos",
    version = env!("CARGO_PKG_VERSION"),
    about = "AssetOS: menu-driven IT asset inventory over a local SQLite store."
)]
pub struct Cli {
    /// Database file (defaults to `Itam.db` in the working directory).
    #[clap(long)]
    pub db: Option<PathBuf>,
    /// Config file (defaults to `assetos.toml` in the working directory, if present).
    #[clap(long)]
    pub config: Option<PathBuf>,
    /// Keep everything in memory; nothing is written to disk.
    #[clap(long)]
    pub in_memory: bool,
    /// Skip loading the starter users and asset into a fresh store.
    #[clap(long)]
    pub no_seed: bool,
}
