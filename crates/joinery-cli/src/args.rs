//! Command-line argument definitions for the Joinery CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the kit and design files, the operation
//! to run and the output path. The configuration file can be named and its
//! composition settings overridden per run.

use clap::{Parser, ValueEnum};

use joinery::config::RootSelection;

/// What to do with the design
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Operation {
    /// Place every piece and keep the connections
    Compose,
    /// Place every piece and drop the connections
    #[default]
    Flatten,
    /// Bring pieces and connections into canonical order
    Order,
    /// Lay the design out on a screen-space diagram
    Diagram,
}

/// Root selection rule, as spelled on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RootRule {
    /// Lowest placed piece id, neighbors in id order
    LowestId,
    /// First placed piece, neighbors in connection order
    InputOrder,
}

impl From<RootRule> for RootSelection {
    fn from(rule: RootRule) -> Self {
        match rule {
            RootRule::LowestId => RootSelection::LowestId,
            RootRule::InputOrder => RootSelection::InputOrder,
        }
    }
}

/// Command-line arguments for the Joinery composition tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input design file (JSON)
    #[arg(help = "Path to the input design file")]
    pub input: String,

    /// Path to the kit file (JSON) holding types and nested designs
    #[arg(short, long)]
    pub kit: String,

    /// Path to the output JSON file
    #[arg(short, long, default_value = "out.json")]
    pub output: String,

    /// Operation to run on the design
    #[arg(long, value_enum, default_value_t = Operation::Flatten)]
    pub operation: Operation,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Override the root selection rule of the configuration
    #[arg(long, value_enum)]
    pub root_selection: Option<RootRule>,

    /// Give unconnected pieces the world XY plane
    #[arg(long)]
    pub place_unconnected: bool,

    /// Skip design validation before composing
    #[arg(long)]
    pub no_validate: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
