//! VLSM CLI structure

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// VLSM - Variable length subnet mask calculator
///
/// Splits one IPv4 network into best-fit subnets for a set of host counts.
/// Addresses and masks may be given in dotted-decimal or dotted-binary form.
#[derive(Parser)]
#[command(name = "vlsm")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// One text block per subnet
    #[default]
    Text,
    /// Single-line summary per subnet
    Table,
    /// JSON report
    Json,
}

/// Base network arguments shared by every subcommand
#[derive(Args, Debug, Clone)]
pub struct NetworkArgs {
    /// Network address (e.g. 192.168.1.0)
    #[arg(short, long)]
    pub address: String,

    /// Subnet mask (e.g. 255.255.255.0)
    #[arg(short, long)]
    pub mask: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Allocate one subnet per host count
    Allocate {
        #[command(flatten)]
        network: NetworkArgs,

        /// Whitespace-separated host counts (e.g. "50 20 10")
        #[arg(short = 'H', long)]
        hosts: String,

        /// Output format (overrides config)
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// Render addresses and masks in dotted binary
        #[arg(short, long)]
        binary: bool,

        /// Also list the free blocks left over
        #[arg(long)]
        show_free: bool,
    },

    /// Show size and renderings of a network
    Inspect {
        #[command(flatten)]
        network: NetworkArgs,

        /// Output format (overrides config)
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// Render address and mask in dotted binary
        #[arg(short, long)]
        binary: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
