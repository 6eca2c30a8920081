//! VLSM CLI
//!
//! Command-line front end for the VLSM allocator.
//!
//! Usage:
//!   vlsm allocate -a <address> -m <mask> -H "<hosts...>"
//!   vlsm inspect -a <address> -m <mask>
//!   vlsm completions <shell>

mod cli;
mod config;
mod output;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vlsm::{AddressFormat, InputField, Network, SubnetView, VlsmRequest};

use cli::{Cli, Commands};
use config::AppConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    let config = if let Some(ref path) = cli.config {
        AppConfig::load_from(path)?
    } else {
        AppConfig::load()?
    };
    debug!(?config, "Loaded configuration");

    match cli.command {
        Commands::Allocate {
            network,
            hosts,
            format,
            binary,
            show_free,
        } => {
            let request = VlsmRequest::parse(&network.address, &network.mask, &hosts)
                .with_context(|| input_hint(&network.address, &network.mask))?;
            info!(
                network = %request.network,
                requests = request.host_counts.len(),
                "Allocating subnets"
            );

            let report = request.allocate().context("Allocation failed")?;

            let rendered = output::render_report(
                &report,
                format.unwrap_or(config.output.format),
                address_format(binary, &config),
                show_free || config.output.show_free,
            )?;
            println!("{}", rendered);
            Ok(())
        }
        Commands::Inspect {
            network,
            format,
            binary,
        } => {
            let address = vlsm::parse_address(&network.address, InputField::NetworkAddress)?;
            let mask = vlsm::parse_address(&network.mask, InputField::SubnetMask)?;
            let view = SubnetView::new(0, &Network::new(address, mask));

            let rendered = output::render_network(
                &view,
                format.unwrap_or(config.output.format),
                address_format(binary, &config),
            )?;
            println!("{}", rendered);
            Ok(())
        }
        Commands::Completions { shell } => {
            generate_completions(shell);
            Ok(())
        }
    }
}

/// `--binary` wins over the configured address format
fn address_format(binary: bool, config: &AppConfig) -> AddressFormat {
    if binary {
        AddressFormat::Binary
    } else {
        config.output.address_format
    }
}

/// Context line naming the inputs that were rejected
fn input_hint(address: &str, mask: &str) -> String {
    format!("Invalid input for network {} / {}", address.trim(), mask.trim())
}

fn generate_completions(shell: clap_complete::Shell) {
    use clap::CommandFactory;
    clap_complete::generate(shell, &mut Cli::command(), "vlsm", &mut std::io::stdout());
}
