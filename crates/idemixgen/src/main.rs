//! idemixgen - Identity Mixer key material generator

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use idemix_core::IdemixCa;
use idemixgen::{Command, ProvisionConfig, SignerOptions};

/// Generates CA keys and MSP signer configs for the Identity Mixer MSP
#[derive(Parser)]
#[command(name = "idemixgen")]
#[command(about = "Utility for generating key material to be used with the Identity Mixer MSP")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory holding the ca/ and msp/ directories
    #[arg(long, global = true, default_value = ".")]
    base_dir: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate CA key material
    CaKeygen,

    /// Generate a default signer for this Idemix MSP
    Signerconfig {
        /// The Organizational Unit of the default signer
        #[arg(short = 'u', long, default_value = "")]
        org_unit: String,

        /// Make the default signer admin
        #[arg(short, long)]
        admin: bool,
    },

    /// Show version information
    Version,
}

impl From<Commands> for Command {
    fn from(command: Commands) -> Self {
        match command {
            Commands::CaKeygen => Command::CaKeygen,
            Commands::Signerconfig { org_unit, admin } => {
                Command::SignerConfig(SignerOptions { org_unit, admin })
            }
            Commands::Version => Command::Version,
        }
    }
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries command output only
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "idemixgen=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = ProvisionConfig::new(cli.base_dir);
    let command = Command::from(cli.command);

    match idemixgen::run(&command, &config, &IdemixCa::new()) {
        Ok(report) => {
            println!("{}", report);
            Ok(())
        }
        Err(e) => {
            error!("{}", e);
            Err(e.into())
        }
    }
}
