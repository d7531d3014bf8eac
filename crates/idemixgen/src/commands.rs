//! Provisioning commands
//!
//! Each run executes exactly one command. Every precondition check
//! completes before the first directory is created, and every error is
//! returned to the caller instead of terminating the process.

use std::fmt;
use std::path::PathBuf;
use tracing::info;

use idemix_core::{IssuerKeyGenerator, Role, SignerConfigGenerator};

use crate::config::{ProvisionConfig, SignerOptions};
use crate::error::Result;
use crate::key_material::IssuerKeyStore;
use crate::store::{create_directory, ensure_absent_in_msp, ensure_all_absent, write_artifact};
use crate::version::version_info;

/// A single provisioning operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Generate issuer key material into `ca/` and `msp/`
    CaKeygen,

    /// Generate a signer config into `msp/signer/`
    SignerConfig(SignerOptions),

    /// Print version information
    Version,
}

/// Outcome of a successful command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    IssuerProvisioned {
        issuer_dir: PathBuf,
        msp_dir: PathBuf,
        fingerprint: String,
    },
    SignerProvisioned {
        signer_config: PathBuf,
        org_unit: String,
        role: Role,
    },
    Version(String),
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::IssuerProvisioned {
                issuer_dir,
                msp_dir,
                fingerprint,
            } => {
                writeln!(f, "Issuer key generated (fingerprint {})", fingerprint)?;
                writeln!(f, "  Issuer directory: {}", issuer_dir.display())?;
                write!(f, "  MSP directory:    {}", msp_dir.display())
            }
            Report::SignerProvisioned {
                signer_config,
                org_unit,
                role,
            } => {
                writeln!(f, "Signer config generated")?;
                writeln!(f, "  Organizational unit: {:?}", org_unit)?;
                writeln!(f, "  Role: {}", role)?;
                write!(f, "  Path: {}", signer_config.display())
            }
            Report::Version(info) => write!(f, "{}", info),
        }
    }
}

/// Dispatch one command
pub fn run<G>(command: &Command, config: &ProvisionConfig, generator: &G) -> Result<Report>
where
    G: IssuerKeyGenerator + SignerConfigGenerator,
{
    match command {
        Command::CaKeygen => ca_keygen(config, generator),
        Command::SignerConfig(options) => signer_config(config, options, generator),
        Command::Version => Ok(version()),
    }
}

/// Generate and persist a fresh issuer key.
///
/// Fails without touching the filesystem if either root already exists.
pub fn ca_keygen<G: IssuerKeyGenerator>(config: &ProvisionConfig, generator: &G) -> Result<Report> {
    let layout = config.layout();
    let issuer_dir = layout.issuer_dir();
    let msp_dir = layout.msp_dir();

    info!(base_dir = %layout.base_dir().display(), "generating issuer key material");

    // Prevent overwriting the existing key
    ensure_all_absent(&[&issuer_dir, &msp_dir])?;

    let key = generator.generate_issuer_key()?;

    create_directory(&issuer_dir)?;
    create_directory(&msp_dir)?;
    IssuerKeyStore::new(&layout).persist(&key)?;

    Ok(Report::IssuerProvisioned {
        issuer_dir,
        msp_dir,
        fingerprint: key.public().fingerprint(),
    })
}

/// Derive a signer config from the persisted issuer key.
///
/// The issuer key is loaded first, so a run without prior key material
/// reports the missing key. The signer directory is checked before the
/// generator is invoked.
pub fn signer_config<G: SignerConfigGenerator>(
    config: &ProvisionConfig,
    options: &SignerOptions,
    generator: &G,
) -> Result<Report> {
    let layout = config.layout();
    let signer_dir = layout.signer_dir();

    info!(
        org_unit = %options.org_unit,
        admin = options.admin,
        "generating signer config"
    );

    let key = IssuerKeyStore::new(&layout).reconstruct()?;

    ensure_absent_in_msp(&signer_dir)?;

    let signer_config =
        generator.generate_signer_config(options.admin, &options.org_unit, &key)?;

    create_directory(&signer_dir)?;
    let path = layout.signer_config();
    write_artifact(&path, &signer_config)?;

    info!(path = %path.display(), "signer config written");

    Ok(Report::SignerProvisioned {
        signer_config: path,
        org_unit: options.org_unit.clone(),
        role: Role::from_admin_flag(options.admin),
    })
}

/// Version descriptor; no filesystem access
pub fn version() -> Report {
    Report::Version(version_info())
}
