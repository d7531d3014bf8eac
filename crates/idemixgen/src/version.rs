//! Version information

/// Program name shown in version output
pub const PROGRAM_NAME: &str = "idemixgen";

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Commit the binary was built from, if the build provided one
pub fn commit_sha() -> &'static str {
    option_env!("IDEMIXGEN_COMMIT_SHA").unwrap_or("development build")
}

/// Multi-line version descriptor
pub fn version_info() -> String {
    format!(
        "{}:\n Version: {}\n Commit SHA: {}\n OS/Arch: {}/{}",
        PROGRAM_NAME,
        VERSION,
        commit_sha(),
        std::env::consts::OS,
        std::env::consts::ARCH
    )
}
