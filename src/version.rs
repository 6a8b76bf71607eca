// Build-time identity from Cargo.toml

/// Package version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Package name (from Cargo.toml).
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// `name vX.Y.Z`, logged once at startup.
pub fn banner() -> String {
    format!("{} v{}", NAME, VERSION)
}
