//! Utility functions for CLI commands.

use facereid_identity::IdentityStore;
use tracing::debug;

use crate::Cli;
use crate::config::{Config, effective_config};

/// Gets the configuration with the global flags applied.
pub fn get_config(cli: &Cli) -> anyhow::Result<Config> {
    let cfg = effective_config(cli)?;
    debug!("config file: {}", cfg.path().display());
    Ok(cfg)
}

/// Opens the persistent store named by the configuration.
pub fn open_store(cfg: &Config) -> anyhow::Result<IdentityStore> {
    let paths = cfg.store_paths()?;
    debug!("opening store {} (dim {})", paths.index.display(), cfg.dim);
    Ok(IdentityStore::load(paths, cfg.dim)?)
}

/// Outputs result as JSON or YAML.
pub fn output_result<T: serde::Serialize>(result: &T, as_json: bool) -> anyhow::Result<()> {
    let output = if as_json {
        serde_json::to_string_pretty(result)? + "\n"
    } else {
        serde_yaml::to_string(result)?
    };
    print!("{}", output);
    Ok(())
}

/// Prints success message.
pub fn print_success(msg: &str) {
    eprintln!("\x1b[32m✓\x1b[0m {}", msg);
}

/// Prints warning message.
pub fn print_warning(msg: &str) {
    eprintln!("\x1b[33m⚠\x1b[0m {}", msg);
}
