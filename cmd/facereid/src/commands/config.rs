use clap::Args;

use super::{get_config, output_result, print_success};
use crate::Cli;

/// Show or initialize the configuration.
///
/// Configuration is stored in ~/.facereid/config.yaml
#[derive(Args)]
pub struct ConfigCommand {
    /// Write the default configuration to the config file
    #[arg(long)]
    init: bool,

    /// Overwrite an existing file with --init
    #[arg(long, requires = "init")]
    force: bool,
}

impl ConfigCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let cfg = get_config(cli)?;

        if self.init {
            if cfg.path().exists() && !self.force {
                anyhow::bail!(
                    "{} already exists, pass --force to overwrite",
                    cfg.path().display()
                );
            }
            cfg.save()?;
            print_success(&format!("wrote {}", cfg.path().display()));
            return Ok(());
        }

        if !cli.json {
            eprintln!("# {}", cfg.path().display());
        }
        output_result(&cfg, cli.json)
    }
}
