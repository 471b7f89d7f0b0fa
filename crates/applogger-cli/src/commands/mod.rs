//! CLI command implementations

pub mod check;
pub mod demo;

use std::path::PathBuf;

use applogger_core::Configuration;
use clap::Args;

/// Options shared by every command
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// TOML file with log_level, logging_enabled and destination_key
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Force logging off regardless of the file
    #[arg(long)]
    pub disabled: bool,
}

impl ConfigArgs {
    /// The configuration to hand the factory, `None` meaning defaults
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read or does not parse.
    pub fn load(&self) -> Result<Option<Configuration>, Box<dyn std::error::Error>> {
        let config = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)?;
                Some(Configuration::from_toml_str(&text)?)
            }
            None => None,
        };

        if self.disabled {
            return Ok(Some(config.unwrap_or_default().with_logging_enabled(false)));
        }
        Ok(config)
    }
}
