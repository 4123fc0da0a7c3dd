//! Command-line arguments for the `pipecheck` binary.

use std::path::PathBuf;

use clap::Parser;

use crate::Result;
use crate::config::{ErrorStatusPolicy, ServerConfig};

/// Pipecheck - pipeline graph validation service
#[derive(Parser, Debug, Default)]
#[command(name = "pipecheck")]
#[command(author, version, about = "Validates pipeline graphs over HTTP", long_about = None)]
pub struct Args {
    /// Configuration file path
    #[arg(short, long, env = "PIPECHECK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Address to listen on (overrides the config file)
    #[arg(short, long, env = "PIPECHECK_BIND")]
    pub bind: Option<String>,

    /// Allowed CORS origin; repeat or comma-separate for several, `*` for any
    #[arg(long = "allowed-origin", env = "PIPECHECK_ALLOWED_ORIGINS", value_delimiter = ',')]
    pub allowed_origins: Vec<String>,

    /// Transport status for malformed request bodies
    #[arg(long, env = "PIPECHECK_ERROR_STATUS", value_enum)]
    pub error_status: Option<ErrorStatusPolicy>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Loads the config file (if any) and applies command-line overrides.
    pub fn resolve_config(&self) -> Result<ServerConfig> {
        let mut config = ServerConfig::load(self.config.as_deref())?;

        if let Some(bind) = &self.bind {
            config.bind = bind.clone();
        }
        if !self.allowed_origins.is_empty() {
            config.cors.allowed_origins = self.allowed_origins.clone();
        }
        if let Some(policy) = self.error_status {
            config.error_status = policy;
        }
        if self.verbose {
            config.log_filter = "debug".to_string();
        }

        config.validate()?;
        Ok(config)
    }
}
