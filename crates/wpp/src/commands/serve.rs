//! `wpp serve` command implementation.

use std::path::PathBuf;

use clap::Args;
use wpp_config::{CliSettings, Config};
use wpp_server::{run_server, server_config_from_config};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Path to configuration file (default: auto-discover wpp.toml, then environment).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long)]
    port: Option<u16>,

    /// Directory served under /static (overrides config).
    #[arg(long)]
    static_dir: Option<PathBuf>,

    /// Enable verbose output (request and CMS fetch logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            host: self.host,
            port: self.port,
            static_dir: self.static_dir,
        };

        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        output.highlight(&format!(
            "Starting server on {}:{}",
            config.server.host, config.server.port
        ));
        output.info(&format!("CMS: {}", config.cms.base_url));
        output.info(&format!(
            "Static directory: {}",
            config.server.static_dir.display()
        ));
        match &config.server.template_dir {
            Some(dir) => output.info(&format!("Template directory: {}", dir.display())),
            None => output.info("Template: built-in layout"),
        }

        run_server(server_config_from_config(&config)).await?;

        Ok(())
    }
}
