//! `mdview serve` command implementation.

use std::path::PathBuf;

use clap::Args;
use mdview_config::{CliSettings, Config};
use mdview_server::{run_server, server_config_from_config};

use crate::commands::document_request;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Path to configuration file (default: auto-discover mdview.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long)]
    port: Option<u16>,

    /// Origin the document path is resolved against (overrides config).
    #[arg(short, long, env = "MDVIEW_BASE")]
    base: Option<String>,

    /// Document path, URL or local file (overrides config).
    #[arg(long)]
    path: Option<String>,

    /// HTTP timeout in seconds for fetching the document (overrides config).
    #[arg(long)]
    timeout: Option<u64>,

    /// Syntax highlighting theme (overrides config).
    #[arg(long)]
    theme: Option<String>,

    /// Disable syntax highlighting.
    #[arg(long)]
    no_highlight: bool,

    /// Enable verbose output (request traces and fetch logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(self, version: &str) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            base: self.base,
            path: self.path,
            timeout_secs: self.timeout,
            theme: self.theme,
            highlight: self.no_highlight.then_some(false),
            host: self.host,
            port: self.port,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let request = document_request(&config)?;

        output.success(&format!(
            "Serving on http://{}:{}",
            config.server.host, config.server.port
        ));
        output.field("Document", &request.to_string());
        output.field(
            "Highlight",
            if config.render.highlight {
                config.render.theme.as_str()
            } else {
                "off"
            },
        );

        let server_config = server_config_from_config(&config, request, version.to_owned());
        run_server(server_config)
            .await
            .map_err(|e| CliError::Server(e.to_string()))?;

        Ok(())
    }
}
