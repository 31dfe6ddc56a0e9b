//! `mdview render` command implementation.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use mdview_config::{CliSettings, Config};
use mdview_loader::{DefaultTransport, DocumentLoader, DocumentRequest, DocumentState};
use mdview_renderer::render_page;

use crate::commands::{document_renderer, document_request};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Path to configuration file (default: auto-discover mdview.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Origin the document path is resolved against (overrides config).
    #[arg(short, long, env = "MDVIEW_BASE")]
    base: Option<String>,

    /// Document path, URL or local file (overrides config).
    #[arg(short, long)]
    path: Option<String>,

    /// HTTP timeout in seconds for fetching the document (overrides config).
    #[arg(long)]
    timeout: Option<u64>,

    /// Write HTML to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Syntax highlighting theme (overrides config).
    #[arg(long)]
    theme: Option<String>,

    /// Disable syntax highlighting.
    #[arg(long)]
    no_highlight: bool,

    /// Emit only the document HTML, without the page wrapper.
    #[arg(long)]
    fragment: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, the document cannot be
    /// loaded, or the output cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            base: self.base,
            path: self.path,
            timeout_secs: self.timeout,
            theme: self.theme,
            highlight: self.no_highlight.then_some(false),
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let request = document_request(&config)?;
        let renderer = document_renderer(&config)?;
        let loader = DocumentLoader::new(Arc::new(DefaultTransport::new(config.http.timeout())));

        let content = loaded_content(loader.resolve(&request), &request)?;

        let view = renderer.render(&content);
        let html = if self.fragment {
            view.to_html()
        } else {
            render_page(&view)
        };

        match &self.output {
            Some(path) => {
                std::fs::write(path, &html)?;
                output.success(&format!("Wrote {}", path.display()));
                output.field("Title", view.title.as_deref().unwrap_or("(none)"));
                output.field("Sections", &view.toc.len().to_string());
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(html.as_bytes())?;
                stdout.flush()?;
            }
        }

        Ok(())
    }
}

/// Content of a resolved document, or the error that stopped it.
fn loaded_content(state: DocumentState, request: &DocumentRequest) -> Result<String, CliError> {
    match state {
        DocumentState::Loaded(content) => Ok(content),
        DocumentState::Failed(err) => Err(CliError::Fetch(err)),
        DocumentState::Pending => Err(CliError::NotLoaded(request.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn args(dir: &TempDir, path: &str) -> RenderArgs {
        let config = dir.path().join("mdview.toml");
        std::fs::write(&config, format!("[document]\npath = \"{path}\"\n")).unwrap();
        RenderArgs {
            config: Some(config),
            base: None,
            path: None,
            timeout: None,
            output: Some(dir.path().join("out.html")),
            theme: None,
            no_highlight: false,
            fragment: false,
            verbose: false,
        }
    }

    #[test]
    fn test_render_local_document_to_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("doc.md"),
            "# Functional Programming\n\n[TOC]\n\n## Map\n\n```rust\nlet v = vec![1];\n```\n",
        )
        .unwrap();

        args(&dir, "doc.md").execute().unwrap();

        let html = std::fs::read_to_string(dir.path().join("out.html")).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Functional Programming</title>"));
        assert!(html.contains(r##"<a href="#map">Map</a>"##));
        assert!(html.contains(r#"data-language="rust""#));
    }

    #[test]
    fn test_render_fragment_without_highlighting() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("doc.md"), "```rust\nfn f() {}\n```\n").unwrap();

        let mut args = args(&dir, "doc.md");
        args.fragment = true;
        args.no_highlight = true;
        args.execute().unwrap();

        let html = std::fs::read_to_string(dir.path().join("out.html")).unwrap();
        assert_eq!(
            html,
            "<pre><code class=\"language-rust\">fn f() {}\n</code></pre>"
        );
    }

    #[test]
    fn test_render_document_in_directory_with_space() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("My Docs")).unwrap();
        std::fs::write(dir.path().join("My Docs/doc.md"), "# Spaced Out\n").unwrap();

        args(&dir, "My Docs/doc.md").execute().unwrap();

        let html = std::fs::read_to_string(dir.path().join("out.html")).unwrap();
        assert!(html.contains("<title>Spaced Out</title>"));
    }

    #[test]
    fn test_pending_state_is_not_loaded_error() {
        let request = DocumentRequest::new("doc.md", "https://example.com/");
        let err = loaded_content(DocumentState::Pending, &request).unwrap_err();
        assert!(matches!(err, CliError::NotLoaded(_)));
        assert_eq!(
            err.to_string(),
            "https://example.com/doc.md did not finish loading"
        );
    }

    #[test]
    fn test_render_missing_document_fails() {
        let dir = TempDir::new().unwrap();
        let err = args(&dir, "missing.md").execute().unwrap_err();
        assert!(matches!(err, CliError::Fetch(_)));
        assert!(err.to_string().contains("HTTP 404"));
        assert!(!dir.path().join("out.html").exists());
    }
}
