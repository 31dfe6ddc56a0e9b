//! CLI command implementations.

pub(crate) mod render;
pub(crate) mod serve;

pub(crate) use render::RenderArgs;
pub(crate) use serve::ServeArgs;

use std::path::Path;

use mdview_config::Config;
use mdview_loader::DocumentRequest;
use mdview_renderer::{DocumentRenderer, SyntectHighlighter};
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

use crate::error::CliError;

/// Characters escaped when a local path becomes a `file://` URL path.
const FILE_URL_PATH: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Build the document request described by the configuration.
///
/// With an empty `document.base`, a path that is not a URL names a local
/// file. It is resolved against the config file's directory (or the current
/// directory without a config file) and fetched as a percent-encoded
/// `file://` URL.
pub(crate) fn document_request(config: &Config) -> Result<DocumentRequest, CliError> {
    let document = &config.document;
    if !document.base.is_empty() || document.path.contains("://") {
        return Ok(DocumentRequest::new(
            document.path.as_str(),
            document.base.as_str(),
        ));
    }

    let path = Path::new(&document.path);
    let path = match config.config_dir() {
        Some(dir) if path.is_relative() => dir.join(path),
        _ => path.to_path_buf(),
    };
    let absolute = std::path::absolute(&path)?;
    let encoded = utf8_percent_encode(&absolute.to_string_lossy(), FILE_URL_PATH).to_string();
    Ok(DocumentRequest::relative(format!("file://{encoded}")))
}

/// Build the renderer described by the configuration.
pub(crate) fn document_renderer(config: &Config) -> Result<DocumentRenderer, CliError> {
    let renderer = DocumentRenderer::new();
    if !config.render.highlight {
        return Ok(renderer);
    }
    let highlighter = SyntectHighlighter::with_theme(&config.render.theme)?;
    Ok(renderer.with_highlighter(highlighter))
}
