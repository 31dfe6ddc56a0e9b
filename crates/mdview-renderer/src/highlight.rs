//! Syntax highlighting for fenced code blocks.
//!
//! The renderer only talks to the [`Highlighter`] trait. [`SyntectHighlighter`]
//! is the default implementation, backed by syntect's bundled grammars and
//! themes.

use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

/// Error raised by a highlighter.
#[derive(Debug, thiserror::Error)]
pub enum HighlightError {
    /// Requested theme is not bundled.
    #[error("unknown highlight theme: {0}")]
    UnknownTheme(String),

    /// The highlighting engine failed on a block.
    #[error("failed to highlight {language} block")]
    Engine {
        /// Language tag of the failing block.
        language: String,
        /// Underlying engine error.
        #[source]
        source: syntect::Error,
    },
}

/// Colorizes code for a language.
pub trait Highlighter: Send + Sync {
    /// Highlight `code` written in `language`.
    ///
    /// Returns `Ok(None)` when the language is not recognized, and
    /// `Ok(Some(html))` with a self-contained HTML fragment otherwise.
    fn highlight(&self, language: &str, code: &str) -> Result<Option<String>, HighlightError>;
}

/// [`Highlighter`] backed by syntect.
///
/// Languages are looked up by name or file extension, case-insensitively
/// (`javascript`, `js`, `Rust`, `rs`). Output uses inline styles from the
/// selected theme, so no extra stylesheet is needed.
pub struct SyntectHighlighter {
    syntaxes: SyntaxSet,
    theme: Theme,
}

impl SyntectHighlighter {
    /// Theme used by [`SyntectHighlighter::new`].
    pub const DEFAULT_THEME: &'static str = "InspiredGitHub";

    /// Create a highlighter with the default theme.
    #[must_use]
    pub fn new() -> Self {
        let mut themes = ThemeSet::load_defaults();
        Self {
            syntaxes: SyntaxSet::load_defaults_newlines(),
            theme: themes.themes.remove(Self::DEFAULT_THEME).unwrap_or_default(),
        }
    }

    /// Create a highlighter with a bundled theme.
    ///
    /// # Errors
    ///
    /// Returns [`HighlightError::UnknownTheme`] if no bundled theme has that name.
    pub fn with_theme(name: &str) -> Result<Self, HighlightError> {
        let mut themes = ThemeSet::load_defaults();
        let theme = themes
            .themes
            .remove(name)
            .ok_or_else(|| HighlightError::UnknownTheme(name.to_owned()))?;
        Ok(Self {
            syntaxes: SyntaxSet::load_defaults_newlines(),
            theme,
        })
    }

    /// Names of the bundled themes.
    #[must_use]
    pub fn theme_names() -> Vec<String> {
        ThemeSet::load_defaults().themes.into_keys().collect()
    }

    /// Whether `language` maps to a bundled grammar.
    #[must_use]
    pub fn supports(&self, language: &str) -> bool {
        self.syntaxes.find_syntax_by_token(language).is_some()
    }
}

impl Default for SyntectHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter for SyntectHighlighter {
    fn highlight(&self, language: &str, code: &str) -> Result<Option<String>, HighlightError> {
        let Some(syntax) = self.syntaxes.find_syntax_by_token(language) else {
            return Ok(None);
        };
        highlighted_html_for_string(code, &self.syntaxes, syntax, &self.theme)
            .map(Some)
            .map_err(|source| HighlightError::Engine {
                language: language.to_owned(),
                source,
            })
    }
}
