//! Post-processing of runner output for terminal display.

#[cfg(feature = "highlight")]
use syntect::{
    easy::HighlightLines,
    highlighting::{Theme, ThemeSet},
    parsing::SyntaxSet,
    util::{as_24_bit_terminal_escaped, LinesWithEndings},
};
use tracing::debug;

/// Remove code-fence markers from a generated command.
///
/// The language-tagged marker goes first so its tag does not survive the
/// generic pass.
pub fn strip_fences(output: &str) -> String {
    output
        .replace("```zsh", "")
        .replace("```", "")
        .trim()
        .to_string()
}

/// Markdown highlighter rendering to 24-bit terminal escapes.
#[cfg(feature = "highlight")]
pub struct Highlighter {
    syntaxes: SyntaxSet,
    theme: Theme,
}

/// Placeholder when built without the `highlight` feature; never acquired.
#[cfg(not(feature = "highlight"))]
pub struct Highlighter {
    _private: (),
}

#[cfg(feature = "highlight")]
impl Highlighter {
    /// Try to load the Markdown grammar and the named theme.
    pub fn acquire(theme_name: &str) -> Option<Self> {
        let syntaxes = SyntaxSet::load_defaults_newlines();
        if syntaxes.find_syntax_by_name("Markdown").is_none() {
            debug!("Markdown syntax unavailable, explanations will be plain text");
            return None;
        }
        let Some(theme) = ThemeSet::load_defaults().themes.remove(theme_name) else {
            debug!("Unknown highlight theme {}, explanations will be plain text", theme_name);
            return None;
        };
        Some(Self { syntaxes, theme })
    }

    /// Highlight `text` as Markdown. Returns `None` if the grammar fails on the input.
    pub fn highlight(&self, text: &str) -> Option<String> {
        let syntax = self.syntaxes.find_syntax_by_name("Markdown")?;
        let mut lines = HighlightLines::new(syntax, &self.theme);
        let mut rendered = String::with_capacity(text.len() * 2);

        for line in LinesWithEndings::from(text) {
            let ranges = match lines.highlight_line(line, &self.syntaxes) {
                Ok(ranges) => ranges,
                Err(e) => {
                    debug!("Highlighting failed: {}", e);
                    return None;
                }
            };
            rendered.push_str(&as_24_bit_terminal_escaped(&ranges[..], false));
        }

        // Reset so colors do not leak into the prompt
        rendered.push_str("\x1b[0m");
        Some(rendered)
    }
}

#[cfg(not(feature = "highlight"))]
impl Highlighter {
    pub fn acquire(_theme_name: &str) -> Option<Self> {
        debug!("Built without highlighting support");
        None
    }

    pub fn highlight(&self, _text: &str) -> Option<String> {
        None
    }
}

/// Render an explanation, falling back to the raw text without a highlighter.
pub fn render_explanation(text: &str, highlighter: Option<&Highlighter>) -> String {
    highlighter
        .and_then(|h| h.highlight(text))
        .unwrap_or_else(|| text.to_string())
}
