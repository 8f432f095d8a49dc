use autumnus::{HtmlLinkedBuilder, formatter::Formatter, languages::Language, themes};

use crate::util::html_escape;

/// A syntax highlighter using autumnus (tree-sitter based).
///
/// Highlighted blocks carry CSS classes; the matching stylesheet comes from
/// [`SyntaxHighlighter::css`].
pub struct SyntaxHighlighter {
    enabled: bool,
    theme_name: String,
}

impl SyntaxHighlighter {
    /// Create a highlighter that styles code with the given theme.
    pub fn new(theme_name: &str) -> Self {
        Self {
            enabled: true,
            theme_name: theme_name.to_string(),
        }
    }

    /// A highlighter that only escapes code and tags its language.
    pub fn plain() -> Self {
        Self {
            enabled: false,
            theme_name: String::new(),
        }
    }

    /// Highlight code and return HTML with CSS classes.
    ///
    /// Falls back to a plain `<pre><code>` block when highlighting is disabled,
    /// the language is not recognized, or the formatter fails.
    pub fn highlight(&self, code: &str, language: &str) -> String {
        if !self.enabled {
            return plain_code_block(code, language);
        }

        let lang = Language::guess(language, code);
        if matches!(lang, Language::PlainText)
            && !language.is_empty()
            && language != "plaintext"
            && language != "text"
        {
            return plain_code_block(code, language);
        }

        let formatter = match HtmlLinkedBuilder::new().source(code).lang(lang).build() {
            Ok(formatter) => formatter,
            Err(_) => {
                log::debug!("highlighter rejected {} block", language);
                return plain_code_block(code, language);
            }
        };

        let mut output: Vec<u8> = Vec::new();
        if formatter.format(&mut output).is_err() {
            return plain_code_block(code, language);
        }
        match String::from_utf8(output) {
            Ok(html) => format!("<div class=\"highlight\">{}</div>", html),
            Err(_) => plain_code_block(code, language),
        }
    }

    /// Stylesheet for the configured theme, if highlighting is on and the theme exists.
    pub fn css(&self) -> Option<String> {
        if !self.enabled {
            return None;
        }
        match themes::get(&self.theme_name) {
            Ok(theme) => Some(theme.css(false)),
            Err(_) => {
                log::warn!("unknown highlight theme '{}', no stylesheet written", self.theme_name);
                None
            }
        }
    }
}

impl Default for SyntaxHighlighter {
    fn default() -> Self {
        Self::new("dracula")
    }
}

/// Create a plain code block without highlighting.
fn plain_code_block(code: &str, language: &str) -> String {
    let escaped = html_escape(code);
    if language.is_empty() {
        format!("<pre><code>{}</code></pre>\n", escaped)
    } else {
        format!(
            "<pre><code class=\"language-{}\">{}</code></pre>\n",
            html_escape(language),
            escaped
        )
    }
}
