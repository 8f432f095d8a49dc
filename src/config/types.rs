//! Configuration type definitions.
//!
//! These types are pure data: every section has serde defaults so an empty
//! (or missing) `mdblog.yaml` yields a usable configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level blog configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BlogConfig {
    /// Site metadata shown on the index page
    pub site: SiteConfig,
    /// Input and output locations
    pub paths: PathsConfig,
    /// Per-article fallbacks for missing front matter
    pub defaults: ArticleDefaults,
    /// Index page sizing
    pub index: IndexConfig,
    /// Markdown processing configuration
    pub markdown: MarkdownConfig,
}

// =============================================================================
// Site
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub title: String,
    pub description: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "My Blog".to_string(),
            description: String::new(),
        }
    }
}

// =============================================================================
// Paths
// =============================================================================

/// Directory layout. Relative paths are resolved against the working directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Root directory holding the markdown articles
    pub content: PathBuf,
    /// Directory the generated site is written to
    pub output: PathBuf,
    /// Directory holding `base.html`, `index.html` and `article.html`
    pub templates: PathBuf,
    /// Static assets copied verbatim to `<output>/static`
    pub static_dir: PathBuf,
    /// Extension given to generated pages
    pub page_extension: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            content: PathBuf::from("content"),
            output: PathBuf::from("public"),
            templates: PathBuf::from("templates"),
            static_dir: PathBuf::from("static"),
            page_extension: "html".to_string(),
        }
    }
}

// =============================================================================
// Article defaults
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArticleDefaults {
    pub author: String,
    pub category: String,
    /// Reading speed used for the reading time estimate
    pub words_per_minute: u32,
}

impl Default for ArticleDefaults {
    fn default() -> Self {
        Self {
            author: "Anonymous".to_string(),
            category: "Tutorial".to_string(),
            words_per_minute: 200,
        }
    }
}

// =============================================================================
// Index
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// How many articles the "latest" list shows
    pub latest: usize,
    /// How many articles are featured at the top of the index
    pub featured: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            latest: 10,
            featured: 3,
        }
    }
}

// =============================================================================
// Markdown
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkdownConfig {
    /// Extensions to enable for markdown processing
    #[serde(default = "default_markdown_extensions")]
    pub extensions: Vec<String>,
    /// Run fenced code blocks through the syntax highlighter
    #[serde(default = "default_true")]
    pub highlight: bool,
    /// Theme used to generate the highlighting stylesheet
    #[serde(default = "default_highlight_theme")]
    pub highlight_theme: String,
}

fn default_markdown_extensions() -> Vec<String> {
    vec![
        "footnotes".to_string(),
        "heading_attributes".to_string(),
        "strikethrough".to_string(),
        "tables".to_string(),
        "tasklists".to_string(),
    ]
}

fn default_true() -> bool {
    true
}

fn default_highlight_theme() -> String {
    "dracula".to_string()
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            extensions: default_markdown_extensions(),
            highlight: true,
            highlight_theme: default_highlight_theme(),
        }
    }
}
