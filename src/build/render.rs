use std::path::Path;

use serde::Serialize;
use tera::{Context, Tera};

use super::article::{Article, ArticleSummary};
use crate::config::SiteConfig;

/// Layout template the page templates extend.
pub const BASE_TEMPLATE: &str = "base.html";
pub const ARTICLE_TEMPLATE: &str = "article.html";
pub const INDEX_TEMPLATE: &str = "index.html";

#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    #[error("template error: {}", error_chain(.0))]
    Template(#[from] tera::Error),

    #[error("template directory not found: {0}")]
    TemplateDirNotFound(String),

    #[error("required template '{0}' is missing")]
    MissingTemplate(&'static str),
}

/// Tera reports the useful detail (undefined variable, bad filter) in the
/// source chain, not the top-level message.
fn error_chain(error: &tera::Error) -> String {
    let mut message = error.to_string();
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// The template renderer, wrapping Tera.
pub struct Renderer {
    tera: Tera,
}

impl Renderer {
    /// Create a new renderer loading every `*.html` template under `template_dir`.
    pub fn new(template_dir: &Path) -> Result<Self, RenderError> {
        if !template_dir.is_dir() {
            return Err(RenderError::TemplateDirNotFound(
                template_dir.display().to_string(),
            ));
        }

        let glob = template_dir.join("**/*.html");
        let glob_str = glob.to_string_lossy();
        let tera = Tera::new(&glob_str)?;

        Self::from_tera(tera)
    }

    /// Create a renderer from in-memory templates.
    #[cfg(test)]
    pub fn from_raw(templates: &[(&str, &str)]) -> Result<Self, RenderError> {
        let mut tera = Tera::default();
        tera.add_raw_templates(templates.to_vec())?;
        Self::from_tera(tera)
    }

    fn from_tera(tera: Tera) -> Result<Self, RenderError> {
        for required in [ARTICLE_TEMPLATE, INDEX_TEMPLATE] {
            if !tera.get_template_names().any(|name| name == required) {
                return Err(RenderError::MissingTemplate(required));
            }
        }
        Ok(Self { tera })
    }

    /// Render an article page.
    pub fn render_article(&self, context: &ArticleContext) -> Result<String, RenderError> {
        self.render(ARTICLE_TEMPLATE, context)
    }

    /// Render the index page.
    pub fn render_index(&self, context: &IndexContext) -> Result<String, RenderError> {
        self.render(INDEX_TEMPLATE, context)
    }

    fn render<T: Serialize>(&self, name: &str, value: &T) -> Result<String, RenderError> {
        let context = Context::from_serialize(value)?;
        Ok(self.tera.render(name, &context)?)
    }
}

/// Context passed to `article.html`.
///
/// Article fields sit at the top level (`title`, `content`, `toc`, ...)
/// next to `site`.
#[derive(Debug, Serialize)]
pub struct ArticleContext<'a> {
    #[serde(flatten)]
    pub article: &'a Article,
    pub site: &'a SiteConfig,
}

/// Context passed to `index.html`.
#[derive(Debug, Serialize)]
pub struct IndexContext<'a> {
    pub site: &'a SiteConfig,
    pub title: &'a str,
    pub description: &'a str,
    /// The latest articles, newest first
    pub articles: &'a [ArticleSummary],
    pub featured_articles: &'a [ArticleSummary],
    pub total_articles: usize,
}
