//! Article state carried through the pipeline.

use std::path::Path;
use std::time::SystemTime;

use crate::build::article::{Article, ArticleMeta, ArticleSource};
use crate::build::front_matter::FrontMatter;
use crate::build::pipeline::PipelineError;

/// An article being processed through the pipeline.
///
/// Fields are filled in as stages run:
///
/// 1. After load: `raw` and `modified`
/// 2. After front_matter: `front_matter` and `body` (markdown without the block)
/// 3. After markdown: `html` and `toc_html`
/// 4. After metadata: `article` (takes over `html` and `toc_html`)
/// 5. After template: `output_html`
#[derive(Debug)]
pub struct ProcessingArticle {
    pub source: ArticleSource,
    pub raw: String,
    pub modified: Option<SystemTime>,
    pub front_matter: FrontMatter,
    pub body: String,
    pub html: String,
    pub toc_html: String,
    pub article: Option<Article>,
    pub output_html: Option<String>,
}

impl ProcessingArticle {
    pub fn new(source: ArticleSource) -> Self {
        Self {
            source,
            raw: String::new(),
            modified: None,
            front_matter: FrontMatter::default(),
            body: String::new(),
            html: String::new(),
            toc_html: String::new(),
            article: None,
            output_html: None,
        }
    }

    pub fn relative_path(&self) -> &Path {
        &self.source.relative_path
    }

    /// Combine resolved metadata with the rendered body.
    pub fn assemble(&mut self, meta: ArticleMeta) -> Result<Article, PipelineError> {
        let extra = self
            .front_matter
            .extra
            .iter()
            .map(|(key, value)| {
                serde_json::to_value(value)
                    .map(|value| (key.clone(), value))
                    .map_err(|e| {
                        PipelineError::stage("metadata", format!("front matter key '{}': {}", key, e))
                    })
            })
            .collect::<Result<serde_json::Map<_, _>, _>>()?;

        Ok(Article {
            title: meta.title,
            content: std::mem::take(&mut self.html),
            toc: std::mem::take(&mut self.toc_html),
            date: meta.date,
            author: meta.author,
            description: meta.description,
            tags: meta.tags,
            category: meta.category,
            reading_time: meta.reading_time,
            file_path: meta.file_path,
            last_modified: meta.last_modified,
            url: meta.url,
            extra,
        })
    }

    /// The finished article. Fails if the metadata stage has not run.
    pub fn into_article(self) -> Result<Article, PipelineError> {
        let path = self.relative_path().display().to_string();
        self.article.ok_or_else(|| {
            PipelineError::stage(
                "metadata",
                format!("article '{}' has no metadata (was the metadata stage run?)", path),
            )
        })
    }
}
