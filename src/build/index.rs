//! Index page assembly.
//!
//! Articles are ordered by comparing their `date` strings, newest first.
//! That is only chronological for `YYYY-MM-DD`-style dates; anything else
//! sorts lexically and is flagged in the debug log.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use super::article::{Article, ArticleSummary};
use super::render::{IndexContext, RenderError, Renderer};
use crate::config::{IndexConfig, SiteConfig};

#[derive(thiserror::Error, Debug)]
pub enum IndexError {
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Sort articles by date descending. Equal dates keep their discovery order.
pub fn sort_articles(articles: &mut [Article]) {
    for article in articles.iter() {
        if !looks_like_iso_date(&article.date) {
            log::debug!(
                "{}: date '{}' is not YYYY-MM-DD, index order may be off",
                article.file_path,
                article.date
            );
        }
    }
    articles.sort_by(|a, b| b.date.cmp(&a.date));
}

fn looks_like_iso_date(date: &str) -> bool {
    date.get(..10)
        .is_some_and(|day| NaiveDate::parse_from_str(day, "%Y-%m-%d").is_ok())
}

/// The index view over a sorted article list.
#[derive(Debug)]
pub struct IndexPage {
    summaries: Vec<ArticleSummary>,
}

impl IndexPage {
    /// Build the view from articles already in index order.
    pub fn new(sorted: &[Article]) -> Self {
        Self {
            summaries: sorted.iter().map(Article::summary).collect(),
        }
    }

    /// The first `count` articles.
    pub fn latest(&self, count: usize) -> &[ArticleSummary] {
        &self.summaries[..count.min(self.summaries.len())]
    }

    /// The articles highlighted at the top of the index.
    pub fn featured(&self, count: usize) -> &[ArticleSummary] {
        self.latest(count)
    }

    pub fn total(&self) -> usize {
        self.summaries.len()
    }

    pub fn context<'a>(&'a self, site: &'a SiteConfig, config: &IndexConfig) -> IndexContext<'a> {
        IndexContext {
            site,
            title: &site.title,
            description: &site.description,
            articles: self.latest(config.latest),
            featured_articles: self.featured(config.featured),
            total_articles: self.total(),
        }
    }

    /// Render `index.html` into the output root.
    pub fn write(
        &self,
        renderer: &Renderer,
        site: &SiteConfig,
        config: &IndexConfig,
        output_dir: &Path,
    ) -> Result<PathBuf, IndexError> {
        let html = renderer.render_index(&self.context(site, config))?;
        let path = output_dir.join("index.html");
        std::fs::write(&path, html).map_err(|source| IndexError::Write {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}
