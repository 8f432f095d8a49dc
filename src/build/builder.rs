use std::path::{Path, PathBuf};

use crate::config::BlogConfig;

use super::article::{Article, ArticleSource};
use super::assets::{AssetError, copy_static, write_highlight_css};
use super::highlight::SyntaxHighlighter;
use super::index::{IndexPage, sort_articles};
use super::markdown::{MarkdownError, markdown_options};
use super::pipeline::{Pipeline, PipelineContext, PipelineError, ProcessingArticle};
use super::render::{RenderError, Renderer};
use super::source::{SourceError, discover_articles};

#[derive(thiserror::Error, Debug)]
pub enum BuildError {
    #[error("source error: {0}")]
    Source(#[from] SourceError),

    #[error("render error: {0}")]
    Render(#[from] RenderError),

    #[error("markdown error: {0}")]
    Markdown(#[from] MarkdownError),

    #[error("asset error: {0}")]
    Asset(#[from] AssetError),

    #[error("failed to create output directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Why a single article was left out of the site.
#[derive(Debug)]
pub struct ArticleFailure {
    pub source: ArticleSource,
    pub error: PipelineError,
}

pub struct BuildResult {
    pub output_dir: PathBuf,
    /// Successfully built articles, newest first
    pub articles: Vec<Article>,
    pub failures: Vec<ArticleFailure>,
    /// Path of the written index, `None` if it failed
    pub index: Option<PathBuf>,
}

pub struct Builder {
    config: BlogConfig,
    pipeline: Pipeline,
}

impl Builder {
    pub fn new(config: BlogConfig) -> Self {
        Self {
            config,
            pipeline: Pipeline::default_pipeline(),
        }
    }

    pub fn build(&self) -> Result<BuildResult, BuildError> {
        // Build pipeline:
        // 1. Load renderer (templates) and markdown options; both are fatal
        // 2. Copy static assets
        // 3. Discover articles
        // 4. Run each article through the pipeline, keeping successes
        // 5. Sort and write the index
        let paths = &self.config.paths;

        let renderer = Renderer::new(&paths.templates)?;
        let markdown_options = markdown_options(&self.config.markdown)?;
        let highlighter = if self.config.markdown.highlight {
            SyntaxHighlighter::new(&self.config.markdown.highlight_theme)
        } else {
            SyntaxHighlighter::plain()
        };

        let output_dir = paths.output.clone();
        std::fs::create_dir_all(&output_dir).map_err(|source| BuildError::OutputDir {
            path: output_dir.clone(),
            source,
        })?;

        if let Some(copied) = copy_static(&paths.static_dir, &output_dir)? {
            log::info!(
                "copied {} static file(s) from {}",
                copied,
                paths.static_dir.display()
            );
        }

        let sources = discover_articles(&paths.content)?;
        log::info!(
            "found {} article(s) in {}",
            sources.len(),
            paths.content.display()
        );

        let ctx = PipelineContext::new(
            &output_dir,
            &self.config,
            markdown_options,
            &highlighter,
            &renderer,
        );

        let mut articles = Vec::with_capacity(sources.len());
        let mut failures = Vec::new();
        for source in sources {
            match self.build_article(source.clone(), &ctx) {
                Ok(article) => articles.push(article),
                Err(error) => {
                    log::error!("failed to build {}: {}", source.path.display(), error);
                    failures.push(ArticleFailure { source, error });
                }
            }
        }

        sort_articles(&mut articles);

        let index = match IndexPage::new(&articles).write(
            &renderer,
            &self.config.site,
            &self.config.index,
            &output_dir,
        ) {
            Ok(path) => {
                log::info!("wrote index {}", path.display());
                Some(path)
            }
            Err(e) => {
                log::error!("failed to build index: {}", e);
                None
            }
        };

        if let Some(css) = highlighter.css() {
            match write_highlight_css(&paths.static_dir, &output_dir, &css) {
                Ok(Some(path)) => log::debug!("wrote highlight stylesheet {}", path.display()),
                Ok(None) => log::debug!("static assets provide the highlight stylesheet"),
                Err(e) => log::error!("failed to write highlight stylesheet: {}", e),
            }
        }

        log::info!(
            "built {} article(s), {} failed, output in {}",
            articles.len(),
            failures.len(),
            display_path(&output_dir).display()
        );

        Ok(BuildResult {
            output_dir,
            articles,
            failures,
            index,
        })
    }

    fn build_article(
        &self,
        source: ArticleSource,
        ctx: &PipelineContext,
    ) -> Result<Article, PipelineError> {
        let mut article = ProcessingArticle::new(source);
        self.pipeline.run(&mut article, ctx)?;
        article.into_article()
    }
}

fn display_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::scaffold::write_default_templates;

    struct Site {
        _dir: tempfile::TempDir,
        config: BlogConfig,
    }

    fn site() -> Site {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        let mut config = BlogConfig::default();
        config.paths.content = root.join("content");
        config.paths.output = root.join("public");
        config.paths.templates = root.join("templates");
        config.paths.static_dir = root.join("static");
        config.markdown.highlight = false;

        std::fs::create_dir_all(&config.paths.content).unwrap();
        write_default_templates(&config.paths.templates, false).unwrap();

        Site { _dir: dir, config }
    }

    fn write(path: &Path, content: &[u8]) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    fn count_html(dir: &Path) -> usize {
        std::fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .map(|path| {
                if path.is_dir() {
                    count_html(&path)
                } else if path.extension().is_some_and(|ext| ext == "html") {
                    1
                } else {
                    0
                }
            })
            .sum()
    }

    #[test]
    fn test_end_to_end_with_one_failing_article() {
        let site = site();
        let content = &site.config.paths.content;

        for i in 1..=12 {
            let dir = if i % 2 == 0 { "tutorials" } else { "notes" };
            let body = format!(
                "---\ntitle: Post {i}\ndate: 2024-01-{i:02}\ntags: [t{i}]\n---\n# Heading {i}\n\nSome text for post {i}.\n"
            );
            write(&content.join(dir).join(format!("post-{i:02}.md")), body.as_bytes());
        }
        // Not valid UTF-8, so loading fails.
        write(&content.join("broken.md"), &[0xff, 0xfe, 0x00, 0x80]);

        let result = Builder::new(site.config.clone()).build().unwrap();

        assert_eq!(result.articles.len(), 12);
        assert_eq!(result.failures.len(), 1);
        assert_eq!(result.failures[0].source.relative_path, PathBuf::from("broken.md"));
        assert!(matches!(result.failures[0].error, PipelineError::Read { .. }));

        // 12 article pages plus the index.
        let output = &site.config.paths.output;
        assert_eq!(count_html(output), 13);
        assert!(output.join("tutorials/post-02.html").exists());
        assert!(output.join("notes/post-01.html").exists());
        assert!(!output.join("broken.html").exists());

        let dates: Vec<&str> = result.articles.iter().map(|a| a.date.as_str()).collect();
        assert_eq!(dates[0], "2024-01-12");
        assert_eq!(dates[11], "2024-01-01");

        let index = std::fs::read_to_string(result.index.unwrap()).unwrap();
        assert_eq!(index.matches("class=\"featured-article\"").count(), 3);
        assert_eq!(index.matches("class=\"latest-article\"").count(), 10);
        assert!(index.contains("data-total=\"12\""));
        assert!(index.contains("Post 12"));
        assert!(!index.contains("Post 2<"));
    }

    #[test]
    fn test_article_defaults_and_page_content() {
        let site = site();
        write(
            &site.config.paths.content.join("getting-started.md"),
            b"# Install\n\nRun the installer.\n\n## Verify\n\nCheck the version.\n",
        );

        let result = Builder::new(site.config.clone()).build().unwrap();
        let article = &result.articles[0];
        assert_eq!(article.title, "Getting Started");
        assert_eq!(article.author, "Anonymous");
        assert_eq!(article.category, "Tutorial");
        assert_eq!(article.reading_time, 1);
        assert_eq!(article.url, "getting-started.html");
        assert_eq!(article.date.len(), 10);

        let page =
            std::fs::read_to_string(site.config.paths.output.join("getting-started.html")).unwrap();
        assert!(page.contains("<h1 id=\"install\">Install</h1>"));
        assert!(page.contains("<a href=\"#verify\">Verify</a>"));
        assert!(page.contains("<title>Getting Started"));
    }

    #[test]
    fn test_template_error_skips_only_that_article() {
        let site = site();
        let templates = &site.config.paths.templates;
        write(
            &templates.join("article.html"),
            b"{% if title == \"Bad\" %}{{ not_defined }}{% endif %}{{ title }}",
        );
        write(&site.config.paths.content.join("a.md"), b"---\ntitle: Good\n---\nok");
        write(&site.config.paths.content.join("b.md"), b"---\ntitle: Bad\n---\nok");

        let result = Builder::new(site.config.clone()).build().unwrap();
        assert_eq!(result.articles.len(), 1);
        assert_eq!(result.failures.len(), 1);
        assert!(matches!(result.failures[0].error, PipelineError::Render(_)));
        assert!(site.config.paths.output.join("a.html").exists());
        assert!(!site.config.paths.output.join("b.html").exists());
    }

    #[test]
    fn test_index_failure_is_not_fatal() {
        let site = site();
        write(
            &site.config.paths.templates.join("index.html"),
            b"{{ undefined_index_variable }}",
        );
        write(&site.config.paths.content.join("a.md"), b"hello");

        let result = Builder::new(site.config.clone()).build().unwrap();
        assert_eq!(result.articles.len(), 1);
        assert!(result.index.is_none());
        assert!(!site.config.paths.output.join("index.html").exists());
    }

    #[test]
    fn test_missing_template_dir_is_fatal() {
        let mut site = site();
        site.config.paths.templates = site.config.paths.templates.join("missing");

        let result = Builder::new(site.config.clone()).build();
        assert!(matches!(
            result,
            Err(BuildError::Render(RenderError::TemplateDirNotFound(_)))
        ));
    }

    #[test]
    fn test_invalid_markdown_extension_is_fatal() {
        let mut site = site();
        site.config.markdown.extensions.push("bogus".to_string());

        let result = Builder::new(site.config.clone()).build();
        assert!(matches!(result, Err(BuildError::Markdown(_))));
    }

    #[test]
    fn test_static_assets_are_copied() {
        let site = site();
        write(&site.config.paths.static_dir.join("css/style.css"), b"body {}");

        Builder::new(site.config.clone()).build().unwrap();
        assert!(site.config.paths.output.join("static/css/style.css").exists());
    }

    #[test]
    fn test_highlight_theme_change_applies_on_rebuild() {
        let mut site = site();
        site.config.markdown.highlight = true;
        site.config.markdown.highlight_theme = "dracula".to_string();
        write(&site.config.paths.content.join("a.md"), b"```rust\nfn main() {}\n```\n");
        let css_path = site.config.paths.output.join("static/css/highlight.css");

        Builder::new(site.config.clone()).build().unwrap();
        let first = std::fs::read_to_string(&css_path).unwrap();
        assert_eq!(Some(first.clone()), SyntaxHighlighter::new("dracula").css());

        site.config.markdown.highlight_theme = "github_light".to_string();
        Builder::new(site.config.clone()).build().unwrap();
        let second = std::fs::read_to_string(&css_path).unwrap();
        assert_ne!(first, second);
        assert_eq!(Some(second), SyntaxHighlighter::new("github_light").css());
    }

    #[test]
    fn test_highlight_css_failure_is_not_fatal() {
        let mut site = site();
        site.config.markdown.highlight = true;
        // Copied to public/static/css as a file, so the stylesheet directory can't be created.
        write(&site.config.paths.static_dir.join("css"), b"not a directory");
        write(&site.config.paths.content.join("a.md"), b"hello");

        let result = Builder::new(site.config.clone()).build().unwrap();
        assert_eq!(result.articles.len(), 1);
        assert!(result.index.is_some());
        assert!(site.config.paths.output.join("static/css").is_file());
    }
}
