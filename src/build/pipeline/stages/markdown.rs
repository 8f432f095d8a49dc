//! Markdown rendering stage.

use crate::build::markdown::render_markdown;
use crate::build::pipeline::{PipelineContext, PipelineError, ProcessingArticle, Stage};

/// Stage that renders the markdown body to HTML.
///
/// After this stage, `article.html` holds the HTML fragment and
/// `article.toc_html` the table of contents.
pub struct MarkdownStage;

impl Stage for MarkdownStage {
    fn name(&self) -> &'static str {
        "markdown"
    }

    fn process(
        &self,
        article: &mut ProcessingArticle,
        ctx: &PipelineContext,
    ) -> Result<(), PipelineError> {
        let output = render_markdown(&article.body, ctx.markdown_options, ctx.highlighter);
        article.html = output.html;
        article.toc_html = output.toc_html;
        Ok(())
    }
}
