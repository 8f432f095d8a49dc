//! Article template rendering stage.

use crate::build::pipeline::{PipelineContext, PipelineError, ProcessingArticle, Stage};
use crate::build::render::ArticleContext;

/// Stage that renders the article template around the assembled article.
///
/// After this stage, `article.output_html` contains the complete HTML page.
pub struct TemplateStage;

impl Stage for TemplateStage {
    fn name(&self) -> &'static str {
        "template"
    }

    fn process(
        &self,
        article: &mut ProcessingArticle,
        ctx: &PipelineContext,
    ) -> Result<(), PipelineError> {
        let assembled = article.article.as_ref().ok_or_else(|| {
            PipelineError::stage(
                "template",
                format!(
                    "article '{}' was not assembled (was the metadata stage run?)",
                    article.relative_path().display()
                ),
            )
        })?;

        let html = ctx.renderer.render_article(&ArticleContext {
            article: assembled,
            site: &ctx.config.site,
        })?;

        article.output_html = Some(html);
        Ok(())
    }
}
