//! Metadata enrichment stage.

use crate::build::article::ArticleMeta;
use crate::build::pipeline::{PipelineContext, PipelineError, ProcessingArticle, Stage};

/// Stage that applies defaults to the front matter and assembles the article.
pub struct MetadataStage;

impl Stage for MetadataStage {
    fn name(&self) -> &'static str {
        "metadata"
    }

    fn process(
        &self,
        article: &mut ProcessingArticle,
        ctx: &PipelineContext,
    ) -> Result<(), PipelineError> {
        let modified = article.modified.ok_or_else(|| {
            PipelineError::stage("metadata", "modification time unknown (was the load stage run?)")
        })?;

        let meta = ArticleMeta::resolve(
            &article.front_matter,
            &article.source.relative_path,
            modified,
            &article.body,
            &ctx.config.defaults,
            &ctx.config.paths.page_extension,
        );

        let assembled = article.assemble(meta)?;
        article.article = Some(assembled);
        Ok(())
    }
}
