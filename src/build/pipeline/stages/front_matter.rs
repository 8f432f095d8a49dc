//! Front matter stage.

use crate::build::front_matter::parse_front_matter;
use crate::build::pipeline::{PipelineContext, PipelineError, ProcessingArticle, Stage};

/// Stage that splits front matter from the markdown body.
///
/// Never fails: unparseable front matter leaves the whole file as the body.
pub struct FrontMatterStage;

impl Stage for FrontMatterStage {
    fn name(&self) -> &'static str {
        "front_matter"
    }

    fn process(
        &self,
        article: &mut ProcessingArticle,
        _ctx: &PipelineContext,
    ) -> Result<(), PipelineError> {
        let parsed = parse_front_matter(&article.raw);
        article.front_matter = parsed.front_matter;
        article.body = parsed.content.to_string();
        Ok(())
    }
}
