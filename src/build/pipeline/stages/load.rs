//! Source loading stage.

use crate::build::pipeline::{PipelineContext, PipelineError, ProcessingArticle, Stage};

/// Stage that reads the article from disk.
///
/// The file must be valid UTF-8. The modification time feeds the date
/// defaults in the metadata stage.
pub struct LoadStage;

impl Stage for LoadStage {
    fn name(&self) -> &'static str {
        "load"
    }

    fn process(
        &self,
        article: &mut ProcessingArticle,
        _ctx: &PipelineContext,
    ) -> Result<(), PipelineError> {
        let path = &article.source.path;
        let read_err = |source| PipelineError::Read {
            path: path.clone(),
            source,
        };

        let raw = std::fs::read_to_string(path).map_err(read_err)?;
        let modified = std::fs::metadata(path)
            .and_then(|meta| meta.modified())
            .map_err(read_err)?;

        article.raw = raw;
        article.modified = Some(modified);
        Ok(())
    }
}
