//! File writing stage.

use crate::build::article::output_relative_path;
use crate::build::pipeline::{PipelineContext, PipelineError, ProcessingArticle, Stage};

/// Stage that writes the rendered page to the output directory.
///
/// The output path mirrors the source path under the output root,
/// creating any necessary parent directories.
pub struct WriteStage;

impl Stage for WriteStage {
    fn name(&self) -> &'static str {
        "write"
    }

    fn process(
        &self,
        article: &mut ProcessingArticle,
        ctx: &PipelineContext,
    ) -> Result<(), PipelineError> {
        let html = article.output_html.as_ref().ok_or_else(|| {
            PipelineError::stage(
                "write",
                format!(
                    "article '{}' has no output HTML (was template stage run?)",
                    article.relative_path().display()
                ),
            )
        })?;

        let output_path = ctx.output_dir.join(output_relative_path(
            article.relative_path(),
            &ctx.config.paths.page_extension,
        ));
        let write_err = |source| PipelineError::Write {
            path: output_path.clone(),
            source,
        };

        if let Some(parent) = output_path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        std::fs::write(&output_path, html).map_err(write_err)?;

        log::info!("wrote {}", output_path.display());
        Ok(())
    }
}
