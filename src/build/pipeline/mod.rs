//! Build pipeline for article processing.
//!
//! Each article moves through a series of stages:
//! 1. Load (read the file and its modification time)
//! 2. Front matter (split metadata from the markdown body)
//! 3. Markdown rendering (to HTML with TOC)
//! 4. Metadata (apply defaults, reading time, output path)
//! 5. Template rendering (article template wrapper)
//! 6. File writing (output to disk)
//!
//! Articles run through the pipeline one at a time, so a failing stage
//! only affects the article it was processing.

mod context;
mod document;
mod error;
mod stages;

pub use context::PipelineContext;
pub use document::ProcessingArticle;
pub use error::PipelineError;

use stages::{FrontMatterStage, LoadStage, MarkdownStage, MetadataStage, TemplateStage, WriteStage};

/// A stage in the article processing pipeline.
pub trait Stage: Send + Sync {
    /// Unique name for this stage (reported in errors).
    fn name(&self) -> &'static str;

    /// Process one article.
    ///
    /// The article is passed by mutable reference so stages can fill in
    /// the state later stages depend on.
    fn process(
        &self,
        article: &mut ProcessingArticle,
        ctx: &PipelineContext,
    ) -> Result<(), PipelineError>;
}

/// The article processing pipeline.
///
/// The default pipeline is: load → front_matter → markdown → metadata → template → write.
pub struct Pipeline {
    stages: Vec<Box<dyn Stage>>,
}

impl Pipeline {
    /// Create an empty pipeline with no stages.
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// Create the default pipeline with standard stages.
    pub fn default_pipeline() -> Self {
        let mut pipeline = Self::new();
        pipeline.add_stage(LoadStage);
        pipeline.add_stage(FrontMatterStage);
        pipeline.add_stage(MarkdownStage);
        pipeline.add_stage(MetadataStage);
        pipeline.add_stage(TemplateStage);
        pipeline.add_stage(WriteStage);
        pipeline
    }

    /// Add a stage to the end of the pipeline.
    pub fn add_stage<S: Stage + 'static>(&mut self, stage: S) -> &mut Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// Run every stage on one article, stopping at the first failure.
    pub fn run(
        &self,
        article: &mut ProcessingArticle,
        ctx: &PipelineContext,
    ) -> Result<(), PipelineError> {
        for stage in &self.stages {
            log::debug!("{}: {}", stage.name(), article.relative_path().display());
            stage.process(article, ctx)?;
        }
        Ok(())
    }

    /// Get the names of all stages in order.
    #[cfg(test)]
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::default_pipeline()
    }
}
