//! Pipeline context for sharing state across stages.

use std::path::Path;

use pulldown_cmark::Options;

use crate::build::highlight::SyntaxHighlighter;
use crate::build::render::Renderer;
use crate::config::BlogConfig;

/// Shared, read-only context for pipeline stages.
pub struct PipelineContext<'a> {
    /// Directory where output files are written
    pub output_dir: &'a Path,

    /// Blog configuration (site metadata, defaults, page extension)
    pub config: &'a BlogConfig,

    /// Parser options derived from the markdown configuration
    pub markdown_options: Options,

    /// Syntax highlighter for code blocks
    pub highlighter: &'a SyntaxHighlighter,

    /// Template renderer
    pub renderer: &'a Renderer,
}

impl<'a> PipelineContext<'a> {
    pub fn new(
        output_dir: &'a Path,
        config: &'a BlogConfig,
        markdown_options: Options,
        highlighter: &'a SyntaxHighlighter,
        renderer: &'a Renderer,
    ) -> Self {
        Self {
            output_dir,
            config,
            markdown_options,
            highlighter,
            renderer,
        }
    }
}
