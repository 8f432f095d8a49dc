//! Default pipeline stages.
//!
//! The standard article processing pipeline consists of:
//!
//! 1. **LoadStage** - Read the source file and its modification time
//! 2. **FrontMatterStage** - Split YAML front matter from the body
//! 3. **MarkdownStage** - Convert markdown to HTML with syntax highlighting
//! 4. **MetadataStage** - Apply defaults and derive reading time and output path
//! 5. **TemplateStage** - Wrap content in the article template
//! 6. **WriteStage** - Write final HTML to output directory

mod front_matter;
mod load;
mod markdown;
mod metadata;
mod template;
mod write;

pub use front_matter::FrontMatterStage;
pub use load::LoadStage;
pub use markdown::MarkdownStage;
pub use metadata::MetadataStage;
pub use template::TemplateStage;
pub use write::WriteStage;
